// main.rs - CLI entry point

use std::path::Path;
use std::time::Instant;
use alifilter::cli::Config;
use alifilter::output::{write_alignment, write_features, write_mask, write_scores};
use alifilter::prelude::*;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run_main() {
        eprintln!("❌ ERROR: {}", e);
        std::process::exit(1);
    }
}

fn run_main() -> Result<(), String> {
    let mut args: Args = argh::from_env();
    let command_line = std::env::args().collect::<Vec<String>>().join(" ");

    // Handle generate config first
    if args.generate_config {
        let sample_config = Config::generate_sample();
        println!("{}", sample_config);
        eprintln!("💡 Save this content to a .toml file and use --config /path/to/config.toml");
        return Ok(());
    }

    // Load configuration file if specified
    if let Some(config_path) = args.config.clone() {
        args = args.with_config_file(&config_path)?;
    }

    let validation_result = validate_args(&args)?;

    eprintln!("🚀 alifilter v{}", env!("CARGO_PKG_VERSION"));

    // Configure thread pool
    if let Some(n) = args.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(n)
            .build_global()
            .map_err(|e| format!("Failed to configure thread pool: {}", e))?;
        eprintln!("🧵 Threads: {}", n);
    } else {
        eprintln!("🧵 Threads: {} (auto-detected)", rayon::current_num_threads());
    }

    let total_start = Instant::now();

    let alignment = load_alignment(
        Path::new(&validation_result.alignment_path),
        validation_result.alignment_format,
    )?;
    eprintln!(
        "🧬 Alignment: {} sequences × {} columns",
        alignment.sequence_count(),
        alignment.alignment_length()
    );

    let mut model = match &args.model {
        Some(model_path) => {
            let model = Model::from_file(model_path)?;
            eprintln!("📐 Model: {}", model_path);
            model
        }
        None => {
            eprintln!("⚠️  Warning: No model given - every column scores 0.5");
            Model::default()
        }
    };

    if let Some(threshold) = validation_result.threshold {
        model = model.with_threshold(threshold);
        eprintln!("🎚️  Threshold: {} (override)", threshold);
    } else {
        eprintln!("🎚️  Threshold: {}", model.threshold);
    }

    if args.dry_run {
        eprintln!("✅ Dry run completed successfully");
        return Ok(());
    }

    eprintln!("🔄 Computing column features...");
    let features = extract_features(&alignment).map_err(|e| e.to_string())?;

    eprintln!("🔄 Scoring columns...");
    let scores = score(&model, &features).map_err(|e| e.to_string())?;
    let mask = mask_from_scores(&model, &scores).map_err(|e| e.to_string())?;

    // Fail before any output is written
    let filtered = filtered_alignment(&alignment, &mask, args.filtered_out.as_deref())?;

    if let Some(path) = &args.features_out {
        write_features(path, &features, &command_line)?;
        eprintln!("📁 Features saved to: {}", path);
    }

    if let Some(path) = &args.scores_out {
        write_scores(path, &scores, &mask, &command_line)?;
        eprintln!("📁 Scores saved to: {}", path);
    }

    match &args.output {
        Some(path) => {
            write_mask(path, &mask)?;
            eprintln!("📁 Mask saved to: {}", path);
        }
        None => println!("{}", mask),
    }

    if let Some((path, filtered)) = filtered {
        write_alignment(path, &filtered, validation_result.output_format)?;
        eprintln!("📁 Filtered alignment saved to: {}", path);
    }

    eprintln!(
        "\n🎉 Kept {} of {} columns ({} discarded) in {:.2?}",
        mask.kept(),
        mask.len(),
        mask.discarded(),
        total_start.elapsed()
    );
    Ok(())
}

/// Filtered alignment to write to `path`, if one was requested
fn filtered_alignment<'a>(
    alignment: &Alignment,
    mask: &Mask,
    path: Option<&'a str>,
) -> Result<Option<(&'a str, Alignment)>, String> {
    match path {
        Some(path) => {
            let filtered = alignment
                .filter_columns(mask)
                .map_err(|e| format!("Cannot write filtered alignment '{}': {}", path, e))?;
            Ok(Some((path, filtered)))
        }
        None => Ok(None),
    }
}
