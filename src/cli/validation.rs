// validation.rs - Input validation utilities

use std::path::Path;
use std::str::FromStr;
use crate::cli::args::Args;
use crate::data::AlignmentFormat;

pub struct ValidationResult {
    pub alignment_path: String,
    pub alignment_format: AlignmentFormat,
    pub output_format: AlignmentFormat,
    pub threshold: Option<f64>,
}

/// Validate all command line arguments
pub fn validate_args(args: &Args) -> Result<ValidationResult, String> {
    let alignment_path = args
        .alignment
        .clone()
        .ok_or("--alignment is required (or set 'alignment' in the config file)")?;

    if !Path::new(&alignment_path).is_file() {
        return Err(format!("Alignment file not found: {}", alignment_path));
    }

    if let Some(model_path) = &args.model {
        if !Path::new(model_path).is_file() {
            return Err(format!("Model file not found: {}", model_path));
        }
    }

    let alignment_format = AlignmentFormat::from_str(&args.format)?;
    let output_format = AlignmentFormat::from_str(&args.output_format)?;

    if let Some(threshold) = args.threshold {
        if !(0.0..=1.0).contains(&threshold) {
            return Err("Threshold must be between 0.0 and 1.0".to_string());
        }
    }

    if args.threads == Some(0) {
        return Err("Number of threads must be at least 1".to_string());
    }

    Ok(ValidationResult {
        alignment_path,
        alignment_format,
        output_format,
        threshold: args.threshold,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use argh::FromArgs;

    fn existing_file(name: &str) -> String {
        let path = std::env::temp_dir().join(format!("alifilter-validation-{}-{}", std::process::id(), name));
        std::fs::write(&path, "2 1\na A\nb A\n").unwrap();
        path.to_string_lossy().into_owned()
    }

    fn parse(args: &[&str]) -> Args {
        Args::from_args(&["alifilter"], args).unwrap()
    }

    #[test]
    fn test_valid_arguments() {
        let alignment = existing_file("ok.phy");
        let args = parse(&["--alignment", &alignment, "--threshold", "0.25", "--output-format", "fasta"]);

        let result = validate_args(&args).unwrap();
        assert_eq!(result.alignment_path, alignment);
        assert_eq!(result.alignment_format, AlignmentFormat::Auto);
        assert_eq!(result.output_format, AlignmentFormat::Fasta);
        assert_eq!(result.threshold, Some(0.25));
        std::fs::remove_file(&alignment).ok();
    }

    #[test]
    fn test_invalid_arguments() {
        assert!(validate_args(&parse(&[])).is_err());
        assert!(validate_args(&parse(&["--alignment", "/nonexistent/aln.phy"])).is_err());

        let alignment = existing_file("bad.phy");
        assert!(validate_args(&parse(&["--alignment", &alignment, "--threshold", "1.5"])).is_err());
        assert!(validate_args(&parse(&["--alignment", &alignment, "--format", "nexus"])).is_err());
        assert!(validate_args(&parse(&["--alignment", &alignment, "--threads", "0"])).is_err());
        assert!(validate_args(&parse(&["--alignment", &alignment, "--model", "/nonexistent.json"])).is_err());
        std::fs::remove_file(&alignment).ok();
    }
}
