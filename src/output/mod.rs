// mod.rs - Output writers for masks, features, scores and filtered alignments

use std::fs::{create_dir_all, File};
use std::io::{BufWriter, Write};
use std::path::Path;
use bio::io::fasta;
use crate::core::{Feature, FeatureMatrix, Mask};
use crate::data::{Alignment, AlignmentFormat};

/// Ensure parent directory exists before creating file
fn ensure_parent_dir(file_path: &str) -> Result<(), String> {
    if let Some(parent) = Path::new(file_path).parent() {
        create_dir_all(parent)
            .map_err(|e| format!("Failed to create parent directory '{}': {}", parent.display(), e))?;
    }
    Ok(())
}

fn create_output(file_path: &str) -> Result<BufWriter<File>, String> {
    ensure_parent_dir(file_path)?;
    let file = File::create(file_path)
        .map_err(|e| format!("Failed to create output file '{}': {}", file_path, e))?;
    Ok(BufWriter::new(file))
}

/// Command, timestamp and version lines at the top of tabular outputs
fn write_comment_header<W: Write>(writer: &mut W, command_line: &str) -> Result<(), String> {
    writeln!(writer, "# Command: {}", command_line).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().format("%Y-%m-%d %H:%M:%S UTC")).map_err(|e| format!("Write error: {}", e))?;
    writeln!(writer, "# alifilter v{}", env!("CARGO_PKG_VERSION")).map_err(|e| format!("Write error: {}", e))?;
    Ok(())
}

/// Write the mask as a single line of `1`/`0` characters
pub fn write_mask(file_path: &str, mask: &Mask) -> Result<(), String> {
    let mut writer = create_output(file_path)?;
    writeln!(writer, "{}", mask).map_err(|e| format!("Write error: {}", e))?;
    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    log::info!("Mask written to: {}", file_path);
    Ok(())
}

/// Write the feature matrix as TSV, one row per alignment column
pub fn write_features(file_path: &str, features: &FeatureMatrix, command_line: &str) -> Result<(), String> {
    let mut writer = create_output(file_path)?;
    write_comment_header(&mut writer, command_line)?;

    let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);

    let mut header = vec!["column"];
    header.extend(Feature::ALL.iter().map(|f| f.name()));
    tsv.write_record(&header).map_err(|e| format!("Write error: {}", e))?;

    for (column, row) in features.columns().enumerate() {
        let mut record = vec![column.to_string()];
        record.extend(row.iter().map(|v| v.to_string()));
        tsv.write_record(&record).map_err(|e| format!("Write error: {}", e))?;
    }

    tsv.flush().map_err(|e| format!("Flush error: {}", e))?;
    log::info!("Features written to: {}", file_path);
    Ok(())
}

/// Write per-column scores together with the keep/discard decision
pub fn write_scores(file_path: &str, scores: &[f64], mask: &Mask, command_line: &str) -> Result<(), String> {
    if scores.len() != mask.len() {
        return Err(format!(
            "Cannot write {} scores with a mask of {} columns",
            scores.len(),
            mask.len()
        ));
    }

    let mut writer = create_output(file_path)?;
    write_comment_header(&mut writer, command_line)?;

    let mut tsv = csv::WriterBuilder::new().delimiter(b'\t').from_writer(writer);
    tsv.write_record(["column", "score", "keep"]).map_err(|e| format!("Write error: {}", e))?;

    for (column, (score, keep)) in scores.iter().zip(mask.iter()).enumerate() {
        tsv.write_record([
            column.to_string(),
            score.to_string(),
            if keep { "1" } else { "0" }.to_string(),
        ])
        .map_err(|e| format!("Write error: {}", e))?;
    }

    tsv.flush().map_err(|e| format!("Flush error: {}", e))?;
    log::info!("Scores written to: {}", file_path);
    Ok(())
}

/// Write an alignment in relaxed PHYLIP format
pub fn write_phylip(file_path: &str, alignment: &Alignment) -> Result<(), String> {
    let mut writer = create_output(file_path)?;

    let length = alignment.sequences.first().map_or(0, |s| s.len());
    writeln!(writer, "{} {}", alignment.len(), length).map_err(|e| format!("Write error: {}", e))?;

    let name_width = alignment.names.iter().map(|n| n.len()).max().unwrap_or(0);
    for (name, sequence) in alignment.names.iter().zip(&alignment.sequences) {
        write!(writer, "{:<width$}  ", name, width = name_width).map_err(|e| format!("Write error: {}", e))?;
        writer.write_all(sequence).map_err(|e| format!("Write error: {}", e))?;
        writeln!(writer).map_err(|e| format!("Write error: {}", e))?;
    }

    writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    log::info!("Filtered alignment written to: {} (PHYLIP format)", file_path);
    Ok(())
}

/// Write an alignment in FASTA format
pub fn write_fasta(file_path: &str, alignment: &Alignment) -> Result<(), String> {
    let writer = create_output(file_path)?;
    let mut fasta_writer = fasta::Writer::new(writer);

    for (name, sequence) in alignment.names.iter().zip(&alignment.sequences) {
        fasta_writer
            .write(name, None, sequence)
            .map_err(|e| format!("Write error: {}", e))?;
    }

    fasta_writer.flush().map_err(|e| format!("Flush error: {}", e))?;
    log::info!("Filtered alignment written to: {} (FASTA format)", file_path);
    Ok(())
}

/// Write an alignment in the given format (`Auto` goes by the file extension)
pub fn write_alignment(file_path: &str, alignment: &Alignment, format: AlignmentFormat) -> Result<(), String> {
    match format.resolve(Path::new(file_path)) {
        AlignmentFormat::Fasta => write_fasta(file_path, alignment),
        _ => write_phylip(file_path, alignment),
    }
}
