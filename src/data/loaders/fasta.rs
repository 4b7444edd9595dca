// fasta.rs - Aligned FASTA loader

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use bio::io::fasta;
use crate::data::Alignment;

/// Read an aligned FASTA stream; every record must have the same length.
pub fn parse_fasta<R: Read>(input: R) -> Result<Alignment, String> {
    let reader = fasta::Reader::new(input);
    let mut names = Vec::new();
    let mut sequences = Vec::new();

    for record_result in reader.records() {
        let record = record_result.map_err(|e| format!("Invalid FASTA record: {}", e))?;
        names.push(record.id().to_string());
        sequences.push(record.seq().to_vec());
    }

    Alignment::new(names, sequences)
}

/// Load an aligned FASTA file
pub fn from_fasta_file(path: &Path) -> Result<Alignment, String> {
    let file = File::open(path)
        .map_err(|e| format!("Failed to open FASTA file {}: {}", path.display(), e))?;
    parse_fasta(BufReader::new(file)).map_err(|e| format!("{} ({})", e, path.display()))
}
