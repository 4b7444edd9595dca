// mod.rs - Alignment file loaders

pub mod fasta;
pub mod phylip;

use std::path::Path;
use std::str::FromStr;
use crate::data::Alignment;

/// Alignment file format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlignmentFormat {
    /// Pick the format from the file extension
    Auto,
    Phylip,
    Fasta,
}

impl FromStr for AlignmentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(AlignmentFormat::Auto),
            "phylip" | "phy" | "phylip-relaxed" => Ok(AlignmentFormat::Phylip),
            "fasta" | "fa" | "afa" => Ok(AlignmentFormat::Fasta),
            _ => Err(format!("Invalid alignment format: {}. Use: auto, phylip, fasta", s)),
        }
    }
}

impl AlignmentFormat {
    pub fn description(&self) -> &str {
        match self {
            AlignmentFormat::Auto => "detected from extension",
            AlignmentFormat::Phylip => "relaxed PHYLIP",
            AlignmentFormat::Fasta => "aligned FASTA",
        }
    }

    /// Resolve `Auto` against a file name; PHYLIP is the fallback.
    pub fn resolve(self, path: &Path) -> AlignmentFormat {
        if self != AlignmentFormat::Auto {
            return self;
        }

        let extension = path
            .extension()
            .and_then(|s| s.to_str())
            .unwrap_or("")
            .to_lowercase();

        match extension.as_str() {
            "fa" | "fas" | "fasta" | "afa" | "aln" | "fna" | "faa" => AlignmentFormat::Fasta,
            _ => AlignmentFormat::Phylip,
        }
    }
}

/// Load an alignment file in the given format
pub fn load_alignment(path: &Path, format: AlignmentFormat) -> Result<Alignment, String> {
    let format = format.resolve(path);
    log::info!(
        "Loading alignment ({}): {}",
        format.description(),
        path.display()
    );

    let alignment = match format {
        AlignmentFormat::Fasta => fasta::from_fasta_file(path)?,
        _ => phylip::from_phylip_file(path)?,
    };

    log::info!(
        "Alignment loaded: {} sequences × {} columns",
        alignment.len(),
        alignment.sequences[0].len()
    );
    Ok(alignment)
}
