// features.rs - Per-column alignment features

use rayon::prelude::*;
use crate::core::error::{alloc_buffer, PipelineError};
use crate::data::ColumnSource;

/// Number of features computed for each alignment column
pub const FEATURE_COUNT: usize = 6;

const ALPHABET_SIZE: usize = (b'Z' - b'A' + 1) as usize;

/// The features of an alignment column, in storage order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Feature {
    /// Fraction of sequences with a gap
    Gaps = 0,
    /// Frequency of the most common letter over all sequences
    Identity = 1,
    /// Distance to the closer end of the alignment
    EdgeDistance = 2,
    /// Shannon entropy (natural log) of the letter distribution
    Entropy = 3,
    /// Mean gap fraction over the column and its immediate neighbours
    GapsWindow1 = 4,
    /// Mean gap fraction over the column and two neighbours on each side
    GapsWindow2 = 5,
}

impl Feature {
    pub const ALL: [Feature; FEATURE_COUNT] = [
        Feature::Gaps,
        Feature::Identity,
        Feature::EdgeDistance,
        Feature::Entropy,
        Feature::GapsWindow1,
        Feature::GapsWindow2,
    ];

    /// Short name, used as the column header in feature tables
    pub fn name(&self) -> &'static str {
        match self {
            Feature::Gaps => "gaps",
            Feature::Identity => "identity",
            Feature::EdgeDistance => "edge_distance",
            Feature::Entropy => "entropy",
            Feature::GapsWindow1 => "gaps_w1",
            Feature::GapsWindow2 => "gaps_w2",
        }
    }
}

/// Dense `columns x FEATURE_COUNT` matrix, one row of features per column
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    values: Vec<f64>,
}

impl FeatureMatrix {
    /// Wrap features computed elsewhere (row-major, `FEATURE_COUNT` per column)
    pub fn from_flat(values: Vec<f64>) -> Result<Self, String> {
        if values.len() % FEATURE_COUNT != 0 {
            return Err(format!(
                "Feature buffer holds {} values, not a multiple of {}",
                values.len(),
                FEATURE_COUNT
            ));
        }
        Ok(Self { values })
    }

    /// Number of alignment columns described
    pub fn len(&self) -> usize {
        self.values.len() / FEATURE_COUNT
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Features of a single column
    pub fn column(&self, column: usize) -> &[f64] {
        &self.values[column * FEATURE_COUNT..(column + 1) * FEATURE_COUNT]
    }

    pub fn get(&self, column: usize, feature: Feature) -> f64 {
        self.values[column * FEATURE_COUNT + feature as usize]
    }

    /// Iterate over the feature rows in column order
    pub fn columns(&self) -> std::slice::ChunksExact<'_, f64> {
        self.values.chunks_exact(FEATURE_COUNT)
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.values
    }
}

/// Statistics that only depend on the characters of one column
#[derive(Debug, Clone, Copy, PartialEq)]
struct ColumnStats {
    gaps: f64,
    identity: f64,
    entropy: f64,
}

fn column_stats<S: ColumnSource + ?Sized>(source: &S, column: usize) -> ColumnStats {
    let sequence_count = source.sequence_count();
    let mut gap_count = 0usize;
    let mut counts = [0usize; ALPHABET_SIZE];
    let mut valid_chars = 0usize;

    for sequence in 0..sequence_count {
        match source.char_at(sequence, column) {
            b'-' => gap_count += 1,
            c if c.is_ascii_alphabetic() => {
                counts[(c.to_ascii_uppercase() - b'A') as usize] += 1;
                valid_chars += 1;
            }
            // Anything else still counts towards the sequence total
            _ => {}
        }
    }

    let gaps = gap_count as f64 / sequence_count as f64;

    if valid_chars == 0 {
        return ColumnStats {
            gaps,
            identity: 0.0,
            entropy: 0.0,
        };
    }

    let max_count = counts.iter().copied().max().unwrap_or(0);
    let mut entropy = 0.0;
    for &count in counts.iter().filter(|&&c| c > 0) {
        let p = count as f64 / valid_chars as f64;
        entropy += -p * p.ln();
    }

    ColumnStats {
        gaps,
        identity: max_count as f64 / sequence_count as f64,
        entropy,
    }
}

fn edge_distance(column: usize, alignment_length: usize) -> f64 {
    column.min(alignment_length - 1 - column) as f64
}

/// Mean gap fraction over `centre - radius ..= centre + radius`, clipped to the
/// alignment. Columns outside the alignment are left out of the divisor.
fn window_mean(stats: &[ColumnStats], centre: usize, radius: usize) -> f64 {
    let lo = centre.saturating_sub(radius);
    let hi = (centre + radius).min(stats.len() - 1);
    let sum: f64 = stats[lo..=hi].iter().map(|s| s.gaps).sum();
    sum / (hi - lo + 1) as f64
}

/// Compute the feature matrix of an alignment.
///
/// Runs in two passes: per-column statistics first, then the windowed gap
/// averages, which read the finalised gap fractions of neighbouring columns.
pub fn extract_features<S: ColumnSource + ?Sized>(source: &S) -> Result<FeatureMatrix, PipelineError> {
    let alignment_length = source.alignment_length();

    let mut stats: Vec<ColumnStats> = alloc_buffer("column statistics", alignment_length)?;
    stats.par_extend(
        (0..alignment_length)
            .into_par_iter()
            .map(|column| column_stats(source, column)),
    );

    let value_count = alignment_length.saturating_mul(FEATURE_COUNT);
    let mut values: Vec<f64> = alloc_buffer("feature matrix", value_count)?;
    values.resize(value_count, 0.0);
    values
        .par_chunks_mut(FEATURE_COUNT)
        .enumerate()
        .for_each(|(column, row)| {
            let s = &stats[column];
            row[Feature::Gaps as usize] = s.gaps;
            row[Feature::Identity as usize] = s.identity;
            row[Feature::EdgeDistance as usize] = edge_distance(column, alignment_length);
            row[Feature::Entropy as usize] = s.entropy;
            row[Feature::GapsWindow1 as usize] = window_mean(&stats, column, 1);
            row[Feature::GapsWindow2 as usize] = window_mean(&stats, column, 2);
        });

    log::debug!(
        "Extracted {} features for {} columns ({} sequences)",
        FEATURE_COUNT,
        alignment_length,
        source.sequence_count()
    );

    Ok(FeatureMatrix { values })
}
