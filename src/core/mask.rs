// mask.rs - Keep/discard decisions for alignment columns

use rayon::prelude::*;
use std::fmt;
use std::str::FromStr;
use crate::core::error::{alloc_buffer, PipelineError};
use crate::core::features::{extract_features, FeatureMatrix};
use crate::core::model::Model;
use crate::core::scoring::score;
use crate::data::ColumnSource;

/// One keep (`true`) or discard (`false`) decision per alignment column.
///
/// Renders as a string of `1` (keep) and `0` (discard), one character per
/// column in column order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Mask(Vec<bool>);

impl Mask {
    pub fn new(decisions: Vec<bool>) -> Self {
        Self(decisions)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of columns kept
    pub fn kept(&self) -> usize {
        self.0.iter().filter(|&&keep| keep).count()
    }

    /// Number of columns discarded
    pub fn discarded(&self) -> usize {
        self.len() - self.kept()
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }

    pub fn as_slice(&self) -> &[bool] {
        &self.0
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rendered: String = self.0.iter().map(|&keep| if keep { '1' } else { '0' }).collect();
        f.write_str(&rendered)
    }
}

impl FromStr for Mask {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .chars()
            .enumerate()
            .map(|(i, c)| match c {
                '1' => Ok(true),
                '0' => Ok(false),
                other => Err(format!("Invalid mask character '{}' at column {}", other, i)),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Mask)
    }
}

/// Threshold scores: a column is kept when its score reaches the model threshold.
pub fn mask_from_scores(model: &Model, scores: &[f64]) -> Result<Mask, PipelineError> {
    let mut decisions: Vec<bool> = alloc_buffer("column mask", scores.len())?;
    decisions.par_extend(scores.par_iter().map(|&s| s >= model.threshold));

    let mask = Mask(decisions);
    log::debug!(
        "Mask keeps {} of {} columns (threshold {})",
        mask.kept(),
        mask.len(),
        model.threshold
    );
    Ok(mask)
}

/// Score pre-computed features, then threshold the scores.
pub fn mask_from_features(model: &Model, features: &FeatureMatrix) -> Result<Mask, PipelineError> {
    let scores = score(model, features)?;
    mask_from_scores(model, &scores)
}

/// Run the whole pipeline on an alignment.
pub fn mask_from_alignment<S: ColumnSource + ?Sized>(
    model: &Model,
    source: &S,
) -> Result<Mask, PipelineError> {
    let features = extract_features(source)?;
    mask_from_features(model, &features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::Alignment;

    #[test]
    fn test_threshold_is_inclusive() {
        let model = Model::default().with_threshold(0.5);
        let mask = mask_from_scores(&model, &[0.5, 0.4999999, 0.75, 0.0]).unwrap();
        assert_eq!(mask.as_slice(), &[true, false, true, false]);
        assert_eq!(mask.to_string(), "1010");
        assert_eq!(mask.kept(), 2);
        assert_eq!(mask.discarded(), 2);
    }

    #[test]
    fn test_mask_rendering_round_trip() {
        let mask: Mask = "0110\n".parse().unwrap();
        assert_eq!(mask.len(), 4);
        assert_eq!(mask.to_string(), "0110");

        assert!("01a0".parse::<Mask>().is_err());
        assert!("".parse::<Mask>().unwrap().is_empty());
    }

    #[test]
    fn test_single_column_scenario() {
        let alignment = Alignment::from_rows(&["A", "A"]).unwrap();
        let mask = mask_from_alignment(&Model::default(), &alignment).unwrap();
        assert_eq!(mask.to_string(), "1");
    }

    #[test]
    fn test_all_gap_scenario() {
        let alignment = Alignment::from_rows(&["--", "--"]).unwrap();
        let mask = mask_from_alignment(&Model::default(), &alignment).unwrap();
        assert_eq!(mask.to_string(), "11");
    }

    #[test]
    fn test_gap_penalising_model() {
        // Strongly negative weight on the gap fraction: gappy columns go
        let model = Model::new(0.5, [-20.0, 0.0, 0.0, 0.0, 0.0, 0.0], 10.0);
        let alignment = Alignment::from_rows(&["AC-G", "ACTG", "A--G"]).unwrap();
        let mask = mask_from_alignment(&model, &alignment).unwrap();
        assert_eq!(mask.to_string(), "1101");
    }

    #[test]
    fn test_compositions_agree() {
        let model = Model::new(0.45, [-3.0, 2.0, 0.1, -0.5, -1.0, -1.5], 0.2);
        let alignment =
            Alignment::from_rows(&["ACGT-ACGTT", "ACGA-AC-TT", "TCGT--CGTA", "AcgT-A?GTT"]).unwrap();

        let features = extract_features(&alignment).unwrap();
        let scores = score(&model, &features).unwrap();
        let manual = mask_from_scores(&model, &scores).unwrap();

        assert_eq!(mask_from_features(&model, &features).unwrap(), manual);
        assert_eq!(mask_from_alignment(&model, &alignment).unwrap(), manual);
    }
}
