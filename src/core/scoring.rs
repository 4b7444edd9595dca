// scoring.rs - Logistic scoring of alignment columns

use rayon::prelude::*;
use crate::core::error::{alloc_buffer, PipelineError};
use crate::core::features::{FeatureMatrix, FEATURE_COUNT};
use crate::core::model::Model;

/// Per-column retention probabilities
pub type Scores = Vec<f64>;

/// Standard logistic function
pub fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

/// Linear predictor of one column: intercept plus weighted features
fn linear_predictor(model: &Model, features: &[f64]) -> f64 {
    features
        .iter()
        .zip(model.coefficients.iter())
        .fold(model.intercept, |z, (f, c)| z + f * c)
}

/// Score every column described by `features`.
pub fn score(model: &Model, features: &FeatureMatrix) -> Result<Scores, PipelineError> {
    let mut scores: Scores = alloc_buffer("column scores", features.len())?;
    scores.par_extend(
        features
            .as_slice()
            .par_chunks_exact(FEATURE_COUNT)
            .map(|row| sigmoid(linear_predictor(model, row))),
    );

    log::debug!("Scored {} columns", scores.len());
    Ok(scores)
}
