// model.rs - Logistic model parameters and model file loading

use serde::Deserialize;
use std::path::Path;
use crate::core::features::FEATURE_COUNT;

/// Threshold used when the model file does not provide one
pub const DEFAULT_THRESHOLD: f64 = 0.5;

/// A pretrained logistic-regression model
#[derive(Debug, Clone, PartialEq)]
pub struct Model {
    /// Columns scoring at or above this value are kept
    pub threshold: f64,
    /// One coefficient per feature, in feature order
    pub coefficients: [f64; FEATURE_COUNT],
    pub intercept: f64,
}

impl Default for Model {
    /// A model that scores every column 0.5 and keeps it
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            coefficients: [0.0; FEATURE_COUNT],
            intercept: 0.0,
        }
    }
}

// Layout of the JSON model files; everything else in the file is ignored.
#[derive(Debug, Deserialize)]
struct ModelFile {
    #[serde(rename = "FastThreshold")]
    fast_threshold: Option<f64>,
    #[serde(rename = "LogisticModel")]
    logistic_model: LogisticSection,
}

#[derive(Debug, Deserialize)]
struct LogisticSection {
    #[serde(rename = "Coefficients")]
    coefficients: Vec<f64>,
    #[serde(rename = "Intercept")]
    intercept: f64,
}

impl Model {
    pub fn new(threshold: f64, coefficients: [f64; FEATURE_COUNT], intercept: f64) -> Self {
        Self {
            threshold,
            coefficients,
            intercept,
        }
    }

    /// Copy of this model with a different decision threshold
    pub fn with_threshold(&self, threshold: f64) -> Self {
        Self {
            threshold,
            ..self.clone()
        }
    }

    /// Parse a model from the contents of a JSON model file
    pub fn from_json_str(content: &str) -> Result<Self, String> {
        let file: ModelFile = serde_json::from_str(content)
            .map_err(|e| format!("Invalid model file: {}", e))?;

        let coefficients: [f64; FEATURE_COUNT] = file
            .logistic_model
            .coefficients
            .as_slice()
            .try_into()
            .map_err(|_| {
                format!(
                    "Model has {} coefficients, expected {}",
                    file.logistic_model.coefficients.len(),
                    FEATURE_COUNT
                )
            })?;

        Ok(Self {
            threshold: file.fast_threshold.unwrap_or(DEFAULT_THRESHOLD),
            coefficients,
            intercept: file.logistic_model.intercept,
        })
    }

    /// Load a model from a JSON model file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read model file '{}': {}", path.display(), e))?;

        let model = Self::from_json_str(&content)
            .map_err(|e| format!("{} ('{}')", e, path.display()))?;

        log::info!(
            "Loaded model from: {} (threshold {:.4})",
            path.display(),
            model.threshold
        );
        Ok(model)
    }
}
