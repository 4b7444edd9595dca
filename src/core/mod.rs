// mod.rs - Core filtering pipeline: features -> scores -> mask

pub mod error;
pub mod features;
pub mod mask;
pub mod model;
pub mod scoring;

// Re-export main types for convenience
pub use error::PipelineError;
pub use features::{extract_features, Feature, FeatureMatrix, FEATURE_COUNT};
pub use mask::{mask_from_alignment, mask_from_features, mask_from_scores, Mask};
pub use model::{Model, DEFAULT_THRESHOLD};
pub use scoring::{score, sigmoid, Scores};
