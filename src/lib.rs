// lib.rs - alifilter library root

//! # alifilter - Machine-learning filtering of multiple sequence alignments
//!
//! For each column of an alignment, this library computes six descriptive
//! features, turns them into a retention probability with a pretrained
//! logistic-regression model, and thresholds the probabilities into a
//! keep/discard mask.
//!
//! ## Features
//!
//! - **Column features**: gap fraction, identity, distance from the nearest
//!   edge, Shannon entropy and windowed gap fractions
//! - **Logistic scoring**: pretrained AliFilter JSON models
//! - **Masks**: rendered as `1` (keep) / `0` (discard) strings
//! - **Storage agnostic**: any layout implementing [`ColumnSource`]
//! - **Parallel**: every stage runs over columns on the rayon thread pool
//!
//! ## Basic Usage
//!
//! ```rust,no_run
//! use alifilter::prelude::*;
//!
//! let alignment = load_alignment(std::path::Path::new("example.phy"), AlignmentFormat::Auto)?;
//! let model = Model::from_file("alifilter.validated.json")?;
//!
//! let mask = mask_from_alignment(&model, &alignment).map_err(|e| e.to_string())?;
//! println!("{}", mask);
//!
//! let filtered = alignment.filter_columns(&mask)?;
//! # Ok::<(), String>(())
//! ```

pub mod cli;
pub mod core;
pub mod data;
pub mod output;

// Convenience prelude for common imports
pub mod prelude {
    pub use crate::cli::{validate_args, Args, ValidationResult};
    pub use crate::core::{extract_features, mask_from_alignment, mask_from_features, mask_from_scores, score};
    pub use crate::core::{Feature, FeatureMatrix, Mask, Model, PipelineError, Scores, FEATURE_COUNT};
    pub use crate::data::{load_alignment, Alignment, AlignmentFormat, ColumnSource, FlatAlignment};
    pub use crate::output::{write_alignment, write_features, write_mask, write_scores};
}

// Re-export main types at the root level for convenience
pub use crate::core::{FeatureMatrix, Mask, Model, PipelineError};
pub use crate::data::{Alignment, ColumnSource, FlatAlignment};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get library information
pub fn get_info() -> String {
    format!(
        "alifilter v{} - Machine-learning alignment column filtering",
        VERSION
    )
}
