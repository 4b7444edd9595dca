// mod.rs - Alignment data structures and file loaders

pub mod alignment;
pub mod loaders;

// Re-export main types for convenience
pub use alignment::{Alignment, ColumnSource, FlatAlignment};
pub use loaders::{load_alignment, AlignmentFormat};
