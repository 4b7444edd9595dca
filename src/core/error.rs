// error.rs - Pipeline error taxonomy

use thiserror::Error;

/// Failures the filtering pipeline can report.
///
/// Inputs that hold the alignment and model invariants always produce a
/// result; the only way a stage can fail is by not obtaining its output buffer.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("failed to allocate {requested} values for {stage}")]
    Allocation {
        stage: &'static str,
        requested: usize,
    },
}

/// Reserve an output buffer of exactly `len` elements, reporting allocation
/// failure instead of aborting.
pub(crate) fn alloc_buffer<T>(stage: &'static str, len: usize) -> Result<Vec<T>, PipelineError> {
    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| PipelineError::Allocation {
            stage,
            requested: len,
        })?;
    Ok(buffer)
}
