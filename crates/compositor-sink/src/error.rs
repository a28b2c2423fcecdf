//! Error types for sink and drawing operations.

use compositor_core::RenderPassId;
use thiserror::Error;

/// Error type for appending render passes.
///
/// Fatal to the current pass-generation cycle: retrying without freeing
/// storage cannot succeed, so callers propagate it and abort the cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    /// Storage for accumulated passes cannot grow
    #[error("Out of resources: render pass storage cannot grow (limit {capacity:?})")]
    OutOfResources { capacity: Option<usize> },
}

/// Result type for sink operations
pub type SinkResult<T> = Result<T, SinkError>;

/// Error type for executing a drained pass list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawError {
    #[error("Render pass {pass} composites pass {missing}, which was not drawn before it")]
    UnresolvedPass {
        pass: RenderPassId,
        missing: RenderPassId,
    },

    #[error("Render pass {0} appears more than once in the cycle")]
    DuplicatePass(RenderPassId),
}

/// Failure of a whole pass-generation cycle.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CompositorError {
    #[error("Pass generation failed: {0}")]
    Sink(#[from] SinkError),

    #[error("Drawing failed: {0}")]
    Draw(#[from] DrawError),
}
