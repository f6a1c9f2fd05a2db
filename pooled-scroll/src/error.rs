/// Configuration and lifecycle failures reported by `initialize`/`reinitialize`.
///
/// Everything else (out-of-range navigation, pool exhaustion, cancellation) is recovered
/// locally and never surfaces as an error.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum ScrollError {
    #[error("viewport extent along the scroll axis must be positive, got {0}")]
    ZeroViewport(f32),
    #[error("element {index} has a non-positive or non-finite size ({size})")]
    InvalidElementSize { index: usize, size: f32 },
    #[error("grid element cross size must be positive, got {0}")]
    InvalidCrossSize(f32),
    #[error("scroll has not been initialized")]
    NotInitialized,
    #[error("scroll has been disposed")]
    Disposed,
}
