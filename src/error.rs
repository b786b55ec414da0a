use thiserror::Error;

pub type QuadratureResult<T> = Result<T, QuadratureError>;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum QuadratureError {
    #[error("integration range must have at least two endpoints, got {0}")]
    TooFewBreakpoints(usize),

    #[error("integration bound at position {position} is NaN")]
    NanBound { position: usize },

    #[error("epsilon must be a non-negative number, got {0}")]
    InvalidEpsilon(f64),

    #[error("max_depth must be at least 1")]
    ZeroMaxDepth,
}
