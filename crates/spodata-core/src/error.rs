//! Error types for the binder core.

/// Core error type for configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Unrecognized coercion policy name.
    #[error("invalid coercion policy: {0} (expected `strict` or `lenient`)")]
    InvalidCoercionPolicy(String),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Convenience result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
