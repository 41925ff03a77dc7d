//! Error types for the network and the gradient checker

use thiserror::Error;

/// Result type alias for this crate
pub type Result<T> = std::result::Result<T, NetworkError>;

/// Errors raised by the codec, the engine, the checker and the config layer.
#[derive(Error, Debug)]
pub enum NetworkError {
    /// A buffer or matrix does not match the declared dimensions
    #[error("shape mismatch for {what}: expected {expected}, got {actual}")]
    Shape {
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Dimension triple with a zero entry
    #[error("invalid dimensions: {0}")]
    InvalidDimensions(String),

    /// Numerical and analytic gradients disagree at a coordinate
    #[error(
        "gradient mismatch at index {index}: analytic={analytic:.10}, numeric={numeric:.10}, relative error={relative_error:.3e}"
    )]
    GradientMismatch {
        index: usize,
        analytic: f64,
        numeric: f64,
        relative_error: f64,
    },

    /// Invalid configuration value
    #[error("invalid configuration: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl NetworkError {
    pub(crate) fn shape(what: &'static str, expected: usize, actual: usize) -> Self {
        NetworkError::Shape {
            what,
            expected,
            actual,
        }
    }

    /// True for both flavours of shape error.
    pub fn is_shape_error(&self) -> bool {
        matches!(
            self,
            NetworkError::Shape { .. } | NetworkError::InvalidDimensions(_)
        )
    }
}
