use thiserror::Error;

/// Result type for scene construction and rendering operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors reported when a caller hands the core invalid input
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Invalid {name}: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("The {0} must not be a zero-length vector")]
    ZeroLengthVector(&'static str),

    #[error("Faces must have at least 3 vertices, got {0}")]
    DegenerateFace(usize),

    #[error("Vertex index {index} out of range for an object with {count} vertices")]
    VertexIndexOutOfRange { index: usize, count: usize },

    #[error("A sphere needs at least 3 segments, got {0}")]
    TooFewSegments(usize),

    #[error("Triangulation failed: {0}")]
    Triangulation(String),

    #[error("Failed to parse STL: {0}")]
    Stl(String),
}

impl Error {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

/// Rejects values that are not finite and strictly positive
pub(crate) fn require_positive(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(Error::invalid(name, format!("must be positive, got {value}")))
    }
}

/// Rejects NaN and infinite values
pub(crate) fn require_finite(name: &'static str, value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::invalid(name, format!("must be finite, got {value}")))
    }
}
