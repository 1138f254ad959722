//! Error types for laminate analysis

use thiserror::Error;

/// Main error type for CLT operations
#[derive(Error, Debug)]
pub enum CltError {
    /// Malformed input data (empty layup, non-positive thickness or modulus,
    /// non-physical Poisson combination)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Singular or near-singular ABD matrix
    #[error("Numerical error in {operation}: ABD matrix is singular (laminate thickness {thickness:e} m)")]
    Numerical {
        /// Operation that hit the singular matrix
        operation: &'static str,
        /// Total thickness of the offending laminate
        thickness: f64,
    },

    /// Unknown failure criterion, missing allowables or unknown material name
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Coarse error classification, for callers that branch on the kind only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Numerical,
    Configuration,
    Serialization,
}

impl CltError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CltError::Validation(_) => ErrorKind::Validation,
            CltError::Numerical { .. } => ErrorKind::Numerical,
            CltError::Configuration(_) => ErrorKind::Configuration,
            CltError::Serialization(_) => ErrorKind::Serialization,
        }
    }
}

/// Result type for CLT operations
pub type CltResult<T> = Result<T, CltError>;
