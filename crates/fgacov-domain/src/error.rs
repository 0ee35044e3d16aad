//! Domain error types for coverage analysis.

use thiserror::Error;

/// Domain-specific errors for coverage analysis.
#[derive(Debug, Error)]
pub enum DomainError {
    /// Error parsing authorization model DSL.
    #[error("model parse error: {message}")]
    ModelParseError { message: String },

    /// Rewrite expression nesting exceeded the traversal ceiling.
    #[error("expression depth limit exceeded (max: {max_depth})")]
    DepthLimitExceeded { max_depth: u32 },
}

impl From<crate::model::ParserError> for DomainError {
    fn from(err: crate::model::ParserError) -> Self {
        Self::ModelParseError {
            message: err.message,
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
