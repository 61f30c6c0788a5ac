//! Top-level error type for the estimation entry points.
//!
//! [`EstimateError`] unifies the three failure classes a caller can see:
//! shape/domain violations and argument-combination mistakes (both fail
//! fast, before any engine call) and backend failures (propagated directly
//! for single requests; range searches record them per candidate instead).

use crate::{
    inference::errors::BackendError,
    signature::errors::{ShapeError, UsageError},
};

/// Result alias for the estimation entry points.
pub type EstimateResult<T> = Result<T, EstimateError>;

/// Unified error for `fit` / `extract` / `fit_extract`.
#[derive(Debug, Clone, PartialEq)]
pub enum EstimateError {
    /// Dimension or domain violation detected during validation.
    Shape(ShapeError),
    /// Invalid combination of otherwise well-formed arguments.
    Usage(UsageError),
    /// Engine failure for a single (non-range) request.
    Backend(BackendError),
}

impl std::error::Error for EstimateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EstimateError::Shape(error) => Some(error),
            EstimateError::Usage(error) => Some(error),
            EstimateError::Backend(error) => Some(error),
        }
    }
}

impl std::fmt::Display for EstimateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EstimateError::Shape(error) => write!(f, "{error}"),
            EstimateError::Usage(error) => write!(f, "{error}"),
            EstimateError::Backend(error) => write!(f, "{error}"),
        }
    }
}

impl From<ShapeError> for EstimateError {
    fn from(error: ShapeError) -> EstimateError {
        EstimateError::Shape(error)
    }
}

impl From<UsageError> for EstimateError {
    fn from(error: UsageError) -> EstimateError {
        EstimateError::Usage(error)
    }
}

impl From<BackendError> for EstimateError {
    fn from(error: BackendError) -> EstimateError {
        EstimateError::Backend(error)
    }
}
