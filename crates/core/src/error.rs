//! Error types for ndfocal

use thiserror::Error;

use crate::window::ElementKind;

/// Main error type for ndfocal operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid neighborhood description (even or zero extents, empty masks, ...)
    #[error("Invalid neighborhood: {0}")]
    Construction(String),

    /// A neighborhood, region or kernel does not have the rank it is used with
    #[error("Rank mismatch: expected {expected} dimensions, got {actual}")]
    RankMismatch { expected: usize, actual: usize },

    #[error("Shape mismatch: expected {expected:?}, got {actual:?}")]
    ShapeMismatch {
        expected: Vec<usize>,
        actual: Vec<usize>,
    },

    #[error("Cannot convert {from} coefficients to {to}: {reason}")]
    TypeConversion {
        from: ElementKind,
        to: ElementKind,
        reason: String,
    },

    #[error("Invalid parameter: {name} = {value} ({reason})")]
    InvalidParameter {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Whether this error was raised while building or validating a neighborhood.
    pub fn is_construction(&self) -> bool {
        matches!(self, Error::Construction(_) | Error::RankMismatch { .. })
    }
}

/// Result type alias for ndfocal operations
pub type Result<T> = std::result::Result<T, Error>;
