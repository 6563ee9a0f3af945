use std::io;

use thiserror::Error;

/// Errors raised while building, training, saving or loading a model
#[derive(Debug, Error)]
pub enum Error {
    /// The training set contains no instances
    #[error("no training data")]
    EmptyTrainingSet,

    /// An instance does not share the dimensionality of the first instance
    #[error("instance {index} has {actual} feature dimensions, expected {expected}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// Rejected configuration or argument
    #[error("{0}")]
    InvalidInput(String),

    /// The Newton-Raphson solve for a feature function did not converge
    #[error("IIS did not converge for feature function {function} after {iterations} Newton iterations")]
    NonConvergence { function: usize, iterations: usize },

    /// A saved model could not be parsed
    #[error("invalid model: {0}")]
    InvalidModel(String),

    /// A malformed line in a data file
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl Error {
    pub(crate) fn invalid_input<S: Into<String>>(message: S) -> Self {
        Error::InvalidInput(message.into())
    }

    pub(crate) fn invalid_model<S: Into<String>>(message: S) -> Self {
        Error::InvalidModel(message.into())
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
