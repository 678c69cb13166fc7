use thiserror::Error as ThisError;

/// Failures of the geometry engine.
///
/// A point missing from a `Position` is not an error; see `position::Lookup`.
#[derive(Debug, Clone, PartialEq, ThisError)]
pub enum Error {
    /// Input shape or values rule the computation out (empty set, bad index,
    /// non-finite coordinates, non-positive tolerances, underdetermined fit).
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// Data-dependent numerical failure, e.g. a rank-deficient design matrix.
    #[error("numeric degeneracy: {0}")]
    NumericDegeneracy(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    pub fn numeric_degeneracy(message: impl Into<String>) -> Self {
        Self::NumericDegeneracy(message.into())
    }
}
