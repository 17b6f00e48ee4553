use thiserror::Error;

/// Errors reported by the detection stages and their I/O wrappers.
#[derive(Error, Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum DetectError {
    /// A precondition of a stage does not hold; the current run is aborted.
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// The stage cannot run with the supplied configuration.
    #[error("configuration error: {0}")]
    Config(String),

    #[error("i/o error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, DetectError>;

pub(crate) fn invariant(msg: impl Into<String>) -> DetectError {
    DetectError::InvariantViolation(msg.into())
}
