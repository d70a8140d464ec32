use thiserror::Error;

/// Errors raised while selecting or running a symmetric-primitive strategy.
///
/// All of them surface before any output is produced; none are retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The named primitive is unknown, or its Cargo feature is disabled.
    #[error("algorithm not found: {0}")]
    AlgorithmNotFound(String),
    /// A mode identifier could not be parsed.
    #[error("unknown mode: {0}")]
    UnknownMode(String),
    /// A seed used as a block-cipher key has the wrong length.
    #[error("invalid key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },
    /// A sampling parameter is outside the range the scheme defines.
    #[error("invalid parameter: {0}")]
    InvalidParameter(&'static str),
}
