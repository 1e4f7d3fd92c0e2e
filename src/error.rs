//! Error types.

use thiserror::Error;

/// Crate-level error type.
#[derive(Error, Debug)]
pub enum VyomaError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("mapping thread is not running")]
    PipelineStopped,
}

/// Crate-level result alias.
pub type Result<T> = std::result::Result<T, VyomaError>;
