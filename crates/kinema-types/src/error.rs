//! Error types for the Kinema engine.
//!
//! All crates return `KinemaResult<T>` from fallible operations.

use thiserror::Error;

/// Unified error type for the Kinema engine.
#[derive(Debug, Error)]
pub enum KinemaError {
    /// Model topology is malformed (index out of range, repeated vertex, ...).
    #[error("Invalid topology: {0}")]
    InvalidTopology(String),

    /// A physical parameter is out of its valid range.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Solver configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A state or input does not match the model it is stepped against.
    #[error("State mismatch: {0}")]
    StateMismatch(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Parallel dispatch failed (thread pool construction, ...).
    #[error("Dispatch error: {0}")]
    Dispatch(String),
}

/// Convenience alias for `Result<T, KinemaError>`.
pub type KinemaResult<T> = Result<T, KinemaError>;
