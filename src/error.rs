use thiserror::Error;

/// Everything that can stop a multiply. None of these are retried.
#[derive(Debug, Error)]
pub enum Error {
    #[error("at least two tasks are required, {available} available")]
    TooFewTasks { available: usize },

    #[error("dimension {name} must be a positive integer, got {value}")]
    InvalidDimension { name: &'static str, value: usize },

    #[error("could not allocate a {rows}x{cols} matrix")]
    Allocation { rows: usize, cols: usize },

    #[error("nonconformal matrices: {op} needs {expected}, got {actual}")]
    ShapeMismatch {
        op: &'static str,
        expected: String,
        actual: String,
    },

    #[error("rank {rank} hung up before the exchange finished")]
    Disconnected { rank: usize },

    #[error("every peer of rank {rank} hung up while it was waiting for a message")]
    Hangup { rank: usize },

    #[error("protocol violation: {0}")]
    Protocol(String),
}

pub type Result<T> = std::result::Result<T, Error>;
