use thiserror::Error;

/// Errors that can occur while choosing moves
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GambitError {
    #[error("No valid moves")]
    NoValidMoves,

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Convenience Result type for strategy operations
pub type Result<T> = std::result::Result<T, GambitError>;
