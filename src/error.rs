use thiserror::Error;

/// Engine fault taxonomy. All variants are local, synchronous and not
/// recoverable by retry; apart from `EmptyDeck` they indicate a sequencing
/// bug in the caller rather than a user-data condition.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid state: {0}")]
    InvalidState(String),
    #[error("deck is empty")]
    EmptyDeck,
    #[error("nothing to roll back")]
    NothingToRollback,
    #[error("no active session")]
    NoActiveSession,
}
