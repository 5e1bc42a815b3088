//! Shared error types for the services crate.

use thiserror::Error;

use storage::name::NameError;
use storage::repository::StorageError;
use vocab_core::model::GlossaryError;
use vocab_core::ordering::OrderingError;

/// Errors emitted while resolving a `SessionConfig` from raw values.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error(transparent)]
    Name(#[from] NameError),
    #[error(transparent)]
    Ordering(#[from] OrderingError),
}

/// Errors emitted by `ReviewSession`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("no words available for session")]
    Empty,
    #[error("review order exhausted")]
    ExhaustedDeck,
    #[error("solution already revealed")]
    AlreadyRevealed,
    #[error("feedback requires the solution to be revealed first")]
    NotRevealed,
}

/// Errors emitted by `Trainer`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum TrainerError {
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Glossary(#[from] GlossaryError),
    #[error(transparent)]
    Session(#[from] SessionError),
}
