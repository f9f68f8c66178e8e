//! Error types exposed by this crate.
//!
//! `AlreadyActive`, `NotActive` and `InvalidOption` are expected outcomes of
//! a user request; they are returned to the caller to be rendered as a reply
//! and are never logged as errors. [`Fatal`] means the core task is gone.

use std::error::Error;

use anyerror::AnyError;

/// Fatal is unrecoverable: the core task has quit and no request will be
/// served any more.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
pub enum Fatal {
    #[error("panicked")]
    Panicked,

    /// The elector was shut down normally.
    #[error("Stopped normally")]
    Stopped,
}

/// An election is already running; nothing was changed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
#[error("an election is already running: generation: {generation}, deadline: {deadline}")]
pub struct AlreadyActive {
    pub generation: u64,
    pub deadline: u64,
}

/// No election is running.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
#[error("no election is running")]
pub struct NotActive {}

/// The option is blank after trimming.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
#[error("invalid option: {option:?}")]
pub struct InvalidOption {
    pub option: String,
}

impl InvalidOption {
    pub fn new(option: impl ToString) -> Self {
        Self {
            option: option.to_string(),
        }
    }
}

/// The snapshot store failed to read or write.
///
/// When returned from a mutating request, the in-memory change has been
/// applied but is not durable.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("PersistenceUnavailable: {source}")]
pub struct PersistenceUnavailable {
    #[from]
    source: AnyError,
}

impl PersistenceUnavailable {
    pub fn new<E: Error + 'static>(e: &E) -> Self {
        Self {
            source: AnyError::new(e),
        }
    }
}

/// The persisted snapshot can not be decoded or violates the state
/// invariants.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[derive(serde::Deserialize, serde::Serialize)]
#[error("corrupt snapshot: {reason}")]
pub struct CorruptSnapshot {
    pub reason: String,
}

impl CorruptSnapshot {
    pub fn new(reason: impl ToString) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StartError {
    #[error(transparent)]
    AlreadyActive(#[from] AlreadyActive),

    #[error(transparent)]
    PersistenceUnavailable(#[from] PersistenceUnavailable),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VoteError {
    #[error(transparent)]
    NotActive(#[from] NotActive),

    #[error(transparent)]
    InvalidOption(#[from] InvalidOption),

    #[error(transparent)]
    PersistenceUnavailable(#[from] PersistenceUnavailable),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WithdrawError {
    #[error(transparent)]
    NotActive(#[from] NotActive),

    #[error(transparent)]
    PersistenceUnavailable(#[from] PersistenceUnavailable),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StopError {
    #[error(transparent)]
    NotActive(#[from] NotActive),

    #[error(transparent)]
    PersistenceUnavailable(#[from] PersistenceUnavailable),
}

/// Any outcome-level error of an election request.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, derive_more::TryInto)]
pub enum ElectionError {
    #[error(transparent)]
    AlreadyActive(AlreadyActive),

    #[error(transparent)]
    NotActive(NotActive),

    #[error(transparent)]
    InvalidOption(InvalidOption),

    #[error(transparent)]
    PersistenceUnavailable(PersistenceUnavailable),
}

impl From<StartError> for ElectionError {
    fn from(e: StartError) -> Self {
        match e {
            StartError::AlreadyActive(e) => Self::AlreadyActive(e),
            StartError::PersistenceUnavailable(e) => {
                Self::PersistenceUnavailable(e)
            }
        }
    }
}

impl From<VoteError> for ElectionError {
    fn from(e: VoteError) -> Self {
        match e {
            VoteError::NotActive(e) => Self::NotActive(e),
            VoteError::InvalidOption(e) => Self::InvalidOption(e),
            VoteError::PersistenceUnavailable(e) => {
                Self::PersistenceUnavailable(e)
            }
        }
    }
}

impl From<WithdrawError> for ElectionError {
    fn from(e: WithdrawError) -> Self {
        match e {
            WithdrawError::NotActive(e) => Self::NotActive(e),
            WithdrawError::PersistenceUnavailable(e) => {
                Self::PersistenceUnavailable(e)
            }
        }
    }
}

impl From<StopError> for ElectionError {
    fn from(e: StopError) -> Self {
        match e {
            StopError::NotActive(e) => Self::NotActive(e),
            StopError::PersistenceUnavailable(e) => {
                Self::PersistenceUnavailable(e)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("infallible")]
pub enum Infallible {}
