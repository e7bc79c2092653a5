//! Error types for call sessions.

use thiserror::Error;

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

/// Reasons a session refused to start.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Nothing was queued.
    #[error("queue is empty")]
    QueueEmpty,

    /// Another session holds the campaign.
    #[error("a session is already running")]
    AlreadyRunning,

    /// Any other campaign precondition.
    #[error("{0}")]
    Campaign(cs_core::CoreError),
}

impl From<cs_core::CoreError> for SessionError {
    fn from(err: cs_core::CoreError) -> Self {
        match err {
            cs_core::CoreError::QueueEmpty => Self::QueueEmpty,
            cs_core::CoreError::SessionActive => Self::AlreadyRunning,
            other => Self::Campaign(other),
        }
    }
}
