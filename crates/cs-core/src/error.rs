/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised when a campaign operation is refused.
///
/// None of these are faults: each one means a precondition did not hold
/// and the campaign was left untouched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    /// A call was queued before any contact or template existed.
    #[error("add at least one contact and one template first")]
    NothingToQueue,

    /// A queued call referenced a contact that does not exist.
    #[error("no contact at position {index} ({count} contacts)")]
    ContactOutOfRange {
        /// The requested zero-based position.
        index: usize,
        /// How many contacts exist.
        count: usize,
    },

    /// A queued call referenced a template that does not exist.
    #[error("no template at position {index} ({count} templates)")]
    TemplateOutOfRange {
        /// The requested zero-based position.
        index: usize,
        /// How many templates exist.
        count: usize,
    },

    /// A session was requested with nothing queued.
    #[error("queue is empty")]
    QueueEmpty,

    /// A session was requested while another one is still running.
    #[error("a session is already running")]
    SessionActive,

    /// A contact or template was rejected on input.
    #[error("validation error: {0}")]
    Validation(String),
}
