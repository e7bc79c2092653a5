//! Progress notices and the sinks that receive them.

use std::fmt;

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

/// How a notice should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    /// Informational progress.
    Plain,
    /// A completed call or session.
    Success,
}

/// One progress message emitted by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    /// The text to show.
    pub message: String,
    /// Presentation hint.
    pub kind: NoticeKind,
}

impl Notice {
    /// A plain notice.
    pub fn plain(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Plain,
        }
    }

    /// A success notice.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            kind: NoticeKind::Success,
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Receives notices in the order a session emits them.
pub trait Notifier {
    /// Accept one notice.
    fn notify(&mut self, notice: Notice);
}

impl<F: FnMut(Notice)> Notifier for F {
    fn notify(&mut self, notice: Notice) {
        self(notice);
    }
}

impl Notifier for Vec<Notice> {
    fn notify(&mut self, notice: Notice) {
        self.push(notice);
    }
}

/// Forwards to a channel. Notices sent after the receiver is gone are dropped.
impl Notifier for UnboundedSender<Notice> {
    fn notify(&mut self, notice: Notice) {
        if self.send(notice).is_err() {
            tracing::debug!("notice receiver closed");
        }
    }
}
