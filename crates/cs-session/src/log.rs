//! Timestamped activity log and export.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::notice::{Notice, NoticeKind, Notifier};

/// A notice stamped with the time it was recorded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    /// The notice text.
    pub message: String,
    /// The notice kind.
    pub kind: NoticeKind,
    /// When the notice was recorded.
    pub timestamp: DateTime<Utc>,
}

impl LogEntry {
    /// Stamp a notice with the current time.
    pub fn now(notice: Notice) -> Self {
        Self::at(notice, Utc::now())
    }

    /// Stamp a notice with a given time.
    pub fn at(notice: Notice, timestamp: DateTime<Utc>) -> Self {
        Self {
            message: notice.message,
            kind: notice.kind,
            timestamp,
        }
    }

    /// `[HH:MM:SS] message`.
    pub fn line(&self) -> String {
        format!("[{}] {}", self.timestamp.format("%H:%M:%S"), self.message)
    }
}

/// A chronological log of session notices.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityLog {
    entries: Vec<LogEntry>,
}

impl ActivityLog {
    /// Create an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn append(&mut self, entry: LogEntry) {
        self.entries.push(entry);
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Export as plain text, one `[HH:MM:SS] message` line per entry.
    pub fn export_text(&self) -> String {
        let mut out = String::from("Call Session Log\n================\n\n");
        for entry in &self.entries {
            out.push_str(&entry.line());
            out.push('\n');
        }
        out
    }

    /// Export as markdown. Success entries are bold.
    pub fn export_markdown(&self) -> String {
        let mut out = String::from("# Call Session Log\n\n");
        for entry in &self.entries {
            let time = entry.timestamp.format("%H:%M:%S");
            match entry.kind {
                NoticeKind::Success => {
                    out.push_str(&format!("- `{time}` **{}**\n", entry.message));
                }
                NoticeKind::Plain => {
                    out.push_str(&format!("- `{time}` {}\n", entry.message));
                }
            }
        }
        out
    }
}

impl Notifier for ActivityLog {
    fn notify(&mut self, notice: Notice) {
        self.append(LogEntry::now(notice));
    }
}
