pub mod check;
pub mod console;
pub mod init;
pub mod list;
pub mod run;

use std::path::Path;

use chrono::Local;
use colored::Colorize;

use cs_core::{Blueprint, Campaign};
use cs_session::{LogEntry, Notice, NoticeKind};

/// Read and parse a campaign file without building it.
fn load_blueprint(path: &Path) -> Result<Blueprint, String> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    serde_json::from_str(&content).map_err(|e| format!("invalid campaign file {}: {e}", path.display()))
}

/// Read a campaign file and build the campaign it describes.
fn load_campaign(path: &Path) -> Result<Campaign, String> {
    load_blueprint(path)?
        .build()
        .map_err(|e| format!("{}: {e}", path.display()))
}

/// Print a log entry as `[HH:MM:SS] message` in local time.
fn print_entry(entry: &LogEntry) {
    let time = entry.timestamp.with_timezone(&Local).format("%H:%M:%S");
    let stamp = format!("[{time}]").dimmed();
    match entry.kind {
        NoticeKind::Success => println!("{stamp} {}", entry.message.green()),
        NoticeKind::Plain => println!("{stamp} {}", entry.message),
    }
}

/// Notifier that stamps and prints each notice as it arrives.
fn echo(notice: Notice) {
    print_entry(&LogEntry::now(notice));
}
