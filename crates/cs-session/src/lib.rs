//! Paced call sessions for Callsheet.
//!
//! A [`SessionRunner`] walks a snapshot of the campaign queue one call at a
//! time. Each call is dialed, its script is rendered and spoken, and then it
//! is marked completed, with a fixed pause after the first two steps.
//! Progress goes out as [`Notice`]s through a [`Notifier`], and an
//! [`ActivityLog`] can timestamp and export them.

pub mod config;
pub mod error;
pub mod log;
pub mod notice;
pub mod pacer;
pub mod runner;

pub use config::SessionConfig;
pub use error::{SessionError, SessionResult};
pub use log::{ActivityLog, LogEntry};
pub use notice::{Notice, NoticeKind, Notifier};
pub use pacer::{Pacer, SleepPacer};
pub use runner::{SessionReport, SessionRunner};
