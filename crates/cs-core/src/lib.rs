//! Core types for Callsheet: contacts, templates, and the call queue.
//!
//! This crate holds the campaign state and the script renderer. It knows
//! nothing about pacing or async execution; the session runner in
//! `cs-session` drives a [`Campaign`] through [`Campaign::begin_session`]
//! and [`Campaign::finish_session`].

/// Serializable campaign descriptions used to seed state.
pub mod blueprint;
/// The campaign state container and its session bookkeeping.
pub mod campaign;
/// Contact, template, and job types.
pub mod entry;
/// Error types used throughout the crate.
pub mod error;
/// Placeholder substitution for call scripts.
pub mod render;

/// Re-export the blueprint types.
pub use blueprint::{Blueprint, QueuedCall};
/// Re-export campaign types.
pub use campaign::{Call, Campaign, SessionPlan};
/// Re-export entry types.
pub use entry::{Contact, Job, JobId, Template};
/// Re-export error types.
pub use error::{CoreError, CoreResult};
/// Re-export the renderer.
pub use render::{DEFAULT_COMPANY, render, unknown_placeholders};
