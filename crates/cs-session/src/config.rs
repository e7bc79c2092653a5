//! Configuration for a call session.

use std::time::Duration;

/// Pause after dialing and after speaking the script.
pub const DEFAULT_PACE: Duration = Duration::from_millis(700);

/// Configuration for a call session.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Simulated latency between the steps of a call.
    pub pace: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self { pace: DEFAULT_PACE }
    }
}

impl SessionConfig {
    /// Set the pause between steps.
    pub fn with_pace(mut self, pace: Duration) -> Self {
        self.pace = pace;
        self
    }

    /// Set the pause between steps in milliseconds.
    pub fn with_pace_millis(self, millis: u64) -> Self {
        self.with_pace(Duration::from_millis(millis))
    }
}
