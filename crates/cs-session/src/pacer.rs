//! Simulated latency between call steps.

use std::future::Future;
use std::time::Duration;

/// Suspends a session for a simulated interval.
pub trait Pacer {
    /// Wait for `duration`. Pauses always run to completion.
    fn pause(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Waits on the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct SleepPacer;

impl Pacer for SleepPacer {
    async fn pause(&self, duration: Duration) {
        if !duration.is_zero() {
            tokio::time::sleep(duration).await;
        }
    }
}
