//! The call-session runner.
//!
//! A session moves every call in the queue snapshot through three steps,
//! strictly one call at a time:
//!
//! 1. dialing, followed by a pause,
//! 2. speaking the rendered script, followed by a pause,
//! 3. completed.
//!
//! Cancellation is checked between calls, never inside one, so a call that
//! has started always reaches the completed step.

use cs_core::{Call, Campaign, JobId, SessionPlan, render};
use tokio_util::sync::CancellationToken;

use crate::config::SessionConfig;
use crate::error::{SessionError, SessionResult};
use crate::notice::{Notice, Notifier};
use crate::pacer::{Pacer, SleepPacer};

/// Outcome of one session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionReport {
    /// Calls in the snapshot.
    pub total: usize,
    /// Jobs that reached the completed step, in processing order.
    pub completed: Vec<JobId>,
    /// Whether the session stopped early on cancellation.
    pub cancelled: bool,
}

/// Runs call sessions against a campaign.
#[derive(Debug, Clone)]
pub struct SessionRunner<P = SleepPacer> {
    config: SessionConfig,
    pacer: P,
}

impl SessionRunner<SleepPacer> {
    /// Create a runner that waits on the tokio timer.
    pub fn new(config: SessionConfig) -> Self {
        Self::with_pacer(config, SleepPacer)
    }
}

impl<P: Pacer> SessionRunner<P> {
    /// Create a runner with a custom pacer.
    pub fn with_pacer(config: SessionConfig, pacer: P) -> Self {
        Self { config, pacer }
    }

    /// Get the configuration.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Run a whole session: snapshot the queue, process every call, then
    /// drop the processed jobs from the queue.
    ///
    /// An empty queue or a session already in progress is reported through
    /// `notifier` and returned as an error; the campaign is not touched.
    pub async fn run<N: Notifier>(
        &self,
        campaign: &mut Campaign,
        notifier: &mut N,
        cancel: &CancellationToken,
    ) -> SessionResult<SessionReport> {
        let plan = self.begin(campaign, notifier)?;
        let report = self.execute(plan, notifier, cancel).await;
        self.finish(campaign, &report, notifier);
        Ok(report)
    }

    /// Mark the campaign as running and take the queue snapshot.
    pub fn begin<N: Notifier>(
        &self,
        campaign: &mut Campaign,
        notifier: &mut N,
    ) -> SessionResult<SessionPlan> {
        match campaign.begin_session() {
            Ok(plan) => {
                tracing::info!(total = plan.len(), "session started");
                Ok(plan)
            }
            Err(err) => {
                let err = SessionError::from(err);
                let message = match &err {
                    SessionError::QueueEmpty => "Queue is empty.".to_string(),
                    SessionError::AlreadyRunning => "A session is already running.".to_string(),
                    SessionError::Campaign(inner) => inner.to_string(),
                };
                tracing::debug!(error = %err, "session refused");
                notifier.notify(Notice::plain(message));
                Err(err)
            }
        }
    }

    /// Process the calls of a plan in order.
    ///
    /// Does not touch the campaign, so callers sharing the campaign behind
    /// a lock can release it while the session runs.
    pub async fn execute<N: Notifier>(
        &self,
        plan: SessionPlan,
        notifier: &mut N,
        cancel: &CancellationToken,
    ) -> SessionReport {
        let total = plan.len();
        let mut completed = Vec::with_capacity(total);
        let mut cancelled = false;

        for call in plan {
            if cancel.is_cancelled() {
                cancelled = true;
                break;
            }
            self.place_call(&call, notifier).await;
            completed.push(call.job);
        }

        SessionReport {
            total,
            completed,
            cancelled,
        }
    }

    /// Drop processed jobs from the queue, clear the running flag, and emit
    /// the closing notice.
    pub fn finish<N: Notifier>(
        &self,
        campaign: &mut Campaign,
        report: &SessionReport,
        notifier: &mut N,
    ) {
        campaign.finish_session(&report.completed);

        if report.cancelled {
            tracing::info!(
                completed = report.completed.len(),
                total = report.total,
                remaining = campaign.queue().len(),
                "session cancelled"
            );
            notifier.notify(Notice::plain(format!(
                "Session cancelled ({} of {} calls completed)",
                report.completed.len(),
                report.total
            )));
        } else {
            tracing::info!(total = report.total, "session complete");
            notifier.notify(Notice::success("Session complete"));
        }
    }

    async fn place_call<N: Notifier>(&self, call: &Call, notifier: &mut N) {
        let contact = &call.contact;

        tracing::debug!(job = %call.job, position = call.position, contact = %contact.name, "dialing");
        notifier.notify(Notice::plain(format!(
            "Dialing {} at {}...",
            contact.name, contact.phone
        )));
        self.pacer.pause(self.config.pace).await;

        let script = render(&call.template.body, contact);
        tracing::debug!(job = %call.job, template = %call.template.name, "speaking script");
        notifier.notify(Notice::plain(script));
        self.pacer.pause(self.config.pace).await;

        tracing::debug!(job = %call.job, "call completed");
        notifier.notify(Notice::success(format!("{} marked completed", contact.name)));
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use cs_core::{Contact, Template};

    use super::*;
    use crate::log::ActivityLog;
    use crate::notice::NoticeKind;

    /// Records pauses instead of sleeping.
    #[derive(Clone, Default)]
    struct RecordingPacer {
        timeline: Arc<Mutex<Vec<String>>>,
    }

    impl Pacer for RecordingPacer {
        async fn pause(&self, duration: Duration) {
            self.timeline
                .lock()
                .unwrap()
                .push(format!("pause {}ms", duration.as_millis()));
        }
    }

    fn runner() -> (SessionRunner<RecordingPacer>, Arc<Mutex<Vec<String>>>) {
        let pacer = RecordingPacer::default();
        let timeline = pacer.timeline.clone();
        (
            SessionRunner::with_pacer(SessionConfig::default(), pacer),
            timeline,
        )
    }

    fn ann_campaign() -> Campaign {
        let mut c = Campaign::new();
        c.add_contact(Contact::new("Ann", "111")).unwrap();
        c.add_template(Template::new("T1", "Hello {{name}} from {{company}}"))
            .unwrap();
        c.enqueue(0, 0).unwrap();
        c
    }

    fn three_call_campaign() -> Campaign {
        let mut c = Campaign::new();
        c.add_contact(Contact::new("Ann", "111")).unwrap();
        c.add_contact(Contact::new("Bob", "222").with_company("Acme"))
            .unwrap();
        c.add_contact(Contact::new("Cy", "333")).unwrap();
        c.add_template(Template::new("T1", "Hi {{name}} of {{company}}"))
            .unwrap();
        c.enqueue(0, 0).unwrap();
        c.enqueue(1, 0).unwrap();
        c.enqueue(2, 0).unwrap();
        c
    }

    #[tokio::test]
    async fn single_call_scenario() {
        let (runner, _) = runner();
        let mut campaign = ann_campaign();
        let mut notices: Vec<Notice> = Vec::new();

        let report = runner
            .run(&mut campaign, &mut notices, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(
            notices,
            vec![
                Notice::plain("Dialing Ann at 111..."),
                Notice::plain("Hello Ann from your team"),
                Notice::success("Ann marked completed"),
                Notice::success("Session complete"),
            ]
        );
        assert_eq!(report.total, 1);
        assert_eq!(report.completed.len(), 1);
        assert!(!report.cancelled);
        assert!(campaign.queue().is_empty());
        assert!(!campaign.is_running());
    }

    #[tokio::test]
    async fn steps_and_pauses_interleave_in_order() {
        let (runner, timeline) = runner();
        let mut campaign = three_call_campaign();
        let mut sink = {
            let timeline = timeline.clone();
            move |n: Notice| timeline.lock().unwrap().push(n.message)
        };

        runner
            .run(&mut campaign, &mut sink, &CancellationToken::new())
            .await
            .unwrap();

        let timeline = timeline.lock().unwrap().clone();
        assert_eq!(
            timeline,
            vec![
                "Dialing Ann at 111...",
                "pause 700ms",
                "Hi Ann of your team",
                "pause 700ms",
                "Ann marked completed",
                "Dialing Bob at 222...",
                "pause 700ms",
                "Hi Bob of Acme",
                "pause 700ms",
                "Bob marked completed",
                "Dialing Cy at 333...",
                "pause 700ms",
                "Hi Cy of your team",
                "pause 700ms",
                "Cy marked completed",
                "Session complete",
            ]
        );
    }

    #[tokio::test]
    async fn emits_three_notices_per_call_plus_one() {
        let (runner, _) = runner();
        let mut campaign = three_call_campaign();
        let contacts_before = campaign.contacts().to_vec();
        let templates_before = campaign.templates().to_vec();
        let mut notices: Vec<Notice> = Vec::new();

        runner
            .run(&mut campaign, &mut notices, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(notices.len(), 3 * 3 + 1);
        let successes = notices
            .iter()
            .filter(|n| n.kind == NoticeKind::Success)
            .count();
        assert_eq!(successes, 4);
        assert!(campaign.queue().is_empty());
        assert_eq!(campaign.contacts(), contacts_before.as_slice());
        assert_eq!(campaign.templates(), templates_before.as_slice());
    }

    #[tokio::test]
    async fn empty_queue_emits_one_notice_and_changes_nothing() {
        let (runner, timeline) = runner();
        let mut campaign = Campaign::new();
        campaign.add_contact(Contact::new("Ann", "111")).unwrap();
        let mut notices: Vec<Notice> = Vec::new();

        let result = runner
            .run(&mut campaign, &mut notices, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::QueueEmpty)));
        assert_eq!(notices, vec![Notice::plain("Queue is empty.")]);
        assert!(timeline.lock().unwrap().is_empty());
        assert!(!campaign.is_running());
        assert_eq!(campaign.contacts().len(), 1);
    }

    #[tokio::test]
    async fn second_session_is_refused_while_running() {
        let (runner, _) = runner();
        let mut campaign = ann_campaign();
        let mut notices: Vec<Notice> = Vec::new();

        let plan = runner.begin(&mut campaign, &mut notices).unwrap();
        let result = runner
            .run(&mut campaign, &mut notices, &CancellationToken::new())
            .await;

        assert!(matches!(result, Err(SessionError::AlreadyRunning)));
        assert_eq!(notices, vec![Notice::plain("A session is already running.")]);
        assert_eq!(campaign.queue().len(), 1);
        assert_eq!(plan.len(), 1);
    }

    #[tokio::test]
    async fn cancellation_stops_at_the_next_call() {
        let (runner, _) = runner();
        let mut campaign = three_call_campaign();
        let remaining: Vec<JobId> = campaign.queue()[1..].iter().map(|j| j.id).collect();
        let cancel = CancellationToken::new();
        let mut notices: Vec<Notice> = Vec::new();

        let report = {
            let trigger = cancel.clone();
            let mut sink = |n: Notice| {
                if n.message == "Ann marked completed" {
                    trigger.cancel();
                }
                notices.push(n);
            };
            runner.run(&mut campaign, &mut sink, &cancel).await.unwrap()
        };

        assert!(report.cancelled);
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.total, 3);
        assert_eq!(notices.len(), 4);
        assert_eq!(
            notices.last().unwrap(),
            &Notice::plain("Session cancelled (1 of 3 calls completed)")
        );
        let left: Vec<JobId> = campaign.queue().iter().map(|j| j.id).collect();
        assert_eq!(left, remaining);
        assert!(!campaign.is_running());
    }

    #[tokio::test]
    async fn a_started_call_finishes_after_cancellation() {
        let (runner, timeline) = runner();
        let mut campaign = three_call_campaign();
        let remaining: Vec<JobId> = campaign.queue()[1..].iter().map(|j| j.id).collect();
        let cancel = CancellationToken::new();
        let mut notices: Vec<Notice> = Vec::new();

        let report = {
            let trigger = cancel.clone();
            let mut sink = |n: Notice| {
                if n.message == "Dialing Ann at 111..." {
                    trigger.cancel();
                }
                notices.push(n);
            };
            runner.run(&mut campaign, &mut sink, &cancel).await.unwrap()
        };

        assert_eq!(
            notices,
            vec![
                Notice::plain("Dialing Ann at 111..."),
                Notice::plain("Hi Ann of your team"),
                Notice::success("Ann marked completed"),
                Notice::plain("Session cancelled (1 of 3 calls completed)"),
            ]
        );
        assert_eq!(timeline.lock().unwrap().len(), 2);
        assert!(report.cancelled);
        assert_eq!(report.completed.len(), 1);
        assert_eq!(report.total, 3);
        let left: Vec<JobId> = campaign.queue().iter().map(|j| j.id).collect();
        assert_eq!(left, remaining);
    }

    #[tokio::test]
    async fn cancelled_before_start_processes_nothing() {
        let (runner, timeline) = runner();
        let mut campaign = three_call_campaign();
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut notices: Vec<Notice> = Vec::new();

        let report = runner.run(&mut campaign, &mut notices, &cancel).await.unwrap();

        assert!(report.completed.is_empty());
        assert_eq!(campaign.queue().len(), 3);
        assert!(timeline.lock().unwrap().is_empty());
        assert_eq!(
            notices,
            vec![Notice::plain("Session cancelled (0 of 3 calls completed)")]
        );
    }

    #[tokio::test]
    async fn jobs_queued_mid_session_wait_for_the_next_one() {
        let (runner, _) = runner();
        let mut campaign = ann_campaign();
        let mut notices: Vec<Notice> = Vec::new();

        let plan = runner.begin(&mut campaign, &mut notices).unwrap();
        let late = campaign.enqueue(0, 0).unwrap();
        let report = runner
            .execute(plan, &mut notices, &CancellationToken::new())
            .await;
        runner.finish(&mut campaign, &report, &mut notices);

        assert_eq!(report.total, 1);
        assert_eq!(notices.len(), 4);
        assert_eq!(campaign.queue().len(), 1);
        assert_eq!(campaign.queue()[0].id, late);
        assert!(!campaign.is_running());
    }

    #[tokio::test]
    async fn clearing_mid_session_does_not_disturb_it() {
        let (runner, _) = runner();
        let mut campaign = three_call_campaign();
        let mut notices: Vec<Notice> = Vec::new();

        let plan = runner.begin(&mut campaign, &mut notices).unwrap();
        campaign.clear_queue();
        let fresh = campaign.enqueue(2, 0).unwrap();
        let report = runner
            .execute(plan, &mut notices, &CancellationToken::new())
            .await;
        runner.finish(&mut campaign, &report, &mut notices);

        assert_eq!(report.completed.len(), 3);
        assert_eq!(campaign.queue().len(), 1);
        assert_eq!(campaign.queue()[0].id, fresh);
    }

    #[tokio::test]
    async fn activity_log_records_the_session() {
        let runner = SessionRunner::new(SessionConfig::default().with_pace(Duration::ZERO));
        let mut campaign = ann_campaign();
        let mut log = ActivityLog::new();

        runner
            .run(&mut campaign, &mut log, &CancellationToken::new())
            .await
            .unwrap();

        assert_eq!(log.len(), 4);
        assert!(log.export_text().contains("] Hello Ann from your team\n"));
        assert!(log.export_markdown().contains("**Session complete**"));
    }
}
