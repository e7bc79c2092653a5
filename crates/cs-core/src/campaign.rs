use crate::entry::{Contact, Job, JobId, Template};
use crate::error::{CoreError, CoreResult};

/// One call of a session, resolved against the campaign at session start.
///
/// Owns copies of its contact and template so a running session never
/// needs to borrow the campaign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// The queued job this call was taken from.
    pub job: JobId,
    /// One-based position within the session.
    pub position: usize,
    /// The contact being called.
    pub contact: Contact,
    /// The script template.
    pub template: Template,
}

/// The queue snapshot a session processes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionPlan {
    calls: Vec<Call>,
}

impl SessionPlan {
    /// The calls in processing order.
    pub fn calls(&self) -> &[Call] {
        &self.calls
    }

    /// Number of calls in the plan.
    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Whether the plan has no calls.
    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }
}

impl IntoIterator for SessionPlan {
    type Item = Call;
    type IntoIter = std::vec::IntoIter<Call>;

    fn into_iter(self) -> Self::IntoIter {
        self.calls.into_iter()
    }
}

/// The application state: contacts, templates, the call queue, and whether
/// a session is in progress.
#[derive(Debug, Clone, Default)]
pub struct Campaign {
    contacts: Vec<Contact>,
    templates: Vec<Template>,
    queue: Vec<Job>,
    next_job: u64,
    running: bool,
}

impl Campaign {
    /// Create an empty campaign.
    pub fn new() -> Self {
        Self::default()
    }

    // -----------------------------------------------------------------------
    // Contacts and templates
    // -----------------------------------------------------------------------

    /// Add a contact and return its position. Fields are trimmed.
    pub fn add_contact(&mut self, contact: Contact) -> CoreResult<usize> {
        let contact = Contact {
            name: contact.name.trim().to_string(),
            phone: contact.phone.trim().to_string(),
            company: contact.company.trim().to_string(),
        };
        if contact.name.is_empty() {
            return Err(CoreError::Validation("contact name is required".into()));
        }
        if contact.phone.is_empty() {
            return Err(CoreError::Validation("contact phone is required".into()));
        }

        self.contacts.push(contact);
        Ok(self.contacts.len() - 1)
    }

    /// Add a template and return its position. Fields are trimmed.
    pub fn add_template(&mut self, template: Template) -> CoreResult<usize> {
        let template = Template {
            name: template.name.trim().to_string(),
            body: template.body.trim().to_string(),
        };
        if template.name.is_empty() {
            return Err(CoreError::Validation("template name is required".into()));
        }
        if template.body.is_empty() {
            return Err(CoreError::Validation("template body is required".into()));
        }

        self.templates.push(template);
        Ok(self.templates.len() - 1)
    }

    /// All contacts in insertion order.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    /// All templates in insertion order.
    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    // -----------------------------------------------------------------------
    // Queue
    // -----------------------------------------------------------------------

    /// Queue a call pairing the contact and template at the given positions.
    pub fn enqueue(&mut self, contact: usize, template: usize) -> CoreResult<JobId> {
        if self.contacts.is_empty() || self.templates.is_empty() {
            return Err(CoreError::NothingToQueue);
        }
        if contact >= self.contacts.len() {
            return Err(CoreError::ContactOutOfRange {
                index: contact,
                count: self.contacts.len(),
            });
        }
        if template >= self.templates.len() {
            return Err(CoreError::TemplateOutOfRange {
                index: template,
                count: self.templates.len(),
            });
        }

        let id = JobId(self.next_job);
        self.next_job += 1;
        self.queue.push(Job {
            id,
            contact,
            template,
        });
        Ok(id)
    }

    /// Remove every pending job and return how many were removed.
    ///
    /// Allowed while a session runs; the session keeps its own snapshot.
    pub fn clear_queue(&mut self) -> usize {
        let removed = self.queue.len();
        self.queue.clear();
        removed
    }

    /// Pending jobs in processing order.
    pub fn queue(&self) -> &[Job] {
        &self.queue
    }

    /// One listing line per queued job, e.g. `1. Ann → Intro`.
    pub fn queue_lines(&self) -> Vec<String> {
        self.queue
            .iter()
            .enumerate()
            .map(|(i, job)| {
                format!(
                    "{}. {} → {}",
                    i + 1,
                    self.contacts[job.contact].name,
                    self.templates[job.template].name
                )
            })
            .collect()
    }

    // -----------------------------------------------------------------------
    // Sessions
    // -----------------------------------------------------------------------

    /// Whether a session is in progress.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Mark a session as started and snapshot the queue.
    ///
    /// Fails without touching anything when the queue is empty or a session
    /// is already running.
    pub fn begin_session(&mut self) -> CoreResult<SessionPlan> {
        if self.running {
            return Err(CoreError::SessionActive);
        }
        if self.queue.is_empty() {
            return Err(CoreError::QueueEmpty);
        }

        let calls = self
            .queue
            .iter()
            .enumerate()
            .map(|(i, job)| Call {
                job: job.id,
                position: i + 1,
                contact: self.contacts[job.contact].clone(),
                template: self.templates[job.template].clone(),
            })
            .collect();

        self.running = true;
        Ok(SessionPlan { calls })
    }

    /// Drop the processed jobs from the queue and mark the session over.
    ///
    /// Jobs queued after [`Campaign::begin_session`], and jobs the session
    /// never reached, stay queued in their original order.
    pub fn finish_session(&mut self, processed: &[JobId]) {
        self.queue.retain(|job| !processed.contains(&job.id));
        self.running = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded() -> Campaign {
        let mut c = Campaign::new();
        c.add_contact(Contact::new("Ann", "111")).unwrap();
        c.add_contact(Contact::new("Bob", "222").with_company("Acme"))
            .unwrap();
        c.add_template(Template::new("T1", "Hello {{name}} from {{company}}"))
            .unwrap();
        c
    }

    #[test]
    fn add_contact_trims_and_returns_position() {
        let mut c = Campaign::new();
        let pos = c
            .add_contact(Contact::new("  Ann ", " 111 ").with_company("  "))
            .unwrap();
        assert_eq!(pos, 0);
        assert_eq!(c.contacts()[0], Contact::new("Ann", "111"));
    }

    #[test]
    fn add_contact_requires_name_and_phone() {
        let mut c = Campaign::new();
        assert!(matches!(
            c.add_contact(Contact::new(" ", "111")),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            c.add_contact(Contact::new("Ann", "")),
            Err(CoreError::Validation(_))
        ));
        assert!(c.contacts().is_empty());
    }

    #[test]
    fn add_template_requires_body() {
        let mut c = Campaign::new();
        assert!(c.add_template(Template::new("T", "  ")).is_err());
        assert_eq!(c.add_template(Template::new("T", "x")).unwrap(), 0);
    }

    #[test]
    fn enqueue_without_entries_is_refused() {
        let mut c = Campaign::new();
        c.add_contact(Contact::new("Ann", "111")).unwrap();
        assert_eq!(c.enqueue(0, 0), Err(CoreError::NothingToQueue));
        assert!(c.queue().is_empty());
    }

    #[test]
    fn enqueue_checks_ranges() {
        let mut c = seeded();
        assert_eq!(
            c.enqueue(2, 0),
            Err(CoreError::ContactOutOfRange { index: 2, count: 2 })
        );
        assert_eq!(
            c.enqueue(0, 1),
            Err(CoreError::TemplateOutOfRange { index: 1, count: 1 })
        );
        assert!(c.queue().is_empty());
    }

    #[test]
    fn job_ids_are_never_reused() {
        let mut c = seeded();
        let a = c.enqueue(0, 0).unwrap();
        assert_eq!(c.clear_queue(), 1);
        let b = c.enqueue(0, 0).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn queue_lines_format() {
        let mut c = seeded();
        c.enqueue(0, 0).unwrap();
        c.enqueue(1, 0).unwrap();
        assert_eq!(c.queue_lines(), vec!["1. Ann → T1", "2. Bob → T1"]);
    }

    #[test]
    fn begin_session_on_empty_queue() {
        let mut c = seeded();
        assert_eq!(c.begin_session(), Err(CoreError::QueueEmpty));
        assert!(!c.is_running());
    }

    #[test]
    fn begin_session_snapshots_queue() {
        let mut c = seeded();
        let first = c.enqueue(1, 0).unwrap();
        c.enqueue(0, 0).unwrap();

        let plan = c.begin_session().unwrap();
        assert!(c.is_running());
        assert_eq!(plan.len(), 2);
        assert_eq!(plan.calls()[0].job, first);
        assert_eq!(plan.calls()[0].position, 1);
        assert_eq!(plan.calls()[0].contact.name, "Bob");
        assert_eq!(plan.calls()[1].position, 2);
    }

    #[test]
    fn begin_session_rejects_reentry() {
        let mut c = seeded();
        c.enqueue(0, 0).unwrap();
        c.begin_session().unwrap();
        assert_eq!(c.begin_session(), Err(CoreError::SessionActive));
    }

    #[test]
    fn finish_session_keeps_late_jobs() {
        let mut c = seeded();
        c.enqueue(0, 0).unwrap();
        let plan = c.begin_session().unwrap();
        let late = c.enqueue(1, 0).unwrap();

        let processed: Vec<JobId> = plan.calls().iter().map(|call| call.job).collect();
        c.finish_session(&processed);

        assert!(!c.is_running());
        assert_eq!(c.queue().len(), 1);
        assert_eq!(c.queue()[0].id, late);
    }

    #[test]
    fn finish_session_keeps_unprocessed_order() {
        let mut c = seeded();
        let a = c.enqueue(0, 0).unwrap();
        let b = c.enqueue(1, 0).unwrap();
        let d = c.enqueue(0, 0).unwrap();
        c.begin_session().unwrap();

        c.finish_session(&[a]);
        let left: Vec<JobId> = c.queue().iter().map(|j| j.id).collect();
        assert_eq!(left, vec![b, d]);
    }

    #[test]
    fn clear_during_session_is_allowed() {
        let mut c = seeded();
        c.enqueue(0, 0).unwrap();
        let plan = c.begin_session().unwrap();
        assert_eq!(c.clear_queue(), 1);
        assert_eq!(plan.len(), 1);
        c.finish_session(&[plan.calls()[0].job]);
        assert!(c.queue().is_empty());
    }
}
