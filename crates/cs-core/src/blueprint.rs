use serde::{Deserialize, Serialize};

use crate::campaign::Campaign;
use crate::entry::{Contact, Template};
use crate::error::CoreResult;

/// A call to queue, by zero-based contact and template position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueuedCall {
    /// Contact position.
    pub contact: usize,
    /// Template position.
    pub template: usize,
}

/// A serializable description of a campaign's initial state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blueprint {
    /// Contacts, in order.
    #[serde(default)]
    pub contacts: Vec<Contact>,
    /// Templates, in order.
    #[serde(default)]
    pub templates: Vec<Template>,
    /// Calls to queue, in order.
    #[serde(default)]
    pub queue: Vec<QueuedCall>,
}

impl Blueprint {
    /// Build a campaign, applying the same checks as interactive input.
    pub fn build(&self) -> CoreResult<Campaign> {
        let mut campaign = Campaign::new();
        for contact in &self.contacts {
            campaign.add_contact(contact.clone())?;
        }
        for template in &self.templates {
            campaign.add_template(template.clone())?;
        }
        for call in &self.queue {
            campaign.enqueue(call.contact, call.template)?;
        }
        Ok(campaign)
    }

    /// A small starter campaign.
    pub fn sample() -> Self {
        Self {
            contacts: vec![
                Contact::new("Ann Example", "+1 555 0100"),
                Contact::new("Ben Sample", "+1 555 0101").with_company("Northwind"),
            ],
            templates: vec![
                Template::new(
                    "Intro",
                    "Hi {{name}}, this is a quick call on behalf of {{company}}.",
                ),
                Template::new(
                    "Follow-up",
                    "Hello {{name}}, following up on our chat. Is {{phone}} still the best number?",
                ),
            ],
            queue: vec![
                QueuedCall {
                    contact: 0,
                    template: 0,
                },
                QueuedCall {
                    contact: 1,
                    template: 1,
                },
            ],
        }
    }
}
