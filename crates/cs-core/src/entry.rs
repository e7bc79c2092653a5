use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier the campaign assigns to every queued call.
///
/// Ids increase monotonically for the lifetime of a campaign and are never
/// reused, so a job can still be told apart after the queue was cleared
/// and refilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct JobId(pub u64);

impl fmt::Display for JobId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Someone to call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Display name, also substituted for `{{name}}`.
    pub name: String,
    /// Phone number, substituted for `{{phone}}`.
    pub phone: String,
    /// Company name; empty when unknown.
    #[serde(default)]
    pub company: String,
}

impl Contact {
    /// Create a contact without a company.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            company: String::new(),
        }
    }

    /// Set the company.
    pub fn with_company(mut self, company: impl Into<String>) -> Self {
        self.company = company.into();
        self
    }

    /// Whether a company was given.
    pub fn has_company(&self) -> bool {
        !self.company.is_empty()
    }
}

impl fmt::Display for Contact {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.phone)?;
        if self.has_company() {
            write!(f, " · {}", self.company)?;
        }
        Ok(())
    }
}

/// A named call script containing placeholder tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Short label shown in listings.
    pub name: String,
    /// Script text; may contain `{{name}}`, `{{company}}`, `{{phone}}`.
    pub body: String,
}

impl Template {
    /// Create a template.
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            body: body.into(),
        }
    }
}

impl fmt::Display for Template {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// A queued call: one contact paired with one template.
///
/// Both indices were in range when the job was queued. Contacts and
/// templates are never removed, so they stay valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    /// Campaign-assigned identifier.
    pub id: JobId,
    /// Position of the contact in [`crate::Campaign::contacts`].
    pub contact: usize,
    /// Position of the template in [`crate::Campaign::templates`].
    pub template: usize,
}
