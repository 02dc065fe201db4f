//! Mail source boundary: the record type and the fetch adapter trait.
//!
//! Retrieval mechanics (transport, auth handshakes, credential storage) live
//! behind `MailSource`; the pipeline only sees subject/sender pairs.

pub mod cache;
pub mod http;

use crate::error::TriageError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A single fetched email, reduced to the fields the pipeline uses.
///
/// Identity for cache-keying is the `(subject, sender)` pair, not an opaque
/// message id: two records carrying the same pair are cache-equivalent even
/// if they came from different underlying messages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailRecord {
    pub subject: String,
    pub sender: String,
}

impl EmailRecord {
    pub fn new(subject: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            sender: sender.into(),
        }
    }
}

#[async_trait]
pub trait MailSource: Send + Sync {
    /// Fetch up to `limit` records from the inbox, most recent first.
    /// Transport or auth failures surface as `TriageError::SourceFetch`.
    async fn fetch(&self, limit: usize) -> Result<Vec<EmailRecord>, TriageError>;
}
