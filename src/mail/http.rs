//! HTTP mail-source adapter.
//!
//! Expects a JSON endpoint serving the inbox as an array of objects carrying
//! at least `subject` and `sender`; any other fields are ignored.

use super::{EmailRecord, MailSource};
use crate::error::TriageError;
use async_trait::async_trait;
use log::{debug, warn};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct RawMessage {
    #[serde(default)]
    subject: String,
    #[serde(default)]
    sender: String,
}

#[derive(Debug, Clone)]
pub struct HttpMailSource {
    client: reqwest::Client,
    base_url: String,
}

impl HttpMailSource {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl MailSource for HttpMailSource {
    async fn fetch(&self, limit: usize) -> Result<Vec<EmailRecord>, TriageError> {
        let url = format!("{}/messages?limit={}", self.base_url, limit);
        debug!("Fetching inbox from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TriageError::SourceFetch(format!("mail API request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TriageError::SourceFetch(format!(
                "mail API returned HTTP {}",
                response.status()
            )));
        }

        let raw: Vec<RawMessage> = response.json().await.map_err(|e| {
            TriageError::SourceFetch(format!("mail API returned invalid JSON: {}", e))
        })?;

        let mut records = Vec::with_capacity(raw.len());
        for msg in raw.into_iter().take(limit) {
            let subject = msg.subject.trim();
            let sender = msg.sender.trim();
            if subject.is_empty() || sender.is_empty() {
                warn!("Skipping message without subject or sender");
                continue;
            }
            records.push(EmailRecord::new(subject, sender));
        }
        Ok(records)
    }
}
