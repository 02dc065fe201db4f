//! Per-record classification cache: cache-aside over the classifier and
//! parser, keyed by record identity.

use crate::cache::CacheStore;
use crate::error::TriageError;
use crate::llm::TextGenerator;
use crate::mail::EmailRecord;
use crate::triage::classifier::Classifier;
use crate::triage::parser;
use crate::triage::types::Classification;
use log::{debug, warn};
use sha2::{Digest, Sha256};
use std::sync::Arc;

const KEY_PREFIX: &str = "triage:classification:";

/// Cache key derived from record identity alone.
///
/// Two records with the same subject and sender collide on purpose: the pair
/// is assumed to warrant an identical classification, so the collision is the
/// dedup. The fields are hashed with a separator byte so that shifting text
/// between subject and sender cannot produce an accidental collision.
pub fn classification_key(record: &EmailRecord) -> String {
    let mut hasher = Sha256::new();
    hasher.update(record.subject.as_bytes());
    hasher.update([0x1f]);
    hasher.update(record.sender.as_bytes());
    format!("{}{}", KEY_PREFIX, hex::encode(hasher.finalize()))
}

pub struct ClassificationCache<G> {
    classifier: Classifier<G>,
    cache: Arc<dyn CacheStore>,
    ttl_secs: u64,
}

impl<G: TextGenerator> ClassificationCache<G> {
    pub fn new(classifier: Classifier<G>, cache: Arc<dyn CacheStore>, ttl_secs: u64) -> Self {
        Self {
            classifier,
            cache,
            ttl_secs,
        }
    }

    /// Classify one record, serving a cached result when one is present and
    /// unexpired.
    ///
    /// Miss path: generate, parse, then write through with a fresh TTL.
    /// Generation and parse failures are returned to the caller and never
    /// cached, so a later pass inside the same TTL window retries them. A
    /// cache read failure degrades to a recompute instead of failing the
    /// record.
    pub async fn classify(&self, record: &EmailRecord) -> Result<Classification, TriageError> {
        let key = classification_key(record);
        match self.cache.get(&key).await {
            Ok(Some(serialized)) => {
                match serde_json::from_str::<Classification>(&serialized) {
                    Ok(classification) => {
                        debug!("Classification cache HIT for sender {}", record.sender);
                        return Ok(classification);
                    }
                    Err(e) => warn!("Discarding undecodable cached classification: {}", e),
                }
            }
            Ok(None) => debug!("Classification cache MISS for sender {}", record.sender),
            Err(e) => warn!("Classification cache read failed, recomputing: {}", e),
        }

        let raw = self.classifier.generate(record).await?;
        let classification = parser::parse(&raw)?;

        let serialized = serde_json::to_string(&classification)?;
        if let Err(e) = self.cache.set_with_ttl(&key, &serialized, self.ttl_secs).await {
            warn!("Failed to write classification to cache: {}", e);
        }
        Ok(classification)
    }
}
