//! Snapshot cache for the inbox batch.
//!
//! One fixed logical key, independent of the requested limit: the first
//! fetch inside a TTL window seeds the snapshot for every later call in that
//! window, whatever limit those calls pass.

use super::{EmailRecord, MailSource};
use crate::cache::CacheStore;
use crate::error::TriageError;
use log::{debug, info, warn};
use std::sync::Arc;

pub const INBOX_SNAPSHOT_KEY: &str = "triage:inbox:snapshot";

pub struct InboxCache<S> {
    source: S,
    cache: Arc<dyn CacheStore>,
    ttl_secs: u64,
}

impl<S: MailSource> InboxCache<S> {
    pub fn new(source: S, cache: Arc<dyn CacheStore>, ttl_secs: u64) -> Self {
        Self {
            source,
            cache,
            ttl_secs,
        }
    }

    /// Cache-aside fetch of the current inbox batch.
    ///
    /// Hit: deserialize and return, without touching the mail source. Miss:
    /// fetch, write through with a fresh TTL, return. Source failures
    /// propagate to the caller and are never cached. A cache read or decode
    /// failure degrades to a source fetch instead of failing the run.
    pub async fn fetch_batch(&self, limit: usize) -> Result<Vec<EmailRecord>, TriageError> {
        match self.cache.get(INBOX_SNAPSHOT_KEY).await {
            Ok(Some(serialized)) => {
                match serde_json::from_str::<Vec<EmailRecord>>(&serialized) {
                    Ok(batch) => {
                        debug!("Inbox snapshot cache HIT ({} records)", batch.len());
                        return Ok(batch);
                    }
                    Err(e) => warn!("Discarding undecodable inbox snapshot: {}", e),
                }
            }
            Ok(None) => debug!("Inbox snapshot cache MISS"),
            Err(e) => warn!("Inbox snapshot cache read failed, falling back to source: {}", e),
        }

        let batch = self.source.fetch(limit).await?;
        info!("Fetched {} records from mail source", batch.len());

        let serialized = serde_json::to_string(&batch)?;
        if let Err(e) = self
            .cache
            .set_with_ttl(INBOX_SNAPSHOT_KEY, &serialized, self.ttl_secs)
            .await
        {
            warn!("Failed to write inbox snapshot to cache: {}", e);
        }
        Ok(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: Arc<AtomicUsize>,
        batch: Vec<EmailRecord>,
        fail_from_call: usize,
    }

    #[async_trait]
    impl MailSource for CountingSource {
        async fn fetch(&self, _limit: usize) -> Result<Vec<EmailRecord>, TriageError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call >= self.fail_from_call {
                return Err(TriageError::SourceFetch("source called again".to_string()));
            }
            Ok(self.batch.clone())
        }
    }

    fn sample_batch() -> Vec<EmailRecord> {
        vec![
            EmailRecord::new("Quarterly report", "boss@example.com"),
            EmailRecord::new("50% off everything", "deals@shop.example"),
        ]
    }

    #[tokio::test]
    async fn second_fetch_within_ttl_skips_source() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
            batch: sample_batch(),
            fail_from_call: 1, // source raises if consulted a second time
        };
        let inbox = InboxCache::new(source, Arc::new(MemoryCache::new()), 3600);

        let first = inbox.fetch_batch(100).await.unwrap();
        let second = inbox.fetch_batch(100).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn snapshot_key_is_limit_independent() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
            batch: sample_batch(),
            fail_from_call: 1,
        };
        let inbox = InboxCache::new(source, Arc::new(MemoryCache::new()), 3600);

        let seeded = inbox.fetch_batch(2).await.unwrap();
        // A different limit still hits the seeded snapshot.
        let replayed = inbox.fetch_batch(50).await.unwrap();

        assert_eq!(seeded, replayed);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn source_failure_propagates_and_is_not_cached() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
            batch: sample_batch(),
            fail_from_call: 0, // fail immediately
        };
        let inbox = InboxCache::new(source, Arc::new(MemoryCache::new()), 3600);

        let err = inbox.fetch_batch(10).await.unwrap_err();
        assert!(matches!(err, TriageError::SourceFetch(_)));

        // The failure was not written through: the next call hits the source
        // again rather than replaying a cached error.
        let err = inbox.fetch_batch(10).await.unwrap_err();
        assert!(matches!(err, TriageError::SourceFetch(_)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn expired_snapshot_forces_refetch() {
        let calls = Arc::new(AtomicUsize::new(0));
        let source = CountingSource {
            calls: Arc::clone(&calls),
            batch: sample_batch(),
            fail_from_call: 2,
        };
        let inbox = InboxCache::new(source, Arc::new(MemoryCache::new()), 1);

        inbox.fetch_batch(10).await.unwrap();
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        inbox.fetch_batch(10).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }
}
