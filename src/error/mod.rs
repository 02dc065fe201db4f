//! Error taxonomy for the triage pipeline.
//!
//! Batch-level failures (`SourceFetch`, `Config`) abort the run; per-record
//! failures (`Generation`, `MalformedResponse`) are caught by the
//! orchestrator, logged, and skipped so the rest of the batch proceeds.

use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum TriageError {
    /// Mail source unreachable or rejected the request. Aborts the batch
    /// fetch; never written to the cache.
    #[error("Source Fetch Error: {0}")]
    SourceFetch(String),

    /// Generation engine call failed. Per-record, skipped by the orchestrator.
    #[error("Generation Error: {0}")]
    Generation(String),

    /// Parser rejected the model's output (wrong line count or a line with
    /// no separator). Per-record, skipped, never cached.
    #[error("Malformed Response: {0}")]
    MalformedResponse(String),

    /// Cache/Redis errors
    #[error("Cache Error: {0}")]
    Cache(String),

    /// Configuration errors
    #[error("Config Error: {0}")]
    Config(String),

    /// Network/connectivity issues outside the source-fetch path
    #[error("Network Error: {0}")]
    Network(String),

    /// JSON encode/decode failures for cache values
    #[error("Serialization Error: {0}")]
    Serialization(String),
}

impl TriageError {
    /// Whether the orchestrator isolates this error to a single record
    /// instead of aborting the batch.
    pub fn is_per_record(&self) -> bool {
        matches!(
            self,
            TriageError::Generation(_) | TriageError::MalformedResponse(_)
        )
    }
}

impl From<redis::RedisError> for TriageError {
    fn from(e: redis::RedisError) -> Self {
        TriageError::Cache(e.to_string())
    }
}

impl From<serde_json::Error> for TriageError {
    fn from(e: serde_json::Error) -> Self {
        TriageError::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for TriageError {
    fn from(e: reqwest::Error) -> Self {
        TriageError::Network(e.to_string())
    }
}
