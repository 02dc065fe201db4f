//! Generation engine boundary.
//!
//! The pipeline treats the model as a stateless string -> string function:
//! no conversation memory is assumed between calls. Providers implement
//! `TextGenerator`; the engine handle is constructed once and passed down
//! explicitly rather than resolved from ambient state.

pub mod http;

use crate::error::TriageError;
use async_trait::async_trait;

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate a completion for `prompt`, bounded by `max_tokens`.
    ///
    /// Engine failures surface as `TriageError::Generation`. Truncation at
    /// the token boundary is not an error here; malformed output is the
    /// parser's to reject.
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TriageError>;
}
