//! HTTP completion client in the llama.cpp-server shape:
//! `POST /completion` with `{"prompt": ..., "n_predict": ...}`.

use super::TextGenerator;
use crate::error::TriageError;
use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    prompt: &'a str,
    n_predict: u32,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    content: String,
}

#[derive(Debug, Clone)]
pub struct HttpGenerator {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGenerator {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl TextGenerator for HttpGenerator {
    async fn generate(&self, prompt: &str, max_tokens: u32) -> Result<String, TriageError> {
        let url = format!("{}/completion", self.base_url);
        debug!(
            "Requesting completion: {} prompt bytes, {} max tokens",
            prompt.len(),
            max_tokens
        );

        let response = self
            .client
            .post(&url)
            .json(&CompletionRequest {
                prompt,
                n_predict: max_tokens,
            })
            .send()
            .await
            .map_err(|e| TriageError::Generation(format!("completion request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TriageError::Generation(format!(
                "completion endpoint returned HTTP {}",
                response.status()
            )));
        }

        let body: CompletionResponse = response.json().await.map_err(|e| {
            TriageError::Generation(format!("completion response was not valid JSON: {}", e))
        })?;
        Ok(body.content)
    }
}
