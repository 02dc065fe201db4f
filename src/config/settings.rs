use log::info;
use std::env;

/// Default TTL for both cache layers: 4 hours. The two layers are
/// independent knobs and may expire at different wall-clock times even when
/// both are left at the default.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 14_400;

/// Default number of records requested from the mail source per run.
pub const DEFAULT_FETCH_LIMIT: usize = 100;

#[derive(Debug, Clone)]
pub struct Config {
    pub redis_url: String,
    pub inbox_cache_ttl_secs: u64,
    pub classification_cache_ttl_secs: u64,
    pub fetch_limit: usize,
    pub mail_api_url: String,
    pub llm_api_url: String,
}

impl Config {
    pub fn from_env() -> Self {
        Config {
            redis_url: env::var("REDIS_URL").unwrap_or_else(|_| "redis://localhost".to_string()),
            inbox_cache_ttl_secs: env::var("INBOX_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            classification_cache_ttl_secs: env::var("CLASSIFICATION_CACHE_TTL_SECS")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_CACHE_TTL_SECS),
            fetch_limit: env::var("FETCH_LIMIT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(DEFAULT_FETCH_LIMIT),
            mail_api_url: env::var("MAIL_API_URL")
                .unwrap_or_else(|_| "http://localhost:8080".to_string()),
            llm_api_url: env::var("LLM_API_URL")
                .unwrap_or_else(|_| "http://localhost:8081".to_string()),
        }
    }

    pub fn validate_and_log(&self) {
        info!(
            "Config: mail_api_url={} llm_api_url={} redis_url={}",
            self.mail_api_url, self.llm_api_url, self.redis_url
        );
        info!(
            "Config: inbox_cache_ttl={}s classification_cache_ttl={}s fetch_limit={}",
            self.inbox_cache_ttl_secs, self.classification_cache_ttl_secs, self.fetch_limit
        );
    }
}
