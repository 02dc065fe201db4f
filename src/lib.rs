pub mod cache;
pub mod config;
pub mod error;
pub mod llm;
pub mod mail;
pub mod triage;

pub use error::TriageError;
