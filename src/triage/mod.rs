//! The cache-aside classification pipeline: classifier, parser, per-record
//! cache, batch orchestrator, and the summary reporter.

pub mod cache;
pub mod classifier;
pub mod orchestrator;
pub mod parser;
pub mod reporter;
pub mod types;

pub use cache::ClassificationCache;
pub use classifier::Classifier;
pub use orchestrator::Orchestrator;
pub use reporter::{summarize, TriageSummary};
pub use types::{Category, Classification, Insight, Priority};
