//! Batch driver: sequential classification with per-record failure isolation.

use crate::llm::TextGenerator;
use crate::mail::EmailRecord;
use crate::triage::cache::ClassificationCache;
use crate::triage::types::Insight;
use log::{info, warn};

pub struct Orchestrator<G> {
    classifier: ClassificationCache<G>,
}

impl<G: TextGenerator> Orchestrator<G> {
    pub fn new(classifier: ClassificationCache<G>) -> Self {
        Self { classifier }
    }

    /// Process the batch sequentially, in fetch order.
    ///
    /// A record that fails to classify (generation or parse error) is logged
    /// and skipped; the rest of the batch proceeds. Duplicate records produce
    /// duplicate insights: the classification cache dedups the compute, not
    /// the output.
    pub async fn run(&self, batch: &[EmailRecord]) -> Vec<Insight> {
        let mut insights = Vec::with_capacity(batch.len());
        let mut skipped = 0usize;

        for record in batch {
            match self.classifier.classify(record).await {
                Ok(classification) => {
                    insights.push(Insight::from_parts(record, &classification));
                }
                Err(e) => {
                    warn!(
                        "Skipping record from {} (subject {:?}): {}",
                        record.sender, record.subject, e
                    );
                    skipped += 1;
                }
            }
        }

        info!(
            "Batch complete: {} classified, {} skipped of {}",
            insights.len(),
            skipped,
            batch.len()
        );
        insights
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::error::TriageError;
    use crate::triage::classifier::Classifier;
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;

    /// Fails generation whenever the prompt mentions the poison subject.
    struct PoisonGenerator {
        poison_subject: &'static str,
    }

    #[async_trait]
    impl TextGenerator for PoisonGenerator {
        async fn generate(&self, prompt: &str, _max_tokens: u32) -> Result<String, TriageError> {
            if prompt.contains(self.poison_subject) {
                return Err(TriageError::Generation("engine crashed".to_string()));
            }
            Ok("Category: Work\nPriority: Normal\nRequires Response: No".to_string())
        }
    }

    fn pipeline(poison_subject: &'static str) -> Orchestrator<PoisonGenerator> {
        Orchestrator::new(ClassificationCache::new(
            Classifier::new(PoisonGenerator { poison_subject }),
            Arc::new(MemoryCache::new()),
            3600,
        ))
    }

    #[tokio::test]
    async fn one_failure_does_not_abort_the_batch() {
        let batch = vec![
            EmailRecord::new("Budget review", "cfo@example.com"),
            EmailRecord::new("POISON", "flaky@example.com"),
            EmailRecord::new("Team lunch", "hr@example.com"),
        ];

        let insights = pipeline("POISON").run(&batch).await;

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0].subject, "Budget review");
        assert_eq!(insights[1].subject, "Team lunch");
    }

    #[tokio::test]
    async fn insights_preserve_batch_order() {
        let batch: Vec<EmailRecord> = (0..5)
            .map(|i| EmailRecord::new(format!("msg {}", i), format!("s{}@example.com", i)))
            .collect();

        let insights = pipeline("never-matches").run(&batch).await;

        let subjects: Vec<&str> = insights.iter().map(|i| i.subject.as_str()).collect();
        assert_eq!(subjects, vec!["msg 0", "msg 1", "msg 2", "msg 3", "msg 4"]);
    }

    #[tokio::test]
    async fn duplicate_records_yield_duplicate_insights() {
        let batch = vec![
            EmailRecord::new("Same thing", "twice@example.com"),
            EmailRecord::new("Same thing", "twice@example.com"),
        ];

        let insights = pipeline("never-matches").run(&batch).await;

        assert_eq!(insights.len(), 2);
        assert_eq!(insights[0], insights[1]);
    }

    #[tokio::test]
    async fn empty_batch_yields_no_insights() {
        let insights = pipeline("never-matches").run(&[]).await;
        assert!(insights.is_empty());
    }
}
