//! Summary statistics over a run's insights.

use crate::triage::types::Insight;
use itertools::Itertools;
use log::info;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How many sender/category pairs the ranking keeps.
pub const TOP_SENDER_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriageSummary {
    pub total_insights: usize,
    /// Count of insights per raw category value.
    pub category_distribution: HashMap<String, u64>,
    /// `"<category> - <sender>"` labels ranked by descending count, ties kept
    /// in first-encountered order, truncated to `TOP_SENDER_LIMIT`.
    pub top_sender_categories: Vec<(String, u64)>,
    /// How many insights answered the requires-response question with a yes.
    pub needs_reply: u64,
}

pub fn summarize(insights: &[Insight]) -> TriageSummary {
    let mut category_distribution: HashMap<String, u64> = HashMap::new();
    let mut label_counts: HashMap<String, u64> = HashMap::new();
    let mut label_order: Vec<String> = Vec::new();
    let mut needs_reply = 0u64;

    for insight in insights {
        *category_distribution
            .entry(insight.category.clone())
            .or_insert(0) += 1;

        let label = format!("{} - {}", insight.category, insight.sender);
        if !label_counts.contains_key(&label) {
            label_order.push(label.clone());
        }
        *label_counts.entry(label).or_insert(0) += 1;

        if insight.needs_reply() {
            needs_reply += 1;
        }
    }

    // sorted_by is a stable sort, so first-seen order survives count ties.
    let top_sender_categories: Vec<(String, u64)> = label_order
        .into_iter()
        .map(|label| {
            let count = label_counts[&label];
            (label, count)
        })
        .sorted_by(|a, b| b.1.cmp(&a.1))
        .take(TOP_SENDER_LIMIT)
        .collect();

    TriageSummary {
        total_insights: insights.len(),
        category_distribution,
        top_sender_categories,
        needs_reply,
    }
}

/// Render the summary as a text table through the logger. The medium is an
/// adapter choice; swapping this for a chart or JSON sink needs nothing from
/// the pipeline.
pub fn render(summary: &TriageSummary) {
    info!("=== Inbox Triage Summary ===");
    info!(
        "Insights: {} ({} need a reply)",
        summary.total_insights, summary.needs_reply
    );

    info!("Category distribution:");
    let mut categories: Vec<(&String, &u64)> = summary.category_distribution.iter().collect();
    categories.sort_by(|a, b| b.1.cmp(a.1).then_with(|| a.0.cmp(b.0)));
    for (category, count) in categories {
        info!("  {:<10} {}", category, count);
    }

    info!("Top sender/category pairs:");
    for (label, count) in &summary.top_sender_categories {
        info!("  {:<40} {}", label, count);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn insight(category: &str, sender: &str, requires_response: &str) -> Insight {
        Insight {
            subject: "subject".to_string(),
            sender: sender.to_string(),
            category: category.to_string(),
            priority: "Normal".to_string(),
            requires_response: requires_response.to_string(),
        }
    }

    #[test]
    fn distribution_and_ranking() {
        let insights = vec![
            insight("Work", "a", "Yes"),
            insight("Work", "a", "Yes"),
            insight("School", "b", "No"),
        ];

        let summary = summarize(&insights);

        let mut expected = HashMap::new();
        expected.insert("Work".to_string(), 2);
        expected.insert("School".to_string(), 1);
        assert_eq!(summary.category_distribution, expected);
        assert_eq!(
            summary.top_sender_categories,
            vec![("Work - a".to_string(), 2), ("School - b".to_string(), 1)]
        );
        assert_eq!(summary.needs_reply, 2);
    }

    #[test]
    fn ties_keep_first_encountered_order() {
        let insights = vec![
            insight("Shopping", "late@example.com", "No"),
            insight("Work", "early@example.com", "No"),
            insight("Work", "early@example.com", "No"),
            insight("Shopping", "late@example.com", "No"),
            insight("Other", "solo@example.com", "No"),
        ];

        let summary = summarize(&insights);

        assert_eq!(
            summary.top_sender_categories,
            vec![
                ("Shopping - late@example.com".to_string(), 2),
                ("Work - early@example.com".to_string(), 2),
                ("Other - solo@example.com".to_string(), 1),
            ]
        );
    }

    #[test]
    fn ranking_is_truncated_to_five() {
        let insights: Vec<Insight> = (0..8)
            .map(|i| insight("Other", &format!("s{}@example.com", i), "No"))
            .collect();

        let summary = summarize(&insights);

        assert_eq!(summary.top_sender_categories.len(), TOP_SENDER_LIMIT);
        // All counts tie at 1, so the first five senders survive.
        assert_eq!(summary.top_sender_categories[0].0, "Other - s0@example.com");
        assert_eq!(summary.top_sender_categories[4].0, "Other - s4@example.com");
    }

    #[test]
    fn empty_input_yields_empty_summary() {
        let summary = summarize(&[]);
        assert_eq!(summary.total_insights, 0);
        assert!(summary.category_distribution.is_empty());
        assert!(summary.top_sender_categories.is_empty());
        assert_eq!(summary.needs_reply, 0);
    }

    #[test]
    fn out_of_enum_categories_are_counted_as_is() {
        let insights = vec![insight("Spam", "x@example.com", "No")];
        let summary = summarize(&insights);
        assert_eq!(summary.category_distribution.get("Spam"), Some(&1));
    }
}
