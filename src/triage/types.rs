//! Core pipeline types: the classification produced per record and the
//! flattened insight rows consumed by the reporter.

use crate::mail::EmailRecord;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Known category values the prompt asks the model to choose from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Work,
    School,
    Shopping,
    Other,
}

impl Category {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "work" => Some(Category::Work),
            "school" => Some(Category::School),
            "shopping" => Some(Category::Shopping),
            "other" => Some(Category::Other),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Category::Work => "Work",
            Category::School => "School",
            Category::Shopping => "Shopping",
            Category::Other => "Other",
        };
        write!(f, "{}", label)
    }
}

/// Known priority values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    Urgent,
    Important,
    Normal,
}

impl Priority {
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "urgent" => Some(Priority::Urgent),
            "important" => Some(Priority::Important),
            "normal" => Some(Priority::Normal),
            _ => None,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Priority::Urgent => "Urgent",
            Priority::Important => "Important",
            Priority::Normal => "Normal",
        };
        write!(f, "{}", label)
    }
}

/// Lenient reading of a yes/no field value.
pub(crate) fn is_affirmative(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true"
    )
}

/// One record's classification, as parsed from the model's raw output.
///
/// Field values are the raw strings the parser extracted. Values outside the
/// known category/priority sets pass through unchecked; the `known_*`
/// helpers interpret them leniently where the reporter needs the enums.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classification {
    pub category: String,
    pub priority: String,
    pub requires_response: String,
}

impl Classification {
    pub fn known_category(&self) -> Option<Category> {
        Category::from_label(&self.category)
    }

    pub fn known_priority(&self) -> Option<Priority> {
        Priority::from_label(&self.priority)
    }

    pub fn needs_reply(&self) -> bool {
        is_affirmative(&self.requires_response)
    }
}

/// Record fields flattened with the classification fields.
/// Append-only: accumulated per batch run, consumed by the reporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub subject: String,
    pub sender: String,
    pub category: String,
    pub priority: String,
    pub requires_response: String,
}

impl Insight {
    pub fn from_parts(record: &EmailRecord, classification: &Classification) -> Self {
        Self {
            subject: record.subject.clone(),
            sender: record.sender.clone(),
            category: classification.category.clone(),
            priority: classification.priority.clone(),
            requires_response: classification.requires_response.clone(),
        }
    }

    pub fn needs_reply(&self) -> bool {
        is_affirmative(&self.requires_response)
    }
}
