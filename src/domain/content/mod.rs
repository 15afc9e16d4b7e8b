//! Editorial content - FAQs, news articles and wiki entries.
//!
//! Read-mostly records; news and wiki rows are refreshed out-of-band from
//! the analytics source.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::Timestamp;

/// Frequently asked question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Faq {
    pub id: i64,
    pub question: String,
    pub answer: String,
    pub category: String,
    #[serde(default)]
    pub note: Option<String>,
    pub is_active: bool,
}

/// News article mirrored from the source database.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsArticle {
    pub id: i64,
    pub headline: String,
    pub content: String,
    pub date: Timestamp,
    #[serde(default)]
    pub image: Option<String>,
}

/// Wiki entry describing one analysis field and its score ranges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WikiEntry {
    pub id: i64,
    pub field_name: String,
    pub field_category: String,
    pub what_is_it: String,
    #[serde(default)]
    pub score_min: Option<f64>,
    #[serde(default)]
    pub score_max: Option<f64>,
    pub range_label: String,
    pub range_emoji: String,
    pub range_description: String,
    pub actionable_insight: String,
    pub display_order: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn faq_serializes_expected_fields() {
        let faq = Faq {
            id: 1,
            question: "What is VQSG?".to_string(),
            answer: "A four-dimension scoring model.".to_string(),
            category: "FUNDAMENTAL ANALYSIS".to_string(),
            note: None,
            is_active: true,
        };
        let json = serde_json::to_value(&faq).unwrap();
        assert_eq!(json["question"], "What is VQSG?");
        assert_eq!(json["is_active"], true);
    }

    #[test]
    fn wiki_entry_supports_open_score_ranges() {
        let json = r#"{
            "id": 7,
            "field_name": "flexbit_score",
            "field_category": "TOTAL",
            "what_is_it": "Composite score",
            "range_label": "Strong",
            "range_emoji": "🚀",
            "range_description": "Top bucket",
            "actionable_insight": "Shortlist",
            "display_order": 1
        }"#;
        let entry: WikiEntry = serde_json::from_str(json).unwrap();
        assert!(entry.score_min.is_none());
        assert!(entry.score_max.is_none());
    }
}
