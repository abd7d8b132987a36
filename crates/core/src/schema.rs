//! Response Schemas
//!
//! One validator per generated-content type. Each takes the raw backend text
//! and either returns fully valid data or a [`SchemaError`]; nothing is
//! partially accepted.

use std::collections::HashSet;

use serde::Deserialize;

use crate::error::SchemaError;
use crate::question::{FollowUpQuestion, QuestionType};
use crate::recommendation::{Priority, Recommendation};

/// Number of follow-up questions a reply must contain.
pub const FOLLOW_UP_COUNT: usize = 3;

/// Minimum number of recommendations a reply must contain.
pub const MIN_RECOMMENDATIONS: usize = 5;

/// Minimum number of high-priority recommendations a reply must contain.
pub const MIN_HIGH_PRIORITY: usize = 2;

/// Extract the JSON payload from a model reply.
///
/// Handles replies wrapped in markdown code fences and replies with prose
/// around the array.
pub fn extract_json_from_response(text: &str) -> &str {
    let trimmed = text.trim();

    // Try markdown code fences
    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        let content_start = after_fence.find('\n').map(|nl| nl + 1).unwrap_or(0);
        let content = &after_fence[content_start..];
        if let Some(end) = content.find("```") {
            return content[..end].trim();
        }
    }

    // Try JSON array [ ... ]
    if let (Some(start), Some(end)) = (trimmed.find('['), trimmed.rfind(']')) {
        if start <= end {
            return &trimmed[start..=end];
        }
    }

    trimmed
}

#[derive(Deserialize)]
struct RawQuestion {
    id: String,
    question: String,
    #[serde(rename = "type")]
    question_type: QuestionType,
    #[serde(default)]
    options: Option<Vec<String>>,
}

/// Parse and validate a follow-up question reply.
pub fn parse_follow_up_questions(text: &str) -> Result<Vec<FollowUpQuestion>, SchemaError> {
    let raw: Vec<RawQuestion> = parse_array(text)?;

    if raw.len() != FOLLOW_UP_COUNT {
        return Err(SchemaError::new(format!(
            "expected {} questions, got {}",
            FOLLOW_UP_COUNT,
            raw.len()
        )));
    }

    let mut seen = HashSet::new();
    let mut questions = Vec::with_capacity(raw.len());
    for (index, q) in raw.into_iter().enumerate() {
        let id = q.id.trim().to_string();
        if id.is_empty() {
            return Err(SchemaError::new(format!("question {} has an empty id", index)));
        }
        if q.question.trim().is_empty() {
            return Err(SchemaError::new(format!("question '{}' has no text", id)));
        }
        if !seen.insert(id.clone()) {
            return Err(SchemaError::new(format!("duplicate question id '{}'", id)));
        }

        let options = if q.question_type.requires_options() {
            let options: Vec<String> = q
                .options
                .unwrap_or_default()
                .into_iter()
                .map(|o| o.trim().to_string())
                .collect();
            if options.is_empty() || options.iter().any(String::is_empty) {
                return Err(SchemaError::new(format!(
                    "{} question '{}' needs non-empty options",
                    q.question_type, id
                )));
            }
            Some(options)
        } else {
            None
        };

        questions.push(FollowUpQuestion {
            id,
            question: q.question,
            question_type: q.question_type,
            options,
        });
    }

    Ok(questions)
}

/// Parse and validate a recommendation reply.
pub fn parse_recommendations(text: &str) -> Result<Vec<Recommendation>, SchemaError> {
    let recommendations: Vec<Recommendation> = parse_array(text)?;
    validate_recommendations(&recommendations)?;
    Ok(recommendations)
}

/// Check the invariants a recommendation list must satisfy.
pub fn validate_recommendations(recommendations: &[Recommendation]) -> Result<(), SchemaError> {
    if recommendations.len() < MIN_RECOMMENDATIONS {
        return Err(SchemaError::new(format!(
            "expected at least {} recommendations, got {}",
            MIN_RECOMMENDATIONS,
            recommendations.len()
        )));
    }

    let high = recommendations
        .iter()
        .filter(|r| r.priority == Priority::High)
        .count();
    if high < MIN_HIGH_PRIORITY {
        return Err(SchemaError::new(format!(
            "expected at least {} high-priority recommendations, got {}",
            MIN_HIGH_PRIORITY, high
        )));
    }

    let mut seen = HashSet::new();
    for rec in recommendations {
        if !seen.insert(rec.id) {
            return Err(SchemaError::new(format!("duplicate recommendation id {}", rec.id)));
        }
        for (field, value) in [
            ("name", &rec.name),
            ("dosage", &rec.dosage),
            ("reason", &rec.reason),
            ("timing", &rec.timing),
        ] {
            if value.trim().is_empty() {
                return Err(SchemaError::new(format!(
                    "recommendation {} has an empty {}",
                    rec.id, field
                )));
            }
        }
    }

    Ok(())
}

/// Validate a health analysis reply. The text is opaque; it only has to be
/// non-empty.
pub fn parse_health_analysis(text: &str) -> Result<String, SchemaError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(SchemaError::new("empty analysis"));
    }
    Ok(trimmed.to_string())
}

fn parse_array<T: serde::de::DeserializeOwned>(text: &str) -> Result<Vec<T>, SchemaError> {
    let json = extract_json_from_response(text);
    let value: serde_json::Value =
        serde_json::from_str(json).map_err(|e| SchemaError::new(format!("not valid JSON: {}", e)))?;
    if !value.is_array() {
        return Err(SchemaError::new("expected a JSON array"));
    }
    serde_json::from_value(value).map_err(|e| SchemaError::new(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const QUESTIONS: &str = r#"[
        {"id": "afternoon_energy", "question": "How do you feel in the afternoon?", "type": "select", "options": ["Energetic", "Tired"]},
        {"id": "stress_coping", "question": "How well do you cope with stress?", "type": "scale", "options": ["ignored"]},
        {"id": "supplement_history", "question": "Which supplements have you tried?", "type": "text"}
    ]"#;

    fn recommendation_json(id: u32, name: &str, priority: &str) -> serde_json::Value {
        serde_json::json!({
            "id": id,
            "name": name,
            "dosage": "1 daily",
            "priority": priority,
            "category": "Basic Essentials",
            "reason": "Because",
            "benefits": ["A", "B", "C"],
            "timing": "Morning"
        })
    }

    fn recommendations_reply(priorities: &[&str]) -> String {
        let items: Vec<_> = priorities
            .iter()
            .enumerate()
            .map(|(i, p)| recommendation_json(i as u32 + 1, &format!("Supplement {}", i + 1), p))
            .collect();
        serde_json::Value::Array(items).to_string()
    }

    #[test]
    fn test_extract_json_plain() {
        assert_eq!(extract_json_from_response("  [1, 2]  "), "[1, 2]");
    }

    #[test]
    fn test_extract_json_code_fence() {
        let text = "Here you go:\n```json\n[{\"a\": 1}]\n```\nThanks";
        assert_eq!(extract_json_from_response(text), "[{\"a\": 1}]");
    }

    #[test]
    fn test_extract_json_surrounding_prose() {
        let text = "Sure! [1, 2, 3] Hope this helps.";
        assert_eq!(extract_json_from_response(text), "[1, 2, 3]");
    }

    #[test]
    fn test_parse_follow_up_questions() {
        let questions = parse_follow_up_questions(QUESTIONS).unwrap();
        assert_eq!(questions.len(), 3);
        assert_eq!(questions[0].options(), ["Energetic", "Tired"]);
        assert_eq!(questions[1].question_type, QuestionType::Scale);
        // Options on scale questions are dropped
        assert!(questions[1].options.is_none());
    }

    #[test]
    fn test_follow_up_wrong_count() {
        let two = r#"[
            {"id": "a", "question": "A?", "type": "text"},
            {"id": "b", "question": "B?", "type": "text"}
        ]"#;
        let err = parse_follow_up_questions(two).unwrap_err();
        assert!(err.reason.contains("expected 3"));
    }

    #[test]
    fn test_follow_up_unknown_type() {
        let bad = QUESTIONS.replace("\"scale\"", "\"slider\"");
        assert!(parse_follow_up_questions(&bad).is_err());
    }

    #[test]
    fn test_follow_up_missing_field() {
        let bad = r#"[
            {"id": "a", "type": "text"},
            {"id": "b", "question": "B?", "type": "text"},
            {"id": "c", "question": "C?", "type": "text"}
        ]"#;
        assert!(parse_follow_up_questions(bad).is_err());
    }

    #[test]
    fn test_follow_up_select_without_options() {
        let bad = r#"[
            {"id": "a", "question": "A?", "type": "select"},
            {"id": "b", "question": "B?", "type": "text"},
            {"id": "c", "question": "C?", "type": "text"}
        ]"#;
        let err = parse_follow_up_questions(bad).unwrap_err();
        assert!(err.reason.contains("options"));
    }

    #[test]
    fn test_follow_up_duplicate_and_empty_ids() {
        let dup = r#"[
            {"id": "a", "question": "A?", "type": "text"},
            {"id": "a", "question": "B?", "type": "text"},
            {"id": "c", "question": "C?", "type": "text"}
        ]"#;
        assert!(parse_follow_up_questions(dup).is_err());

        let empty = dup.replacen("\"id\": \"a\"", "\"id\": \" \"", 1);
        assert!(parse_follow_up_questions(&empty).is_err());
    }

    #[test]
    fn test_follow_up_not_json() {
        let err = parse_follow_up_questions("I cannot help with that").unwrap_err();
        assert!(err.reason.contains("not valid JSON"));
    }

    #[test]
    fn test_follow_up_object_not_array() {
        let err = parse_follow_up_questions(r#"{"questions": []}"#).unwrap_err();
        assert_eq!(err.reason, "expected a JSON array");
    }

    #[test]
    fn test_parse_recommendations() {
        let reply = recommendations_reply(&["high", "high", "medium", "medium", "low"]);
        let recs = parse_recommendations(&reply).unwrap();
        assert_eq!(recs.len(), 5);
        assert_eq!(recs[4].priority, Priority::Low);
    }

    #[test]
    fn test_recommendations_too_few() {
        let reply = recommendations_reply(&["high", "high", "medium", "medium"]);
        assert!(parse_recommendations(&reply).is_err());
    }

    #[test]
    fn test_recommendations_not_enough_high() {
        let reply = recommendations_reply(&["high", "medium", "medium", "medium", "low"]);
        let err = parse_recommendations(&reply).unwrap_err();
        assert!(err.reason.contains("high-priority"));
    }

    #[test]
    fn test_recommendations_bad_priority() {
        let reply = recommendations_reply(&["high", "high", "urgent", "medium", "low"]);
        assert!(parse_recommendations(&reply).is_err());
    }

    #[test]
    fn test_recommendations_benefits_not_list() {
        let mut items: Vec<serde_json::Value> = (1..=5)
            .map(|i| recommendation_json(i, "X", "high"))
            .collect();
        items[2]["benefits"] = serde_json::json!("Energy");
        let reply = serde_json::Value::Array(items).to_string();
        assert!(parse_recommendations(&reply).is_err());
    }

    #[test]
    fn test_recommendations_missing_field_and_empty_name() {
        let mut items: Vec<serde_json::Value> = (1..=5)
            .map(|i| recommendation_json(i, "X", "high"))
            .collect();
        items[0].as_object_mut().unwrap().remove("timing");
        let reply = serde_json::Value::Array(items.clone()).to_string();
        assert!(parse_recommendations(&reply).is_err());

        items[0] = recommendation_json(1, "  ", "high");
        let reply = serde_json::Value::Array(items).to_string();
        let err = parse_recommendations(&reply).unwrap_err();
        assert!(err.reason.contains("empty name"));
    }

    #[test]
    fn test_recommendations_duplicate_ids() {
        let items: Vec<serde_json::Value> = (1..=5)
            .map(|i| recommendation_json(if i == 5 { 1 } else { i }, "X", "high"))
            .collect();
        let reply = serde_json::Value::Array(items).to_string();
        let err = parse_recommendations(&reply).unwrap_err();
        assert!(err.reason.contains("duplicate"));
    }

    #[test]
    fn test_recommendations_truncated_json() {
        let reply = recommendations_reply(&["high", "high", "medium", "medium", "low"]);
        let truncated = &reply[..reply.len() - 20];
        assert!(parse_recommendations(truncated).is_err());
    }

    #[test]
    fn test_parse_health_analysis() {
        assert_eq!(parse_health_analysis("  **Energy**: ok \n").unwrap(), "**Energy**: ok");
        assert!(parse_health_analysis(" \n ").is_err());
    }
}
