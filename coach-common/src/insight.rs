//! Insight request/response types
//!
//! Shared by the tutor (client side) and the insight service (server side).
//! The 200, 400 and 500 bodies of `POST /api/chess/insights` overlap, so the
//! client decodes all of them through [`Insight`].

use serde::{Deserialize, Serialize};

use crate::Difficulty;

/// Endpoint path served by the insight service
pub const INSIGHTS_PATH: &str = "/api/chess/insights";

/// Commentary request for one position
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightRequest {
    /// Position to comment on; required by the service
    #[serde(default)]
    pub fen: String,
    #[serde(default, rename = "move", skip_serializing_if = "Option::is_none")]
    pub move_san: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_move: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<Difficulty>,
}

impl InsightRequest {
    pub fn new(fen: impl Into<String>) -> Self {
        Self {
            fen: fen.into(),
            ..Default::default()
        }
    }

    /// Skill level used in the prompt (beginner when not given)
    pub fn skill_level(&self) -> Difficulty {
        self.difficulty.unwrap_or_default()
    }
}

/// Language-model commentary for a position
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Insight {
    pub insight: String,
    pub tip: String,
    pub concept: String,
    /// Set on degraded or fallback paths
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl Insight {
    pub fn new(
        insight: impl Into<String>,
        tip: impl Into<String>,
        concept: impl Into<String>,
    ) -> Self {
        Self {
            insight: insight.into(),
            tip: tip.into(),
            concept: concept.into(),
            error: None,
        }
    }

    /// Payload the client substitutes when the service cannot be reached
    pub fn unavailable(error: impl Into<String>) -> Self {
        Self {
            insight: "Unable to generate insights at this time.".to_string(),
            tip: "Please continue with the tutorial.".to_string(),
            concept: "Error occurred.".to_string(),
            error: Some(error.into()),
        }
    }

    /// Payload the service returns (with status 500) when every model failed
    pub fn service_failure(error: impl Into<String>) -> Self {
        Self {
            insight: "Unable to generate insight at this time.".to_string(),
            tip: "Please try again later or continue with the tutorial.".to_string(),
            concept: "Error occurred.".to_string(),
            error: Some(error.into()),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.error.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serializes_only_present_fields() {
        let mut request = InsightRequest::new("8/8/8/8/8/8/8/8 w - - 0 1");
        request.previous_move = Some("e4".to_string());

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["previousMove"], "e4");
        assert!(value.get("move").is_none());
        assert!(value.get("difficulty").is_none());
    }

    #[test]
    fn test_request_missing_fen_decodes_empty() {
        let request: InsightRequest = serde_json::from_str("{}").unwrap();
        assert!(request.fen.is_empty());
        assert_eq!(request.skill_level(), Difficulty::Beginner);
    }

    #[test]
    fn test_error_body_decodes_as_insight() {
        let body = r#"{"error":"boom","insight":"a","tip":"b","concept":"c"}"#;
        let insight: Insight = serde_json::from_str(body).unwrap();
        assert!(insight.is_degraded());
        assert_eq!(insight.insight, "a");
    }

    #[test]
    fn test_fallback_payloads_carry_error() {
        assert_eq!(
            Insight::unavailable("offline").error.as_deref(),
            Some("offline")
        );
        assert!(!Insight::new("a", "b", "c").is_degraded());
    }
}
