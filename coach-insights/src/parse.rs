//! Coach response parsing
//!
//! Models are asked for a JSON object but often wrap it in a markdown fence
//! or return something almost-JSON. Parsing never fails: fields that cannot
//! be recovered take fixed placeholders, so the result always carries three
//! non-empty strings.

use coach_common::Insight;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use tracing::warn;

pub const PLACEHOLDER_INSIGHT: &str = "Unable to parse AI response properly.";
pub const PLACEHOLDER_TIP: &str = "Please continue with the tutorial as provided.";
pub const PLACEHOLDER_CONCEPT: &str = "Chess position analysis.";

static INSIGHT_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("insight"));
static TIP_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("tip"));
static CONCEPT_FIELD: Lazy<Regex> = Lazy::new(|| field_regex("concept"));

fn field_regex(name: &str) -> Regex {
    // Literal pattern; cannot fail to compile
    Regex::new(&format!(r#""{}":\s*"([^"]+)"#, name)).expect("valid field regex")
}

#[derive(Debug, Default, Deserialize)]
struct RawInsight {
    #[serde(default)]
    insight: Option<String>,
    #[serde(default)]
    tip: Option<String>,
    #[serde(default)]
    concept: Option<String>,
}

/// Remove a surrounding ```` ```json ```` or ```` ``` ```` fence
pub fn strip_code_fences(content: &str) -> String {
    let opening = if content.contains("```json") {
        "```json\n"
    } else if content.contains("```") {
        "```\n"
    } else {
        return content.trim().to_string();
    };

    content
        .replace(opening, "")
        .replace("\n```", "")
        .trim()
        .to_string()
}

/// Turn raw model output into an insight
pub fn parse_insight(content: &str) -> Insight {
    let cleaned = strip_code_fences(content);

    let raw = match serde_json::from_str::<RawInsight>(&cleaned) {
        Ok(raw) => raw,
        Err(e) => {
            warn!("Failed to parse coach response as JSON: {}", e);
            RawInsight {
                insight: capture(&INSIGHT_FIELD, content),
                tip: capture(&TIP_FIELD, content),
                concept: capture(&CONCEPT_FIELD, content),
            }
        }
    };

    Insight::new(
        non_blank(raw.insight, PLACEHOLDER_INSIGHT),
        non_blank(raw.tip, PLACEHOLDER_TIP),
        non_blank(raw.concept, PLACEHOLDER_CONCEPT),
    )
}

fn capture(pattern: &Regex, content: &str) -> Option<String> {
    pattern
        .captures(content)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

fn non_blank(value: Option<String>, placeholder: &str) -> String {
    value
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| placeholder.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_json() {
        let insight = parse_insight(
            r#"{"insight": "White controls the center.", "tip": "Develop knights.", "concept": "Center control"}"#,
        );
        assert_eq!(insight.insight, "White controls the center.");
        assert_eq!(insight.tip, "Develop knights.");
        assert_eq!(insight.concept, "Center control");
        assert!(insight.error.is_none());
    }

    #[test]
    fn test_fenced_json() {
        let content = "```json\n{\"insight\": \"a\", \"tip\": \"b\", \"concept\": \"c\"}\n```";
        let insight = parse_insight(content);
        assert_eq!((insight.insight.as_str(), insight.tip.as_str()), ("a", "b"));

        let bare_fence = "```\n{\"insight\": \"x\", \"tip\": \"y\", \"concept\": \"z\"}\n```";
        assert_eq!(parse_insight(bare_fence).concept, "z");
    }

    #[test]
    fn test_truncated_json_salvaged_by_field() {
        // Cut off by the token limit mid-concept
        let content = r#"{"insight": "Knights before bishops.", "tip": "Castle early.", "concept": "Open"#;
        let insight = parse_insight(content);

        assert_eq!(insight.insight, "Knights before bishops.");
        assert_eq!(insight.tip, "Castle early.");
        assert_eq!(insight.concept, "Open");
    }

    #[test]
    fn test_prose_gets_placeholders() {
        let insight = parse_insight("This is a great opening move.");
        assert_eq!(insight.insight, PLACEHOLDER_INSIGHT);
        assert_eq!(insight.tip, PLACEHOLDER_TIP);
        assert_eq!(insight.concept, PLACEHOLDER_CONCEPT);
    }

    #[test]
    fn test_blank_and_missing_fields_get_placeholders() {
        let insight = parse_insight(r#"{"insight": "   ", "tip": "Keep going."}"#);
        assert_eq!(insight.insight, PLACEHOLDER_INSIGHT);
        assert_eq!(insight.tip, "Keep going.");
        assert_eq!(insight.concept, PLACEHOLDER_CONCEPT);

        assert_eq!(parse_insight("").tip, PLACEHOLDER_TIP);
    }
}
