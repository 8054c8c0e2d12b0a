//! Coach prompt construction

use coach_common::InsightRequest;

pub const SYSTEM_PROMPT: &str =
    "You are a helpful chess coach with expertise in teaching players of all levels.";

pub const TEMPERATURE: f32 = 0.7;
pub const MAX_TOKENS: u32 = 300;

const INSTRUCTIONS: &str = r#"INSTRUCTIONS:
Analyze the current position and provide the following:

1. INSIGHT: An insightful explanation about this position or move in 2-3 sentences. Focus on what makes this move or position important, any tactical or strategic elements present, and what the player should be thinking about. Tailor your explanation to the player's skill level.

2. TIP: A practical, actionable tip for the player based on this position in 1-2 sentences. This should be something they can apply immediately to improve their understanding or execution.

3. CONCEPT: Identify one chess concept being demonstrated in this position (opening principle, tactical motif, endgame technique, etc.) in a brief sentence. Name the specific concept and why it's relevant here.

FORMAT:
Format your response as valid JSON with the keys: "insight", "tip", and "concept". Keep your explanations clear, concise, and appropriate for the player's skill level.

Example format:
{
  "insight": "Your explanation here...",
  "tip": "Your practical tip here...",
  "concept": "Your concept identification here..."
}
"#;

/// User message describing the position and what to return
///
/// Optional details are omitted when absent; skill level defaults to
/// beginner.
pub fn build_prompt(request: &InsightRequest) -> String {
    let mut prompt = String::from(
        "You are a helpful chess coach providing insights about chess positions and moves.\n\n",
    );

    prompt.push_str("POSITION DETAILS:\n");
    prompt.push_str(&format!("Current position (FEN): {}\n", request.fen.trim()));
    if let Some(san) = present(&request.move_san) {
        prompt.push_str(&format!("Move just played: {}\n", san));
    }
    if let Some(notation) = present(&request.notation) {
        prompt.push_str(&format!("Move notation: {}\n", notation));
    }
    if let Some(previous) = present(&request.previous_move) {
        prompt.push_str(&format!("Previous move: {}\n", previous));
    }
    prompt.push_str(&format!("Player skill level: {}\n\n", request.skill_level()));

    prompt.push_str(INSTRUCTIONS);
    prompt
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_common::Difficulty;

    #[test]
    fn test_prompt_includes_move_context() {
        let request = InsightRequest {
            fen: "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1".to_string(),
            move_san: Some("e4".to_string()),
            notation: Some("1. e4".to_string()),
            previous_move: None,
            difficulty: Some(Difficulty::Advanced),
        };
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Current position (FEN): rnbqkbnr/pppppppp/8/8/4P3"));
        assert!(prompt.contains("Move just played: e4\n"));
        assert!(prompt.contains("Move notation: 1. e4\n"));
        assert!(!prompt.contains("Previous move:"));
        assert!(prompt.contains("Player skill level: advanced"));
        assert!(prompt.contains("\"insight\", \"tip\", and \"concept\""));
    }

    #[test]
    fn test_prompt_defaults_to_beginner() {
        let mut request = InsightRequest::new("8/8/8/8/8/8/8/8 w - - 0 1");
        request.move_san = Some("  ".to_string());
        let prompt = build_prompt(&request);

        assert!(prompt.contains("Player skill level: beginner"));
        assert!(!prompt.contains("Move just played"));
    }
}
