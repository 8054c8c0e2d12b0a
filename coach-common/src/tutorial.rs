//! Tutorial data model
//!
//! Tutorials are authored offline and immutable once loaded. Field names on
//! the wire are camelCase so catalogs authored for the web front end load
//! unchanged.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Learner skill level a tutorial is written for
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    #[default]
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Beginner => "beginner",
            Difficulty::Intermediate => "intermediate",
            Difficulty::Advanced => "advanced",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            other => Err(Error::InvalidInput(format!("Unknown difficulty: {}", other))),
        }
    }
}

/// Arrow drawn on the board, from one square label to another
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Arrow {
    pub from: String,
    pub to: String,
}

impl Arrow {
    pub fn new(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            from: from.into(),
            to: to.into(),
        }
    }
}

/// One scripted unit of a tutorial
///
/// `fen` is the position after `move_san` has been played from the previous
/// step's position. The first step of a tutorial has an empty move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Step {
    pub fen: String,
    /// Move in standard algebraic notation (empty for the initial step)
    #[serde(rename = "move", default)]
    pub move_san: String,
    #[serde(default)]
    pub notation: String,
    pub explanation: String,
    #[serde(default)]
    pub highlight_squares: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_arrow: Option<Arrow>,
}

impl Step {
    /// True when entering this step plays a move on the board
    pub fn has_move(&self) -> bool {
        !self.move_san.trim().is_empty()
    }
}

/// An ordered sequence of steps with a title and skill level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutorial {
    pub id: String,
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub difficulty: Difficulty,
    pub steps: Vec<Step>,
}

impl Tutorial {
    pub fn total_steps(&self) -> usize {
        self.steps.len()
    }

    pub fn step(&self, index: usize) -> Option<&Step> {
        self.steps.get(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_uses_camel_case_keys() {
        let json = r#"{
            "fen": "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
            "move": "e4",
            "notation": "e4",
            "explanation": "King's pawn.",
            "highlightSquares": ["e2", "e4"],
            "showArrow": { "from": "e2", "to": "e4" }
        }"#;

        let step: Step = serde_json::from_str(json).unwrap();
        assert_eq!(step.move_san, "e4");
        assert_eq!(step.highlight_squares, vec!["e2", "e4"]);
        assert_eq!(step.show_arrow, Some(Arrow::new("e2", "e4")));
        assert!(step.has_move());
    }

    #[test]
    fn test_step_optional_fields_default() {
        let json = r#"{ "fen": "8/8/8/8/8/8/8/8 w - - 0 1", "explanation": "Empty." }"#;
        let step: Step = serde_json::from_str(json).unwrap();

        assert!(!step.has_move());
        assert!(step.highlight_squares.is_empty());
        assert!(step.show_arrow.is_none());

        let out = serde_json::to_value(&step).unwrap();
        assert!(out.get("showArrow").is_none());
        assert_eq!(out["move"], "");
    }

    #[test]
    fn test_difficulty_round_trips_lowercase() {
        assert_eq!(
            serde_json::to_string(&Difficulty::Intermediate).unwrap(),
            "\"intermediate\""
        );
        assert_eq!("Advanced".parse::<Difficulty>().unwrap(), Difficulty::Advanced);
        assert!("expert".parse::<Difficulty>().is_err());
        assert_eq!(Difficulty::default(), Difficulty::Beginner);
    }
}
