//! Rules engine adapter
//!
//! Thin wrapper over `shakmaty` exposing the four operations the tutorial
//! needs: load a FEN, apply a move in algebraic notation, serialize to FEN,
//! and reset to the standard starting position.

use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::{CastlingMode, Chess, Color, EnPassantMode, Position};

use crate::error::{Error, Result};

/// FEN of the standard starting position
pub const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Parse a FEN into a legal standard-chess position
pub fn parse_position(fen: &str) -> Result<Chess> {
    let parsed: Fen = fen.trim().parse().map_err(|e| Error::InvalidFen {
        fen: fen.to_string(),
        reason: format!("{}", e),
    })?;

    parsed
        .into_position(CastlingMode::Standard)
        .map_err(|e| Error::InvalidFen {
            fen: fen.to_string(),
            reason: format!("{}", e),
        })
}

/// Live board handle for one tutorial session
#[derive(Debug, Clone, Default)]
pub struct RulesEngine {
    position: Chess,
}

impl RulesEngine {
    /// Engine at the standard starting position
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_fen(fen: &str) -> Result<Self> {
        Ok(Self {
            position: parse_position(fen)?,
        })
    }

    /// Replace the current position with `fen`
    ///
    /// On error the previous position is kept.
    pub fn load(&mut self, fen: &str) -> Result<()> {
        self.position = parse_position(fen)?;
        Ok(())
    }

    /// Play a move given in standard algebraic notation ("e4", "Nf3", "O-O", "Qxf7#")
    ///
    /// On error the position is unchanged.
    pub fn apply_san(&mut self, san: &str) -> Result<()> {
        let illegal = |reason: String| Error::IllegalMove {
            san: san.to_string(),
            fen: self.fen(),
            reason,
        };

        let san_plus: SanPlus = san.trim().parse().map_err(|e| illegal(format!("{}", e)))?;
        let mv = san_plus
            .san
            .to_move(&self.position)
            .map_err(|e| illegal(format!("{}", e)))?;

        self.position.play_unchecked(&mv);
        Ok(())
    }

    /// Reset to the standard starting position
    pub fn reset(&mut self) {
        self.position = Chess::default();
    }

    /// Serialize the current position
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }

    pub fn turn(&self) -> Color {
        self.position.turn()
    }

    pub fn position(&self) -> &Chess {
        &self.position
    }

    /// Compare piece placement and side to move with another position
    ///
    /// Castling rights, en passant and clocks are ignored.
    pub fn same_board_and_turn(&self, other: &Chess) -> bool {
        self.position.board() == other.board() && self.position.turn() == other.turn()
    }
}

/// First two FEN fields (placement and side to move), for reports
pub fn board_and_turn(fen: &str) -> String {
    fen.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_engine_is_start_position() {
        let engine = RulesEngine::new();
        assert_eq!(engine.fen(), START_FEN);
        assert_eq!(engine.turn(), Color::White);
    }

    #[test]
    fn test_apply_san_plays_move() {
        let mut engine = RulesEngine::new();
        engine.apply_san("e4").unwrap();
        engine.apply_san("e5").unwrap();
        engine.apply_san("Nf3").unwrap();

        assert_eq!(
            board_and_turn(&engine.fen()),
            "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b"
        );
    }

    #[test]
    fn test_castling_and_check_suffix_are_accepted() {
        let mut engine = RulesEngine::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
        )
        .unwrap();
        engine.apply_san("O-O").unwrap();
        assert!(engine.fen().starts_with("r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq"));

        let mut engine = RulesEngine::from_fen(
            "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
        )
        .unwrap();
        engine.apply_san("Qxf7#").unwrap();
        assert_eq!(
            board_and_turn(&engine.fen()),
            "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b"
        );
    }

    #[test]
    fn test_illegal_move_leaves_position_unchanged() {
        let mut engine = RulesEngine::new();
        let err = engine.apply_san("e5").unwrap_err();

        assert!(matches!(err, Error::IllegalMove { .. }));
        assert_eq!(engine.fen(), START_FEN);
    }

    #[test]
    fn test_garbage_move_text_is_rejected() {
        let mut engine = RulesEngine::new();
        assert!(engine.apply_san("not-a-move").is_err());
    }

    #[test]
    fn test_invalid_fen_keeps_previous_position() {
        let mut engine = RulesEngine::new();
        engine.apply_san("d4").unwrap();
        let before = engine.fen();

        assert!(matches!(
            engine.load("this is not fen"),
            Err(Error::InvalidFen { .. })
        ));
        assert_eq!(engine.fen(), before);
    }

    #[test]
    fn test_reset_returns_to_start() {
        let mut engine = RulesEngine::new();
        engine.apply_san("c4").unwrap();
        engine.reset();
        assert_eq!(engine.fen(), START_FEN);
    }

    #[test]
    fn test_same_board_ignores_clocks() {
        let engine = RulesEngine::new();
        let other = parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 7 9").unwrap();
        assert!(engine.same_board_and_turn(&other));

        let black_to_move =
            parse_position("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert!(!engine.same_board_and_turn(&black_to_move));
    }
}
