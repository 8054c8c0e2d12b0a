//! Plain-text rendering of a session snapshot for the terminal front end

use std::fmt::Write;

use shakmaty::{File, Position, Rank, Square};

use crate::catalog::PieceInfo;
use crate::rules::parse_position;
use crate::session::SessionView;

const PROGRESS_WIDTH: usize = 20;

/// Board diagram with White at the bottom
///
/// Highlighted squares are bracketed. An unparsable FEN renders as a
/// one-line notice instead of a board.
pub fn board(fen: &str, highlights: &[String]) -> String {
    let position = match parse_position(fen) {
        Ok(position) => position,
        Err(e) => return format!("  (board unavailable: {})\n", e),
    };
    let highlighted: Vec<Square> = highlights.iter().filter_map(|s| s.parse().ok()).collect();

    let mut out = String::new();
    out.push_str("     a  b  c  d  e  f  g  h\n");
    for rank in (0..8u32).rev() {
        let _ = write!(out, "  {} ", rank + 1);
        for file in 0..8u32 {
            let square = Square::from_coords(File::new(file), Rank::new(rank));
            let symbol = position
                .board()
                .piece_at(square)
                .map(|piece| piece.char())
                .unwrap_or('.');
            if highlighted.contains(&square) {
                let _ = write!(out, "[{}]", symbol);
            } else {
                let _ = write!(out, " {} ", symbol);
            }
        }
        let _ = writeln!(out, " {}", rank + 1);
    }
    out.push_str("     a  b  c  d  e  f  g  h\n");
    out
}

/// `[#####...............]  25%`
pub fn progress_bar(percent: u8) -> String {
    let filled = (percent.min(100) as usize * PROGRESS_WIDTH + 50) / 100;
    format!(
        "[{}{}] {:>3}%",
        "#".repeat(filled),
        ".".repeat(PROGRESS_WIDTH - filled),
        percent
    )
}

/// Full step screen: header, progress, board, move, explanation
pub fn step(view: &SessionView) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "\n{} ({})  step {}/{}  {}",
        view.tutorial_title,
        view.difficulty,
        view.step_index + 1,
        view.total_steps,
        progress_bar(view.progress)
    );
    out.push('\n');
    out.push_str(&board(&view.fen, &view.highlight_squares));

    if !view.notation.is_empty() {
        let _ = writeln!(out, "\n  Move: {}", view.notation);
    }
    if let Some(arrow) = &view.show_arrow {
        let _ = writeln!(out, "  Arrow: {} -> {}", arrow.from, arrow.to);
    }
    let _ = writeln!(out, "\n  {}", view.explanation);

    let mut nav = Vec::new();
    if !view.is_first_step {
        nav.push("[p]rev");
    }
    if !view.is_last_step {
        nav.push("[n]ext");
    }
    nav.push("[r]estart");
    let _ = writeln!(out, "\n  {}", nav.join("  "));
    out
}

/// Coach panel for the current insight state
pub fn insight(view: &SessionView) -> String {
    match (&view.insight, view.loading_insight) {
        (_, true) => "  Coach is analyzing the position...\n".to_string(),
        (Some(insight), false) => {
            let mut out = String::new();
            let _ = writeln!(out, "  Insight: {}", insight.insight);
            let _ = writeln!(out, "  Tip:     {}", insight.tip);
            let _ = writeln!(out, "  Concept: {}", insight.concept);
            out
        }
        (None, false) => "  No coach insight yet. Type 'i' to ask.\n".to_string(),
    }
}

/// Piece guide entries, one block per piece
pub fn piece_guide(pieces: &[PieceInfo]) -> String {
    let mut out = String::new();
    for piece in pieces {
        let _ = writeln!(
            out,
            "  {} {:<7} value: {}",
            piece.symbol, piece.name, piece.value
        );
        let _ = writeln!(out, "    {}", piece.movement);
    }
    out
}
