//! Piece reference shown by the `pieces` command

use std::fmt;

/// Conventional material value of a piece
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceValue {
    Points(u8),
    /// The king cannot be traded
    Invaluable,
}

impl fmt::Display for PieceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceValue::Points(points) => write!(f, "{}", points),
            PieceValue::Invaluable => f.write_str("Invaluable"),
        }
    }
}

/// One entry of the piece guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceInfo {
    pub id: &'static str,
    pub name: &'static str,
    /// FEN letter of the white piece
    pub symbol: char,
    pub movement: &'static str,
    pub value: PieceValue,
}

pub static PIECES: [PieceInfo; 6] = [
    PieceInfo {
        id: "pawn",
        name: "Pawn",
        symbol: 'P',
        movement: "Moves forward one square, captures diagonally. Can move two squares on \
                   first move. Can be promoted when reaching the last rank.",
        value: PieceValue::Points(1),
    },
    PieceInfo {
        id: "knight",
        name: "Knight",
        symbol: 'N',
        movement: "Moves in an L-shape: two squares in one direction and then one square \
                   perpendicular. Can jump over other pieces.",
        value: PieceValue::Points(3),
    },
    PieceInfo {
        id: "bishop",
        name: "Bishop",
        symbol: 'B',
        movement: "Moves diagonally any number of squares. Cannot jump over other pieces.",
        value: PieceValue::Points(3),
    },
    PieceInfo {
        id: "rook",
        name: "Rook",
        symbol: 'R',
        movement: "Moves horizontally or vertically any number of squares. Cannot jump over \
                   other pieces.",
        value: PieceValue::Points(5),
    },
    PieceInfo {
        id: "queen",
        name: "Queen",
        symbol: 'Q',
        movement: "Combines the power of rook and bishop. Moves horizontally, vertically, or \
                   diagonally any number of squares.",
        value: PieceValue::Points(9),
    },
    PieceInfo {
        id: "king",
        name: "King",
        symbol: 'K',
        movement: "Moves one square in any direction. Must be protected at all times. Can \
                   castle with a rook under certain conditions.",
        value: PieceValue::Invaluable,
    },
];

/// Look a piece up by id or FEN letter, ignoring case
pub fn find_piece(name: &str) -> Option<&'static PieceInfo> {
    let name = name.trim();
    PIECES.iter().find(|piece| {
        piece.id.eq_ignore_ascii_case(name)
            || (name.len() == 1 && name.eq_ignore_ascii_case(&piece.symbol.to_string()))
    })
}
