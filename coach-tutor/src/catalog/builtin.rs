//! Built-in tutorial content
//!
//! Each step's FEN is the position after that step's move. Closing summary
//! steps have no move and repeat the final position.

use coach_common::{Arrow, Difficulty, Step, Tutorial};

fn opening_step(fen: &str, explanation: &str, highlights: &[&str]) -> Step {
    Step {
        fen: fen.to_string(),
        move_san: String::new(),
        notation: String::new(),
        explanation: explanation.to_string(),
        highlight_squares: highlights.iter().map(|s| s.to_string()).collect(),
        show_arrow: None,
    }
}

fn move_step(fen: &str, san: &str, explanation: &str, highlights: &[&str], arrow: (&str, &str)) -> Step {
    Step {
        fen: fen.to_string(),
        move_san: san.to_string(),
        notation: san.to_string(),
        explanation: explanation.to_string(),
        highlight_squares: highlights.iter().map(|s| s.to_string()).collect(),
        show_arrow: Some(Arrow::new(arrow.0, arrow.1)),
    }
}

pub(super) fn tutorials() -> Vec<Tutorial> {
    vec![basics_of_chess(), pawn_structure(), scholars_mate()]
}

fn basics_of_chess() -> Tutorial {
    Tutorial {
        id: "basics-of-chess".to_string(),
        title: "Basics of Chess".to_string(),
        description: "Learn how the pieces move and basic rules of chess".to_string(),
        difficulty: Difficulty::Beginner,
        steps: vec![
            opening_step(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                "Welcome to chess! This is the starting position. White pieces are at the bottom, \
                 and black pieces are at the top. Each player has 16 pieces: 8 pawns, 2 knights, \
                 2 bishops, 2 rooks, a queen, and a king.",
                &[],
            ),
            move_step(
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
                "e4",
                "The most common opening move is to advance the king's pawn two squares. This \
                 controls the center of the board and opens lines for the queen and bishop to develop.",
                &["e2", "e4"],
                ("e2", "e4"),
            ),
            move_step(
                "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
                "e5",
                "Black often responds symmetrically with the same move. This also stakes a claim \
                 to the center of the board.",
                &["e7", "e5"],
                ("e7", "e5"),
            ),
            move_step(
                "rnbqkbnr/pppp1ppp/8/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R b KQkq - 1 2",
                "Nf3",
                "White develops the king's knight, attacking the e5 pawn and preparing for kingside \
                 castling. Knights should be developed early as they can jump over other pieces.",
                &["g1", "f3"],
                ("g1", "f3"),
            ),
            move_step(
                "r1bqkbnr/pppp1ppp/2n5/4p3/4P3/5N2/PPPP1PPP/RNBQKB1R w KQkq - 2 3",
                "Nc6",
                "Black develops the queen's knight, defending the e5 pawn and controlling the \
                 center. This is a key square for the knight.",
                &["b8", "c6"],
                ("b8", "c6"),
            ),
            move_step(
                "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R b KQkq - 3 3",
                "Bc4",
                "White develops the king's bishop to a powerful diagonal, eyeing the f7 square, \
                 which is a common weak point for black in the opening.",
                &["f1", "c4"],
                ("f1", "c4"),
            ),
            move_step(
                "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQK2R w KQkq - 4 4",
                "Nf6",
                "Black develops the king's knight, counterattacking the e4 pawn and preparing for \
                 kingside castling.",
                &["g8", "f6"],
                ("g8", "f6"),
            ),
            move_step(
                "r1bqkb1r/pppp1ppp/2n2n2/4p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 b kq - 5 4",
                "O-O",
                "White castles kingside, moving the king to safety and connecting the rooks. \
                 Castling is a special move that allows your king to move two squares towards a \
                 rook, and then the rook jumps over the king to the adjacent square.",
                &["e1", "g1", "h1", "f1"],
                ("e1", "g1"),
            ),
            move_step(
                "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/5N2/PPPP1PPP/RNBQ1RK1 w kq - 6 5",
                "Bc5",
                "Black develops the king's bishop to a strong diagonal, mirroring white's bishop. \
                 This position is part of what's called the 'Italian Game' or 'Giuoco Piano' \
                 (quiet game).",
                &["f8", "c5"],
                ("f8", "c5"),
            ),
            move_step(
                "r1bqk2r/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 b kq - 0 5",
                "d3",
                "White plays a quiet move, supporting the e4 pawn and preparing to develop the \
                 queen's bishop. This is a solid, positional approach.",
                &["d2", "d3"],
                ("d2", "d3"),
            ),
            move_step(
                "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 w - - 1 6",
                "O-O",
                "Black also castles kingside, bringing the king to safety. Now both kings are \
                 castled and protected. The opening phase is nearly complete, and the middlegame \
                 is about to begin.",
                &["e8", "g8", "h8", "f8"],
                ("e8", "g8"),
            ),
            opening_step(
                "r1bq1rk1/pppp1ppp/2n2n2/2b1p3/2B1P3/3P1N2/PPP2PPP/RNBQ1RK1 w - - 1 6",
                "Congratulations! You've completed the first tutorial on chess basics. Both sides \
                 have developed their pieces, castled their kings to safety, and controlled the \
                 center. These are the fundamental principles of a good chess opening.",
                &[],
            ),
        ],
    }
}

fn pawn_structure() -> Tutorial {
    Tutorial {
        id: "pawn-structure".to_string(),
        title: "Understanding Pawn Structure".to_string(),
        description: "Learn how pawns form the backbone of chess strategy".to_string(),
        difficulty: Difficulty::Intermediate,
        steps: vec![
            opening_step(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                "Pawns are the soul of chess! In this tutorial, we'll learn about different pawn \
                 structures and how they influence your strategy.",
                &[
                    "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2", "a7", "b7", "c7", "d7", "e7",
                    "f7", "g7", "h7",
                ],
            ),
            move_step(
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
                "e4",
                "We'll start with a common opening. The e4 pawn move fights for the center, opens \
                 lines for the bishop and queen, and prepares for kingside development.",
                &["e2", "e4"],
                ("e2", "e4"),
            ),
            move_step(
                "rnbqkbnr/pppp1ppp/4p3/8/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
                "e6",
                "Black chooses the French Defence. The e6 pawn prepares ...d5 so that black can \
                 challenge the center with pawn support already in place.",
                &["e7", "e6"],
                ("e7", "e6"),
            ),
            move_step(
                "rnbqkbnr/pppp1ppp/4p3/8/3PP3/8/PPP2PPP/RNBQKBNR b KQkq - 0 2",
                "d4",
                "White builds the classical pawn center with pawns on d4 and e4, side by side. \
                 Two central pawns control four key squares in front of them.",
                &["d2", "d4", "e4"],
                ("d2", "d4"),
            ),
            move_step(
                "rnbqkbnr/ppp2ppp/4p3/3p4/3PP3/8/PPP2PPP/RNBQKBNR w KQkq - 0 3",
                "d5",
                "Black strikes at the center. The d5 pawn is defended by e6, and white must now \
                 decide how to handle the tension on e4.",
                &["d7", "d5", "e4"],
                ("d7", "d5"),
            ),
            move_step(
                "rnbqkbnr/ppp2ppp/4p3/3pP3/3P4/8/PPP2PPP/RNBQKBNR b KQkq - 0 3",
                "e5",
                "White advances and locks the center. The pawns on d4 and e5 now form a pawn \
                 chain pointing toward black's kingside, gaining space there.",
                &["e4", "e5", "d4"],
                ("e4", "e5"),
            ),
            move_step(
                "rnbqkbnr/pp3ppp/4p3/2ppP3/3P4/8/PPP2PPP/RNBQKBNR w KQkq - 0 4",
                "c5",
                "A pawn chain is attacked at its base. Black hits d4 with the c-pawn, because if \
                 d4 falls, the e5 pawn loses its support.",
                &["c7", "c5", "d4"],
                ("c7", "c5"),
            ),
            move_step(
                "rnbqkbnr/pp3ppp/4p3/2ppP3/3P4/2P5/PP3PPP/RNBQKBNR b KQkq - 0 4",
                "c3",
                "White reinforces the base of the chain with c3, so that a capture on d4 can be \
                 answered by recapturing with a pawn and keeping the chain intact.",
                &["c2", "c3", "d4"],
                ("c2", "c3"),
            ),
            opening_step(
                "rnbqkbnr/pp3ppp/4p3/2ppP3/3P4/2P5/PP3PPP/RNBQKBNR b KQkq - 0 4",
                "This is the Advance Variation of the French Defence. White has space on the \
                 kingside, black will keep pressuring the d4 base. Pawn structure decides where \
                 each side should play.",
                &["c3", "d4", "e5", "c5", "d5", "e6"],
            ),
        ],
    }
}

fn scholars_mate() -> Tutorial {
    Tutorial {
        id: "scholars-mate".to_string(),
        title: "Spotting Scholar's Mate".to_string(),
        description: "Recognize and avoid the quickest trap against f7".to_string(),
        difficulty: Difficulty::Beginner,
        steps: vec![
            opening_step(
                "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
                "The f7 square is only defended by black's king at the start. Let's see how a \
                 hasty attack against it can end the game in four moves.",
                &["f7"],
            ),
            move_step(
                "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq - 0 1",
                "e4",
                "White opens the diagonals for the queen and the light-squared bishop.",
                &["e2", "e4"],
                ("e2", "e4"),
            ),
            move_step(
                "rnbqkbnr/pppp1ppp/8/4p3/4P3/8/PPPP1PPP/RNBQKBNR w KQkq - 0 2",
                "e5",
                "Black answers in the center.",
                &["e7", "e5"],
                ("e7", "e5"),
            ),
            move_step(
                "rnbqkbnr/pppp1ppp/8/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR b KQkq - 1 2",
                "Bc4",
                "The bishop aims straight at f7.",
                &["f1", "c4", "f7"],
                ("f1", "c4"),
            ),
            move_step(
                "r1bqkbnr/pppp1ppp/2n5/4p3/2B1P3/8/PPPP1PPP/RNBQK1NR w KQkq - 2 3",
                "Nc6",
                "A natural developing move that defends e5, but it does nothing for f7.",
                &["b8", "c6"],
                ("b8", "c6"),
            ),
            move_step(
                "r1bqkbnr/pppp1ppp/2n5/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 3 3",
                "Qh5",
                "The queen comes out early, attacking e5 and, together with the bishop, f7.",
                &["d1", "h5", "f7"],
                ("d1", "h5"),
            ),
            move_step(
                "r1bqkb1r/pppp1ppp/2n2n2/4p2Q/2B1P3/8/PPPP1PPP/RNB1K1NR w KQkq - 4 4",
                "Nf6",
                "A blunder: the knight attacks the queen but leaves f7 defenseless. Moves like \
                 ...g6 or ...Qe7 would have held.",
                &["g8", "f6", "f7"],
                ("g8", "f6"),
            ),
            move_step(
                "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
                "Qxf7#",
                "Checkmate. The queen on f7 is protected by the bishop, and the black king has \
                 no escape square.",
                &["h5", "f7", "e8"],
                ("h5", "f7"),
            ),
            opening_step(
                "r1bqkb1r/pppp1Qpp/2n2n2/4p3/2B1P3/8/PPPP1PPP/RNB1K1NR b KQkq - 0 4",
                "Whenever the opponent's queen and bishop both point at f7 (or f2), check that \
                 it is defended before doing anything else.",
                &["f7"],
            ),
        ],
    }
}
