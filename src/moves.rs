// =============================================================================
// Move generation
//
// Pseudo-legal only: no check, pin, castling or en-passant handling. Each
// entry is a destination tagged as a quiet move or a capture. Generation is a
// pure function of the board; it never looks at whose turn it is.
// =============================================================================

use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Quiet,
    Capture,
}

/// A reachable destination for the selected piece.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct Target {
    pub square: Square,
    pub kind: MoveKind,
}

impl Target {
    fn quiet(square: Square) -> Self {
        Target { square, kind: MoveKind::Quiet }
    }

    fn capture(square: Square) -> Self {
        Target { square, kind: MoveKind::Capture }
    }
}

pub const ROOK_DIRECTIONS: [(i32, i32); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
pub const BISHOP_DIRECTIONS: [(i32, i32); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KNIGHT_OFFSETS: [(i32, i32); 8] = [
    (-2, -1), (-2, 1), (-1, -2), (-1, 2),
    (1, -2), (1, 2), (2, -1), (2, 1),
];

pub const KING_OFFSETS: [(i32, i32); 8] = [
    (-1, -1), (-1, 0), (-1, 1),
    (0, -1),           (0, 1),
    (1, -1),  (1, 0),  (1, 1),
];

/// Destinations for `piece` standing on `from`. Off-board targets are
/// dropped silently.
pub fn moves_for(from: Square, piece: Piece, board: &Board) -> Vec<Target> {
    let color = piece.color;
    match piece.kind {
        PieceKind::Pawn => pawn_targets(from, color, board),
        PieceKind::Knight => jump_targets(from, color, &KNIGHT_OFFSETS, board),
        PieceKind::King => jump_targets(from, color, &KING_OFFSETS, board),
        PieceKind::Rook => slide_targets(from, color, &ROOK_DIRECTIONS, board),
        PieceKind::Bishop => slide_targets(from, color, &BISHOP_DIRECTIONS, board),
        PieceKind::Queen => {
            let mut targets = slide_targets(from, color, &ROOK_DIRECTIONS, board);
            targets.extend(slide_targets(from, color, &BISHOP_DIRECTIONS, board));
            targets
        }
    }
}

/// Walk each ray until the edge or the first occupied square. An enemy on
/// that square is a capture; a friendly piece just stops the ray.
fn slide_targets(from: Square, color: Color, directions: &[(i32, i32)], board: &Board) -> Vec<Target> {
    let mut targets = Vec::new();
    for &(dr, dc) in directions {
        let mut next = from.offset(dr, dc);
        while let Some(sq) = next {
            match board.occupant_at(sq) {
                None => targets.push(Target::quiet(sq)),
                Some(p) => {
                    if p.color != color {
                        targets.push(Target::capture(sq));
                    }
                    break;
                }
            }
            next = sq.offset(dr, dc);
        }
    }
    targets
}

fn jump_targets(from: Square, color: Color, offsets: &[(i32, i32)], board: &Board) -> Vec<Target> {
    offsets
        .iter()
        .filter_map(|&(dr, dc)| from.offset(dr, dc))
        .filter_map(|sq| match board.occupant_at(sq) {
            None => Some(Target::quiet(sq)),
            Some(p) if p.color != color => Some(Target::capture(sq)),
            Some(_) => None,
        })
        .collect()
}

fn pawn_targets(from: Square, color: Color, board: &Board) -> Vec<Target> {
    let mut targets = Vec::new();
    let dir = color.forward();

    if let Some(one) = from.offset(dir, 0) {
        if board.is_empty(one) {
            targets.push(Target::quiet(one));

            // Double push needs both squares clear
            if from.row() == color.pawn_row() {
                if let Some(two) = from.offset(2 * dir, 0) {
                    if board.is_empty(two) {
                        targets.push(Target::quiet(two));
                    }
                }
            }
        }
    }

    for dc in [-1, 1] {
        if let Some(sq) = from.offset(dir, dc) {
            if board.occupant_at(sq).is_some_and(|p| p.color != color) {
                targets.push(Target::capture(sq));
            }
        }
    }

    targets
}
