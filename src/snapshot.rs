use serde::Serialize;

use crate::moves::MoveKind;
use crate::piece::{Color, Piece};
use crate::session::{Phase, Session};
use crate::square::Square;

#[derive(Serialize, Debug, PartialEq)]
pub struct SquarePiece {
    pub kind: String,
    pub color: String,
    pub image: String,
    pub alt: String,
}

impl From<Piece> for SquarePiece {
    fn from(p: Piece) -> Self {
        SquarePiece {
            kind: p.kind.name().to_string(),
            color: p.color.name().to_string(),
            image: p.image_path(),
            alt: p.label(),
        }
    }
}

#[derive(Serialize, Debug, PartialEq)]
pub struct HintJson {
    pub square: [usize; 2],
    pub kind: MoveKind,
}

/// Everything the page needs to redraw a session from scratch.
#[derive(Serialize, Debug, PartialEq)]
pub struct Snapshot {
    pub squares: Vec<Vec<Option<SquarePiece>>>,
    pub turn: Color,
    pub phase: &'static str,
    pub selected: Option<[usize; 2]>,
    pub hints: Vec<HintJson>,
    pub promotion_pending: Option<Color>,
}

fn coords(sq: Square) -> [usize; 2] {
    [sq.row(), sq.col()]
}

impl Snapshot {
    pub fn of(session: &Session) -> Self {
        let board = session.board();
        let squares = (0..8)
            .map(|r| {
                (0..8)
                    .map(|c| {
                        Square::new(r, c)
                            .and_then(|sq| board.occupant_at(sq))
                            .map(SquarePiece::from)
                    })
                    .collect()
            })
            .collect();

        let promotion_pending = match session.phase() {
            Phase::Promoting { color, .. } => Some(*color),
            _ => None,
        };

        Snapshot {
            squares,
            turn: session.turn(),
            phase: session.phase().name(),
            selected: session.selection().map(|s| coords(s.square)),
            hints: session
                .hints()
                .iter()
                .map(|t| HintJson { square: coords(t.square), kind: t.kind })
                .collect(),
            promotion_pending,
        }
    }
}
