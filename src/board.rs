use serde::{Deserialize, Serialize};

use crate::piece::{Color, Piece, PieceKind};
use crate::square::Square;

/// Back rank order from file a to file h.
pub const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// The authoritative record of what stands on each square.
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub struct Board {
    squares: [[Option<Piece>; 8]; 8],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create an empty board with no pieces. Useful for setting up test positions.
    pub fn empty() -> Self {
        Board { squares: [[None; 8]; 8] }
    }

    /// The standard starting position: black on rows 0-1, white on rows 6-7.
    pub fn new() -> Self {
        let mut board = Board::empty();
        for color in [Color::Black, Color::White] {
            for (col, kind) in BACK_RANK.iter().enumerate() {
                board.squares[color.back_row()][col] = Some(Piece::new(*kind, color));
            }
            for sq in &mut board.squares[color.pawn_row()] {
                *sq = Some(Piece::new(PieceKind::Pawn, color));
            }
        }
        board
    }

    pub fn occupant_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()]
    }

    pub fn is_empty(&self, sq: Square) -> bool {
        self.occupant_at(sq).is_none()
    }

    /// Put `piece` on `sq`, replacing whatever was there.
    pub fn place(&mut self, sq: Square, piece: Piece) {
        self.squares[sq.row()][sq.col()] = Some(piece);
    }

    /// Clear `sq`, returning the piece that stood there.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        self.squares[sq.row()][sq.col()].take()
    }

    /// Relocate the piece on `from` to `to`, removing any piece already on
    /// `to` first. Returns the captured piece. Moving from an empty square
    /// leaves the board untouched.
    pub fn move_piece(&mut self, from: Square, to: Square) -> Option<Piece> {
        if from == to {
            return None;
        }
        let piece = self.occupant_at(from)?;
        let captured = self.remove(to);
        self.remove(from);
        self.place(to, piece);
        captured
    }

    /// Every occupied square with its piece, row by row from the top.
    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        Square::all().filter_map(move |sq| self.occupant_at(sq).map(|p| (sq, p)))
    }

    pub fn piece_count(&self) -> usize {
        self.pieces().count()
    }
}
