use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ChessboardError;

/// A square on the 8x8 grid. Row 0 is the top of the board (rank 8, black's
/// back rank), col 0 is file a.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(try_from = "(usize, usize)", into = "(usize, usize)")]
pub struct Square {
    row: usize,
    col: usize,
}

impl Square {
    /// Returns `None` when either coordinate is outside 0..8.
    pub fn new(row: usize, col: usize) -> Option<Square> {
        if row < 8 && col < 8 {
            Some(Square { row, col })
        } else {
            None
        }
    }

    /// Like [`Square::new`] but reports the rejected coordinates.
    pub fn try_new(row: i64, col: i64) -> crate::error::Result<Square> {
        if (0..8).contains(&row) && (0..8).contains(&col) {
            Ok(Square { row: row as usize, col: col as usize })
        } else {
            Err(ChessboardError::OutOfBounds { row, col })
        }
    }

    pub fn row(self) -> usize {
        self.row
    }

    pub fn col(self) -> usize {
        self.col
    }

    /// The square `dr` rows and `dc` columns away, if it is on the board.
    pub fn offset(self, dr: i32, dc: i32) -> Option<Square> {
        let r = self.row as i32 + dr;
        let c = self.col as i32 + dc;
        if in_bounds(r, c) {
            Some(Square { row: r as usize, col: c as usize })
        } else {
            None
        }
    }

    /// Light squares have even `row + col`.
    pub fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 0
    }

    /// All 64 squares, row by row from the top.
    pub fn all() -> impl Iterator<Item = Square> {
        (0..8).flat_map(|row| (0..8).map(move |col| Square { row, col }))
    }

    /// Algebraic name, e.g. "e2" for (6, 4).
    pub fn name(self) -> String {
        let file = (b'a' + self.col as u8) as char;
        let rank = (b'8' - self.row as u8) as char;
        format!("{file}{rank}")
    }
}

fn in_bounds(row: i32, col: i32) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl FromStr for Square {
    type Err = ChessboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = s.trim().as_bytes();
        if bytes.len() != 2 {
            return Err(ChessboardError::InvalidSquare(s.to_string()));
        }
        let file = bytes[0].to_ascii_lowercase();
        let rank = bytes[1];
        if !(b'a'..=b'h').contains(&file) || !(b'1'..=b'8').contains(&rank) {
            return Err(ChessboardError::InvalidSquare(s.to_string()));
        }
        Ok(Square {
            row: (b'8' - rank) as usize,
            col: (file - b'a') as usize,
        })
    }
}

impl TryFrom<(usize, usize)> for Square {
    type Error = ChessboardError;

    fn try_from((row, col): (usize, usize)) -> Result<Self, Self::Error> {
        Square::new(row, col).ok_or(ChessboardError::OutOfBounds {
            row: row as i64,
            col: col as i64,
        })
    }
}

impl From<Square> for (usize, usize) {
    fn from(sq: Square) -> Self {
        (sq.row, sq.col)
    }
}
