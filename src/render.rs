// =============================================================================
// The presentation boundary. The session drives a `Renderer` to mirror
// board changes; the renderer never feeds state back except for screen
// geometry.
// =============================================================================

use std::collections::BTreeMap;
use std::fmt::Write as _;

use serde::Serialize;

use crate::moves::MoveKind;
use crate::piece::{Color, Piece};
use crate::square::Square;

/// Screen-space rectangle of a square, in CSS pixels.
#[derive(Clone, Copy, Serialize, Debug, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

pub trait Renderer {
    fn draw_hint(&mut self, square: Square, kind: MoveKind);
    /// Removes every hint marker. Calling it with no hints drawn is a no-op.
    fn clear_all_hints(&mut self);
    fn render_piece(&mut self, square: Square, piece: Piece);
    fn remove_piece(&mut self, square: Square);
    fn get_screen_rect(&self, square: Square) -> Rect;
    /// Offset the piece drawn on `square` by (dx, dy) pixels.
    fn translate_piece(&mut self, square: Square, dx: f64, dy: f64);
    fn clear_translation(&mut self, square: Square);
    fn show_promotion_prompt(&mut self, color: Color);
    fn dismiss_promotion_prompt(&mut self);
}

/// In-memory visual layer. Keeps exactly what a DOM board would show, so the
/// native driver can print it and tests can compare it with the board.
#[derive(Clone, Debug, Default)]
pub struct MirrorView {
    square_px: f64,
    pieces: BTreeMap<Square, Piece>,
    hints: Vec<(Square, MoveKind)>,
    translations: BTreeMap<Square, (f64, f64)>,
    prompt: Option<Color>,
}

impl MirrorView {
    pub fn new(square_px: f64) -> Self {
        MirrorView { square_px, ..Default::default() }
    }

    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.pieces.get(&square).copied()
    }

    pub fn pieces(&self) -> impl Iterator<Item = (Square, Piece)> + '_ {
        self.pieces.iter().map(|(sq, p)| (*sq, *p))
    }

    pub fn hints(&self) -> &[(Square, MoveKind)] {
        &self.hints
    }

    pub fn translation(&self, square: Square) -> Option<(f64, f64)> {
        self.translations.get(&square).copied()
    }

    pub fn prompt(&self) -> Option<Color> {
        self.prompt
    }

    /// Text rendering: rank 8 at the top, `.` for a quiet hint on an empty
    /// square, brackets around a piece that can be captured.
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for row in 0..8 {
            let _ = write!(out, "{} ", 8 - row);
            for col in 0..8 {
                let Some(sq) = Square::new(row, col) else { continue };
                let hint = self.hints.iter().find(|(h, _)| *h == sq).map(|(_, k)| *k);
                let cell = match (self.piece_at(sq), hint) {
                    (Some(p), Some(MoveKind::Capture)) => format!("[{}]", p.symbol()),
                    (Some(p), _) => format!(" {} ", p.symbol()),
                    (None, Some(_)) => " * ".to_string(),
                    (None, None) if sq.is_light() => " . ".to_string(),
                    (None, None) => " : ".to_string(),
                };
                out.push_str(&cell);
            }
            out.push('\n');
        }
        out.push_str("   a  b  c  d  e  f  g  h\n");
        if let Some(color) = self.prompt {
            let _ = writeln!(out, "{color} to promote: queen, rook, bishop or knight?");
        }
        out
    }
}

impl Renderer for MirrorView {
    fn draw_hint(&mut self, square: Square, kind: MoveKind) {
        self.hints.retain(|(sq, _)| *sq != square);
        self.hints.push((square, kind));
    }

    fn clear_all_hints(&mut self) {
        self.hints.clear();
    }

    fn render_piece(&mut self, square: Square, piece: Piece) {
        self.pieces.insert(square, piece);
    }

    fn remove_piece(&mut self, square: Square) {
        self.pieces.remove(&square);
        self.translations.remove(&square);
    }

    fn get_screen_rect(&self, square: Square) -> Rect {
        Rect {
            left: square.col() as f64 * self.square_px,
            top: square.row() as f64 * self.square_px,
            width: self.square_px,
            height: self.square_px,
        }
    }

    fn translate_piece(&mut self, square: Square, dx: f64, dy: f64) {
        self.translations.insert(square, (dx, dy));
    }

    fn clear_translation(&mut self, square: Square) {
        self.translations.remove(&square);
    }

    fn show_promotion_prompt(&mut self, color: Color) {
        self.prompt = Some(color);
    }

    fn dismiss_promotion_prompt(&mut self) {
        self.prompt = None;
    }
}
