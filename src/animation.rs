// =============================================================================
// Move animation and promotion
//
// A committed move happens in two steps. `launch` slides the piece image
// toward its destination with a transient offset; the board is not touched.
// `land` runs once the settle delay has elapsed: it mutates the board and the
// view together (victim removed, piece relocated, offset cleared) so the two
// agree again before control returns to the event loop. A pawn landing on
// the far rank is lifted off both layers and waits for `promote`.
// =============================================================================

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::board::Board;
use crate::piece::{Color, Piece, PieceKind, PromotionChoice};
use crate::render::Renderer;
use crate::square::Square;

/// Identifies one in-flight move. A settle event carrying an older ticket
/// belongs to an animation that was aborted and is ignored.
#[derive(Clone, Copy, Serialize, Deserialize, Debug, PartialEq, Eq, Hash)]
pub struct MoveTicket(pub u32);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct InFlight {
    pub ticket: MoveTicket,
    pub from: Square,
    pub to: Square,
    pub piece: Piece,
}

/// What `land` left behind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Landing {
    Moved { captured: Option<Piece> },
    /// The pawn reached the far rank and was removed pending a choice.
    Promotion { square: Square, color: Color, captured: Option<Piece> },
}

/// Start the slide from `flight.from` to `flight.to`. Returns the pixel delta.
pub fn launch(view: &mut impl Renderer, flight: &InFlight) -> (f64, f64) {
    let from = view.get_screen_rect(flight.from);
    let to = view.get_screen_rect(flight.to);
    let (dx, dy) = (to.left - from.left, to.top - from.top);
    view.translate_piece(flight.from, dx, dy);
    (dx, dy)
}

/// Undo the transient offset of a move that will never land.
pub fn abort(view: &mut impl Renderer, flight: &InFlight) {
    view.clear_translation(flight.from);
}

pub fn land(board: &mut Board, view: &mut impl Renderer, flight: &InFlight) -> Landing {
    let captured = board.move_piece(flight.from, flight.to);

    view.clear_translation(flight.from);
    if captured.is_some() {
        view.remove_piece(flight.to);
    }
    view.remove_piece(flight.from);
    view.render_piece(flight.to, flight.piece);

    match captured {
        Some(victim) => info!(
            "{} {} takes {} on {}",
            flight.piece.color, flight.piece.kind, victim.kind, flight.to
        ),
        None => info!(
            "{} {} {} -> {}",
            flight.piece.color, flight.piece.kind, flight.from, flight.to
        ),
    }

    let color = flight.piece.color;
    if flight.piece.kind == PieceKind::Pawn && flight.to.row() == color.promotion_row() {
        board.remove(flight.to);
        view.remove_piece(flight.to);
        view.show_promotion_prompt(color);
        info!("{color} pawn on {} awaits promotion", flight.to);
        return Landing::Promotion { square: flight.to, color, captured };
    }

    Landing::Moved { captured }
}

/// Put the chosen piece where the promoting pawn stood.
pub fn promote(
    board: &mut Board,
    view: &mut impl Renderer,
    square: Square,
    color: Color,
    choice: PromotionChoice,
) -> Piece {
    let piece = Piece::new(choice.kind(), color);
    board.place(square, piece);
    view.dismiss_promotion_prompt();
    view.render_piece(square, piece);
    info!("{color} pawn on {square} promoted to {}", piece.kind);
    piece
}
