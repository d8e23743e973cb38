// =============================================================================
// Interaction controller
//
// A session owns one board, the side to move and the click state machine:
//
//   Idle --click own piece--> Selected --click hint--> Animating
//     ^                          |                         |
//     |<--click anything else----+          settle(ticket) |
//     |<------------------------------------- (no promo) --+
//     |<--choose_promotion-- Promoting <----- (promo) -----+
//
// Clicks are ignored while Animating or Promoting. The turn flips exactly
// once per move, when the move is fully resolved. All rendering goes through
// the `Renderer` passed to each call; the session never reads it back except
// for screen geometry.
// =============================================================================

use serde::Serialize;
use tracing::{debug, info, trace};

use crate::animation::{self, InFlight, Landing, MoveTicket};
use crate::board::Board;
use crate::config::SessionConfig;
use crate::moves::{moves_for, Target};
use crate::piece::{Color, Piece, PromotionChoice};
use crate::render::Renderer;
use crate::square::Square;

/// The selected piece together with its hint set.
#[derive(Clone, Debug, PartialEq)]
pub struct Selection {
    pub square: Square,
    pub piece: Piece,
    pub hints: Vec<Target>,
}

#[derive(Clone, Debug, PartialEq)]
pub enum Phase {
    Idle,
    Selected(Selection),
    /// A move is sliding toward its target and waits for `settle`.
    Animating(InFlight),
    /// A pawn reached the far rank; waits for `choose_promotion`.
    Promoting { square: Square, color: Color },
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Selected(_) => "selected",
            Phase::Animating(_) => "animating",
            Phase::Promoting { .. } => "promoting",
        }
    }
}

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    /// Nothing changed.
    Ignored,
    /// A piece of the side to move is now selected with `hints` targets.
    Selected { hints: usize },
    /// A previous selection was dropped and nothing new was selected.
    Cleared,
    /// The host should call `settle(ticket)` after `delay_ms`.
    MoveStarted { ticket: MoveTicket, delay_ms: u32 },
}

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SettleOutcome {
    /// The ticket does not match the move in flight (aborted by a reset).
    Stale,
    Completed { captured: Option<Piece> },
    AwaitingPromotion,
}

#[derive(Clone, Copy, Serialize, Debug, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PromotionOutcome {
    Ignored,
    Promoted { piece: Piece },
}

pub struct Session {
    board: Board,
    turn: Color,
    phase: Phase,
    config: SessionConfig,
    last_ticket: u32,
}

impl Session {
    /// A session on the standard starting position.
    pub fn new(config: SessionConfig) -> Self {
        let turn = config.first_turn.resolve();
        Self::with_board(Board::new(), turn, config)
    }

    /// A session on an arbitrary position. Useful for setting up test positions.
    pub fn with_board(board: Board, turn: Color, config: SessionConfig) -> Self {
        info!("new session, {turn} to move");
        Session { board, turn, phase: Phase::Idle, config, last_ticket: 0 }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn selection(&self) -> Option<&Selection> {
        match &self.phase {
            Phase::Selected(sel) => Some(sel),
            _ => None,
        }
    }

    pub fn hints(&self) -> &[Target] {
        self.selection().map(|sel| sel.hints.as_slice()).unwrap_or(&[])
    }

    /// Render every piece on the board. Call once after construction.
    pub fn draw(&self, view: &mut impl Renderer) {
        for (sq, piece) in self.board.pieces() {
            view.render_piece(sq, piece);
        }
    }

    pub fn click(&mut self, sq: Square, view: &mut impl Renderer) -> ClickOutcome {
        debug!("clicked {sq} ({}, {})", sq.row(), sq.col());

        let selection = match &self.phase {
            Phase::Idle => None,
            Phase::Selected(sel) => Some(sel.clone()),
            Phase::Animating(_) | Phase::Promoting { .. } => {
                trace!("click on {sq} ignored while {}", self.phase.name());
                return ClickOutcome::Ignored;
            }
        };

        let Some(sel) = selection else {
            return self.select(sq, view).unwrap_or(ClickOutcome::Ignored);
        };

        view.clear_all_hints();
        self.phase = Phase::Idle;

        if sel.hints.iter().any(|t| t.square == sq) {
            self.last_ticket = self.last_ticket.wrapping_add(1);
            let flight = InFlight {
                ticket: MoveTicket(self.last_ticket),
                from: sel.square,
                to: sq,
                piece: sel.piece,
            };
            animation::launch(view, &flight);
            self.phase = Phase::Animating(flight);
            debug!("move {} -> {} in flight", flight.from, flight.to);
            return ClickOutcome::MoveStarted {
                ticket: flight.ticket,
                delay_ms: self.config.settle_delay_ms,
            };
        }

        self.select(sq, view).unwrap_or(ClickOutcome::Cleared)
    }

    /// Select the piece on `sq` if it belongs to the side to move. Hints of
    /// any earlier selection are cleared before the new ones are drawn.
    fn select(&mut self, sq: Square, view: &mut impl Renderer) -> Option<ClickOutcome> {
        let piece = self.board.occupant_at(sq).filter(|p| p.color == self.turn)?;
        let hints = moves_for(sq, piece, &self.board);

        view.clear_all_hints();
        for t in &hints {
            view.draw_hint(t.square, t.kind);
        }
        trace!("{} {} on {sq}: {} hints", piece.color, piece.kind, hints.len());

        let count = hints.len();
        self.phase = Phase::Selected(Selection { square: sq, piece, hints });
        Some(ClickOutcome::Selected { hints: count })
    }

    /// Resume the move in flight once its animation has run.
    pub fn settle(&mut self, ticket: MoveTicket, view: &mut impl Renderer) -> SettleOutcome {
        let flight = match self.phase {
            Phase::Animating(flight) if flight.ticket == ticket => flight,
            _ => {
                trace!("stale settle for ticket {}", ticket.0);
                return SettleOutcome::Stale;
            }
        };

        match animation::land(&mut self.board, view, &flight) {
            Landing::Moved { captured } => {
                self.finish_move();
                SettleOutcome::Completed { captured }
            }
            Landing::Promotion { square, color, .. } => {
                self.phase = Phase::Promoting { square, color };
                SettleOutcome::AwaitingPromotion
            }
        }
    }

    pub fn choose_promotion(
        &mut self,
        choice: PromotionChoice,
        view: &mut impl Renderer,
    ) -> PromotionOutcome {
        let Phase::Promoting { square, color } = self.phase else {
            trace!("promotion choice {choice:?} with no promotion pending");
            return PromotionOutcome::Ignored;
        };
        let piece = animation::promote(&mut self.board, view, square, color, choice);
        self.finish_move();
        PromotionOutcome::Promoted { piece }
    }

    /// Back to the starting position. A move in flight is abandoned: its
    /// offset is cleared and its settle ticket goes stale.
    pub fn reset(&mut self, view: &mut impl Renderer) {
        if let Phase::Animating(flight) = &self.phase {
            animation::abort(view, flight);
            debug!("aborted move {} -> {}", flight.from, flight.to);
        }
        view.dismiss_promotion_prompt();
        view.clear_all_hints();
        for (sq, _) in self.board.pieces() {
            view.remove_piece(sq);
        }

        self.board = Board::new();
        self.turn = self.config.first_turn.resolve();
        self.phase = Phase::Idle;
        self.draw(view);
        info!("board reset, {} to move", self.turn);
    }

    fn finish_move(&mut self) {
        self.turn = self.turn.opposite();
        self.phase = Phase::Idle;
        debug!("{} to move", self.turn);
    }
}
