// =============================================================================
// Game flow integration tests
//
// Drive a session through clicks, settles and promotions with an in-memory
// view, checking move generation scenarios, turn alternation and that the
// view always matches the board once a move has settled.
// =============================================================================

use chessboard::board::Board;
use chessboard::config::{FirstTurn, SessionConfig};
use chessboard::moves::{moves_for, MoveKind, Target};
use chessboard::piece::{Color, Piece, PieceKind, PromotionChoice};
use chessboard::render::MirrorView;
use chessboard::session::{ClickOutcome, Phase, PromotionOutcome, Session, SettleOutcome};
use chessboard::square::Square;

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn at(row: usize, col: usize) -> Square {
    Square::new(row, col).unwrap()
}

fn white_first() -> SessionConfig {
    SessionConfig { first_turn: FirstTurn::White, ..SessionConfig::new() }
}

fn session_on(board: Board, turn: Color) -> (Session, MirrorView) {
    let session = Session::with_board(board, turn, white_first());
    let mut view = MirrorView::new(80.0);
    session.draw(&mut view);
    (session, view)
}

/// Click `from` then `to`, settle the move and return the settle outcome.
fn play(session: &mut Session, view: &mut MirrorView, from: Square, to: Square) -> SettleOutcome {
    let selected = session.click(from, view);
    assert!(
        matches!(selected, ClickOutcome::Selected { .. }),
        "{from} not selectable: {selected:?}"
    );
    match session.click(to, view) {
        ClickOutcome::MoveStarted { ticket, .. } => session.settle(ticket, view),
        other => panic!("{from} -> {to} did not start: {other:?}"),
    }
}

fn assert_view_matches_board(session: &Session, view: &MirrorView) {
    for square in Square::all() {
        assert_eq!(
            session.board().occupant_at(square),
            view.piece_at(square),
            "board and view disagree on {square}"
        );
    }
}

// ============================================================================
// Move generation scenarios
// ============================================================================

#[test]
fn lone_rook_reaches_fourteen_squares() {
    let rook = Piece::new(PieceKind::Rook, Color::White);
    let targets = moves_for(at(4, 4), rook, &Board::empty());
    assert_eq!(targets.len(), 14);
    assert!(targets.iter().all(|t| t.kind == MoveKind::Quiet));
}

#[test]
fn home_row_pawn_offers_one_and_two_steps() {
    let mut board = Board::empty();
    let pawn = Piece::new(PieceKind::Pawn, Color::White);
    board.place(at(6, 3), pawn);
    let targets = moves_for(at(6, 3), pawn, &board);
    assert_eq!(
        targets,
        vec![
            Target { square: at(5, 3), kind: MoveKind::Quiet },
            Target { square: at(4, 3), kind: MoveKind::Quiet },
        ]
    );
}

#[test]
fn pawn_sees_diagonal_enemy() {
    let mut board = Board::empty();
    let pawn = Piece::new(PieceKind::Pawn, Color::White);
    board.place(at(6, 3), pawn);
    board.place(at(5, 4), Piece::new(PieceKind::Knight, Color::Black));
    let targets = moves_for(at(6, 3), pawn, &board);
    assert!(targets.contains(&Target { square: at(5, 4), kind: MoveKind::Capture }));
    assert!(targets.contains(&Target { square: at(5, 3), kind: MoveKind::Quiet }));
    assert!(!targets.iter().any(|t| t.square == at(5, 2)));
}

#[test]
fn lone_knight_reaches_eight_squares() {
    let knight = Piece::new(PieceKind::Knight, Color::White);
    let targets = moves_for(at(3, 3), knight, &Board::empty());
    assert_eq!(targets.len(), 8);
    assert!(targets.iter().all(|t| t.kind == MoveKind::Quiet));
}

// ============================================================================
// Turn alternation and board/view agreement
// ============================================================================

#[test]
fn turns_alternate_through_an_opening_with_a_capture() {
    let mut session = Session::new(white_first());
    let mut view = MirrorView::new(80.0);
    session.draw(&mut view);

    let line = [("e2", "e4"), ("d7", "d5"), ("e4", "d5"), ("d8", "d5"), ("b1", "c3")];
    let mut expected = Color::White;
    for (from, to) in line {
        assert_eq!(session.turn(), expected);
        let outcome = play(&mut session, &mut view, sq(from), sq(to));
        assert!(matches!(outcome, SettleOutcome::Completed { .. }));
        assert_view_matches_board(&session, &view);
        expected = expected.opposite();
    }
    assert_eq!(session.turn(), Color::Black);
    assert_eq!(session.board().piece_count(), 30);
    assert_eq!(
        session.board().occupant_at(sq("d5")),
        Some(Piece::new(PieceKind::Queen, Color::Black))
    );
    assert!(session.board().is_empty(sq("d8")));
}

#[test]
fn capture_outcome_reports_the_victim() {
    let mut board = Board::empty();
    board.place(sq("a1"), Piece::new(PieceKind::Rook, Color::White));
    board.place(sq("a8"), Piece::new(PieceKind::Rook, Color::Black));
    let (mut session, mut view) = session_on(board, Color::White);

    let outcome = play(&mut session, &mut view, sq("a1"), sq("a8"));
    assert_eq!(
        outcome,
        SettleOutcome::Completed { captured: Some(Piece::new(PieceKind::Rook, Color::Black)) }
    );
    assert_eq!(session.board().piece_count(), 1);
    assert_view_matches_board(&session, &view);
}

#[test]
fn opponent_pieces_cannot_be_selected() {
    let (mut session, mut view) = session_on(Board::new(), Color::Black);
    assert_eq!(session.click(sq("e2"), &mut view), ClickOutcome::Ignored);
    assert_eq!(session.click(sq("e7"), &mut view), ClickOutcome::Selected { hints: 2 });
}

#[test]
fn invalid_clicks_leave_state_untouched() {
    let (mut session, mut view) = session_on(Board::new(), Color::White);
    session.click(sq("g1"), &mut view);
    let before = session.board().clone();

    // A square the knight cannot reach drops the selection, nothing more.
    assert_eq!(session.click(sq("g4"), &mut view), ClickOutcome::Cleared);
    assert_eq!(session.board(), &before);
    assert_eq!(session.turn(), Color::White);
    assert_eq!(session.phase(), &Phase::Idle);
    assert!(view.hints().is_empty());
}

// ============================================================================
// Promotion
// ============================================================================

#[test]
fn promotion_to_knight_defers_the_turn() {
    let mut board = Board::empty();
    board.place(at(1, 3), Piece::new(PieceKind::Pawn, Color::White));
    board.place(at(7, 4), Piece::new(PieceKind::King, Color::White));
    board.place(at(0, 7), Piece::new(PieceKind::King, Color::Black));
    let (mut session, mut view) = session_on(board, Color::White);

    let outcome = play(&mut session, &mut view, at(1, 3), at(0, 3));
    assert_eq!(outcome, SettleOutcome::AwaitingPromotion);
    assert!(session.board().is_empty(at(0, 3)));
    assert_eq!(view.piece_at(at(0, 3)), None);
    assert_eq!(view.prompt(), Some(Color::White));
    assert_eq!(session.turn(), Color::White);

    // The board stays locked until the choice arrives.
    assert_eq!(session.click(at(7, 4), &mut view), ClickOutcome::Ignored);

    let knight = Piece::new(PieceKind::Knight, Color::White);
    assert_eq!(
        session.choose_promotion(PromotionChoice::Knight, &mut view),
        PromotionOutcome::Promoted { piece: knight }
    );
    assert_eq!(session.board().occupant_at(at(0, 3)), Some(knight));
    assert_eq!(session.turn(), Color::Black);
    assert_eq!(view.prompt(), None);
    assert_view_matches_board(&session, &view);
}

#[test]
fn capturing_promotion_removes_the_victim() {
    let mut board = Board::empty();
    board.place(sq("b2"), Piece::new(PieceKind::Pawn, Color::Black));
    board.place(sq("a1"), Piece::new(PieceKind::Rook, Color::White));
    let (mut session, mut view) = session_on(board, Color::Black);

    assert_eq!(
        play(&mut session, &mut view, sq("b2"), sq("a1")),
        SettleOutcome::AwaitingPromotion
    );
    assert_eq!(session.board().piece_count(), 0);
    assert_eq!(view.pieces().count(), 0);

    session.choose_promotion(PromotionChoice::Queen, &mut view);
    assert_eq!(
        session.board().occupant_at(sq("a1")),
        Some(Piece::new(PieceKind::Queen, Color::Black))
    );
    assert_eq!(session.turn(), Color::White);
    assert_view_matches_board(&session, &view);
}

// ============================================================================
// Reset
// ============================================================================

#[test]
fn reset_restores_the_starting_position() {
    let mut session = Session::new(white_first());
    let mut view = MirrorView::new(80.0);
    session.draw(&mut view);

    play(&mut session, &mut view, sq("e2"), sq("e4"));
    session.click(sq("g8"), &mut view);
    session.reset(&mut view);

    assert_eq!(session.board(), &Board::new());
    assert_eq!(session.turn(), Color::White);
    assert_eq!(session.phase(), &Phase::Idle);
    assert!(view.hints().is_empty());
    assert_view_matches_board(&session, &view);
}
