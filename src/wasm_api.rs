use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::animation::MoveTicket;
use crate::config::SessionConfig;
use crate::error::ChessboardError;
use crate::moves::MoveKind;
use crate::piece::{Color, Piece, PromotionChoice};
use crate::render::{Rect, Renderer};
use crate::session::Session;
use crate::snapshot::Snapshot;
use crate::square::Square;

#[wasm_bindgen]
extern "C" {
    /// Page-side object that owns the board's DOM. Squares are passed as
    /// (row, col) with row 0 at the top.
    pub type BoardView;

    #[wasm_bindgen(method, js_name = drawHint)]
    fn draw_hint(this: &BoardView, row: usize, col: usize, kind: &str);

    #[wasm_bindgen(method, js_name = clearAllHints)]
    fn clear_all_hints(this: &BoardView);

    #[wasm_bindgen(method, js_name = renderPiece)]
    fn render_piece(this: &BoardView, row: usize, col: usize, image: &str, alt: &str);

    #[wasm_bindgen(method, js_name = removePiece)]
    fn remove_piece(this: &BoardView, row: usize, col: usize);

    /// Expected to return a DOMRect-like object with `left` and `top`.
    #[wasm_bindgen(method, js_name = getScreenRect)]
    fn get_screen_rect(this: &BoardView, row: usize, col: usize) -> JsValue;

    #[wasm_bindgen(method, js_name = translatePiece)]
    fn translate_piece(this: &BoardView, row: usize, col: usize, dx: f64, dy: f64);

    #[wasm_bindgen(method, js_name = clearTranslation)]
    fn clear_translation(this: &BoardView, row: usize, col: usize);

    #[wasm_bindgen(method, js_name = showPromotionPrompt)]
    fn show_promotion_prompt(this: &BoardView, color: &str);

    #[wasm_bindgen(method, js_name = dismissPromotionPrompt)]
    fn dismiss_promotion_prompt(this: &BoardView);
}

fn rect_field(rect: &JsValue, name: &str) -> f64 {
    js_sys::Reflect::get(rect, &JsValue::from_str(name))
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0)
}

fn kind_to_string(kind: MoveKind) -> &'static str {
    match kind {
        MoveKind::Quiet => "hint",
        MoveKind::Capture => "capture-hint",
    }
}

/// Adapts the page's `BoardView` to the session's render boundary.
struct DomView {
    view: BoardView,
}

impl Renderer for DomView {
    fn draw_hint(&mut self, square: Square, kind: MoveKind) {
        self.view.draw_hint(square.row(), square.col(), kind_to_string(kind));
    }

    fn clear_all_hints(&mut self) {
        self.view.clear_all_hints();
    }

    fn render_piece(&mut self, square: Square, piece: Piece) {
        self.view
            .render_piece(square.row(), square.col(), &piece.image_path(), &piece.label());
    }

    fn remove_piece(&mut self, square: Square) {
        self.view.remove_piece(square.row(), square.col());
    }

    fn get_screen_rect(&self, square: Square) -> Rect {
        let rect = self.view.get_screen_rect(square.row(), square.col());
        Rect {
            left: rect_field(&rect, "left"),
            top: rect_field(&rect, "top"),
            width: rect_field(&rect, "width"),
            height: rect_field(&rect, "height"),
        }
    }

    fn translate_piece(&mut self, square: Square, dx: f64, dy: f64) {
        self.view.translate_piece(square.row(), square.col(), dx, dy);
    }

    fn clear_translation(&mut self, square: Square) {
        self.view.clear_translation(square.row(), square.col());
    }

    fn show_promotion_prompt(&mut self, color: Color) {
        self.view.show_promotion_prompt(color.name());
    }

    fn dismiss_promotion_prompt(&mut self) {
        self.view.dismiss_promotion_prompt();
    }
}

#[derive(Serialize)]
struct ErrorJson {
    error: String,
}

fn to_js<T: Serialize>(value: &T) -> JsValue {
    serde_wasm_bindgen::to_value(value).unwrap_or(JsValue::NULL)
}

fn error_js(err: ChessboardError) -> JsValue {
    to_js(&ErrorJson { error: err.to_string() })
}

#[wasm_bindgen]
pub struct Game {
    session: Session,
    view: DomView,
}

#[wasm_bindgen]
impl Game {
    /// `config` may be `undefined` for defaults, or an object such as
    /// `{ settle_delay_ms: 300, first_turn: "random" }`.
    ///
    /// Unlike the other methods, a malformed `config` throws (a constructor
    /// cannot return an `{ error }` object); wrap `new Game(..)` in `try`.
    #[wasm_bindgen(constructor)]
    pub fn new(view: BoardView, config: JsValue) -> Result<Game, JsError> {
        let config = if config.is_undefined() || config.is_null() {
            SessionConfig::new()
        } else {
            serde_wasm_bindgen::from_value(config)
                .map_err(|e| JsError::from(ChessboardError::InvalidConfig(e.to_string())))?
        };
        let session = Session::new(config);
        let mut view = DomView { view };
        session.draw(&mut view);
        Ok(Game { session, view })
    }

    /// Route a square click. When the result has `outcome: "move_started"`,
    /// call `settle(ticket)` after `delay_ms`.
    pub fn click(&mut self, row: i32, col: i32) -> JsValue {
        match Square::try_new(row as i64, col as i64) {
            Ok(sq) => to_js(&self.session.click(sq, &mut self.view)),
            Err(e) => error_js(e),
        }
    }

    pub fn settle(&mut self, ticket: u32) -> JsValue {
        to_js(&self.session.settle(MoveTicket(ticket), &mut self.view))
    }

    /// `kind` is one of "queen", "rook", "bishop", "knight" (any case).
    pub fn choose_promotion(&mut self, kind: &str) -> JsValue {
        match kind.parse::<PromotionChoice>() {
            Ok(choice) => to_js(&self.session.choose_promotion(choice, &mut self.view)),
            Err(e) => error_js(e),
        }
    }

    pub fn reset(&mut self) {
        self.session.reset(&mut self.view);
    }

    pub fn get_board_state(&self) -> JsValue {
        to_js(&Snapshot::of(&self.session))
    }

    pub fn turn(&self) -> String {
        self.session.turn().name().to_string()
    }

    pub fn settle_delay_ms(&self) -> u32 {
        self.session.config().settle_delay_ms
    }
}
