use serde::Deserialize;

use crate::error::{ChessboardError, Result};
use crate::piece::Color;

/// Platform-appropriate random number in [0, 1).
/// Uses js_sys::Math::random() in WASM builds, rand crate natively.
fn random_f64() -> f64 {
    #[cfg(target_arch = "wasm32")]
    {
        js_sys::Math::random()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        use rand::Rng;
        rand::thread_rng().gen::<f64>()
    }
}

/// Which side moves first after setup or reset.
#[derive(Clone, Copy, Deserialize, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum FirstTurn {
    #[default]
    Random,
    White,
    Black,
}

impl FirstTurn {
    pub fn resolve(self) -> Color {
        match self {
            FirstTurn::White => Color::White,
            FirstTurn::Black => Color::Black,
            FirstTurn::Random => {
                if random_f64() < 0.5 { Color::White } else { Color::Black }
            }
        }
    }
}

#[derive(Clone, Deserialize, Debug, PartialEq)]
#[serde(default)]
pub struct SessionConfig {
    /// How long the host lets the slide animation run before settling a move.
    pub settle_delay_ms: u32,
    pub first_turn: FirstTurn,
    /// Square size used when no real layout is available.
    pub square_px: f64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionConfig {
    pub fn new() -> Self {
        SessionConfig {
            settle_delay_ms: 300,
            first_turn: FirstTurn::Random,
            square_px: 80.0,
        }
    }

    /// Parse a JSON object; missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).map_err(|e| ChessboardError::InvalidConfig(e.to_string()))
    }
}
