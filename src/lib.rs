pub mod animation;
pub mod board;
pub mod config;
pub mod error;
pub mod moves;
pub mod piece;
pub mod render;
pub mod session;
pub mod snapshot;
pub mod square;

#[cfg(target_arch = "wasm32")]
mod wasm_api;

pub use error::{ChessboardError, Result};
