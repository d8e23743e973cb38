// =============================================================================
// Errors raised while turning outside input (JavaScript values, command
// line tokens, configuration text) into board types. Clicks themselves
// never fail; they are applied or ignored.
// =============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ChessboardError {
    /// Coordinates outside the 8x8 grid
    #[error("square ({row}, {col}) is off the board")]
    OutOfBounds { row: i64, col: i64 },

    /// Text that is not a square name such as "e4"
    #[error("invalid square name: {0:?}")]
    InvalidSquare(String),

    /// Promotion kinds are limited to queen, rook, bishop and knight
    #[error("unknown promotion kind: {0:?}")]
    UnknownPromotion(String),

    /// Configuration that failed to deserialize
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, ChessboardError>;
