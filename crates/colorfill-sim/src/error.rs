//! Error types for the simulation layer.

/// Errors raised while setting up a playing field.
///
/// Once a field exists nothing in the simulation fails: rejected input is
/// a silent no-op.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// The level has a width of zero.
    #[error("grid width must be greater than zero")]
    ZeroWidth,

    /// The start cell lies outside the playfield.
    #[error("start cell ({x}, {y}) is outside the {width}x{height} playfield")]
    StartOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    /// The start cell is an obstacle.
    #[error("start cell ({x}, {y}) is solid")]
    StartOnSolid { x: usize, y: usize },
}
