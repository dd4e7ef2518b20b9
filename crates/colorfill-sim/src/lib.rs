//! Grid model and deterministic collision simulation for Colorfill.
//!
//! - [`Grid`] — the three-state cell grid, padded with solid cells to the
//!   playfield size.
//! - [`PlayingField`] — the player's sliding movement over the grid,
//!   claiming every cell it passes.
//! - [`sizing`] — helpers relating screen size to level size.
//!
//! Everything here is synchronous and single-owner: the game loop calls
//! [`PlayingField::advance`] once per frame and reads state in between.

mod error;
mod field;
mod grid;
pub mod sizing;

pub use colorfill_protocol::CellState;
pub use error::SimError;
pub use field::{MAX_SUBSTEP, Player, PlayingField};
pub use grid::Grid;
