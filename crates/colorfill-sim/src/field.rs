//! The per-player simulation: continuous movement over the claimable grid.
//!
//! The player slides in a straight line until it runs into something
//! solid. Every cell it passes over is claimed. Movement is split into
//! sub-steps of at most [`MAX_SUBSTEP`] cells so the one-cell look-ahead
//! can never jump over a wall, no matter how large the frame delta is.
//!
//! ```text
//!   Idle ──(set_speed ≠ 0)──→ Moving ──(collision)──→ Idle
//!     ↑                                                 │
//!     └──────────────(reset_position, any state)────────┘
//! ```

use colorfill_protocol::{CellState, Level};
use serde::{Deserialize, Serialize};

use crate::{Grid, SimError};

/// Largest distance, in cells, the player moves in one sub-step.
pub const MAX_SUBSTEP: f64 = 0.49;

/// The player's continuous position and velocity, in cells and cells/second.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Player {
    pub x: f64,
    pub y: f64,
    pub speed_x: f64,
    pub speed_y: f64,
}

impl Player {
    /// Idle means both velocity components are exactly zero.
    pub fn is_idle(&self) -> bool {
        self.speed_x == 0.0 && self.speed_y == 0.0
    }
}

/// One player's playing field for the current round.
///
/// Owns the grid and the player exclusively; rendering code reads it
/// between frames through the accessors.
#[derive(Debug, Clone)]
pub struct PlayingField {
    level_id: i64,
    grid: Grid,
    player: Player,
    start: (usize, usize),
}

impl PlayingField {
    /// Creates a field for `level` with a playfield `height` rows tall and
    /// places the player on `start`, claiming that cell.
    pub fn new(
        level: &Level,
        height: usize,
        start: (usize, usize),
    ) -> Result<Self, SimError> {
        let mut grid = Grid::from_level(level, height)?;
        let (x, y) = start;
        match grid.get(x, y) {
            None => {
                return Err(SimError::StartOutOfBounds {
                    x,
                    y,
                    width: grid.width(),
                    height,
                });
            }
            Some(CellState::Solid) => return Err(SimError::StartOnSolid { x, y }),
            Some(_) => {
                grid.set(x, y, CellState::Filled);
            }
        }

        tracing::debug!(
            level = level.id,
            width = grid.width(),
            height,
            x,
            y,
            "playing field created"
        );

        Ok(Self {
            level_id: level.id,
            grid,
            player: Player {
                x: x as f64,
                y: y as f64,
                ..Player::default()
            },
            start,
        })
    }

    pub fn level_id(&self) -> i64 {
        self.level_id
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    /// The player's continuous position `(x, y)`.
    pub fn player_position(&self) -> (f64, f64) {
        (self.player.x, self.player.y)
    }

    /// The cell at `(x, y)`; `None` outside the playfield.
    pub fn cell_at(&self, x: usize, y: usize) -> Option<CellState> {
        self.grid.get(x, y)
    }

    /// Sets the player's velocity, but only while idle.
    ///
    /// While the player is moving this does nothing: a new direction can
    /// only be chosen after a collision has stopped the slide. Non-finite
    /// components are ignored as well.
    pub fn set_speed(&mut self, speed_x: f64, speed_y: f64) {
        if !self.player.is_idle() {
            return;
        }
        if !speed_x.is_finite() || !speed_y.is_finite() {
            tracing::debug!(speed_x, speed_y, "ignoring non-finite speed");
            return;
        }
        self.player.speed_x = speed_x;
        self.player.speed_y = speed_y;
    }

    /// Puts the player back on its start cell and stops it.
    pub fn reset_position(&mut self) {
        let (x, y) = self.start;
        self.player = Player {
            x: x as f64,
            y: y as f64,
            ..Player::default()
        };
    }

    /// Advances the simulation by `delta_time` seconds.
    pub fn advance(&mut self, delta_time: f64) {
        let delta_x = self.player.speed_x * delta_time;
        let delta_y = self.player.speed_y * delta_time;
        if !delta_x.is_finite() || !delta_y.is_finite() {
            return;
        }

        let steps = (delta_x.abs().max(delta_y.abs()) / MAX_SUBSTEP).ceil();
        let step_x = delta_x / steps;
        let step_y = delta_y / steps;
        let dir_x = sign(delta_x);
        let dir_y = sign(delta_y);

        // `steps` is a whole number; zero means the player is idle.
        let mut remaining = steps;
        while remaining >= 1.0 {
            remaining -= 1.0;
            self.player.x += step_x;
            self.player.y += step_y;

            let ahead_x = round_half_up(self.player.x) + dir_x;
            let ahead_y = round_half_up(self.player.y) + dir_y;

            if self.is_solid(ahead_x, ahead_y) {
                self.player.x = ahead_x - dir_x;
                self.player.y = ahead_y - dir_y;
                self.claim(self.player.x, self.player.y);
                self.player.speed_x = 0.0;
                self.player.speed_y = 0.0;
                tracing::trace!(
                    x = self.player.x,
                    y = self.player.y,
                    "player stopped"
                );
                return;
            }

            self.claim(round_half_up(self.player.x), round_half_up(self.player.y));
        }
    }

    /// Whether every cell has been claimed. Solid cells don't count.
    pub fn is_complete(&self) -> bool {
        !self.grid.has_empty()
    }

    /// Solid cell or outside the playfield.
    fn is_solid(&self, x: f64, y: f64) -> bool {
        match self.cell_index(x, y) {
            Some((x, y)) => self.grid.get(x, y) == Some(CellState::Solid),
            None => true,
        }
    }

    /// Marks an `Empty` cell `Filled`. Solid and out-of-bounds cells are
    /// left alone.
    fn claim(&mut self, x: f64, y: f64) {
        if let Some((x, y)) = self.cell_index(x, y) {
            if self.grid.get(x, y) == Some(CellState::Empty) {
                self.grid.set(x, y, CellState::Filled);
            }
        }
    }

    fn cell_index(&self, x: f64, y: f64) -> Option<(usize, usize)> {
        let in_range = |v: f64, limit: usize| v >= 0.0 && v < limit as f64;
        (in_range(x, self.width()) && in_range(y, self.height()))
            .then(|| (x as usize, y as usize))
    }
}

/// Rounds to the nearest integer, halves towards positive infinity.
fn round_half_up(v: f64) -> f64 {
    (v + 0.5).floor()
}

/// `-1`, `0` or `1`.
fn sign(v: f64) -> f64 {
    if v > 0.0 {
        1.0
    } else if v < 0.0 {
        -1.0
    } else {
        0.0
    }
}
