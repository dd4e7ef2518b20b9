//! Screen-to-level sizing helpers.

use colorfill_protocol::Level;

/// Height of the reset button strip below the playfield: a quarter of the
/// screen width.
pub fn reset_button_height(screen_width: f64) -> f64 {
    screen_width / 4.0
}

/// The playable height / width ratio sent with `RegisterPlayer`, so the
/// server can generate levels that fit this screen.
pub fn level_size_ratio(screen_width: f64, screen_height: f64) -> f64 {
    (screen_height - reset_button_height(screen_width)) / screen_width
}

/// Rows needed to hold every cell of `level`.
pub fn level_rows(level: &Level) -> usize {
    level.blocks.len().div_ceil(level.width.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use colorfill_protocol::CellState;

    #[test]
    fn test_level_size_ratio_subtracts_button_strip() {
        // 400 wide → 100 high button strip, 700 left for the level.
        assert_eq!(level_size_ratio(400.0, 800.0), 1.75);
        assert_eq!(reset_button_height(400.0), 100.0);
    }

    #[test]
    fn test_level_rows_rounds_up() {
        let level = Level {
            id: 0,
            name: String::new(),
            blocks: vec![CellState::Empty; 7],
            width: 3,
            brightness: 1.0,
        };
        assert_eq!(level_rows(&level), 3);
    }
}
