//! Construction-time configuration for the game core.
//!
//! Everything here is validated once, before an engine is built; the core
//! itself never re-checks these values.

use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

use crate::types::{DEFAULT_COLS, DEFAULT_FRAME_RATE, DEFAULT_LINES_PER_LEVEL, DEFAULT_ROWS};

/// Game configuration supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board height in rows.
    pub rows: usize,
    /// Board width in columns.
    pub cols: usize,
    /// Frames per second used to convert the per-level frame table into
    /// tick delays.
    pub frame_rate: f64,
    /// Cleared lines required to advance one level.
    pub lines_per_level: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            frame_rate: DEFAULT_FRAME_RATE,
            lines_per_level: DEFAULT_LINES_PER_LEVEL,
        }
    }
}

impl GameConfig {
    /// Fail fast on configurations the core cannot run with.
    ///
    /// Every piece spans up to 4 cells on each axis, so anything smaller
    /// than 4x4 cannot even hold a spawned piece.
    pub fn validate(&self) -> Result<()> {
        ensure!(self.rows >= 4, "board must have at least 4 rows, got {}", self.rows);
        ensure!(self.cols >= 4, "board must have at least 4 columns, got {}", self.cols);
        ensure!(
            self.frame_rate.is_finite() && self.frame_rate > 0.0,
            "frame rate must be positive, got {}",
            self.frame_rate
        );
        ensure!(
            self.lines_per_level >= 1,
            "lines per level must be at least 1, got {}",
            self.lines_per_level
        );
        Ok(())
    }

    /// Horizontal offset that centers freshly spawned pieces.
    ///
    /// Computed once per board width; every spawn layout is expressed
    /// relative to this column. Layouts span the columns `offset - 1` to
    /// `offset + 2`, which stay inside any validated width.
    pub fn spawn_offset(&self) -> i32 {
        self.cols as i32 / 2 - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.rows, 20);
        assert_eq!(config.cols, 10);
        assert_eq!(config.lines_per_level, 10);
    }

    #[test]
    fn rejects_tiny_boards() {
        let config = GameConfig {
            rows: 3,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            cols: 2,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn rejects_bad_frame_rate() {
        let config = GameConfig {
            frame_rate: 0.0,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());

        let config = GameConfig {
            frame_rate: f64::NAN,
            ..GameConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn spawn_offset_centers_default_board() {
        // 10 columns: pieces anchor around column 4.
        assert_eq!(GameConfig::default().spawn_offset(), 4);

        let eight = GameConfig {
            cols: 8,
            ..GameConfig::default()
        };
        assert_eq!(eight.spawn_offset(), 3);
    }

    #[test]
    fn spawn_offset_keeps_layouts_inside_every_valid_width() {
        for cols in 4..=16 {
            let config = GameConfig {
                cols,
                ..GameConfig::default()
            };
            config.validate().unwrap();
            let offset = config.spawn_offset();
            // The widest layout spans offset - 1 to offset + 2.
            assert!(offset - 1 >= 0, "{cols} columns: left edge in bounds");
            assert!(offset + 2 < cols as i32, "{cols} columns: right edge in bounds");
        }
    }

    #[test]
    fn config_round_trips_through_serde() {
        let config = GameConfig {
            rows: 24,
            cols: 12,
            frame_rate: 50.0,
            lines_per_level: 5,
        };
        let json = serde_json::to_string(&config).unwrap();
        let back: GameConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: GameConfig = serde_json::from_str("{\"rows\": 24}").unwrap();
        assert_eq!(config.rows, 24);
        assert_eq!(config.cols, 10);
        assert_eq!(config.lines_per_level, 10);
    }
}
