//! Core types shared across the crate
//! This module contains pure data types with no external dependencies

use serde::{Deserialize, Serialize};

/// Default board dimensions
pub const DEFAULT_ROWS: usize = 20;
pub const DEFAULT_COLS: usize = 10;

/// Default frame-rate constant used to convert frame counts into delays
pub const DEFAULT_FRAME_RATE: f64 = 60.0988;

/// Default number of cleared lines needed to advance a level
pub const DEFAULT_LINES_PER_LEVEL: u32 = 10;

/// A position on the board: x is the column, y is the row.
/// Signed so that transform candidates may leave the board before the
/// bounds nudge or validation deal with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// The seven piece shapes.
///
/// The inverse variants are separate kinds because they rotate
/// differently from their mirror twins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    Block,
    Line,
    Z,
    ZInv,
    T,
    L,
    LInv,
}

impl PieceKind {
    /// All kinds, in catalog order. Uniform random selection indexes this.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::Block,
        PieceKind::Line,
        PieceKind::Z,
        PieceKind::ZInv,
        PieceKind::T,
        PieceKind::L,
        PieceKind::LInv,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::Block => "block",
            PieceKind::Line => "line",
            PieceKind::Z => "z",
            PieceKind::ZInv => "z-inv",
            PieceKind::T => "t",
            PieceKind::L => "l",
            PieceKind::LInv => "l-inv",
        }
    }
}

/// Engine lifecycle states.
///
/// `Init` is the pre-play state; `Stopped` is terminal until the engine
/// finalizes the game and resets back to `Init`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    Init,
    Playing,
    Paused,
    Stopped,
}

/// Inbound commands from collaborators (input layer, embedding app)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    MoveLeft,
    MoveRight,
    MoveDown,
    Rotate,
    TogglePause,
    Quit,
}

/// Final score report handed back when a game ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStats {
    pub points: u32,
    pub lines: u32,
    pub level: u32,
}
