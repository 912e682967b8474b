//! Pure game logic: board, pieces, RNG and the engine that ties them together.
//!
//! Nothing in this module touches the terminal, threads or the system clock
//! beyond reporting the desired tick interval.

pub mod board;
pub mod engine;
pub mod piece;
pub mod rng;

pub use board::Board;
pub use engine::GameEngine;
pub use piece::{Piece, PieceColor};
pub use rng::SimpleRng;
