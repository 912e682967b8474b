//! Falling-block game core with a terminal front end.
//!
//! The crate splits into a pure, event-emitting core ([`core`], [`events`],
//! [`config`]), a thread-based driver ([`runner`]) and a crossterm front end
//! ([`input`], [`term`]). Embedding applications build an [`EventBus`],
//! subscribe, hand it to a [`GameEngine`] and drive the engine themselves or
//! through a [`GameLoop`].
//!
//! ```no_run
//! use stackfall::{Command, EventBus, GameConfig, GameEngine, GameLoop};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut bus = EventBus::new();
//! let events = bus.subscribe_channel();
//! let engine = GameEngine::new(GameConfig::default(), bus, 42)?;
//! let (game_loop, commands) = GameLoop::new(engine);
//! let handle = game_loop.spawn();
//!
//! commands.send(Command::Start)?;
//! // ... render `events`, send more commands ...
//! drop(commands);
//! handle.join().ok();
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod core;
pub mod events;
pub mod input;
pub mod runner;
pub mod term;
pub mod types;

pub use config::GameConfig;
pub use crate::core::{Board, GameEngine, Piece, PieceColor, SimpleRng};
pub use events::{EventBus, GameEvent};
pub use runner::GameLoop;
pub use term::BoardView;
pub use types::{Command, Coordinate, GameState, GameStats, PieceKind};
