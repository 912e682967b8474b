//! Outbound notifications and the dispatcher that delivers them.
//!
//! The dispatcher is an explicitly constructed instance owned by the engine
//! (one per game), not a process-wide singleton. Collaborators subscribe
//! before the engine is built; publications are synchronous closure calls,
//! optionally bridged onto an mpsc channel for consumers living on another
//! thread.

use std::sync::mpsc;

use crate::core::piece::PieceColor;
use crate::types::{Coordinate, GameStats, PieceKind};

/// Notifications emitted by the engine.
///
/// Payloads are the minimal board-cell deltas and counter values a renderer
/// or stats panel needs; none of them expose mutable core state.
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    /// The active piece now occupies these cells.
    ActivePieceDrawn {
        cells: [Coordinate; 4],
        color: PieceColor,
    },
    /// The active piece no longer occupies these cells.
    ActivePieceErased { cells: [Coordinate; 4] },
    /// The upcoming piece changed; shown in the preview panel.
    NextPiecePreview {
        kind: PieceKind,
        cells: [Coordinate; 4],
        color: PieceColor,
    },
    /// Rows at these indices (top-down, pre-removal) were cleared.
    RowsCleared { rows: Vec<usize> },
    PointsChanged(u32),
    LinesChanged(u32),
    LevelChanged(u32),
    /// Final stats; the game has ended and the engine reset itself.
    GameOver(GameStats),
}

type Handler = Box<dyn FnMut(&GameEvent) + Send>;

/// Synchronous event dispatcher.
#[derive(Default)]
pub struct EventBus {
    handlers: Vec<Handler>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
        }
    }

    /// Register a handler invoked for every published event.
    pub fn subscribe<F>(&mut self, handler: F)
    where
        F: FnMut(&GameEvent) + Send + 'static,
    {
        self.handlers.push(Box::new(handler));
    }

    /// Register a channel subscriber; events are cloned into the channel.
    ///
    /// Useful when the consumer lives on a different thread than the game
    /// loop. A dropped receiver simply discards the clones.
    pub fn subscribe_channel(&mut self) -> mpsc::Receiver<GameEvent> {
        let (tx, rx) = mpsc::channel();
        self.subscribe(move |event| {
            let _ = tx.send(event.clone());
        });
        rx
    }

    /// Deliver an event to every subscriber, in subscription order.
    pub fn publish(&mut self, event: &GameEvent) {
        for handler in &mut self.handlers {
            handler(event);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.handlers.len()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("handlers", &self.handlers.len())
            .finish()
    }
}
