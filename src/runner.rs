//! Game loop thread: paces gravity ticks and feeds commands to the engine.
//!
//! The loop owns the engine and is driven purely by the engine's reported
//! state. While playing it steps once per tick interval, draining player
//! commands in between with `recv_timeout` so input latency is bounded by
//! channel delivery, not by the tick. While idle or paused it blocks on the
//! channel and burns no CPU.

use std::sync::mpsc::{self, Receiver, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Instant;

use tracing::debug;

use crate::core::GameEngine;
use crate::types::{Command, GameState};

/// Drives a [`GameEngine`] until its command channel closes.
pub struct GameLoop {
    engine: GameEngine,
    commands: Receiver<Command>,
}

impl GameLoop {
    /// Wrap an engine, returning the loop and the sender that controls it.
    pub fn new(engine: GameEngine) -> (Self, Sender<Command>) {
        let (tx, rx) = mpsc::channel();
        (
            Self {
                engine,
                commands: rx,
            },
            tx,
        )
    }

    /// Run the loop on a dedicated thread.
    pub fn spawn(self) -> JoinHandle<GameEngine> {
        thread::spawn(move || self.run())
    }

    /// Run until every command sender is gone, then hand the engine back.
    ///
    /// A disconnect mid-game abandons and finalizes the current game before
    /// returning, so subscribers always see their `GameOver`.
    pub fn run(mut self) -> GameEngine {
        loop {
            match self.engine.state() {
                GameState::Init | GameState::Paused => match self.commands.recv() {
                    Ok(command) => self.engine.apply(command),
                    Err(_) => {
                        debug!("command channel closed, shutting down");
                        self.engine.quit();
                        self.engine.end_game();
                        return self.engine;
                    }
                },
                GameState::Stopped => self.engine.end_game(),
                GameState::Playing => self.tick(),
            }
        }
    }

    /// One gravity tick plus however many commands arrive before the next.
    fn tick(&mut self) {
        self.engine.step();
        let deadline = Instant::now() + self.engine.tick_interval();

        while self.engine.state() == GameState::Playing {
            let now = Instant::now();
            if now >= deadline {
                break;
            }
            match self.commands.recv_timeout(deadline - now) {
                Ok(command) => self.engine.apply(command),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    self.engine.quit();
                    break;
                }
            }
        }
    }
}
