//! Game engine: state machine, piece lifecycle, scoring and leveling.
//!
//! The engine owns the board, the active and upcoming pieces, and the event
//! bus. It is entirely passive: a driver (the game loop, or a test) calls
//! [`GameEngine::step`] for gravity ticks and [`GameEngine::apply`] for player
//! commands, and reads [`GameEngine::tick_interval`] to pace itself. The
//! engine never sleeps, spawns threads or reschedules anything.
//!
//! The active piece's cells are marked on the board while it moves; candidate
//! validation treats the piece's own cells as free so a piece can slide or
//! rotate through the space it currently occupies.

use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info};

use crate::config::GameConfig;
use crate::core::board::Board;
use crate::core::piece::Piece;
use crate::core::rng::SimpleRng;
use crate::events::{EventBus, GameEvent};
use crate::types::{Command, Coordinate, GameState, GameStats};

/// Points awarded for clearing 1..=4 rows at once, before the level
/// multiplier. Index is the number of rows cleared.
const ROW_POINTS: [u32; 5] = [0, 40, 100, 300, 1200];

/// Callback invoked with the final stats when a game ends.
pub type StatsCallback = Box<dyn FnMut(GameStats) + Send>;

/// The game core.
pub struct GameEngine {
    config: GameConfig,
    board: Board,
    bus: EventBus,
    rng: SimpleRng,
    state: GameState,
    active: Option<Piece>,
    next: Option<Piece>,
    points: u32,
    line_count: u32,
    level: u32,
    stats_callback: Option<StatsCallback>,
}

impl GameEngine {
    /// Build an engine from a validated configuration.
    ///
    /// The bus should already carry its subscribers; the engine publishes
    /// to it synchronously from every mutating call.
    pub fn new(config: GameConfig, bus: EventBus, seed: u32) -> Result<Self> {
        config.validate()?;
        let board = Board::new(config.rows, config.cols);
        Ok(Self {
            config,
            board,
            bus,
            rng: SimpleRng::new(seed),
            state: GameState::Init,
            active: None,
            next: None,
            points: 0,
            line_count: 0,
            level: 0,
            stats_callback: None,
        })
    }

    /// Register a callback for the final stats of each finished game.
    pub fn set_stats_callback(&mut self, callback: StatsCallback) {
        self.stats_callback = Some(callback);
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            points: self.points,
            lines: self.line_count,
            level: self.level,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cells of the piece currently falling, if any.
    pub fn active_cells(&self) -> Option<[Coordinate; 4]> {
        self.active.as_ref().map(|piece| *piece.cells())
    }

    /// Dispatch a player command. Commands invalid in the current state
    /// are ignored.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Start => self.start_game(),
            Command::MoveLeft => self.move_left(),
            Command::MoveRight => self.move_right(),
            Command::MoveDown => self.move_down(),
            Command::Rotate => self.rotate(),
            Command::TogglePause => self.toggle_pause(),
            Command::Quit => self.quit(),
        }
    }

    /// Begin a new game. Only valid from `Init`.
    pub fn start_game(&mut self) {
        if self.state != GameState::Init {
            return;
        }
        info!("game started");
        self.state = GameState::Playing;
        self.active = None;
        self.next = None;
        // Announce the zeroed counters so displays start from a known state.
        self.bus.publish(&GameEvent::PointsChanged(self.points));
        self.bus.publish(&GameEvent::LinesChanged(self.line_count));
        self.bus.publish(&GameEvent::LevelChanged(self.level));
    }

    /// Toggle between `Playing` and `Paused`.
    pub fn toggle_pause(&mut self) {
        self.state = match self.state {
            GameState::Playing => GameState::Paused,
            GameState::Paused => GameState::Playing,
            other => other,
        };
    }

    /// Abandon the running game. The driver finalizes via [`Self::end_game`].
    pub fn quit(&mut self) {
        if matches!(self.state, GameState::Playing | GameState::Paused) {
            self.state = GameState::Stopped;
        }
    }

    /// Finalize a stopped game: report stats, then reset to `Init`.
    pub fn end_game(&mut self) {
        if self.state != GameState::Stopped {
            return;
        }
        let stats = self.stats();
        info!(
            points = stats.points,
            lines = stats.lines,
            level = stats.level,
            "game over"
        );
        self.bus.publish(&GameEvent::GameOver(stats));
        if let Some(callback) = self.stats_callback.as_mut() {
            callback(stats);
        }
        self.reset_game();
    }

    /// One gravity tick: spawn, descend, arm the lock delay, or lock.
    pub fn step(&mut self) {
        if self.state != GameState::Playing {
            return;
        }

        if self.active.is_none() {
            self.generate_piece();
            return;
        }

        let down = match self.active.as_ref() {
            Some(piece) => piece.down_transform(),
            None => return,
        };

        if self.validate_candidate(&down) {
            self.commit_move(down);
            return;
        }

        // The piece cannot descend. Grant one tick of slide grace before
        // locking, so a last-moment move or rotation can free it again.
        let locking = self.active.as_ref().map(Piece::locking).unwrap_or(false);
        if !locking {
            if let Some(piece) = self.active.as_mut() {
                piece.set_locking(true);
            }
            return;
        }

        self.lock_active_piece();
    }

    /// Delay between gravity ticks at the current level.
    ///
    /// The per-level frame counts follow the classic descent curve: a linear
    /// ramp up to level 9, then plateaus that narrow to one frame per row
    /// at level 29.
    pub fn tick_interval(&self) -> Duration {
        let frames = match self.level {
            0..=9 => 48 - 5 * self.level,
            10..=12 => 5,
            13..=15 => 4,
            16..=18 => 3,
            19..=28 => 2,
            _ => 1,
        };
        Duration::from_secs_f64(f64::from(frames) / self.config.frame_rate)
    }

    pub fn move_left(&mut self) {
        self.attempt(Piece::left_transform);
    }

    pub fn move_right(&mut self) {
        self.attempt(Piece::right_transform);
    }

    pub fn move_down(&mut self) {
        self.attempt(Piece::down_transform);
    }

    pub fn rotate(&mut self) {
        self.attempt(Piece::rotate_transform);
    }

    /// Run a transform against the active piece, committing it if valid.
    fn attempt(&mut self, transform: fn(&Piece) -> [Coordinate; 4]) {
        if self.state != GameState::Playing {
            return;
        }
        let candidate = match self.active.as_ref() {
            Some(piece) => transform(piece),
            None => return,
        };
        if !self.validate_candidate(&candidate) {
            return;
        }
        self.commit_move(candidate);
        self.lock_check();
    }

    /// A candidate is acceptable when every cell is in bounds and free.
    /// Cells of the active piece itself count as free.
    fn validate_candidate(&self, candidate: &[Coordinate; 4]) -> bool {
        let active = self.active.as_ref().map(Piece::cells);
        candidate.iter().all(|coord| {
            if let Some(cells) = active {
                if cells.contains(coord) {
                    return true;
                }
            }
            self.board.in_bounds(*coord) && !self.board.is_occupied(*coord)
        })
    }

    /// Move the active piece to a validated candidate, erasing the old
    /// cells and drawing the new ones.
    fn commit_move(&mut self, candidate: [Coordinate; 4]) {
        let piece = match self.active.as_mut() {
            Some(piece) => piece,
            None => return,
        };
        let old = *piece.cells();
        let color = piece.color();
        piece.set_cells(candidate);

        self.board.clear_cells(&old);
        self.bus.publish(&GameEvent::ActivePieceErased { cells: old });
        self.board.mark_cells(&candidate);
        self.bus.publish(&GameEvent::ActivePieceDrawn {
            cells: candidate,
            color,
        });
    }

    /// Disarm the lock delay if the piece regained room to descend.
    fn lock_check(&mut self) {
        let down = match self.active.as_ref() {
            Some(piece) if piece.locking() => piece.down_transform(),
            _ => return,
        };
        if self.validate_candidate(&down) {
            if let Some(piece) = self.active.as_mut() {
                piece.set_locking(false);
            }
        }
    }

    /// Settle the active piece where it lies, clear rows, spawn the next.
    fn lock_active_piece(&mut self) {
        // The cells are already marked on the board; dropping the piece
        // converts them from active to settled.
        self.active = None;
        self.check_complete_rows();
        if self.state == GameState::Playing {
            self.generate_piece();
        }
    }

    /// Promote the preview piece (or conjure the first one) to active.
    ///
    /// A blocked spawn ends the game, but the piece is still placed and
    /// drawn so the player sees the collision that killed the run.
    fn generate_piece(&mut self) {
        let piece = match self.next.take() {
            Some(piece) => piece,
            None => Piece::random(&self.config, &mut self.rng),
        };

        let blocked = piece
            .cells()
            .iter()
            .any(|coord| self.board.is_occupied(*coord));
        if blocked {
            debug!(kind = piece.kind().as_str(), "spawn blocked, game over");
            self.state = GameState::Stopped;
        }

        self.board.mark_cells(piece.cells());
        self.bus.publish(&GameEvent::ActivePieceDrawn {
            cells: *piece.cells(),
            color: piece.color(),
        });
        self.active = Some(piece);

        let next = Piece::random(&self.config, &mut self.rng);
        self.bus.publish(&GameEvent::NextPiecePreview {
            kind: next.kind(),
            cells: *next.cells(),
            color: next.color(),
        });
        self.next = Some(next);
    }

    /// Sweep the board for complete rows, remove them, and score the sweep.
    fn check_complete_rows(&mut self) {
        let rows = self.board.complete_rows();
        if rows.is_empty() {
            return;
        }

        // Ascending order: rows below a removed row never move, so the
        // remaining indices stay valid.
        for &y in &rows {
            self.board.remove_row(y);
        }
        debug!(rows = ?rows.as_slice(), "rows cleared");
        self.bus.publish(&GameEvent::RowsCleared {
            rows: rows.to_vec(),
        });
        self.calculate_row_points(rows.len() as u32);
    }

    /// Score a sweep of `cleared` rows and advance the level if the line
    /// total crossed the current threshold. At most one level per sweep.
    fn calculate_row_points(&mut self, cleared: u32) {
        let base = ROW_POINTS[cleared as usize];
        self.points += base * (self.level + 1);
        self.bus.publish(&GameEvent::PointsChanged(self.points));

        self.line_count += cleared;
        self.bus.publish(&GameEvent::LinesChanged(self.line_count));

        if self.line_count >= (self.level + 1) * self.config.lines_per_level {
            self.level += 1;
            info!(level = self.level, "level up");
            self.bus.publish(&GameEvent::LevelChanged(self.level));
        }
    }

    /// Return to the pristine `Init` state, keeping subscribers and seed
    /// sequence.
    fn reset_game(&mut self) {
        self.board.reset();
        self.active = None;
        self.next = None;
        self.points = 0;
        self.line_count = 0;
        self.level = 0;
        self.state = GameState::Init;
    }
}

impl std::fmt::Debug for GameEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameEngine")
            .field("state", &self.state)
            .field("points", &self.points)
            .field("line_count", &self.line_count)
            .field("level", &self.level)
            .finish()
    }
}
