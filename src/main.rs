//! Terminal binary: wires the engine, game loop and crossterm UI together.

use std::fs::File;
use std::io;
use std::sync::mpsc::{Receiver, Sender};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event};
use crossterm::execute;
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen};
use tracing::info;

use stackfall::input::map_key;
use stackfall::{
    BoardView, Command, EventBus, GameConfig, GameEngine, GameEvent, GameLoop, GameStats,
};

/// How long the input loop waits for a key before redrawing.
const POLL_INTERVAL: Duration = Duration::from_millis(33);

fn main() -> Result<()> {
    init_logging()?;

    let config = GameConfig::default();
    let mut bus = EventBus::new();
    let events = bus.subscribe_channel();

    // Seed from the clock; any value works, zero is remapped by the RNG.
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(1, |elapsed| elapsed.subsec_nanos());

    let engine = GameEngine::new(config.clone(), bus, seed)?;
    let (game_loop, commands) = GameLoop::new(engine);
    let handle = game_loop.spawn();

    terminal::enable_raw_mode().context("failed to enable raw mode")?;
    let mut out = io::stdout();
    execute!(out, EnterAlternateScreen, Hide)?;

    let outcome = run_ui(&mut out, &config, &commands, &events);

    execute!(out, Show, LeaveAlternateScreen)?;
    terminal::disable_raw_mode().context("failed to disable raw mode")?;

    // Closing the channel shuts the game loop down.
    drop(commands);
    if handle.join().is_err() {
        anyhow::bail!("game loop thread panicked");
    }

    if let Some(stats) = outcome? {
        println!(
            "game over: {} points, {} lines, level {}",
            stats.points, stats.lines, stats.level
        );
    }
    Ok(())
}

/// Pump terminal input into the game loop and events onto the screen until
/// the game ends or the player quits.
fn run_ui(
    out: &mut impl io::Write,
    config: &GameConfig,
    commands: &Sender<Command>,
    events: &Receiver<GameEvent>,
) -> Result<Option<GameStats>> {
    let mut view = BoardView::new(config);
    let mut final_stats = None;

    commands
        .send(Command::Start)
        .context("game loop exited before start")?;

    loop {
        while let Ok(game_event) = events.try_recv() {
            if let GameEvent::GameOver(stats) = &game_event {
                final_stats = Some(*stats);
            }
            view.apply(&game_event);
        }

        view.draw(out)?;
        if view.is_game_over() {
            // Leave the final frame visible for a beat.
            std::thread::sleep(Duration::from_millis(1500));
            return Ok(final_stats);
        }

        if event::poll(POLL_INTERVAL)? {
            if let Event::Key(key) = event::read()? {
                if let Some(command) = map_key(key) {
                    if commands.send(command).is_err() {
                        return Ok(final_stats);
                    }
                }
            }
        }
    }
}

/// Log to a file; stdout belongs to the raw-mode UI.
fn init_logging() -> Result<()> {
    let log_file = File::create("stackfall.log").context("failed to create log file")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .init();
    info!("logging initialized");
    Ok(())
}
