//! Terminal rendering: an event-driven mirror of the board plus a side panel.
//!
//! [`BoardView`] never reads engine state. It reconstructs the visible board
//! purely from the event stream, which keeps it safe to run on the input
//! thread while the game loop mutates the engine elsewhere.

use std::io::Write;

use anyhow::Result;
use crossterm::cursor::MoveTo;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::{queue, terminal};

use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::types::{Coordinate, GameStats};

/// Width of one board cell in terminal columns.
const CELL_WIDTH: usize = 2;

/// Event-driven view of the board and the score panel.
pub struct BoardView {
    rows: usize,
    cols: usize,
    grid: Vec<Vec<Option<Color>>>,
    preview: Vec<(Coordinate, Color)>,
    points: u32,
    lines: u32,
    level: u32,
    game_over: Option<GameStats>,
}

impl BoardView {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            rows: config.rows,
            cols: config.cols,
            grid: vec![vec![None; config.cols]; config.rows],
            preview: Vec::new(),
            points: 0,
            lines: 0,
            level: 0,
            game_over: None,
        }
    }

    /// Fold one engine event into the view state.
    pub fn apply(&mut self, event: &GameEvent) {
        match event {
            GameEvent::ActivePieceDrawn { cells, color } => {
                let fill = color_for(color.fill);
                for cell in cells {
                    self.set(*cell, Some(fill));
                }
            }
            GameEvent::ActivePieceErased { cells } => {
                for cell in cells {
                    self.set(*cell, None);
                }
            }
            GameEvent::NextPiecePreview { cells, color, .. } => {
                // Normalize the spawn layout to the panel's origin.
                let min_x = cells.iter().map(|c| c.x).min().unwrap_or(0);
                let fill = color_for(color.fill);
                self.preview = cells
                    .iter()
                    .map(|c| (Coordinate::new(c.x - min_x, c.y), fill))
                    .collect();
            }
            GameEvent::RowsCleared { rows } => {
                // Same ascending removal the board performs, so the mirror
                // stays exact.
                for &y in rows {
                    if y < self.grid.len() {
                        self.grid.remove(y);
                        self.grid.insert(0, vec![None; self.cols]);
                    }
                }
            }
            GameEvent::PointsChanged(points) => self.points = *points,
            GameEvent::LinesChanged(lines) => self.lines = *lines,
            GameEvent::LevelChanged(level) => self.level = *level,
            GameEvent::GameOver(stats) => self.game_over = Some(*stats),
        }
    }

    /// Color shown at a board cell, if any.
    pub fn cell(&self, x: usize, y: usize) -> Option<Color> {
        self.grid.get(y).and_then(|row| row.get(x)).copied().flatten()
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            points: self.points,
            lines: self.lines,
            level: self.level,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over.is_some()
    }

    /// Redraw the full screen. Queued writes, one flush at the end.
    pub fn draw(&self, out: &mut impl Write) -> Result<()> {
        queue!(out, terminal::Clear(terminal::ClearType::All))?;

        let inner = self.cols * CELL_WIDTH;
        queue!(
            out,
            MoveTo(0, 0),
            Print(format!("┌{}┐", "─".repeat(inner)))
        )?;
        for y in 0..self.rows {
            queue!(out, MoveTo(0, (y + 1) as u16), Print("│"))?;
            for x in 0..self.cols {
                match self.cell(x, y) {
                    Some(color) => {
                        queue!(out, SetForegroundColor(color), Print("██"), ResetColor)?
                    }
                    None => queue!(out, Print("  "))?,
                }
            }
            queue!(out, Print("│"))?;
        }
        queue!(
            out,
            MoveTo(0, (self.rows + 1) as u16),
            Print(format!("└{}┘", "─".repeat(inner)))
        )?;

        self.draw_panel(out, (inner + 4) as u16)?;

        if self.game_over.is_some() {
            let msg = " GAME OVER ";
            let x = (inner + 2).saturating_sub(msg.len()) / 2;
            queue!(
                out,
                MoveTo(x as u16, (self.rows / 2) as u16),
                SetForegroundColor(Color::Red),
                Print(msg),
                ResetColor
            )?;
        }

        out.flush()?;
        Ok(())
    }

    fn draw_panel(&self, out: &mut impl Write, x: u16) -> Result<()> {
        queue!(
            out,
            MoveTo(x, 1),
            Print(format!("points: {}", self.points)),
            MoveTo(x, 2),
            Print(format!("lines:  {}", self.lines)),
            MoveTo(x, 3),
            Print(format!("level:  {}", self.level)),
            MoveTo(x, 5),
            Print("next:")
        )?;
        for (cell, color) in &self.preview {
            queue!(
                out,
                MoveTo(x + (cell.x as u16) * CELL_WIDTH as u16, 6 + cell.y as u16),
                SetForegroundColor(*color),
                Print("██"),
                ResetColor
            )?;
        }
        queue!(
            out,
            MoveTo(x, 10),
            Print("arrows/wasd move, p pause, q quit")
        )?;
        Ok(())
    }

    fn set(&mut self, coord: Coordinate, color: Option<Color>) {
        if coord.x >= 0 && coord.y >= 0 {
            let (x, y) = (coord.x as usize, coord.y as usize);
            if y < self.rows && x < self.cols {
                self.grid[y][x] = color;
            }
        }
    }
}

/// Translate a palette color name into a terminal color.
fn color_for(name: &str) -> Color {
    match name {
        "red" => Color::Red,
        "darkred" => Color::DarkRed,
        "orange" => Color::Rgb {
            r: 255,
            g: 165,
            b: 0,
        },
        "yellow" => Color::Yellow,
        "lime" => Color::Green,
        "darkgreen" => Color::DarkGreen,
        "cyan" => Color::Cyan,
        "blue" => Color::Blue,
        "darkblue" => Color::DarkBlue,
        "magenta" => Color::Magenta,
        "indigo" => Color::Rgb {
            r: 75,
            g: 0,
            b: 130,
        },
        "black" => Color::Black,
        _ => Color::White,
    }
}
