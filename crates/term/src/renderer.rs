//! Terminal frame renderer
//!
//! Owns the raw-mode lifecycle and redraws full frames from board
//! projections. Raw mode and the alternate screen are restored on drop
//! so a panic mid-playback does not wedge the terminal.

use std::io::{self, Write};

use anyhow::Result;
use crossterm::{
    cursor,
    execute, queue,
    style::{Print, ResetColor, SetForegroundColor},
    terminal::{self, Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};

use nebula_match_core::Grid;

use crate::board_view::board_rows;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    active: bool,
}

impl TerminalRenderer {
    pub fn new() -> Result<Self> {
        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        Ok(Self {
            stdout,
            active: true,
        })
    }

    /// Redraw the board plus status lines as one full frame
    pub fn draw(&mut self, grid: &Grid, status: &[String]) -> Result<()> {
        queue!(self.stdout, Clear(ClearType::All), cursor::MoveTo(0, 0))?;
        for (row_idx, row) in board_rows(grid).iter().enumerate() {
            queue!(self.stdout, cursor::MoveTo(0, row_idx as u16))?;
            for glyph in row {
                queue!(
                    self.stdout,
                    SetForegroundColor(glyph.color),
                    Print(glyph.ch),
                    Print(' ')
                )?;
            }
        }
        queue!(self.stdout, ResetColor)?;
        let base = grid.rows() as u16 + 1;
        for (i, line) in status.iter().enumerate() {
            queue!(
                self.stdout,
                cursor::MoveTo(0, base + i as u16),
                Clear(ClearType::CurrentLine),
                Print(line)
            )?;
        }
        self.stdout.flush()?;
        Ok(())
    }

    pub fn shutdown(&mut self) -> Result<()> {
        if self.active {
            execute!(self.stdout, cursor::Show, LeaveAlternateScreen)?;
            terminal::disable_raw_mode()?;
            self.active = false;
        }
        Ok(())
    }
}

impl Drop for TerminalRenderer {
    fn drop(&mut self) {
        let _ = self.shutdown();
    }
}
