//! Terminal facade.
//!
//! Screen size and clearing go through [`Terminal`] so layout code and tests
//! never depend on a real tty.

use std::io::{self, Write};

use crossterm::{cursor, execute, terminal};

/// Queries and controls the terminal the shell is running in.
pub trait Terminal {
    /// Returns `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Clears the screen and moves the cursor to the top-left corner.
    fn clear_screen(&mut self) -> io::Result<()>;
}

/// Terminal backend built on crossterm.
///
/// crossterm uses `ioctl(TIOCGWINSZ)` and ANSI sequences on Unix and the
/// console API on Windows.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl Terminal for CrosstermTerminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        let mut stdout = io::stdout();
        execute!(
            stdout,
            terminal::Clear(terminal::ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()
    }
}

/// A terminal with a fixed size that records clears. Used in tests and for
/// rendering into non-tty output.
#[derive(Debug, Clone, Copy)]
pub struct FixedTerminal {
    pub columns: u16,
    pub rows: u16,
    pub clears: usize,
}

impl FixedTerminal {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            clears: 0,
        }
    }
}

impl Terminal for FixedTerminal {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.columns, self.rows))
    }

    fn clear_screen(&mut self) -> io::Result<()> {
        self.clears += 1;
        Ok(())
    }
}
