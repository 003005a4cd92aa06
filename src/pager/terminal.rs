//! Terminal mode control and size queries.
//!
//! The pager only talks to the terminal through the [`Terminal`] trait so the
//! loop can be driven against a fake in tests. [`CrosstermTerminal`] is the
//! real implementation; crossterm carries the per-platform raw-mode and
//! window-size code (termios on Unix, console modes on Windows).

use std::io;

/// Platform operations the pager needs from the controlling terminal.
pub trait Terminal {
    /// Switch input to raw mode: no echo, no line buffering, no signal keys,
    /// no CR/LF translation, 8-bit characters, reads return after one byte.
    fn enable_raw_mode(&self) -> io::Result<()>;

    /// Reapply the attributes saved by [`Terminal::enable_raw_mode`].
    fn disable_raw_mode(&self) -> io::Result<()>;

    /// Current number of rows, if the terminal can report it.
    fn rows(&self) -> io::Result<u16>;
}

/// [`Terminal`] backed by crossterm.
#[derive(Debug, Default, Clone, Copy)]
pub struct CrosstermTerminal;

impl Terminal for CrosstermTerminal {
    fn enable_raw_mode(&self) -> io::Result<()> {
        crossterm::terminal::enable_raw_mode()
    }

    fn disable_raw_mode(&self) -> io::Result<()> {
        crossterm::terminal::disable_raw_mode()
    }

    fn rows(&self) -> io::Result<u16> {
        let (_, rows) = crossterm::terminal::size()?;
        if rows == 0 {
            return Err(io::Error::other("terminal row size is 0"));
        }
        Ok(rows)
    }
}

/// Scoped raw mode.
///
/// Acquiring is best-effort: when the terminal refuses raw mode the guard is
/// inert and restoring does nothing. When raw mode was entered, the original
/// mode is restored exactly once, either by [`RawModeGuard::restore`] or on
/// drop (including unwinding).
pub struct RawModeGuard<'a, T: Terminal + ?Sized> {
    terminal: &'a T,
    active: bool,
}

impl<'a, T: Terminal + ?Sized> RawModeGuard<'a, T> {
    pub fn acquire(terminal: &'a T) -> Self {
        let active = match terminal.enable_raw_mode() {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "raw mode unavailable, continuing in cooked mode");
                false
            }
        };
        Self { terminal, active }
    }

    /// Whether raw mode was actually entered.
    pub const fn is_active(&self) -> bool {
        self.active
    }

    pub fn restore(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        if let Err(err) = self.terminal.disable_raw_mode() {
            tracing::warn!(%err, "failed to restore terminal mode");
        }
    }
}

impl<T: Terminal + ?Sized> Drop for RawModeGuard<'_, T> {
    fn drop(&mut self) {
        self.restore();
    }
}

/// Terminal height in rows.
///
/// Asks the terminal first, then the `LINES` fallback captured at startup,
/// then 24. Never fails.
pub fn terminal_height<T: Terminal + ?Sized>(terminal: &T, lines_fallback: Option<u16>) -> u16 {
    match terminal.rows() {
        Ok(rows) if rows > 0 => rows,
        Ok(_) => lines_fallback.unwrap_or(DEFAULT_HEIGHT),
        Err(err) => {
            tracing::debug!(%err, ?lines_fallback, "terminal size query failed");
            lines_fallback.unwrap_or(DEFAULT_HEIGHT)
        }
    }
}

pub const DEFAULT_HEIGHT: u16 = 24;
