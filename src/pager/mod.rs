//! Interactive full-screen pager.
//!
//! The pager is split into small pieces that are testable without a real
//! terminal:
//! - [`terminal`]: raw mode and size queries behind the [`Terminal`] trait
//! - [`keys`]: raw bytes to [`Key`]s
//! - [`state`]: the [`ViewState`] machine and its pure [`update`] function
//! - [`render`]: one full repaint per keystroke
//!
//! [`Pager::run_session`] is the thin loop tying them together.

mod buffer;
pub mod keys;
pub mod render;
pub mod state;
pub mod terminal;

use std::io::{self, IsTerminal, Read, Write};

use thiserror::Error;

pub use buffer::{LineBuffer, strip_ansi};
pub use keys::{Key, KeyReader};
pub use state::{Message, Mode, ViewState, message_for_key, page_size, update};
pub use terminal::{CrosstermTerminal, RawModeGuard, Terminal};

/// Fatal pager failures. End of input is not an error.
#[derive(Debug, Error)]
pub enum PagerError {
    #[error("read input: {0}")]
    Input(io::Error),
    #[error("draw screen: {0}")]
    Render(io::Error),
}

/// One paging session over an immutable [`LineBuffer`].
#[derive(Debug, Clone, Copy)]
pub struct Pager<'a> {
    lines: &'a LineBuffer,
    color: bool,
    lines_fallback: Option<u16>,
}

impl<'a> Pager<'a> {
    pub const fn new(lines: &'a LineBuffer, color: bool) -> Self {
        Self {
            lines,
            color,
            lines_fallback: None,
        }
    }

    /// Height to use when the terminal cannot report its size.
    pub const fn with_lines_fallback(mut self, rows: Option<u16>) -> Self {
        self.lines_fallback = rows;
        self
    }

    /// Page on the process's controlling terminal.
    ///
    /// Keys are read from stdin when it is a terminal; when stdin carried the
    /// document itself they come from the terminal device instead.
    ///
    /// # Errors
    ///
    /// See [`Pager::run_session`].
    pub fn run(&self) -> Result<(), PagerError> {
        let input = open_key_input();
        let stdout = io::stdout();
        self.run_session(&CrosstermTerminal, input, stdout.lock())
    }

    /// Run the render → read key → update loop until the user quits or the
    /// input ends.
    ///
    /// Raw mode is entered best-effort and is restored exactly once before
    /// this returns, whichever way the loop ends.
    ///
    /// # Errors
    ///
    /// Returns [`PagerError::Input`] when reading a key fails for any reason
    /// other than end-of-stream, and [`PagerError::Render`] when the screen
    /// cannot be written.
    pub fn run_session<T, R, W>(
        &self,
        terminal: &T,
        input: R,
        mut output: W,
    ) -> Result<(), PagerError>
    where
        T: Terminal + ?Sized,
        R: Read,
        W: Write,
    {
        let mut guard = RawModeGuard::acquire(terminal);
        let result = self.drive(terminal, KeyReader::new(input), &mut output);
        guard.restore();
        result
    }

    fn drive<T, R, W>(
        &self,
        terminal: &T,
        mut keys: KeyReader<R>,
        output: &mut W,
    ) -> Result<(), PagerError>
    where
        T: Terminal + ?Sized,
        R: Read,
        W: Write,
    {
        let mut height = terminal::terminal_height(terminal, self.lines_fallback);
        let mut state = ViewState::new(page_size(height, Mode::Browsing));

        loop {
            let current = terminal::terminal_height(terminal, self.lines_fallback);
            let page = page_size(current, state.mode());
            if current == height {
                state.set_page_size(page);
            } else {
                tracing::debug!(from = height, to = current, "terminal resized");
                height = current;
                state.resize(page, self.lines.len());
            }
            render::render_page(output, self.lines, &state, self.color)
                .map_err(PagerError::Render)?;

            let Some(key) = keys.read_key().map_err(PagerError::Input)? else {
                tracing::debug!("pager input closed");
                return Ok(());
            };
            let Some(message) = message_for_key(key, state.mode()) else {
                state.dismiss_status();
                continue;
            };

            state = update(state, self.lines, message);
            if state.should_quit() {
                return Ok(());
            }
        }
    }
}

fn open_key_input() -> Box<dyn Read> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Box::new(stdin.lock());
    }
    match controlling_terminal() {
        Ok(tty) => tty,
        Err(err) => {
            tracing::debug!(%err, "no controlling terminal, reading keys from stdin");
            Box::new(stdin.lock())
        }
    }
}

#[cfg(unix)]
fn controlling_terminal() -> io::Result<Box<dyn Read>> {
    let tty = std::fs::File::open("/dev/tty")?;
    Ok(Box::new(tty))
}

#[cfg(not(unix))]
fn controlling_terminal() -> io::Result<Box<dyn Read>> {
    Err(io::Error::new(
        io::ErrorKind::Unsupported,
        "no separate terminal device",
    ))
}
