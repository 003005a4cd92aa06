//! Full-screen repaint of one page.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType};

use super::buffer::LineBuffer;
use super::state::{Mode, ViewState};
use crate::ui::style;

const HELP: &str = "q quit | j/k or arrows | f/b/space page | / find | n/N next/prev";

/// Raw mode turns off output post-processing, so lines need an explicit CR.
const NEWLINE: &str = "\r\n";

/// Clear the screen and draw the current page, the status line and, while a
/// search is being typed, the prompt.
///
/// The whole screen is repainted every time; there is no diffing.
///
/// # Errors
///
/// Returns any error from writing to `out`.
pub fn render_page<W: Write>(
    out: &mut W,
    lines: &LineBuffer,
    state: &ViewState,
    color: bool,
) -> io::Result<()> {
    queue!(out, Clear(ClearType::All), MoveTo(0, 0))?;

    for line in lines.window(state.offset(), state.page_size()) {
        queue!(out, Print(line), Print(NEWLINE))?;
    }

    let status = status_line(lines, state);
    let status = if color { style::muted(&status) } else { status };
    queue!(out, Print(status), Print(NEWLINE))?;

    if state.mode() == Mode::SearchEntry {
        let prompt = format!("/{}", state.search_input());
        let prompt = if color { style::accent(&prompt) } else { prompt };
        queue!(out, Print(prompt), Print(NEWLINE))?;
    }

    out.flush()
}

/// `[first-last/total] help | status`, with 1-based line numbers.
pub fn status_line(lines: &LineBuffer, state: &ViewState) -> String {
    let total = lines.len();
    let end = total.min(state.offset() + state.page_size());
    let mut status = format!("[{}-{}/{}] {}", state.offset() + 1, end, total, HELP);
    if !state.status().is_empty() {
        status.push_str(" | ");
        status.push_str(state.status());
    }
    status
}
