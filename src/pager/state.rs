//! Pager view state and its transition function.
//!
//! Raw [`Key`]s are mapped to [`Message`]s according to the current [`Mode`],
//! and [`update`] is a pure function from `(state, message)` to the next
//! state. No terminal is involved, so every transition is unit-testable.

use super::buffer::LineBuffer;
use super::keys::Key;

/// Whether keys drive navigation or edit the search prompt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    #[default]
    Browsing,
    SearchEntry,
}

/// Logical pager events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Message {
    Quit,
    LineDown,
    LineUp,
    PageDown,
    PageUp,
    Top,
    Bottom,
    StartSearch,
    ConfirmSearch,
    CancelSearch,
    NextMatch,
    PrevMatch,
    Backspace,
    /// A literal character typed into the search prompt.
    Char(char),
}

/// Map a decoded key to a message for the given mode.
///
/// Keys without a meaning in the current mode map to `None`.
pub fn message_for_key(key: Key, mode: Mode) -> Option<Message> {
    match mode {
        Mode::SearchEntry => match key {
            Key::Enter => Some(Message::ConfirmSearch),
            Key::Esc => Some(Message::CancelSearch),
            Key::Backspace => Some(Message::Backspace),
            Key::Space => Some(Message::Char(' ')),
            Key::Char(c) => Some(Message::Char(c)),
            Key::Up | Key::Down | Key::PageUp | Key::PageDown => None,
        },
        Mode::Browsing => match key {
            Key::Char('q') => Some(Message::Quit),
            Key::Char('j') | Key::Down => Some(Message::LineDown),
            Key::Char('k') | Key::Up => Some(Message::LineUp),
            Key::Char('f') | Key::PageDown | Key::Space => Some(Message::PageDown),
            Key::Char('b') | Key::PageUp => Some(Message::PageUp),
            Key::Char('g') => Some(Message::Top),
            Key::Char('G') => Some(Message::Bottom),
            Key::Char('/') => Some(Message::StartSearch),
            Key::Char('n') => Some(Message::NextMatch),
            Key::Char('N') => Some(Message::PrevMatch),
            Key::Char(_) | Key::Enter | Key::Esc | Key::Backspace => None,
        },
    }
}

/// Rows left for content once the footer is reserved.
///
/// One status row, plus a prompt row while entering a search. Heights too
/// small to show at least three lines fall back to a fixed page of ten.
pub const fn page_size(height: u16, mode: Mode) -> usize {
    let footer = match mode {
        Mode::Browsing => 1,
        Mode::SearchEntry => 2,
    };
    let rows = height as usize;
    if rows < footer + 3 {
        return MIN_FALLBACK_PAGE;
    }
    rows - footer
}

const MIN_FALLBACK_PAGE: usize = 10;

/// Scroll position, search state and the transient status text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    offset: usize,
    page_size: usize,
    query: String,
    matches: Vec<usize>,
    match_index: usize,
    mode: Mode,
    search_input: String,
    status: String,
    should_quit: bool,
}

impl ViewState {
    /// Fresh state at the top of the document with no search.
    pub fn new(page_size: usize) -> Self {
        Self {
            offset: 0,
            page_size: page_size.max(1),
            query: String::new(),
            matches: Vec::new(),
            match_index: 0,
            mode: Mode::Browsing,
            search_input: String::new(),
            status: String::new(),
            should_quit: false,
        }
    }

    pub const fn offset(&self) -> usize {
        self.offset
    }

    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn matches(&self) -> &[usize] {
        &self.matches
    }

    /// Position inside [`ViewState::matches`]; meaningful only when there
    /// are matches.
    pub const fn match_index(&self) -> usize {
        self.match_index
    }

    pub const fn mode(&self) -> Mode {
        self.mode
    }

    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn status(&self) -> &str {
        &self.status
    }

    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Drop the status text without changing anything else.
    pub fn dismiss_status(&mut self) {
        self.status.clear();
    }

    /// Apply the page size for the current mode without moving the offset.
    pub fn set_page_size(&mut self, page_size: usize) {
        self.page_size = page_size.max(1);
    }

    /// Apply the page size after the terminal was resized and re-clamp the
    /// offset.
    pub fn resize(&mut self, page_size: usize, line_count: usize) {
        self.set_page_size(page_size);
        self.clamp_offset(line_count);
    }

    const fn max_offset(&self, line_count: usize) -> usize {
        line_count.saturating_sub(self.page_size)
    }

    fn clamp_offset(&mut self, line_count: usize) {
        self.offset = self.offset.min(self.max_offset(line_count));
    }

    fn jump_to_current_match(&mut self) {
        self.offset = self.matches[self.match_index];
        self.status = format!(
            "match {}/{} for {:?}",
            self.match_index + 1,
            self.matches.len(),
            self.query
        );
    }
}

/// Compute the state that follows `message`.
///
/// The status text lives for one render only, so it is cleared before the
/// message is applied. The offset is clamped to
/// `[0, max(0, lines - page_size)]` afterwards, except when a search is
/// confirmed: the first match then stays on the top row.
pub fn update(mut state: ViewState, lines: &LineBuffer, message: Message) -> ViewState {
    let line_count = lines.len();
    state.status.clear();

    match state.mode {
        Mode::SearchEntry => match message {
            Message::ConfirmSearch => {
                state.mode = Mode::Browsing;
                state.query = state.search_input.trim().to_string();
                state.search_input.clear();
                state.matches = lines.find_matches(&state.query);
                state.match_index = 0;
                if !state.matches.is_empty() {
                    state.jump_to_current_match();
                } else if !state.query.is_empty() {
                    state.status = format!("no matches for {:?}", state.query);
                }
                return state;
            }
            Message::CancelSearch => {
                state.mode = Mode::Browsing;
                state.search_input.clear();
                state.status = "search canceled".to_string();
            }
            Message::Backspace => {
                state.search_input.pop();
            }
            Message::Char(c) if (' '..='~').contains(&c) => {
                state.search_input.push(c);
            }
            _ => {}
        },
        Mode::Browsing => match message {
            Message::Quit => state.should_quit = true,
            Message::LineDown => {
                if state.offset + 1 < line_count {
                    state.offset += 1;
                }
            }
            Message::LineUp => state.offset = state.offset.saturating_sub(1),
            Message::PageDown => {
                state.offset = state.offset.saturating_add(state.page_size);
                if state.offset >= line_count {
                    state.offset = line_count.saturating_sub(1);
                }
            }
            Message::PageUp => state.offset = state.offset.saturating_sub(state.page_size),
            Message::Top => state.offset = 0,
            Message::Bottom => state.offset = state.max_offset(line_count),
            Message::StartSearch => {
                state.mode = Mode::SearchEntry;
                state.search_input.clear();
                state.status = "type search and press Enter".to_string();
            }
            Message::NextMatch => {
                if !state.matches.is_empty() {
                    state.match_index = (state.match_index + 1) % state.matches.len();
                    state.jump_to_current_match();
                }
            }
            Message::PrevMatch => {
                if !state.matches.is_empty() {
                    state.match_index = state
                        .match_index
                        .checked_sub(1)
                        .unwrap_or(state.matches.len() - 1);
                    state.jump_to_current_match();
                }
            }
            Message::ConfirmSearch
            | Message::CancelSearch
            | Message::Backspace
            | Message::Char(_) => {}
        },
    }

    state.clamp_offset(line_count);
    state
}
