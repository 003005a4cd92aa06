//! Runtime settings gathered from flags and the environment.
//!
//! Everything is read once at startup; the renderers and the pager only
//! ever see plain values.

use crate::highlight::{self, HighlightBackground};
use crate::ui::style;

/// Values of `LINES` at or below this are ignored.
const MIN_LINES_FALLBACK: u16 = 5;

#[derive(clap::ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ThemeMode {
    #[default]
    Auto,
    Light,
    Dark,
}

/// Environment variables that influence rendering.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Env {
    pub no_color: Option<String>,
    pub lines: Option<String>,
    pub colorfgbg: Option<String>,
    pub colorterm: Option<String>,
    pub term: Option<String>,
}

impl Env {
    /// Snapshot the process environment.
    pub fn capture() -> Self {
        let var = |name: &str| std::env::var(name).ok();
        Self {
            no_color: var("NO_COLOR"),
            lines: var("LINES"),
            colorfgbg: var("COLORFGBG"),
            colorterm: var("COLORTERM"),
            term: var("TERM"),
        }
    }
}

/// Effective settings for one run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    /// `--no-color` was passed.
    pub no_color_flag: bool,
    /// `NO_COLOR` is set to something other than whitespace.
    pub no_color_env: bool,
    /// Terminal height to use when the size query fails.
    pub lines: Option<u16>,
    pub truecolor: bool,
    pub background: HighlightBackground,
}

impl Settings {
    pub fn from_env(no_color_flag: bool, theme: ThemeMode, env: &Env) -> Self {
        let background = match theme {
            ThemeMode::Light => HighlightBackground::Light,
            ThemeMode::Dark => HighlightBackground::Dark,
            ThemeMode::Auto => highlight::background_from_colorfgbg(env.colorfgbg.as_deref()),
        };
        Self {
            no_color_flag,
            no_color_env: env.no_color.as_deref().is_some_and(|v| !v.trim().is_empty()),
            lines: parse_lines_env(env.lines.as_deref()),
            truecolor: style::supports_truecolor_from_env(
                env.colorterm.as_deref(),
                env.term.as_deref(),
            ),
            background,
        }
    }

    /// Whether output should carry ANSI colors.
    pub const fn use_color(&self, stdout_is_tty: bool) -> bool {
        !self.no_color_flag && !self.no_color_env && stdout_is_tty
    }
}

/// Parse `LINES`, accepting only integers greater than five.
pub fn parse_lines_env(value: Option<&str>) -> Option<u16> {
    value?
        .trim()
        .parse::<u16>()
        .ok()
        .filter(|lines| *lines > MIN_LINES_FALLBACK)
}
