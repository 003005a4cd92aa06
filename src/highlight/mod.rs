//! Syntax highlighting for source files and fenced code blocks.
//!
//! Uses syntect for highlighting with Sublime Text syntax definitions and
//! emits ANSI-escaped lines ready to be paged.

use std::sync::{Mutex, OnceLock};

use anyhow::{Context, Result};
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::LinesWithEndings;

use crate::ui::style;

/// Highlight `code` as the given language token (`rust`, `py`, `Go`, ...).
///
/// Returns `None` when no syntax definition matches, so callers can pick
/// their own fallback.
///
/// # Errors
///
/// Propagates syntect parse failures.
pub fn highlight_code(
    language: &str,
    code: &str,
    truecolor: bool,
) -> Result<Option<Vec<String>>> {
    let syntax_set = syntax_set();
    let syntax = syntax_set
        .find_syntax_by_token(language)
        .or_else(|| syntax_set.find_syntax_by_name(language));
    let Some(syntax) = syntax else {
        return Ok(None);
    };
    highlight_with(syntax, code, truecolor).map(Some)
}

/// Highlight a whole file, picking the syntax from its extension (without
/// the leading dot, matched case-sensitively first).
///
/// # Errors
///
/// Propagates syntect parse failures.
pub fn highlight_extension(
    extension: &str,
    code: &str,
    truecolor: bool,
) -> Result<Option<Vec<String>>> {
    if extension.is_empty() {
        return Ok(None);
    }
    let syntax_set = syntax_set();
    let Some(syntax) = syntax_set.find_syntax_by_extension(extension).or_else(|| {
        syntax_set.find_syntax_by_extension(&extension.to_ascii_lowercase())
    }) else {
        return Ok(None);
    };
    highlight_with(syntax, code, truecolor).map(Some)
}

fn highlight_with(syntax: &SyntaxReference, code: &str, truecolor: bool) -> Result<Vec<String>> {
    let syntax_set = syntax_set();
    let mode = background_mode();
    let mut highlighter = HighlightLines::new(syntax, theme());
    let mut lines = Vec::new();

    for line in LinesWithEndings::from(code) {
        let ranges = highlighter
            .highlight_line(line, syntax_set)
            .with_context(|| format!("highlight {} code", syntax.name))?;
        let mut out = String::with_capacity(line.len() * 2);
        for (token_style, text) in ranges {
            let text = text.trim_end_matches(['\r', '\n']);
            if text.is_empty() {
                continue;
            }
            let fg = adjust_fg_for_background(
                (
                    token_style.foreground.r,
                    token_style.foreground.g,
                    token_style.foreground.b,
                ),
                mode,
            );
            let color = style::rgb(fg.0, fg.1, fg.2, truecolor);
            out.push_str(&style::paint(text, style::fg(color)));
        }
        lines.push(out);
    }

    Ok(lines)
}

fn syntax_set() -> &'static SyntaxSet {
    static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
    SYNTAX_SET.get_or_init(|| {
        tracing::debug!("loading default syntax set");
        SyntaxSet::load_defaults_newlines()
    })
}

fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(|| {
        let theme_set = ThemeSet::load_defaults();
        let mode = background_mode();
        let preferred = match mode {
            BackgroundMode::Dark => [
                "Monokai Extended",
                "Monokai Extended Bright",
                "Solarized (dark)",
                "base16-ocean.dark",
            ]
            .as_slice(),
            BackgroundMode::Light => [
                "InspiredGitHub",
                "Solarized (light)",
                "base16-ocean.light",
            ]
            .as_slice(),
        };

        for name in preferred {
            if let Some(theme) = theme_set.themes.get(*name) {
                tracing::debug!(theme = *name, ?mode, "selected highlight theme");
                return theme.clone();
            }
        }

        theme_set
            .themes
            .values()
            .next()
            .cloned()
            .unwrap_or_default()
    })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackgroundMode {
    Dark,
    Light,
}

/// Terminal background used to pick the highlight palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightBackground {
    Light,
    Dark,
}

static BACKGROUND_OVERRIDE: OnceLock<Mutex<Option<HighlightBackground>>> = OnceLock::new();

/// Force the palette background. `None` means dark.
///
/// Must be called before the first highlight; the theme is chosen once.
pub fn set_background_mode(mode: Option<HighlightBackground>) {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    if let Ok(mut guard) = lock.lock() {
        *guard = mode;
    }
}

fn background_mode() -> BackgroundMode {
    let lock = BACKGROUND_OVERRIDE.get_or_init(|| Mutex::new(None));
    let selected = lock.lock().map(|guard| *guard).unwrap_or_default();
    resolve_background(selected)
}

const fn resolve_background(selected: Option<HighlightBackground>) -> BackgroundMode {
    match selected {
        Some(HighlightBackground::Light) => BackgroundMode::Light,
        Some(HighlightBackground::Dark) | None => BackgroundMode::Dark,
    }
}

/// Parse `COLORFGBG` (`fg;bg`). Background palette index 7 and above is light.
pub fn background_from_colorfgbg(colorfgbg: Option<&str>) -> HighlightBackground {
    match background_mode_from_colorfgbg(colorfgbg) {
        BackgroundMode::Light => HighlightBackground::Light,
        BackgroundMode::Dark => HighlightBackground::Dark,
    }
}

fn background_mode_from_colorfgbg(colorfgbg: Option<&str>) -> BackgroundMode {
    let Some(value) = colorfgbg else {
        return BackgroundMode::Dark;
    };
    let bg_str = value.rsplit(';').next().unwrap_or(value);
    let Ok(bg) = bg_str.parse::<u8>() else {
        return BackgroundMode::Dark;
    };

    if bg >= 7 {
        BackgroundMode::Light
    } else {
        BackgroundMode::Dark
    }
}

fn adjust_fg_for_background(color: (u8, u8, u8), mode: BackgroundMode) -> (u8, u8, u8) {
    match mode {
        BackgroundMode::Dark => color,
        BackgroundMode::Light => {
            let (r, g, b) = color;
            let luma = (0.2126 * f32::from(r)) + (0.7152 * f32::from(g)) + (0.0722 * f32::from(b));
            if luma < 155.0 {
                return color;
            }

            let darken = |v: u8| {
                // Scaling down keeps the value within u8
                #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
                let scaled = (f32::from(v) * 0.42).round() as u8;
                scaled
            };
            (darken(r), darken(g), darken(b))
        }
    }
}
