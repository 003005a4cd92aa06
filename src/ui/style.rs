//! Theming and color definitions.
//!
//! Everything the renderers and the pager paint goes through here, so the
//! palette lives in one place. Colors are 256-color ANSI indices, which
//! render consistently on both light and dark terminals.

use crossterm::style::{Attribute, Color, ContentStyle, Stylize};

/// Status line and other de-emphasized chrome.
pub const MUTED: Color = Color::AnsiValue(244);
/// Search prompt, list markers and headers.
pub const ACCENT: Color = Color::AnsiValue(212);
/// Frame around fenced code.
pub const BORDER: Color = Color::AnsiValue(240);
/// Inline code and fenced code without a known language.
pub const CODE: Color = Color::AnsiValue(179);
/// Code in files whose language has no syntax definition.
pub const GENERIC_CODE: Color = Color::AnsiValue(250);
/// String literals in generic code.
pub const STRING: Color = Color::AnsiValue(216);
/// Link targets.
pub const LINK: Color = Color::AnsiValue(75);

const SEPARATOR_WIDTH: usize = 40;

/// Apply `style` to `text` and return the escaped string.
pub fn paint(text: &str, style: ContentStyle) -> String {
    style.apply(text).to_string()
}

pub fn fg(color: Color) -> ContentStyle {
    ContentStyle::new().with(color)
}

pub fn muted(text: &str) -> String {
    paint(text, fg(MUTED))
}

pub fn accent(text: &str) -> String {
    paint(text, fg(ACCENT))
}

/// Style for a heading of the given level (1-based).
pub fn heading(level: u8) -> ContentStyle {
    let color = match level {
        1 => Color::AnsiValue(159),
        2 => Color::AnsiValue(117),
        3 => Color::AnsiValue(111),
        _ => Color::AnsiValue(110),
    };
    fg(color).attribute(Attribute::Bold)
}

/// `==> name <==` banner shown above each input when several are given.
pub fn header(title: &str, color: bool) -> String {
    let banner = format!("==> {title} <==");
    if color {
        format!("{}\n", paint(&banner, fg(ACCENT).attribute(Attribute::Bold)))
    } else {
        format!("{banner}\n")
    }
}

/// Rule printed between consecutive inputs.
pub fn separator(color: bool) -> String {
    if color {
        format!("{}\n", paint(&"─".repeat(SEPARATOR_WIDTH), fg(BORDER)))
    } else {
        format!("{}\n", "-".repeat(SEPARATOR_WIDTH))
    }
}

/// Whether the terminal advertises 24-bit color support.
pub fn supports_truecolor_from_env(colorterm: Option<&str>, term: Option<&str>) -> bool {
    if let Some(ct) = colorterm {
        let lower = ct.to_ascii_lowercase();
        if lower.contains("truecolor") || lower.contains("24bit") {
            return true;
        }
    }
    if let Some(t) = term {
        let lower = t.to_ascii_lowercase();
        if lower.contains("direct") || lower.contains("truecolor") {
            return true;
        }
    }
    false
}

/// Terminal color for an RGB value, downsampled when truecolor is missing.
pub fn rgb(r: u8, g: u8, b: u8, truecolor: bool) -> Color {
    if truecolor {
        Color::Rgb { r, g, b }
    } else {
        Color::AnsiValue(rgb_to_xterm_256(r, g, b))
    }
}

fn rgb_to_xterm_256(r: u8, g: u8, b: u8) -> u8 {
    // Result is always 0-5, fits in u8
    #[allow(clippy::cast_possible_truncation)]
    let to_cube = |v: u8| ((u16::from(v) * 5) / 255) as u8;
    let ri = to_cube(r);
    let gi = to_cube(g);
    let bi = to_cube(b);
    16 + (36 * ri) + (6 * gi) + bi
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_muted_uses_gray_256_color() {
        let out = muted("status");
        assert!(out.starts_with("\x1b[38;5;244m"));
        assert!(out.contains("status"));
    }

    #[test]
    fn test_header_plain_and_colored() {
        assert_eq!(header("a.md", false), "==> a.md <==\n");
        let colored = header("a.md", true);
        assert!(colored.contains("==> a.md <=="));
        assert!(colored.contains("\x1b["));
        assert!(colored.ends_with('\n'));
    }

    #[test]
    fn test_separator_width() {
        assert_eq!(separator(false), format!("{}\n", "-".repeat(40)));
        assert!(separator(true).contains(&"─".repeat(40)));
    }

    #[test]
    fn test_truecolor_detection() {
        assert!(supports_truecolor_from_env(Some("truecolor"), None));
        assert!(supports_truecolor_from_env(Some("24bit"), None));
        assert!(supports_truecolor_from_env(None, Some("xterm-direct")));
        assert!(!supports_truecolor_from_env(None, Some("xterm-256color")));
        assert!(!supports_truecolor_from_env(None, None));
    }

    #[test]
    fn test_rgb_downsamples_without_truecolor() {
        assert_eq!(rgb(255, 0, 0, false), Color::AnsiValue(196));
        assert_eq!(rgb(0, 0, 0, false), Color::AnsiValue(16));
        assert_eq!(rgb(1, 2, 3, true), Color::Rgb { r: 1, g: 2, b: 3 });
    }
}
