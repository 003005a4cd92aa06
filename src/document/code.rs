//! Source-code rendering.

use std::sync::OnceLock;

use anyhow::Result;
use regex::Regex;

use super::{RenderOptions, extension, render_plain};
use crate::highlight;
use crate::ui::style;

/// Render a source file, highlighting by extension when a syntax is known.
pub(super) fn render(name: &str, data: &[u8], options: &RenderOptions) -> Result<String> {
    let plain = render_plain(data);
    if !options.color {
        return Ok(plain);
    }

    let highlighted = match extension(name) {
        Some(extension) => highlight::highlight_extension(extension, &plain, options.truecolor)?,
        None => None,
    };
    let lines = match highlighted {
        Some(lines) => lines,
        None => {
            tracing::debug!(name, "no syntax definition, using generic code colors");
            plain.lines().map(colorize_generic_line).collect()
        }
    };
    Ok(join_lines(&lines))
}

/// Muted code color with string literals picked out.
fn colorize_generic_line(line: &str) -> String {
    static STRINGS: OnceLock<Regex> = OnceLock::new();
    let re = STRINGS.get_or_init(|| {
        Regex::new(r#""([^"\\]|\\.)*"|'([^'\\]|\\.)*'"#).expect("valid string literal pattern")
    });

    let mut out = String::with_capacity(line.len() * 2);
    let mut last = 0;
    for literal in re.find_iter(line) {
        if literal.start() > last {
            out.push_str(&style::paint(&line[last..literal.start()], style::fg(style::GENERIC_CODE)));
        }
        out.push_str(&style::paint(literal.as_str(), style::fg(style::STRING)));
        last = literal.end();
    }
    if last < line.len() {
        out.push_str(&style::paint(&line[last..], style::fg(style::GENERIC_CODE)));
    }
    out
}

pub(super) fn join_lines(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    if !out.is_empty() {
        out.push('\n');
    }
    out
}
