//! Content-type detection and rendering to styled text.
//!
//! This module handles:
//! - Picking a [`Kind`] from the file name
//! - Rendering markdown with comrak, source code with syntect, or plain text
//! - Producing a [`Rendered`] body that can be streamed or paged as-is

mod code;
mod markdown;

use anyhow::{Context, Result};

use crate::source::Source;

/// Markdown file extensions, compared case-insensitively.
const MARKDOWN_EXTENSIONS: &[&str] = &["md", "markdown", "mdown", "mkd"];

/// How a source is rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Markdown,
    Code,
    Plain,
}

/// Rendering switches shared by every renderer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Embed ANSI colors. When off, every kind renders as plain text.
    pub color: bool,
    /// Emit 24-bit colors for highlighted code instead of the 256 palette.
    pub truecolor: bool,
}

/// A rendered input, ready to be written out or paged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub title: String,
    pub body: String,
    pub kind: Kind,
}

/// Detect the content type from a file name.
///
/// Markdown extensions map to [`Kind::Markdown`], names without a dot to
/// [`Kind::Plain`], and everything else to [`Kind::Code`]. A leading dot
/// counts, so `.bashrc` is code.
pub fn detect_kind(name: &str) -> Kind {
    let Some(extension) = extension(name) else {
        return Kind::Plain;
    };
    let extension = extension.to_ascii_lowercase();
    if MARKDOWN_EXTENSIONS.contains(&extension.as_str()) {
        Kind::Markdown
    } else {
        Kind::Code
    }
}

/// Text after the last dot of the final path component, or `None` without
/// a dot. `file.` yields an empty extension.
pub(crate) fn extension(name: &str) -> Option<&str> {
    let file_name = name.rsplit(std::path::is_separator).next().unwrap_or(name);
    file_name.rfind('.').map(|dot| &file_name[dot + 1..])
}

/// Render one source according to its detected kind.
///
/// # Errors
///
/// Returns an error (with the source name as context) when highlighting fails.
pub fn render(source: &Source, options: &RenderOptions) -> Result<Rendered> {
    let kind = detect_kind(&source.name);
    let body = match kind {
        Kind::Markdown => markdown::render(&source.data, options),
        Kind::Code => code::render(&source.name, &source.data, options),
        Kind::Plain => Ok(render_plain(&source.data)),
    }
    .with_context(|| format!("render {}", source.name))?;

    tracing::debug!(name = %source.name, ?kind, bytes = source.data.len(), "rendered source");
    Ok(Rendered {
        title: source.name.clone(),
        body,
        kind,
    })
}

/// Decode bytes as UTF-8 (replacing invalid sequences) with LF line endings.
pub fn render_plain(data: &[u8]) -> String {
    let text = String::from_utf8_lossy(data);
    if text.contains("\r\n") {
        text.replace("\r\n", "\n")
    } else {
        text.into_owned()
    }
}
