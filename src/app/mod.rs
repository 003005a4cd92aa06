//! Top-level run: load inputs, render them, then page or stream the result.
//!
//! [`App::run`] takes its streams and the pager as arguments so the whole
//! flow can be driven from tests without a terminal.

use std::fmt::Display;
use std::io::{Read, Write};
use std::path::PathBuf;

use crate::config::Settings;
use crate::document::{self, RenderOptions};
use crate::pager::{LineBuffer, PagerError};
use crate::source;
use crate::ui::style;

pub const EXIT_OK: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE: u8 = 2;

/// Prefix for every diagnostic written to stderr.
pub const PROGRAM_NAME: &str = "prettycat";

/// The process streams, plus whether each end is a terminal.
pub struct Streams<'a> {
    pub stdin: &'a mut dyn Read,
    pub stdin_is_tty: bool,
    pub stdout: &'a mut dyn Write,
    pub stdout_is_tty: bool,
    pub stderr: &'a mut dyn Write,
}

pub struct App {
    paths: Vec<PathBuf>,
    settings: Settings,
}

impl App {
    pub const fn new(paths: Vec<PathBuf>, settings: Settings) -> Self {
        Self { paths, settings }
    }

    /// Run once and return the process exit code.
    ///
    /// `pager` is called with the concatenated document when stdout is a
    /// terminal; otherwise every body is streamed to stdout.
    pub fn run<P>(&self, streams: Streams<'_>, pager: P) -> u8
    where
        P: FnOnce(&LineBuffer, bool) -> Result<(), PagerError>,
    {
        let Streams {
            stdin,
            stdin_is_tty,
            stdout,
            stdout_is_tty,
            stderr,
        } = streams;

        if self.paths.is_empty() && stdin_is_tty {
            report(stderr, "no input (pass files or pipe stdin)");
            return EXIT_USAGE;
        }

        let loaded = match source::load(&self.paths, stdin, stdin_is_tty) {
            Ok(loaded) => loaded,
            Err(err) => {
                report(stderr, format_args!("{err:#}"));
                return EXIT_ERROR;
            }
        };
        if loaded.stdin_ignored {
            report(stderr, "stdin data ignored because file arguments were provided");
        }

        let color = self.settings.use_color(stdout_is_tty);
        let options = RenderOptions {
            color,
            truecolor: self.settings.truecolor,
        };
        let mut had_error = !loaded.errors.is_empty();
        for err in &loaded.errors {
            report(stderr, err);
        }

        let count = loaded.sources.len();
        let mut bodies = Vec::with_capacity(count);
        for (index, source) in loaded.sources.iter().enumerate() {
            let rendered = match document::render(source, &options) {
                Ok(rendered) => rendered,
                Err(err) => {
                    had_error = true;
                    report(stderr, format_args!("{err:#}"));
                    continue;
                }
            };
            if count > 1 {
                let mut body = style::header(&rendered.title, color);
                body.push_str(&with_trailing_newline(rendered.body));
                if index + 1 < count {
                    body.push_str(&style::separator(color));
                }
                bodies.push(body);
            } else {
                bodies.push(rendered.body);
            }
        }

        if bodies.is_empty() {
            return EXIT_ERROR;
        }

        if stdout_is_tty {
            let lines = LineBuffer::new(&bodies.concat());
            tracing::debug!(lines = lines.len(), color, "starting pager");
            if let Err(err) = pager(&lines, color) {
                report(stderr, format_args!("pager error: {err}"));
                had_error = true;
            }
        } else {
            for body in bodies {
                let written = stdout
                    .write_all(with_trailing_newline(body).as_bytes())
                    .and_then(|()| stdout.flush());
                if let Err(err) = written {
                    report(stderr, format_args!("write output: {err}"));
                    return EXIT_ERROR;
                }
            }
        }

        if had_error { EXIT_ERROR } else { EXIT_OK }
    }
}

fn report(stderr: &mut dyn Write, message: impl Display) {
    // Nowhere left to report a failing stderr.
    let _ = writeln!(stderr, "{PROGRAM_NAME}: {message}");
}

fn with_trailing_newline(mut body: String) -> String {
    if !body.ends_with('\n') {
        body.push('\n');
    }
    body
}

#[cfg(test)]
mod tests;
