//! Loading input bytes from files or stdin.

use std::fs;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};

/// Name given to the source read from stdin.
pub const STDIN_NAME: &str = "stdin";

/// One input to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Source {
    pub name: String,
    pub data: Vec<u8>,
    pub is_stdin: bool,
}

/// Result of loading every requested input.
#[derive(Debug, Default)]
pub struct Loaded {
    /// Inputs that were read, in argument order.
    pub sources: Vec<Source>,
    /// One `"<path>: <cause>"` error per unreadable file.
    pub errors: Vec<anyhow::Error>,
    /// Stdin carried piped data that was not read because files were given.
    pub stdin_ignored: bool,
}

/// Load the given files, or stdin when there are none.
///
/// Unreadable files are collected in [`Loaded::errors`] and loading carries
/// on with the rest.
///
/// # Errors
///
/// Fails when there is nothing to read: no paths and stdin is a terminal,
/// stdin cannot be read, or none of the files could be read.
pub fn load(paths: &[impl AsRef<Path>], stdin: &mut dyn Read, stdin_is_tty: bool) -> Result<Loaded> {
    if paths.is_empty() {
        if stdin_is_tty {
            bail!("no input: provide a file or pipe data through stdin");
        }
        let mut data = Vec::new();
        stdin.read_to_end(&mut data).context("read stdin")?;
        tracing::debug!(bytes = data.len(), "loaded stdin");
        return Ok(Loaded {
            sources: vec![Source {
                name: STDIN_NAME.to_string(),
                data,
                is_stdin: true,
            }],
            ..Loaded::default()
        });
    }

    let mut loaded = Loaded {
        stdin_ignored: !stdin_is_tty,
        ..Loaded::default()
    };
    for path in paths {
        let path = path.as_ref();
        match fs::read(path) {
            Ok(data) => {
                tracing::debug!(path = %path.display(), bytes = data.len(), "loaded file");
                loaded.sources.push(Source {
                    name: path.display().to_string(),
                    data,
                    is_stdin: false,
                });
            }
            Err(err) => {
                tracing::debug!(path = %path.display(), %err, "failed to read file");
                loaded.errors.push(anyhow!("{}: {err}", path.display()));
            }
        }
    }

    if loaded.sources.is_empty() {
        let causes = loaded
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(anyhow!(causes).context("no readable files"));
    }
    Ok(loaded)
}
