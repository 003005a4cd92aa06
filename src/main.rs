//! Prettycat - `cat` with colors and a built-in pager.
//!
//! # Usage
//!
//! ```bash
//! prettycat README.md src/main.rs
//! git log | prettycat
//! prettycat --no-color notes.md > notes.txt
//! ```

use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use prettycat::app::{App, EXIT_OK, EXIT_USAGE, Streams};
use prettycat::config::{Env, Settings, ThemeMode};
use prettycat::highlight::set_background_mode;
use prettycat::pager::Pager;

/// Render text, markdown and code files for the terminal
#[derive(Parser, Debug)]
#[command(name = "prettycat", version, about, long_about = None)]
struct Cli {
    /// Files to show; reads stdin when none are given
    #[arg(value_name = "FILE")]
    files: Vec<PathBuf>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Force syntax highlight theme background (light or dark)
    #[arg(long, value_enum, default_value = "auto")]
    theme: ThemeMode,
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            // Help and --version are not failures.
            let code = if err.use_stderr() { EXIT_USAGE } else { EXIT_OK };
            let _ = err.print();
            return ExitCode::from(code);
        }
    };

    let settings = Settings::from_env(cli.no_color, cli.theme, &Env::capture());
    set_background_mode(Some(settings.background));
    tracing::debug!(?settings, files = cli.files.len(), "starting");

    let mut stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut stderr = io::stderr();
    let streams = Streams {
        stdin_is_tty: stdin.is_terminal(),
        stdout_is_tty: stdout.is_terminal(),
        stdin: &mut stdin,
        stdout: &mut stdout,
        stderr: &mut stderr,
    };

    let code = App::new(cli.files, settings).run(streams, |lines, color| {
        Pager::new(lines, color)
            .with_lines_fallback(settings.lines)
            .run()
    });
    ExitCode::from(code)
}
