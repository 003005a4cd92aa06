use std::fs;
use std::io::{self, Cursor, Write};
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use crate::config::{Env, Settings, ThemeMode};
use crate::pager::{LineBuffer, PagerError};

use super::{App, EXIT_ERROR, EXIT_OK, EXIT_USAGE, Streams};

#[derive(Debug, Default)]
struct Outcome {
    code: u8,
    stdout: String,
    stderr: String,
    paged: Option<(Vec<String>, bool)>,
}

#[derive(Clone, Copy)]
struct Run<'a> {
    stdin: &'a [u8],
    stdin_is_tty: bool,
    stdout_is_tty: bool,
    no_color: bool,
    pager_fails: bool,
}

impl Default for Run<'_> {
    fn default() -> Self {
        Self {
            stdin: b"",
            stdin_is_tty: true,
            stdout_is_tty: false,
            no_color: false,
            pager_fails: false,
        }
    }
}

fn run_with(paths: &[PathBuf], run: Run<'_>) -> Outcome {
    let settings = Settings::from_env(run.no_color, ThemeMode::Auto, &Env::default());
    let mut stdin = Cursor::new(run.stdin.to_vec());
    let mut stdout = Vec::new();
    let mut stderr = Vec::new();
    let mut paged = None;

    let code = App::new(paths.to_vec(), settings).run(
        Streams {
            stdin: &mut stdin,
            stdin_is_tty: run.stdin_is_tty,
            stdout: &mut stdout,
            stdout_is_tty: run.stdout_is_tty,
            stderr: &mut stderr,
        },
        |lines: &LineBuffer, color| {
            let captured = (0..lines.len())
                .filter_map(|i| lines.line(i).map(ToString::to_string))
                .collect();
            paged = Some((captured, color));
            if run.pager_fails {
                Err(PagerError::Input(io::Error::other("tty vanished")))
            } else {
                Ok(())
            }
        },
    );

    Outcome {
        code,
        stdout: String::from_utf8(stdout).unwrap(),
        stderr: String::from_utf8(stderr).unwrap(),
        paged,
    }
}

fn write_file(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_no_input_on_terminal_is_usage_error() {
    let outcome = run_with(&[], Run::default());
    assert_eq!(outcome.code, EXIT_USAGE);
    assert_eq!(outcome.stderr, "prettycat: no input (pass files or pipe stdin)\n");
    assert!(outcome.stdout.is_empty());
}

#[test]
fn test_piped_stdin_streams_to_stdout() {
    let outcome = run_with(
        &[],
        Run {
            stdin: b"hello",
            stdin_is_tty: false,
            ..Run::default()
        },
    );
    assert_eq!(outcome.code, EXIT_OK);
    assert_eq!(outcome.stdout, "hello\n");
    assert!(outcome.stderr.is_empty());
    assert!(outcome.paged.is_none());
}

#[test]
fn test_missing_file_reports_and_continues() {
    let dir = tempdir().unwrap();
    let ok = write_file(dir.path(), "ok.txt", "hello world\n");
    let missing = dir.path().join("missing.txt");

    let outcome = run_with(&[ok, missing], Run::default());
    assert_eq!(outcome.code, EXIT_ERROR);
    assert!(outcome.stdout.contains("hello world"));
    assert!(outcome.stderr.starts_with("prettycat: "));
    assert!(outcome.stderr.contains("missing.txt"));
}

#[test]
fn test_no_readable_files() {
    let dir = tempdir().unwrap();
    let outcome = run_with(&[dir.path().join("nope.md")], Run::default());
    assert_eq!(outcome.code, EXIT_ERROR);
    assert!(outcome.stderr.starts_with("prettycat: no readable files"));
    assert!(outcome.stdout.is_empty());
}

#[test]
fn test_piped_stdin_is_ignored_with_files() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "a.txt", "from file\n");
    let outcome = run_with(
        &[file],
        Run {
            stdin: b"from pipe",
            stdin_is_tty: false,
            ..Run::default()
        },
    );
    assert_eq!(outcome.code, EXIT_OK);
    assert_eq!(outcome.stdout, "from file\n");
    assert_eq!(
        outcome.stderr,
        "prettycat: stdin data ignored because file arguments were provided\n"
    );
}

#[test]
fn test_multiple_files_get_headers_and_separators() {
    let dir = tempdir().unwrap();
    let first = write_file(dir.path(), "one.txt", "first");
    let second = write_file(dir.path(), "two.txt", "second\n");

    let outcome = run_with(&[first.clone(), second.clone()], Run::default());
    let rule = "-".repeat(40);
    assert_eq!(
        outcome.stdout,
        format!(
            "==> {} <==\nfirst\n{rule}\n==> {} <==\nsecond\n",
            first.display(),
            second.display()
        )
    );
}

#[test]
fn test_streamed_output_is_never_colored() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "doc.md", "# Title\n");
    let outcome = run_with(&[file], Run::default());
    assert_eq!(outcome.stdout, "# Title\n");
}

#[test]
fn test_terminal_stdout_opens_pager_with_color() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "main.go", "package main\n");
    let outcome = run_with(
        &[file],
        Run {
            stdout_is_tty: true,
            ..Run::default()
        },
    );
    assert_eq!(outcome.code, EXIT_OK);
    assert!(outcome.stdout.is_empty());
    let (lines, color) = outcome.paged.unwrap();
    assert!(color);
    assert_eq!(lines.len(), 1);
    assert!(lines[0].contains("\x1b["));
}

#[test]
fn test_no_color_flag_pages_plain_text() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "doc.md", "# Title\n\nbody\n");
    let outcome = run_with(
        &[file],
        Run {
            stdout_is_tty: true,
            no_color: true,
            ..Run::default()
        },
    );
    let (lines, color) = outcome.paged.unwrap();
    assert!(!color);
    assert_eq!(lines, vec!["# Title", "", "body"]);
}

#[test]
fn test_pager_documents_are_concatenated() {
    let dir = tempdir().unwrap();
    let a = write_file(dir.path(), "a.txt", "a1\na2\n");
    let b = write_file(dir.path(), "b.txt", "b1\n");
    let outcome = run_with(
        &[a, b],
        Run {
            stdout_is_tty: true,
            no_color: true,
            ..Run::default()
        },
    );
    let (lines, _) = outcome.paged.unwrap();
    assert_eq!(lines.len(), 6);
    assert!(lines[0].starts_with("==> "));
    assert_eq!(lines[3], "-".repeat(40));
    assert!(lines[4].starts_with("==> "));
    assert_eq!(lines[5], "b1");
}

#[test]
fn test_pager_failure_is_reported() {
    let dir = tempdir().unwrap();
    let file = write_file(dir.path(), "a.txt", "a\n");
    let outcome = run_with(
        &[file],
        Run {
            stdout_is_tty: true,
            pager_fails: true,
            ..Run::default()
        },
    );
    assert_eq!(outcome.code, EXIT_ERROR);
    assert_eq!(
        outcome.stderr,
        "prettycat: pager error: read input: tty vanished\n"
    );
}

struct ClosedPipe;

impl Write for ClosedPipe {
    fn write(&mut self, _: &[u8]) -> io::Result<usize> {
        Err(io::Error::new(io::ErrorKind::BrokenPipe, "broken pipe"))
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_write_failure_exits_with_error() {
    let settings = Settings::from_env(false, ThemeMode::Auto, &Env::default());
    let mut stderr = Vec::new();
    let code = App::new(Vec::new(), settings).run(
        Streams {
            stdin: &mut Cursor::new(b"data".to_vec()),
            stdin_is_tty: false,
            stdout: &mut ClosedPipe,
            stdout_is_tty: false,
            stderr: &mut stderr,
        },
        |_, _| Ok(()),
    );
    assert_eq!(code, EXIT_ERROR);
    let stderr = String::from_utf8(stderr).unwrap();
    assert!(stderr.starts_with("prettycat: write output: "), "{stderr}");
}
