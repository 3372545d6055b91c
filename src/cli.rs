// Command-line front end: turns argv into a `Command`, runs it against a
// `UrlClient` and prints the single result line. Output streams are passed in
// so the whole flow can be driven from tests.

use crate::api::{Transport, UrlClient};
use anyhow::Result;
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::Duration;

/// Exit status for a run with no arguments at all.
pub const EXIT_NO_ARGS: u8 = 1;
pub const EXIT_OK: u8 = 0;

/// What the user asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    NoArgs,
    Help,
    Shorten(String),
    Unshorten(String),
    Invalid,
}

/// Whether to draw a spinner on stderr while the request runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Spinner,
    Hidden,
}

/// Parse the arguments that follow the program name.
///
/// `-h` wins regardless of what follows it; `-s` and `-u` need exactly one
/// non-empty URL.
pub fn parse_args(args: &[String]) -> Command {
    match args {
        [] => Command::NoArgs,
        [flag, ..] if flag == "-h" => Command::Help,
        [flag, url] if flag == "-s" && !url.is_empty() => Command::Shorten(url.clone()),
        [flag, url] if flag == "-u" && !url.is_empty() => Command::Unshorten(url.clone()),
        _ => Command::Invalid,
    }
}

pub fn help_text(prog: &str) -> String {
    format!(
        "\n\
===========================================\n \
URL Shortener & Unshortener Tool\n\
===========================================\n\n\
Usage:\n \
{prog} [option] [url]\n\n\
Options:\n \
-s <url> Shorten a long URL using TinyURL API\n \
-u <url> Unshorten a short URL to reveal its target\n \
-h Show this help message\n\n\
Examples:\n \
{prog} -s https://example.com\n \
{prog} -u https://tinyurl.com/abc123\n\n\
Notes:\n \
* Requires internet connectivity.\n\n"
    )
}

/// Execute `command` and return the process exit status.
///
/// Operation failures are printed in place of the result and still exit 0;
/// only a bare invocation exits non-zero. Errors returned here are I/O
/// failures on the output streams themselves.
pub fn run<T: Transport>(
    prog: &str,
    command: Command,
    client: &UrlClient<T>,
    out: &mut impl Write,
    err: &mut impl Write,
    progress: Progress,
) -> Result<u8> {
    match command {
        Command::NoArgs => {
            write!(out, "{}", help_text(prog))?;
            Ok(EXIT_NO_ARGS)
        }
        Command::Help => {
            write!(out, "{}", help_text(prog))?;
            Ok(EXIT_OK)
        }
        Command::Shorten(url) => {
            let spinner = spinner(progress, "Shortening...");
            let result = client.shorten(&url);
            spinner.finish_and_clear();
            match result {
                Ok(short) => {
                    out.write_all(b"Shortened URL: ")?;
                    out.write_all(&short)?;
                    out.write_all(b"\n")?;
                }
                Err(e) => writeln!(out, "Shortened URL: {}", e)?,
            }
            Ok(EXIT_OK)
        }
        Command::Unshorten(url) => {
            let spinner = spinner(progress, "Resolving...");
            let result = client.unshorten(&url);
            spinner.finish_and_clear();
            match result {
                Ok(original) => writeln!(out, "Original URL: {}", original)?,
                Err(e) => writeln!(out, "Original URL: {}", e)?,
            }
            Ok(EXIT_OK)
        }
        Command::Invalid => {
            writeln!(err, "Error: Invalid command or missing argument.")?;
            write!(out, "{}", help_text(prog))?;
            Ok(EXIT_OK)
        }
    }
}

fn spinner(progress: Progress, msg: &'static str) -> ProgressBar {
    if progress == Progress::Hidden {
        return ProgressBar::hidden();
    }
    // `new_spinner` draws to stderr and hides itself when that isn't a tty.
    let pb = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        pb.set_style(style);
    }
    pb.set_message(msg);
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}
