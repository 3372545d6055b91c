// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the URL client from the
//   environment and hand argv to `cli::run`.

use std::io::IsTerminal;
use std::process::ExitCode;
use tinyurl_cli::api::UrlClient;
use tinyurl_cli::cli::{self, Progress};
use tinyurl_cli::logging::init_logging;

fn main() -> anyhow::Result<ExitCode> {
    init_logging();

    let mut argv = std::env::args_os().map(|a| a.to_string_lossy().into_owned());
    let prog = argv.next().unwrap_or_else(|| "tinyurl".into());
    let args: Vec<String> = argv.collect();

    let client = UrlClient::from_env();
    let progress = if std::io::stderr().is_terminal() {
        Progress::Spinner
    } else {
        Progress::Hidden
    };

    // stderr stays unlocked: the spinner's tick thread also draws there.
    let stdout = std::io::stdout();
    let code = cli::run(
        &prog,
        cli::parse_args(&args),
        &client,
        &mut stdout.lock(),
        &mut std::io::stderr(),
        progress,
    )?;
    Ok(ExitCode::from(code))
}
