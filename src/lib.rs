// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper around these modules.
//
// Module responsibilities:
// - `api`: HTTP exchanges with the shortening service and with the servers
//   short URLs redirect through, behind the `Transport` trait.
// - `cli`: argument parsing, help text and printing of the result line.
// - `config`: endpoint, timeouts and limits, with environment overrides.
// - `error`: the typed errors whose messages the CLI prints.
// - `logging`: tracing subscriber setup (stderr only).
pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
