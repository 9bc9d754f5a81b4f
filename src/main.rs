//! gconf: block-structured configuration reader
//!
//! Entry point for the gconf inspection binary.

use gconf::cli::{Cli, Command};
use std::process::ExitCode;

mod app;

use app::{DumpError, dump, exit_code, setup_tracing};

/// Main entry point.
///
/// Excluded from coverage as it's the thin wrapper around testable components.
#[cfg(not(tarpaulin_include))]
fn main() -> ExitCode {
    let cli = Cli::parse_args();
    setup_tracing(cli.verbose);

    let Command::Dump { file, format } = &cli.command;
    match dump(file, *format) {
        Ok(output) => {
            print!("{output}");
            exit_code::SUCCESS
        }
        Err(DumpError::Config(e)) => {
            tracing::error!("{e}");
            exit_code::CONFIG_ERROR
        }
        Err(e @ DumpError::Serialize(_)) => {
            tracing::error!("{e}");
            exit_code::output_error()
        }
    }
}
