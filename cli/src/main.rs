//! # field-data
//!
//! Loads a schema declaration and a raw JSON record, validates the record, and prints
//! values coerced to their declared types.

use std::process::ExitCode;

use clap::Parser;

mod args;
mod commands;
mod logging;

use args::Cli;

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init_tracing(cli.verbose);

    let stdout = std::io::stdout();
    match commands::run_command(&cli.command, &mut stdout.lock()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e:#}");
            ExitCode::FAILURE
        },
    }
}
