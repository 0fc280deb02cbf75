//! Dirzip CLI - Command-line utility that packages a file or directory tree
//! into a ZIP archive.

mod cli;
mod commands;
mod error;
mod logging;
mod output;

use clap::Parser;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();

    logging::init(cli.verbose);
    let formatter = output::for_cli(&cli);

    match commands::zip::execute(&cli.args, cli.verbose, &*formatter) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            formatter.format_error(&err);
            ExitCode::FAILURE
        }
    }
}
