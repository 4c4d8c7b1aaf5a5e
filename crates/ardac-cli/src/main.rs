//! ARDaC node mapper CLI.

use std::io::{self, IsTerminal};

use ardac_cli::logging::{LogConfig, init_logging};
use clap::{ColorChoice, Parser};
use tracing::error;

mod cli;
mod commands;
mod summary;

use crate::cli::Cli;
use crate::commands::{CommandOutcome, run_command};
use crate::summary::print_summary;

/// Exit status for any failure after argument parsing.
const EXIT_FAILURE: i32 = 3;

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    if let Err(error) = init_logging(&log_config(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(EXIT_FAILURE);
    }

    let exit_code = match run_command(&cli) {
        Ok(CommandOutcome::Node(summary)) => {
            print_summary(&summary);
            0
        }
        Ok(CommandOutcome::Printed) => 0,
        Err(error) => {
            if cli.log_file.is_some() {
                error!("{error:#}");
            }
            eprintln!("error: {error:#}");
            EXIT_FAILURE
        }
    };
    std::process::exit(exit_code);
}

/// `--log-level` beats `-v`/`-q`; either one disables `RUST_LOG`.
fn log_config(cli: &Cli) -> LogConfig {
    let explicit = cli.verbosity.is_present() || cli.log_level.is_some();
    let to_terminal = cli.log_file.is_none() && io::stderr().is_terminal();
    LogConfig {
        level_filter: cli
            .log_level
            .map_or_else(|| cli.verbosity.tracing_level_filter(), Into::into),
        use_env_filter: !explicit,
        with_ansi: match cli.color.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => to_terminal,
        },
        format: cli.log_format.into(),
        log_file: cli.log_file.clone(),
        ..LogConfig::default()
    }
}
