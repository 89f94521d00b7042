//! Bet code export CLI.

use std::io::{self, IsTerminal};
use std::process::ExitCode;

use betcode_cli::cli::{Cli, LogFormatArg};
use betcode_cli::commands::run_export;
use betcode_cli::logging::{LogConfig, LogFormat, init_logging};
use clap::Parser;

fn main() -> ExitCode {
    let cli = Cli::parse();
    if let Err(error) = init_logging(&log_config_from_cli(&cli)) {
        eprintln!("error: failed to initialize logging: {error}");
        return ExitCode::FAILURE;
    }

    match run_export(&cli.export) {
        Ok(report) => {
            match &report.path {
                Some(path) => println!("{}", path.display()),
                None => println!("{}", report.file_name),
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("error: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn log_config_from_cli(cli: &Cli) -> LogConfig {
    LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        format: match cli.log_format {
            LogFormatArg::Pretty => LogFormat::Pretty,
            LogFormatArg::Compact => LogFormat::Compact,
            LogFormatArg::Json => LogFormat::Json,
        },
        with_ansi: io::stderr().is_terminal(),
    }
}
