//! Federal Reserve data resolver CLI.

use clap::{ColorChoice, Parser};
use macrodata_cli::logging::{LogConfig, LogFormat, init_logging};
use macrodata_cli::summary::print_saved;
use macrodata_model::ResolutionOutcome;
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{FetchReport, run_fetch, run_resolve, run_variables};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match cli.command {
        Command::Resolve(args) => match run_resolve(&args) {
            Ok(resolution) => {
                if matches!(resolution.outcome, ResolutionOutcome::NoMatch { .. }) {
                    1
                } else {
                    0
                }
            }
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Fetch(args) => match run_fetch(&args) {
            Ok(FetchReport::Saved(paths)) => {
                print_saved(&paths);
                0
            }
            Ok(FetchReport::UpToDate(dir)) => {
                println!(
                    "Up to date: {} (use --force to download again)",
                    dir.display()
                );
                0
            }
            Ok(FetchReport::Cancelled) => {
                println!("Cancelled.");
                1
            }
            Ok(FetchReport::NoMatch(_)) => 1,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
        Command::Variables(args) => match run_variables(&args) {
            Ok(()) => 0,
            Err(error) => {
                eprintln!("error: {error:#}");
                1
            }
        },
    };
    std::process::exit(exit_code);
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
