//! NAMASTE terminology CLI.

use clap::{ColorChoice, Parser};
use namaste_cli::exit_code;
use namaste_cli::logging::{LogConfig, LogFormat, init_logging};
use std::io::{self, IsTerminal};
use tracing::level_filters::LevelFilter;

mod cli;
mod commands;
mod summary;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    Session, run_bundle_check, run_codes, run_concept_map, run_doctor, run_hierarchy, run_search,
    run_translate, run_validate,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = Session::open(cli.terminology_dir.as_deref(), cli.config.as_deref()).and_then(
        |session| match &cli.command {
            Command::Translate(args) => run_translate(&session, args),
            Command::Validate(args) => run_validate(&session, args),
            Command::Search(args) => run_search(&session, args),
            Command::Codes(args) => run_codes(&session, args),
            Command::ConceptMap(args) => run_concept_map(&session, args),
            Command::Hierarchy(args) => run_hierarchy(&session, args),
            Command::BundleCheck(args) => run_bundle_check(args),
            Command::Doctor(args) => run_doctor(&session, args),
        },
    );
    let exit_code = match result {
        Ok(()) => 0,
        Err(err) => {
            eprintln!("error: {err:#}");
            exit_code(&err)
        }
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
