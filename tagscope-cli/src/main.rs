mod app;
mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;

use crate::app::{Cli, Command};

fn main() -> anyhow::Result<ExitCode> {
    ctrlc::set_handler(|| {
        eprintln!("\nCancelled.");
        std::process::exit(130);
    })?;

    let cli = Cli::parse();

    // Show tagscope info+ on stderr unless --json; --verbose enables debug; RUST_LOG overrides
    if !cli.global.json {
        let level = if cli.global.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        };
        env_logger::Builder::new()
            .filter_module("tagscope", level)
            .parse_default_env()
            .target(env_logger::Target::Stderr)
            .format_timestamp(None)
            .format_module_path(false)
            .format_target(false)
            .init();
    }

    match &cli.command {
        Command::Check {
            metadata,
            facts,
            config,
        } => commands::check::run(metadata.as_deref(), facts, config.as_deref(), &cli.global),
        Command::Registry { metadata, filter } => {
            commands::registry::run(metadata, filter.as_deref(), &cli.global)?;
            Ok(ExitCode::SUCCESS)
        }
        Command::Rules { config } => {
            commands::rules::run(config.as_deref(), &cli.global)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}
