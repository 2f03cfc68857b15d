use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// tagscope - validate telemetry span attributes against a semantic-convention registry
#[derive(Debug, Parser)]
#[command(name = "tagscope", version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOptions,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared across all subcommands.
#[derive(Debug, Parser)]
pub struct GlobalOptions {
    /// Emit output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose (debug-level) logging output.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Validate the call sites of a facts document. Exits with status 1 on any error.
    Check {
        /// Attribute metadata document (JSON). Without it validation is skipped.
        #[arg(short, long, value_name = "FILE")]
        metadata: Option<PathBuf>,

        /// Facts document with the call sites of each source file (JSON).
        #[arg(short, long, value_name = "FILE")]
        facts: PathBuf,

        /// Analyzer configuration (TOML).
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// List the attributes of a metadata document.
    Registry {
        /// Attribute metadata document (JSON).
        #[arg(short, long, value_name = "FILE")]
        metadata: PathBuf,

        /// Show only attributes whose name or alias contains this text.
        #[arg(long, value_name = "TEXT")]
        filter: Option<String>,
    },

    /// List validation rules with their default and effective severities.
    Rules {
        /// Analyzer configuration (TOML).
        #[arg(short, long, value_name = "FILE")]
        config: Option<PathBuf>,
    },
}
