// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

use crate::types::Flavor;

/// Command-line arguments for `specregen`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "specregen",
    version,
    about = "Regenerate SDK test packages from specification trees.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Specregen.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Specregen.toml")]
    pub config: String,

    /// Which flavor to regenerate.
    ///
    /// If omitted, a full branded run is performed first, then a full
    /// unbranded run, sequentially.
    #[arg(long, value_enum, value_name = "FLAVOR")]
    pub flavor: Option<Flavor>,

    /// Pass a debug flag through to every generator invocation.
    #[arg(long)]
    pub debug: bool,

    /// Only regenerate specifications whose root-relative path contains
    /// this substring (case-insensitive). Default: match everything.
    #[arg(long, value_name = "SUBSTRING")]
    pub filter: Option<String>,

    /// Discover and resolve everything, print the task list, but don't
    /// purge or execute anything.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `SPECREGEN_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
