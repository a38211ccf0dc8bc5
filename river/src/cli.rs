//! Command-line interface (spec §6), parsed with `clap`'s derive API.

use clap::Parser;

use crate::error::RiverError;

#[derive(Debug, Parser)]
#[command(name = "river", version, about = "A dynamic tiling Wayland compositor")]
pub struct Cli {
    /// Run this command (via $SHELL -c) instead of reading the init script.
    #[arg(short = 'c', long = "command")]
    pub command: Option<String>,

    /// Minimum severity to log.
    #[arg(long = "log-level", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Comma-separated scope list: `all`, a scope name, or `~scope` to
    /// negate. Parsed further by `river_core::logging::parse_log_scopes`.
    #[arg(long = "log-scopes")]
    pub log_scopes: Option<String>,

    /// Disable the Xwayland compatibility layer.
    #[arg(long = "no-xwayland")]
    pub no_xwayland: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl Cli {
    pub fn parse_args() -> Result<Self, RiverError> {
        Cli::try_parse().map_err(|e| RiverError::Core(river_core::RiverCoreError::Usage(e.to_string())))
    }
}
