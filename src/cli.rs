//! CLI command implementations for ZRush.

pub(crate) mod console;
pub(crate) mod run;

mod output;

use clap::ValueEnum;
use std::error::Error;
use std::fmt;
use zrush::VictoryRule;

/// Output format for the final report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Victory condition as given on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum VictoryArg {
    /// Play until input runs out or the round limit is hit.
    Endless,
    /// Stop once at most one base is above zero health.
    LastStanding,
}

impl From<VictoryArg> for VictoryRule {
    fn from(arg: VictoryArg) -> Self {
        match arg {
            VictoryArg::Endless => VictoryRule::Endless,
            VictoryArg::LastStanding => VictoryRule::LastStanding,
        }
    }
}

/// CLI error type.
#[derive(Debug)]
pub(crate) struct CliError {
    message: String,
}

impl CliError {
    /// Create a new CLI error.
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Error for CliError {}

impl From<std::io::Error> for CliError {
    fn from(e: std::io::Error) -> Self {
        Self::new(e.to_string())
    }
}

impl From<zrush::GameError> for CliError {
    fn from(e: zrush::GameError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<zrush::ConfigError> for CliError {
    fn from(e: zrush::ConfigError) -> Self {
        Self::new(e.to_string())
    }
}

impl From<zrush::InputError> for CliError {
    fn from(e: zrush::InputError) -> Self {
        Self::new(e.to_string())
    }
}
