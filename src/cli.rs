//! CLI argument parsing using clap.
//!
//! Defines the command-line interface of the inspection binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// gconf: configuration tree inspector
///
/// Loads a configuration file, follows its include directives and prints
/// every option it resolves to.
#[derive(Debug, Parser)]
#[command(name = "gconf")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging (files opened and closed, options read)
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

/// Subcommands for gconf
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print the options of a configuration tree
    Dump {
        /// Root configuration file
        file: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
}

/// Output format for `dump`
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Configuration syntax, includes inlined
    #[value(name = "text")]
    Text,
    /// Pretty-printed JSON with source locations
    #[value(name = "json")]
    Json,
}

impl Cli {
    /// Parses CLI arguments from the command line.
    #[must_use]
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Parses CLI arguments from an iterator (useful for testing).
    pub fn parse_from_iter<I, T>(iter: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        Self::parse_from(iter)
    }
}
