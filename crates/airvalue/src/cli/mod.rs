//! Command-line interface for airvalue.
//!
//! This module provides the CLI structure for the `airvalue` binary.

mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub use commands::{AwareCommand, ConditionArg, ConfigCommand, EstimateCommand, LookupCommand};

/// airvalue - Air-quality station lookup and household cost estimates
///
/// Search air-quality monitoring stations by area name, estimate the yearly
/// pollution-related cost for a household, and read AQI guidance.
#[derive(Debug, Parser)]
#[command(name = "airvalue")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Path to custom configuration file
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// The command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search monitoring stations matching an area name
    Lookup(LookupCommand),

    /// Estimate the yearly health cost for a household
    Estimate(EstimateCommand),

    /// Show AQI guidance and regional advice
    Aware(AwareCommand),

    /// View configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

impl Cli {
    /// Get the verbosity level based on flags.
    #[must_use]
    pub fn verbosity(&self) -> crate::logging::Verbosity {
        if self.quiet {
            crate::logging::Verbosity::Quiet
        } else {
            match self.verbose {
                0 => crate::logging::Verbosity::Normal,
                1 => crate::logging::Verbosity::Verbose,
                _ => crate::logging::Verbosity::Trace,
            }
        }
    }
}
