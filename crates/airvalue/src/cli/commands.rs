//! CLI command definitions.
//!
//! This module defines the structure of all CLI subcommands.

use std::num::NonZeroUsize;
use std::path::PathBuf;

use clap::{Args, Subcommand, ValueEnum};

use crate::estimate::HealthCondition;

/// Lookup command arguments.
#[derive(Debug, Args)]
pub struct LookupCommand {
    /// Area name to search for (more than two characters)
    pub query: String,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Estimate command arguments.
#[derive(Debug, Args)]
pub struct EstimateCommand {
    /// Area the household lives in
    #[arg(short, long)]
    pub area: Option<String>,

    /// Resolve the area through the station directory first
    #[arg(short, long)]
    pub resolve: bool,

    /// Which suggestion to pick when resolving (1-based)
    #[arg(long, default_value = "1", requires = "resolve")]
    pub pick: NonZeroUsize,

    /// Number of family members
    #[arg(short, long, default_value = "1")]
    pub members: u32,

    /// Age of a family member, in order (repeat per member; unset ages default)
    #[arg(long = "age", value_name = "AGE")]
    pub ages: Vec<u32>,

    /// Average daily hours spent outside by a family member
    #[arg(long, default_value = "2")]
    pub hours: f64,

    /// Health condition in the household
    #[arg(long, value_enum, default_value = "none")]
    pub condition: ConditionArg,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Awareness command arguments.
#[derive(Debug, Args)]
pub struct AwareCommand {
    /// Region to show challenges and solutions for
    #[arg(short, long)]
    pub region: Option<String>,

    /// Only show guidance for this AQI reading
    #[arg(long)]
    pub aqi: Option<u32>,

    /// Output as JSON
    #[arg(short, long)]
    pub json: bool,
}

/// Configuration commands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration
    Show {
        /// Output as JSON
        #[arg(short, long)]
        json: bool,
    },

    /// Show the configuration file path
    Path,

    /// Validate configuration
    Validate {
        /// Path to configuration file to validate
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
}

/// Health condition argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum ConditionArg {
    /// No condition
    #[default]
    None,
    /// Asthma
    Asthma,
    /// Heart disease
    HeartDisease,
    /// Lung disease
    LungDisease,
}

impl From<ConditionArg> for HealthCondition {
    fn from(arg: ConditionArg) -> Self {
        match arg {
            ConditionArg::None => Self::None,
            ConditionArg::Asthma => Self::Asthma,
            ConditionArg::HeartDisease => Self::HeartDisease,
            ConditionArg::LungDisease => Self::LungDisease,
        }
    }
}
