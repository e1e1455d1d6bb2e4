//! `airvalue` - Air-quality station lookup and household cost estimation
//!
//! This library provides area search against an air-quality station
//! directory, a household pollution cost estimate, the form state that ties
//! the two together, and static AQI awareness guidance.

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

pub mod assessment;
pub mod awareness;
pub mod cli;
pub mod config;
pub mod error;
pub mod estimate;
pub mod logging;
pub mod lookup;

pub use assessment::{CostReport, HealthAssessment, LookupState};
pub use config::Config;
pub use error::{Error, Result};
pub use estimate::{estimate, HealthCondition, HouseholdProfile};
pub use logging::init_logging;
pub use lookup::{AreaLookup, LookupOutcome, StationDirectory, WaqiDirectory};
