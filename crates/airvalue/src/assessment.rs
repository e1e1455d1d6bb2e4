//! Health assessment form state.
//!
//! Ties the area lookup to the household profile and the cost estimate.
//! The area side moves through
//! `Idle -> Querying -> (Suggestions | NoData) -> Selected`; the estimate is
//! computed synchronously on [`HealthAssessment::submit`] from whatever the
//! form holds at that moment.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use crate::config::EstimateConfig;
use crate::error::{Error, Result};
use crate::estimate::{format_cost, CostModel, HealthCondition, HouseholdProfile};
use crate::lookup::{AreaLookup, LookupOutcome, LookupResponse, PendingLookup, StationDirectory};

/// Shown instead of an estimate when no area is present.
pub const MISSING_AREA_MESSAGE: &str = "Please enter a valid area.";

/// Shown when the profile cannot produce an estimate.
pub const INVALID_INPUT_MESSAGE: &str = "Invalid input data.";

/// Where the area field is in the search-and-select flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupState {
    /// Nothing searched (empty or short input).
    #[default]
    Idle,
    /// A lookup has been started and not yet applied.
    Querying,
    /// Suggestions are on offer.
    Suggestions,
    /// The last lookup produced nothing.
    NoData,
    /// The user picked a suggestion.
    Selected,
}

impl std::fmt::Display for LookupState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Querying => write!(f, "querying"),
            Self::Suggestions => write!(f, "suggestions"),
            Self::NoData => write!(f, "no_data"),
            Self::Selected => write!(f, "selected"),
        }
    }
}

/// The result of submitting an assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostReport {
    /// Area the estimate was made for.
    pub area: String,
    /// Household size.
    pub member_count: u32,
    /// Member ages.
    pub ages: Vec<u32>,
    /// Average daily outdoor hours.
    pub daily_outdoor_hours: f64,
    /// Reported health condition.
    pub health_condition: HealthCondition,
    /// Estimated yearly cost, `None` when the inputs were invalid.
    pub yearly_cost: Option<f64>,
}

impl CostReport {
    /// Whether the inputs produced an estimate.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.yearly_cost.is_some()
    }

    /// Human-readable result line.
    #[must_use]
    pub fn render(&self, currency_symbol: &str) -> String {
        if self.area.trim().is_empty() {
            return MISSING_AREA_MESSAGE.to_string();
        }
        match self.yearly_cost {
            Some(cost) => format!(
                "Estimated Yearly Cost for Family: {}",
                format_cost(cost, currency_symbol)
            ),
            None => INVALID_INPUT_MESSAGE.to_string(),
        }
    }
}

/// Interactive health assessment over a station directory.
#[derive(Debug)]
pub struct HealthAssessment<D> {
    lookup: Arc<AreaLookup<D>>,
    model: CostModel,
    area: String,
    suggestions: Vec<String>,
    error: Option<String>,
    state: LookupState,
    profile: HouseholdProfile,
    report: Option<CostReport>,
}

impl<D: StationDirectory> HealthAssessment<D> {
    /// Create an empty assessment.
    #[must_use]
    pub fn new(lookup: Arc<AreaLookup<D>>, config: &EstimateConfig) -> Self {
        Self {
            lookup,
            model: CostModel::from(config),
            area: String::new(),
            suggestions: Vec::new(),
            error: None,
            state: LookupState::Idle,
            profile: HouseholdProfile::with_default_age(config.default_age),
            report: None,
        }
    }

    /// Current area text.
    #[must_use]
    pub fn area(&self) -> &str {
        &self.area
    }

    /// Suggestions currently on offer.
    #[must_use]
    pub fn suggestions(&self) -> &[String] {
        &self.suggestions
    }

    /// Informational message for the area field, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Where the area field is in the lookup flow.
    #[must_use]
    pub fn state(&self) -> LookupState {
        self.state
    }

    /// The household profile.
    #[must_use]
    pub fn profile(&self) -> &HouseholdProfile {
        &self.profile
    }

    /// The last submitted result, cleared by any later edit.
    #[must_use]
    pub fn report(&self) -> Option<&CostReport> {
        self.report.as_ref()
    }

    /// Record typed area text and start a lookup for it.
    ///
    /// The returned lookup can be resolved on any task with
    /// [`AreaLookup::resolve`] and handed back to [`Self::apply_lookup`].
    pub fn begin_area_input(&mut self, query: &str) -> PendingLookup {
        self.area = query.to_string();
        self.error = None;
        self.report = None;

        if self.lookup.qualifies(query) {
            self.state = LookupState::Querying;
        } else {
            self.suggestions.clear();
            self.state = LookupState::Idle;
        }
        self.lookup.begin(query)
    }

    /// Apply a resolved lookup unless a newer one has started since.
    ///
    /// Returns `false` when the response was stale and dropped.
    pub fn apply_lookup(&mut self, response: LookupResponse) -> bool {
        if !self.lookup.is_current(&response) {
            debug!(
                ticket = %response.ticket,
                query = %response.query,
                "Dropping stale lookup response"
            );
            return false;
        }

        match response.outcome {
            LookupOutcome::Cleared => {
                self.suggestions.clear();
                self.error = None;
                self.state = LookupState::Idle;
            }
            LookupOutcome::Suggestions(names) => {
                self.suggestions = names;
                self.error = None;
                self.state = LookupState::Suggestions;
            }
            outcome @ LookupOutcome::NoData => {
                self.suggestions.clear();
                self.error = outcome.message().map(str::to_string);
                self.state = LookupState::NoData;
            }
        }
        true
    }

    /// Type `query` into the area field and wait for its lookup.
    pub async fn input_area(&mut self, query: &str) -> LookupState {
        let pending = self.begin_area_input(query);
        let lookup = Arc::clone(&self.lookup);
        let response = lookup.resolve(pending).await;
        self.apply_lookup(response);
        self.state
    }

    /// Take `area` as the chosen area without consulting the directory.
    pub fn enter_area(&mut self, area: &str) {
        self.lookup.sequence().issue();

        self.area = area.to_string();
        self.suggestions.clear();
        self.error = None;
        self.report = None;
        self.state = LookupState::Selected;
    }

    /// Pick the suggestion at `index` as the area.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if there is no such suggestion.
    pub fn select_suggestion(&mut self, index: usize) -> Result<&str> {
        let Some(choice) = self.suggestions.get(index).cloned() else {
            return Err(Error::invalid_input(format!(
                "suggestion {} does not exist ({} on offer)",
                index + 1,
                self.suggestions.len()
            )));
        };

        // A pick supersedes any lookup still in flight
        self.lookup.sequence().issue();

        self.area = choice;
        self.suggestions.clear();
        self.error = None;
        self.report = None;
        self.state = LookupState::Selected;
        Ok(&self.area)
    }

    /// Change the household size; every age resets to the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `count` is zero.
    pub fn set_member_count(&mut self, count: u32) -> Result<()> {
        self.profile.set_member_count(count)?;
        self.report = None;
        Ok(())
    }

    /// Set the age of member `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for an unknown member or zero age.
    pub fn set_age(&mut self, index: usize, age: u32) -> Result<()> {
        self.profile.set_age(index, age)?;
        self.report = None;
        Ok(())
    }

    /// Set the average daily outdoor hours.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for negative or non-finite hours.
    pub fn set_outdoor_hours(&mut self, hours: f64) -> Result<()> {
        self.profile.set_outdoor_hours(hours)?;
        self.report = None;
        Ok(())
    }

    /// Set the reported health condition.
    pub fn set_health_condition(&mut self, condition: HealthCondition) {
        self.profile.set_health_condition(condition);
        self.report = None;
    }

    /// Compute the estimate from the current form state.
    ///
    /// An invalid profile still produces a report, with no cost.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingArea`] if the area is blank or the last
    /// lookup found nothing.
    pub fn submit(&mut self) -> Result<&CostReport> {
        if self.area.trim().is_empty() || self.error.is_some() {
            return Err(Error::MissingArea);
        }

        let report = CostReport {
            area: self.area.clone(),
            member_count: self.profile.member_count(),
            ages: self.profile.ages().to_vec(),
            daily_outdoor_hours: self.profile.daily_outdoor_hours(),
            health_condition: self.profile.health_condition(),
            yearly_cost: self.model.estimate_profile(&self.profile),
        };
        debug!(area = %report.area, cost = ?report.yearly_cost, "Assessment submitted");

        Ok(self.report.insert(report))
    }
}
