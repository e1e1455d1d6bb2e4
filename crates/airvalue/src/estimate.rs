//! Household pollution cost estimation.
//!
//! The estimate is a linear placeholder: outdoor hours times a monthly hourly
//! rate, scaled to a year and to the household size. Ages and health
//! condition are collected with the profile but do not enter the formula.

use serde::{Deserialize, Serialize};

use crate::config::EstimateConfig;
use crate::error::{Error, Result};

/// Age given to every household member until edited.
pub const DEFAULT_AGE: u32 = 25;

/// Cost per daily outdoor hour per month.
pub const HOURLY_RATE: f64 = 500.0;

/// Months counted per year.
pub const MONTHS_PER_YEAR: u32 = 12;

/// Largest household a profile accepts.
pub const MAX_MEMBERS: u32 = 100;

/// Health condition reported for the household.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum HealthCondition {
    /// No reported condition.
    #[default]
    None,
    /// Asthma.
    Asthma,
    /// Heart disease.
    #[serde(rename = "Heart Disease")]
    HeartDisease,
    /// Lung disease.
    #[serde(rename = "Lung Disease")]
    LungDisease,
}

impl HealthCondition {
    /// All selectable conditions, in display order.
    pub const ALL: [Self; 4] = [
        Self::None,
        Self::Asthma,
        Self::HeartDisease,
        Self::LungDisease,
    ];
}

impl std::fmt::Display for HealthCondition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::None => write!(f, "None"),
            Self::Asthma => write!(f, "Asthma"),
            Self::HeartDisease => write!(f, "Heart Disease"),
            Self::LungDisease => write!(f, "Lung Disease"),
        }
    }
}

/// The inputs describing a family for cost estimation.
///
/// `ages().len() == member_count()` always holds; changing the member count
/// resets every age to the default.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HouseholdProfile {
    member_count: u32,
    ages: Vec<u32>,
    daily_outdoor_hours: f64,
    health_condition: HealthCondition,
    #[serde(skip)]
    default_age: u32,
}

impl Default for HouseholdProfile {
    fn default() -> Self {
        Self::with_default_age(DEFAULT_AGE)
    }
}

impl HouseholdProfile {
    /// Create a one-member profile whose ages reset to `default_age`.
    #[must_use]
    pub fn with_default_age(default_age: u32) -> Self {
        Self {
            member_count: 1,
            ages: vec![default_age],
            daily_outdoor_hours: 2.0,
            health_condition: HealthCondition::None,
            default_age,
        }
    }

    /// Number of household members.
    #[must_use]
    pub fn member_count(&self) -> u32 {
        self.member_count
    }

    /// Age of each member, in entry order.
    #[must_use]
    pub fn ages(&self) -> &[u32] {
        &self.ages
    }

    /// Average daily hours a member spends outside.
    #[must_use]
    pub fn daily_outdoor_hours(&self) -> f64 {
        self.daily_outdoor_hours
    }

    /// Reported health condition.
    #[must_use]
    pub fn health_condition(&self) -> HealthCondition {
        self.health_condition
    }

    /// Change the household size, resetting every age to the default.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `count` is zero or above
    /// [`MAX_MEMBERS`].
    pub fn set_member_count(&mut self, count: u32) -> Result<()> {
        if count == 0 {
            return Err(Error::invalid_input("household must have at least one member"));
        }
        if count > MAX_MEMBERS {
            return Err(Error::invalid_input(format!(
                "household cannot have more than {MAX_MEMBERS} members, got {count}"
            )));
        }
        self.member_count = count;
        self.ages = vec![self.default_age; count as usize];
        Ok(())
    }

    /// Set the age of the member at `index` (zero-based).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] if `index` is out of range or `age`
    /// is zero.
    pub fn set_age(&mut self, index: usize, age: u32) -> Result<()> {
        if age == 0 {
            return Err(Error::invalid_input("age must be a positive number"));
        }
        let count = self.ages.len();
        let slot = self.ages.get_mut(index).ok_or_else(|| {
            Error::invalid_input(format!(
                "member {} does not exist (household has {count})",
                index + 1
            ))
        })?;
        *slot = age;
        Ok(())
    }

    /// Set the average daily outdoor hours.
    ///
    /// Zero is accepted here; the estimate treats it as invalid.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidInput`] for negative or non-finite hours.
    pub fn set_outdoor_hours(&mut self, hours: f64) -> Result<()> {
        if !hours.is_finite() || hours < 0.0 {
            return Err(Error::invalid_input(format!(
                "outdoor hours must be a non-negative number, got {hours}"
            )));
        }
        self.daily_outdoor_hours = hours;
        Ok(())
    }

    /// Set the reported health condition.
    pub fn set_health_condition(&mut self, condition: HealthCondition) {
        self.health_condition = condition;
    }
}

/// Rates used to turn outdoor hours into a yearly cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModel {
    /// Cost per daily outdoor hour per month.
    pub hourly_rate: f64,
    /// Months counted per year.
    pub months_per_year: u32,
}

impl Default for CostModel {
    fn default() -> Self {
        Self {
            hourly_rate: HOURLY_RATE,
            months_per_year: MONTHS_PER_YEAR,
        }
    }
}

impl From<&EstimateConfig> for CostModel {
    fn from(config: &EstimateConfig) -> Self {
        Self {
            hourly_rate: config.hourly_rate,
            months_per_year: config.months_per_year,
        }
    }
}

impl CostModel {
    /// Yearly cost for the household, or `None` when the inputs are invalid.
    ///
    /// Invalid means no ages were given or the outdoor hours are not
    /// positive.
    #[must_use]
    pub fn yearly_cost(
        &self,
        ages: &[u32],
        daily_outdoor_hours: f64,
        member_count: u32,
    ) -> Option<f64> {
        if ages.is_empty() || daily_outdoor_hours.is_nan() || daily_outdoor_hours <= 0.0 {
            return None;
        }
        let per_person = daily_outdoor_hours * self.hourly_rate * f64::from(self.months_per_year);
        Some(per_person * f64::from(member_count))
    }

    /// Yearly cost for a profile.
    #[must_use]
    pub fn estimate_profile(&self, profile: &HouseholdProfile) -> Option<f64> {
        self.yearly_cost(
            profile.ages(),
            profile.daily_outdoor_hours(),
            profile.member_count(),
        )
    }
}

/// Estimate the yearly household cost with the standard rates.
///
/// Returns `None` when `ages` is empty or `daily_outdoor_hours <= 0`,
/// otherwise `daily_outdoor_hours * 500 * 12 * member_count`.
///
/// # Examples
///
/// ```
/// use airvalue::estimate::estimate;
///
/// assert_eq!(estimate(&[25, 30], 3.0, 2), Some(36_000.0));
/// assert_eq!(estimate(&[], 2.0, 1), None);
/// ```
#[must_use]
pub fn estimate(ages: &[u32], daily_outdoor_hours: f64, member_count: u32) -> Option<f64> {
    CostModel::default().yearly_cost(ages, daily_outdoor_hours, member_count)
}

/// Format an amount with `symbol` and comma thousands separators.
///
/// Whole amounts print without decimals; others are rounded to two places.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn format_cost(amount: f64, symbol: &str) -> String {
    let sign = if amount < 0.0 { "-" } else { "" };
    let cents = (amount.abs() * 100.0).round() as u64;
    let whole = group_thousands(cents / 100);
    match cents % 100 {
        0 => format!("{sign}{symbol}{whole}"),
        frac => format!("{sign}{symbol}{whole}.{frac:02}"),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_estimate_single_member() {
        assert_eq!(estimate(&[25], 2.0, 1), Some(12_000.0));
    }

    #[test]
    fn test_estimate_two_members() {
        assert_eq!(estimate(&[25, 30], 3.0, 2), Some(36_000.0));
    }

    #[test]
    fn test_estimate_no_ages_is_invalid() {
        assert_eq!(estimate(&[], 2.0, 1), None);
    }

    #[test]
    fn test_estimate_zero_hours_is_invalid() {
        assert_eq!(estimate(&[25], 0.0, 1), None);
        assert_eq!(estimate(&[25], -1.5, 1), None);
        assert_eq!(estimate(&[25], f64::NAN, 1), None);
    }

    #[test]
    fn test_estimate_ignores_ages() {
        assert_eq!(estimate(&[1], 2.0, 1), estimate(&[90], 2.0, 1));
    }

    #[test]
    fn test_estimate_fractional_hours() {
        assert_eq!(estimate(&[25], 0.5, 1), Some(3_000.0));
    }

    #[test]
    fn test_cost_model_from_config() {
        let config = EstimateConfig {
            hourly_rate: 100.0,
            months_per_year: 10,
            ..EstimateConfig::default()
        };
        let model = CostModel::from(&config);
        assert_eq!(model.yearly_cost(&[40], 2.0, 3), Some(6_000.0));
    }

    #[test]
    fn test_default_profile() {
        let profile = HouseholdProfile::default();
        assert_eq!(profile.member_count(), 1);
        assert_eq!(profile.ages(), &[25]);
        assert!((profile.daily_outdoor_hours() - 2.0).abs() < f64::EPSILON);
        assert_eq!(profile.health_condition(), HealthCondition::None);
        assert_eq!(CostModel::default().estimate_profile(&profile), Some(12_000.0));
    }

    #[test]
    fn test_set_member_count_resets_ages() {
        let mut profile = HouseholdProfile::default();
        profile.set_age(0, 60).unwrap();

        profile.set_member_count(3).unwrap();
        assert_eq!(profile.member_count(), 3);
        assert_eq!(profile.ages(), &[25, 25, 25]);
    }

    #[test]
    fn test_set_member_count_uses_profile_default_age() {
        let mut profile = HouseholdProfile::with_default_age(40);
        profile.set_member_count(2).unwrap();
        assert_eq!(profile.ages(), &[40, 40]);
    }

    #[test]
    fn test_set_member_count_zero_rejected() {
        let mut profile = HouseholdProfile::default();
        assert!(profile.set_member_count(0).is_err());
        assert_eq!(profile.member_count(), 1);
        assert_eq!(profile.ages().len(), 1);
    }

    #[test]
    fn test_set_member_count_above_cap_rejected() {
        let mut profile = HouseholdProfile::default();
        profile.set_member_count(MAX_MEMBERS).unwrap();
        assert_eq!(profile.ages().len(), MAX_MEMBERS as usize);

        let err = profile.set_member_count(u32::MAX).unwrap_err();
        assert!(matches!(err, Error::InvalidInput { .. }));
        assert_eq!(profile.member_count(), MAX_MEMBERS);
        assert_eq!(profile.ages().len(), MAX_MEMBERS as usize);
    }

    #[test]
    fn test_set_age() {
        let mut profile = HouseholdProfile::default();
        profile.set_member_count(2).unwrap();
        profile.set_age(1, 67).unwrap();
        assert_eq!(profile.ages(), &[25, 67]);
    }

    #[test]
    fn test_set_age_out_of_range() {
        let mut profile = HouseholdProfile::default();
        let err = profile.set_age(3, 30).unwrap_err();
        assert!(err.to_string().contains("member 4"));
    }

    #[test]
    fn test_set_age_zero_rejected() {
        let mut profile = HouseholdProfile::default();
        assert!(profile.set_age(0, 0).is_err());
        assert_eq!(profile.ages(), &[25]);
    }

    #[test]
    fn test_set_outdoor_hours() {
        let mut profile = HouseholdProfile::default();
        profile.set_outdoor_hours(0.0).unwrap();
        assert_eq!(CostModel::default().estimate_profile(&profile), None);

        assert!(profile.set_outdoor_hours(-1.0).is_err());
        assert!(profile.set_outdoor_hours(f64::INFINITY).is_err());
    }

    #[test]
    fn test_health_condition_display() {
        assert_eq!(HealthCondition::None.to_string(), "None");
        assert_eq!(HealthCondition::Asthma.to_string(), "Asthma");
        assert_eq!(HealthCondition::HeartDisease.to_string(), "Heart Disease");
        assert_eq!(HealthCondition::LungDisease.to_string(), "Lung Disease");
    }

    #[test]
    fn test_health_condition_serialization() {
        let json = serde_json::to_string(&HealthCondition::HeartDisease).unwrap();
        assert_eq!(json, "\"Heart Disease\"");

        let parsed: HealthCondition = serde_json::from_str("\"Lung Disease\"").unwrap();
        assert_eq!(parsed, HealthCondition::LungDisease);
    }

    #[test]
    fn test_format_cost() {
        assert_eq!(format_cost(36_000.0, "₹"), "₹36,000");
        assert_eq!(format_cost(12_000.0, "₹"), "₹12,000");
        assert_eq!(format_cost(999.0, "$"), "$999");
        assert_eq!(format_cost(1_234_567.0, "₹"), "₹1,234,567");
        assert_eq!(format_cost(0.0, "₹"), "₹0");
    }

    #[test]
    fn test_format_cost_fraction() {
        assert_eq!(format_cost(1_500.5, "₹"), "₹1,500.50");
        assert_eq!(format_cost(-2_000.0, "₹"), "-₹2,000");
    }
}
