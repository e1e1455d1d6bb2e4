//! Air-quality awareness guidance.
//!
//! Static guidance tables: what each AQI band means and how to protect
//! against it, the pollution challenges of a few Indian metros, and general
//! reduction tips.

use std::ops::RangeInclusive;

use serde::Serialize;

/// Guidance for one AQI band.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AqiBand {
    /// Band name, e.g. "Moderate".
    pub level: &'static str,
    /// Lowest AQI in the band.
    pub min: u32,
    /// Highest AQI in the band.
    pub max: u32,
    /// What the band means for health.
    pub health_impact: &'static str,
    /// Behavioral advice.
    pub general_advice: &'static [&'static str],
    /// Protective measures.
    pub protection_measures: &'static [&'static str],
}

impl AqiBand {
    /// The AQI values this band covers.
    #[must_use]
    pub fn range(&self) -> RangeInclusive<u32> {
        self.min..=self.max
    }
}

/// Pollution profile of a region.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegionGuide {
    /// Region name.
    pub region: &'static str,
    /// Main pollution sources.
    pub challenges: &'static [&'static str],
    /// Targeted responses.
    pub solutions: &'static [&'static str],
}

/// A themed group of reduction tips.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TipGroup {
    /// Theme, e.g. "Transportation".
    pub title: &'static str,
    /// The tips.
    pub tips: &'static [&'static str],
}

/// Region shown when none is chosen.
pub const DEFAULT_REGION: &str = "Delhi";

/// AQI bands in ascending order, covering 0..=500 without gaps.
pub static AQI_BANDS: [AqiBand; 6] = [
    AqiBand {
        level: "Good",
        min: 0,
        max: 50,
        health_impact: "Air quality is satisfactory, minimal health risks.",
        general_advice: &[
            "Enjoy outdoor activities",
            "Maintain regular exercise routines",
        ],
        protection_measures: &["Continue normal outdoor activities", "Stay hydrated"],
    },
    AqiBand {
        level: "Moderate",
        min: 51,
        max: 100,
        health_impact: "Some pollutants may affect very sensitive individuals.",
        general_advice: &[
            "Reduce prolonged outdoor exertion",
            "Consider wearing masks in congested areas",
        ],
        protection_measures: &[
            "Use air purifiers indoors",
            "Keep windows closed during peak pollution hours",
        ],
    },
    AqiBand {
        level: "Unhealthy for Sensitive Groups",
        min: 101,
        max: 150,
        health_impact:
            "Higher risk for elderly, children, and those with respiratory conditions.",
        general_advice: &[
            "Minimize outdoor activities",
            "Use high-efficiency masks when outside",
        ],
        protection_measures: &[
            "Use HEPA air purifiers",
            "Create clean air rooms at home",
            "Consult healthcare providers",
        ],
    },
    AqiBand {
        level: "Unhealthy",
        min: 151,
        max: 200,
        health_impact:
            "Everyone may experience health effects. Increased risk of respiratory issues.",
        general_advice: &["Avoid outdoor activities", "Stay indoors with filtered air"],
        protection_measures: &[
            "Use N95 or equivalent masks",
            "Create sealed clean air zones",
            "Use air purifiers with activated carbon filters",
        ],
    },
    AqiBand {
        level: "Very Unhealthy",
        min: 201,
        max: 300,
        health_impact: "Serious health warnings. Entire population at high risk.",
        general_advice: &[
            "Completely avoid outdoor exposure",
            "Use medical-grade respirators",
        ],
        protection_measures: &[
            "Stay in air-conditioned environments",
            "Use highest grade air purification",
            "Seek medical advice if experiencing symptoms",
        ],
    },
    AqiBand {
        level: "Hazardous",
        min: 301,
        max: 500,
        health_impact: "Emergency health alert. Entire population severely affected.",
        general_advice: &[
            "Absolute minimum outdoor exposure",
            "Use highest level of respiratory protection",
        ],
        protection_measures: &[
            "Immediate medical consultation",
            "Evacuate if possible",
            "Use professional-grade respiratory equipment",
        ],
    },
];

/// Regional guides.
pub static REGIONS: [RegionGuide; 3] = [
    RegionGuide {
        region: "Delhi",
        challenges: &[
            "Crop burning in neighboring states",
            "High vehicular emissions",
            "Industrial pollution",
        ],
        solutions: &[
            "Support crop residue management programs",
            "Use public transport or carpooling",
            "Advocate for stricter industrial emission controls",
        ],
    },
    RegionGuide {
        region: "Mumbai",
        challenges: &[
            "Coastal industrial zones",
            "High population density",
            "Construction dust",
        ],
        solutions: &[
            "Support green construction practices",
            "Promote vertical gardens in urban spaces",
            "Advocate for industrial emission monitoring",
        ],
    },
    RegionGuide {
        region: "Bangalore",
        challenges: &[
            "Rapid urbanization",
            "Vehicle congestion",
            "Electronic waste",
        ],
        solutions: &[
            "Promote electric vehicle adoption",
            "Support e-waste recycling initiatives",
            "Develop more green corridors",
        ],
    },
];

/// General reduction tips.
pub static REDUCTION_TIPS: [TipGroup; 3] = [
    TipGroup {
        title: "Transportation",
        tips: &[
            "Use public transport",
            "Carpool or bike",
            "Consider electric vehicles",
        ],
    },
    TipGroup {
        title: "Industrial",
        tips: &[
            "Support green technologies",
            "Advocate for emission controls",
            "Promote renewable energy",
        ],
    },
    TipGroup {
        title: "Personal Action",
        tips: &[
            "Plant trees",
            "Reduce waste",
            "Support environmental initiatives",
        ],
    },
];

/// Band for an AQI reading. Readings above the scale count as hazardous.
#[must_use]
pub fn classify(aqi: u32) -> &'static AqiBand {
    AQI_BANDS
        .iter()
        .find(|band| band.range().contains(&aqi))
        .unwrap_or(&AQI_BANDS[AQI_BANDS.len() - 1])
}

/// Guide for `name`, matched case-insensitively.
#[must_use]
pub fn region(name: &str) -> Option<&'static RegionGuide> {
    REGIONS
        .iter()
        .find(|guide| guide.region.eq_ignore_ascii_case(name.trim()))
}

/// Names of every region with a guide.
pub fn region_names() -> impl Iterator<Item = &'static str> {
    REGIONS.iter().map(|guide| guide.region)
}
