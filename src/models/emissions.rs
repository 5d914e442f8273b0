// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Computed emissions and the dashboard summary derived from them.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Average daily household footprint used for comparison (kg CO2e).
pub const AVERAGE_DAILY_KG: f64 = 44.0;

/// Daily emissions per category, in kg CO2e. Every field is >= 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Emissions {
    pub transport: f64,
    pub energy: f64,
    pub food: f64,
}

impl Emissions {
    pub fn total(&self) -> f64 {
        self.transport + self.energy + self.food
    }

    /// True when nothing has been computed yet (total is zero).
    pub fn is_empty(&self) -> bool {
        self.total() <= 0.0
    }

    pub fn summary(&self) -> FootprintSummary {
        FootprintSummary::from_emissions(self)
    }
}

/// Qualitative impact band for a daily total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub enum FootprintLevel {
    #[serde(rename = "Not Calculated")]
    NotCalculated,
    Excellent,
    Good,
    Average,
    High,
}

impl FootprintLevel {
    pub fn from_total(total: f64) -> Self {
        if total <= 0.0 {
            FootprintLevel::NotCalculated
        } else if total < 20.0 {
            FootprintLevel::Excellent
        } else if total < 35.0 {
            FootprintLevel::Good
        } else if total < 50.0 {
            FootprintLevel::Average
        } else {
            FootprintLevel::High
        }
    }
}

/// One bar of the emissions breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct BreakdownEntry {
    pub name: String,
    /// kg CO2e, rounded to one decimal
    pub value: f64,
    /// Share of the total, 0-100
    pub share_percent: f64,
}

/// Display-ready summary of a day's emissions.
///
/// All values are rounded to one decimal place; the underlying
/// [`Emissions`] stay unrounded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FootprintSummary {
    pub total: f64,
    pub level: FootprintLevel,
    /// Difference from the average day; negative is better. None until
    /// anything has been calculated.
    pub vs_average: Option<f64>,
    pub breakdown: Vec<BreakdownEntry>,
}

impl FootprintSummary {
    pub fn from_emissions(emissions: &Emissions) -> Self {
        let total = emissions.total();
        let share = |value: f64| {
            if total > 0.0 {
                round1(value / total * 100.0)
            } else {
                0.0
            }
        };

        let breakdown = [
            ("Transport", emissions.transport),
            ("Energy", emissions.energy),
            ("Food", emissions.food),
        ]
        .into_iter()
        .map(|(name, value)| BreakdownEntry {
            name: name.to_string(),
            value: round1(value),
            share_percent: share(value),
        })
        .collect();

        Self {
            total: round1(total),
            level: FootprintLevel::from_total(total),
            vs_average: (total > 0.0).then(|| round1(total - AVERAGE_DAILY_KG)),
            breakdown,
        }
    }
}

/// Round to one decimal place for display.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_bands() {
        assert_eq!(FootprintLevel::from_total(0.0), FootprintLevel::NotCalculated);
        assert_eq!(FootprintLevel::from_total(19.9), FootprintLevel::Excellent);
        assert_eq!(FootprintLevel::from_total(20.0), FootprintLevel::Good);
        assert_eq!(FootprintLevel::from_total(34.9), FootprintLevel::Good);
        assert_eq!(FootprintLevel::from_total(35.0), FootprintLevel::Average);
        assert_eq!(FootprintLevel::from_total(49.9), FootprintLevel::Average);
        assert_eq!(FootprintLevel::from_total(50.0), FootprintLevel::High);
    }

    #[test]
    fn test_summary_of_default_day() {
        let emissions = Emissions {
            transport: 0.0,
            energy: 30.0,
            food: 5.6,
        };
        let summary = emissions.summary();

        assert_eq!(summary.total, 35.6);
        assert_eq!(summary.level, FootprintLevel::Average);
        assert_eq!(summary.vs_average, Some(-8.4));
        assert_eq!(summary.breakdown.len(), 3);
        assert_eq!(summary.breakdown[0].name, "Transport");
        assert_eq!(summary.breakdown[0].share_percent, 0.0);
        assert_eq!(summary.breakdown[1].share_percent, 84.3);
        assert_eq!(summary.breakdown[2].share_percent, 15.7);
    }

    #[test]
    fn test_summary_of_empty_day() {
        let summary = Emissions::default().summary();

        assert_eq!(summary.total, 0.0);
        assert_eq!(summary.level, FootprintLevel::NotCalculated);
        assert!(summary.vs_average.is_none());
        assert!(summary.breakdown.iter().all(|b| b.share_percent == 0.0));
    }

    #[test]
    fn test_level_serializes_as_label() {
        let json = serde_json::to_string(&FootprintLevel::NotCalculated).unwrap();
        assert_eq!(json, r#""Not Calculated""#);
    }
}
