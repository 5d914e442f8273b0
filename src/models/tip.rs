// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Advisory tip shown alongside the emissions breakdown.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// A static reduction tip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Tip {
    /// "General", "Transport", "Energy" or "Food"
    pub category: String,
    pub tip: String,
    /// Qualitative impact, e.g. "~4 kg CO2 reduction/day"
    pub impact: String,
    /// "Easy" or "Medium"
    pub difficulty: String,
}

impl Tip {
    pub fn new(category: &str, tip: &str, impact: &str, difficulty: &str) -> Self {
        Self {
            category: category.to_string(),
            tip: tip.to_string(),
            impact: impact.to_string(),
            difficulty: difficulty.to_string(),
        }
    }
}
