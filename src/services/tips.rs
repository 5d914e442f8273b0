// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Rule-based tip selection.
//!
//! Rules run in a fixed order and each appends at most one tip; the result
//! is cut to the first [`MAX_TIPS`]. A later, more relevant rule can lose its
//! slot to earlier ones. That ordering is part of the contract.

use crate::models::activities::{FoodWaste, HeatingType};
use crate::models::{Activities, Emissions, Tip};

/// Maximum number of tips returned.
pub const MAX_TIPS: usize = 3;

/// Tips shown before anything has been calculated.
pub fn onboarding_tips() -> Vec<Tip> {
    vec![
        Tip::new(
            "General",
            "Start by filling out your daily activities to see your footprint!",
            "High",
            "Easy",
        ),
        Tip::new(
            "General",
            "Explore different categories to understand your environmental impact.",
            "Medium",
            "Easy",
        ),
        Tip::new(
            "General",
            "Small changes can make a big difference over time.",
            "High",
            "Easy",
        ),
    ]
}

/// Select up to three tips for the given day.
pub fn generate_tips(activities: &Activities, emissions: &Emissions) -> Vec<Tip> {
    if emissions.is_empty() {
        return onboarding_tips();
    }

    let total = emissions.total();
    let dominant = |value: f64| value > total / 3.0;
    let mut tips = Vec::with_capacity(MAX_TIPS + 4);

    if dominant(emissions.transport) {
        tips.push(Tip::new(
            "Transport",
            "Try carpooling or using public transit once a week.",
            "~4 kg CO2 reduction/day",
            "Easy",
        ));
    }

    if activities.transport_key().contains("car") {
        tips.push(Tip::new(
            "Transport",
            "Combine errands into one trip to reduce driving time.",
            "1-3 kg CO2 reduction/trip",
            "Easy",
        ));
    }

    if dominant(emissions.energy) {
        tips.push(Tip::new(
            "Energy",
            "Lower your thermostat by 2°F (1°C) in winter.",
            "~1.5 kg CO2 reduction/day",
            "Easy",
        ));
    }

    if activities.heating() != HeatingType::HeatPump {
        tips.push(Tip::new(
            "Energy",
            "Unplug electronics when not in use to avoid phantom power.",
            "0.5-1 kg CO2 reduction/day",
            "Medium",
        ));
    }

    if dominant(emissions.food) {
        tips.push(Tip::new(
            "Food",
            "Incorporate one meat-free day into your week.",
            "~1.8 kg CO2 reduction/day",
            "Medium",
        ));
    }

    if activities.waste() == FoodWaste::High {
        tips.push(Tip::new(
            "Food",
            "Plan your meals for the week to buy only what you need.",
            "1-2 kg CO2 reduction/day",
            "Medium",
        ));
    }

    if tips.len() < MAX_TIPS {
        tips.push(Tip::new(
            "General",
            "Switch to LED light bulbs.",
            "High",
            "Easy",
        ));
    }
    if tips.len() < MAX_TIPS {
        tips.push(Tip::new(
            "General",
            "Use reusable bags, bottles, and containers.",
            "Medium",
            "Easy",
        ));
    }

    tips.truncate(MAX_TIPS);
    tips
}
