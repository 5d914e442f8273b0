// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Daily emissions calculator.
//!
//! A fixed set of factor lookups over the typed activity dimensions. Pure
//! and total: every input, however malformed, yields non-negative values.

use crate::models::{Activities, Emissions};

/// Yearly-ish flight budget amortized per month, in kg CO2e per flight.
const KG_PER_FLIGHT: f64 = 500.0;

/// Days a monthly flight count is spread over.
const DAYS_PER_MONTH: f64 = 30.0;

/// Compute the day's emissions from the given activities.
pub fn calculate(activities: &Activities) -> Emissions {
    Emissions {
        transport: transport_kg(activities),
        energy: energy_kg(activities),
        food: food_kg(activities),
    }
}

fn transport_kg(activities: &Activities) -> f64 {
    // Entered as round-trip miles, still doubled.
    let commute = activities.transport().factor() * activities.commute_miles() * 2.0;
    let flights = f64::from(activities.flights()) * KG_PER_FLIGHT / DAYS_PER_MONTH;
    commute + flights
}

fn energy_kg(activities: &Activities) -> f64 {
    activities.home().factor() * activities.heating().factor() * activities.electricity().factor()
}

fn food_kg(activities: &Activities) -> f64 {
    activities.diet().factor() * activities.waste().factor() * activities.meals().factor()
}
