// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Self-reported daily activities and their typed categorical dimensions.
//!
//! The persisted record keeps every field as an optional string, matching
//! what the front-end form submits. The calculator never looks at those
//! strings directly: each categorical field is parsed into an exhaustive
//! enum whose `from_key` applies the default for that dimension.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Transport method key assumed when none was selected.
pub const DEFAULT_TRANSPORT_KEY: &str = "car_gas";

/// Sparse activities record, stored per user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct Activities {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_method: Option<String>,
    /// Round-trip commute distance in miles
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commute_distance: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flights_month: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub home_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heating_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub electricity_source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diet_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meal_ratio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food_waste: Option<String>,
}

impl Activities {
    /// Raw transport key, falling back to the gas car.
    pub fn transport_key(&self) -> &str {
        non_empty(&self.transport_method).unwrap_or(DEFAULT_TRANSPORT_KEY)
    }

    pub fn transport(&self) -> TransportMethod {
        TransportMethod::from_key(non_empty(&self.transport_method))
    }

    /// Round-trip commute miles. Malformed or negative input counts as 0.
    pub fn commute_miles(&self) -> f64 {
        parse_miles(non_empty(&self.commute_distance))
    }

    /// Flights taken this month. Decimal input truncates toward zero.
    pub fn flights(&self) -> u32 {
        parse_count(non_empty(&self.flights_month))
    }

    pub fn home(&self) -> HomeType {
        HomeType::from_key(non_empty(&self.home_type))
    }

    pub fn heating(&self) -> HeatingType {
        HeatingType::from_key(non_empty(&self.heating_type))
    }

    pub fn electricity(&self) -> ElectricitySource {
        ElectricitySource::from_key(non_empty(&self.electricity_source))
    }

    pub fn diet(&self) -> DietType {
        DietType::from_key(non_empty(&self.diet_type))
    }

    pub fn meals(&self) -> MealRatio {
        MealRatio::from_key(non_empty(&self.meal_ratio))
    }

    pub fn waste(&self) -> FoodWaste {
        FoodWaste::from_key(non_empty(&self.food_waste))
    }
}

/// Empty strings are what the form sends for a cleared field.
fn non_empty(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn parse_miles(raw: Option<&str>) -> f64 {
    raw.and_then(|s| s.parse::<f64>().ok())
        .filter(|v| v.is_finite() && *v > 0.0)
        .unwrap_or(0.0)
}

fn parse_count(raw: Option<&str>) -> u32 {
    let Some(raw) = raw else {
        return 0;
    };

    if let Ok(count) = raw.parse::<u32>() {
        return count;
    }

    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 1.0)
        .map(|v| v.trunc().min(u32::MAX as f64) as u32)
        .unwrap_or(0)
}

/// Generates a categorical dimension enum with key parsing and factors.
///
/// The first arm after `default` names the variant used for absent or
/// unrecognized keys.
macro_rules! dimension {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident,
        { $($variant:ident => ($key:literal, $factor:expr)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Parse a stored key, applying this dimension's default.
            pub fn from_key(key: Option<&str>) -> Self {
                match key {
                    $(Some($key) => $name::$variant,)+
                    _ => $name::$default,
                }
            }

            pub fn key(self) -> &'static str {
                match self {
                    $($name::$variant => $key),+
                }
            }

            pub fn factor(self) -> f64 {
                match self {
                    $($name::$variant => $factor),+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }
    };
}

dimension! {
    /// Commute mode, factor in kg CO2e per mile.
    TransportMethod, default = CarGas, {
        CarGas => ("car_gas", 0.411),
        CarHybrid => ("car_hybrid", 0.25),
        CarElectric => ("car_electric", 0.189),
        PublicTransit => ("public_transit", 0.089),
        Walking => ("walking", 0.0),
        Cycling => ("cycling", 0.0),
    }
}

dimension! {
    /// Dwelling type, factor is the base energy use in kg CO2e per day.
    HomeType, default = SmallHouse, {
        Apartment => ("apartment", 15.0),
        SmallHouse => ("small_house", 25.0),
        LargeHouse => ("large_house", 40.0),
    }
}

dimension! {
    /// Primary heating, multiplier on the home base.
    HeatingType, default = Gas, {
        Gas => ("gas", 1.2),
        Electric => ("electric", 1.0),
        HeatPump => ("heat_pump", 0.7),
    }
}

dimension! {
    /// Electricity supply mix, multiplier on the home base.
    ElectricitySource, default = Grid, {
        Grid => ("grid", 1.0),
        SomeRenewable => ("some_renewable", 0.7),
        MostlyRenewable => ("mostly_renewable", 0.4),
    }
}

dimension! {
    /// Diet, factor is the base food footprint in kg CO2e per day.
    DietType, default = ModerateMeat, {
        MeatHeavy => ("meat_heavy", 7.2),
        ModerateMeat => ("moderate_meat", 5.6),
        Vegetarian => ("vegetarian", 3.8),
        Vegan => ("vegan", 2.9),
    }
}

dimension! {
    /// Share of meals eaten out, multiplier on the diet base.
    MealRatio, default = MostlyHome, {
        MostlyOut => ("mostly_out", 1.4),
        HalfHalf => ("half_half", 1.2),
        MostlyHome => ("mostly_home", 1.0),
    }
}

dimension! {
    /// Household food waste, multiplier on the diet base.
    FoodWaste, default = Medium, {
        High => ("high", 1.3),
        Medium => ("medium", 1.0),
        Low => ("low", 0.8),
    }
}
