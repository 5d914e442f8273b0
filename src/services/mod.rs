// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod activities;
pub mod auth;
pub mod calculator;
pub mod coach;
pub mod tips;

pub use activities::ActivitiesService;
pub use auth::{AuthError, AuthGate, AuthState};
pub use calculator::calculate;
pub use coach::{CoachError, CoachService, GeminiClient};
pub use tips::generate_tips;
