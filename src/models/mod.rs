// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod activities;
pub mod emissions;
pub mod feedback;
pub mod tip;
pub mod user;

pub use activities::Activities;
pub use emissions::{Emissions, FootprintLevel, FootprintSummary};
pub use feedback::{AiFeedback, CoachTip, ImpactArea};
pub use tip::Tip;
pub use user::User;
