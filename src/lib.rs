// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! EcoTrace: estimate a household's daily carbon footprint
//!
//! This crate provides the emissions calculator, tip rules, local sign-in
//! gate and AI coach client, plus a local JSON API for the browser
//! front-end.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use config::Config;
use services::{ActivitiesService, AuthGate, CoachService};
use std::sync::Arc;
use store::KeyValueStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub auth: AuthGate,
    pub activities: ActivitiesService,
    pub coach: CoachService,
}

impl AppState {
    /// Wire the services around one store. The auth gate starts in the
    /// loading state; call `auth.restore()` before serving.
    pub fn new(config: Config, store: Arc<dyn KeyValueStore>, coach: CoachService) -> Self {
        Self {
            config,
            auth: AuthGate::new(store.clone()),
            activities: ActivitiesService::new(store),
            coach,
        }
    }
}
