// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! API routes for the signed-in user.

use crate::error::{AppError, Result};
use crate::middleware::auth::CurrentUser;
use crate::models::{Activities, AiFeedback, Emissions, FootprintSummary, Tip};
use crate::services::{calculate, generate_tips, CoachError};
use crate::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// API routes (require a signed-in session).
/// The session middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activities", get(get_activities).put(put_activities))
        .route("/api/footprint", get(get_footprint))
        .route("/api/coach", post(request_coach))
}

// ─── Activities ──────────────────────────────────────────────

async fn get_activities(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<Activities>> {
    Ok(Json(state.activities.load(&user.uid)?))
}

/// Replace the activities record and return the recomputed footprint.
async fn put_activities(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
    payload: std::result::Result<Json<Activities>, JsonRejection>,
) -> Result<Json<FootprintResponse>> {
    let Json(activities) = payload?;

    let service = state.activities.clone();
    let record = activities.clone();
    tokio::task::spawn_blocking(move || service.save(&user.uid, &record))
        .await
        .map_err(|e| AppError::Internal(e.into()))??;
    Ok(Json(FootprintResponse::compute(activities)))
}

// ─── Footprint ───────────────────────────────────────────────

/// Everything the dashboard renders for a day.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct FootprintResponse {
    pub activities: Activities,
    pub emissions: Emissions,
    pub tips: Vec<Tip>,
    pub summary: FootprintSummary,
}

impl FootprintResponse {
    pub fn compute(activities: Activities) -> Self {
        let emissions = calculate(&activities);
        let tips = generate_tips(&activities, &emissions);
        Self {
            summary: emissions.summary(),
            activities,
            emissions,
            tips,
        }
    }
}

async fn get_footprint(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<FootprintResponse>> {
    let activities = state.activities.load(&user.uid)?;
    Ok(Json(FootprintResponse::compute(activities)))
}

// ─── Eco-Coach ───────────────────────────────────────────────

/// Ask the coach about the saved activities.
///
/// Feedback computed from a record that changed (or a session that ended)
/// while the call was in flight is discarded instead of returned.
async fn request_coach(
    State(state): State<Arc<AppState>>,
    Extension(CurrentUser(user)): Extension<CurrentUser>,
) -> Result<Json<AiFeedback>> {
    let (activities, revision) = state.activities.snapshot(&user.uid)?;
    let emissions = calculate(&activities);

    let feedback = state.coach.request_feedback(&activities, &emissions).await?;

    let same_session = state
        .auth
        .current_user()
        .await
        .is_some_and(|current| current.uid == user.uid);
    if !same_session || state.activities.revision(&user.uid) != revision {
        tracing::info!(uid = %user.uid, "Discarding stale Eco-Coach feedback");
        return Err(CoachError::Stale.into());
    }

    Ok(Json(feedback))
}
