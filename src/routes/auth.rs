// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local sign-in routes.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::error::Result;
use crate::models::User;
use crate::services::auth::{AuthError, MIN_PASSWORD_LEN};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/session", get(session))
        .route("/auth/login", post(login))
        .route("/auth/register", post(register))
        .route("/auth/logout", post(logout))
}

/// Current session as seen by the front-end.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct SessionResponse {
    /// "loading", "anonymous" or "authenticated"
    pub state: String,
    pub user: Option<User>,
}

async fn session(State(state): State<Arc<AppState>>) -> Json<SessionResponse> {
    let current = state.auth.state().await;
    Json(SessionResponse {
        state: current.label().to_string(),
        user: current.user().cloned(),
    })
}

/// Missing fields deserialize as empty so the gate reports them.
#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

async fn login(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(req) = payload?;
    let user = state.auth.login(&req.email, &req.password).await?;
    Ok(Json(user))
}

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
    #[serde(default)]
    name: String,
    /// Second copy of the password from the sign-up form
    #[serde(default)]
    confirm_password: Option<String>,
}

impl RegisterRequest {
    /// Form-level checks that run before the gate's own validation.
    fn check_form(&self) -> std::result::Result<(), AuthError> {
        if self
            .confirm_password
            .as_ref()
            .is_some_and(|confirm| *confirm != self.password)
        {
            return Err(AuthError::PasswordMismatch);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AuthError::PasswordTooShort);
        }
        Ok(())
    }
}

async fn register(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<User>> {
    let Json(req) = payload?;
    req.check_form()?;
    let user = state
        .auth
        .register(&req.email, &req.password, &req.name)
        .await?;
    Ok(Json(user))
}

async fn logout(State(state): State<Arc<AppState>>) -> StatusCode {
    state.auth.logout().await;
    StatusCode::NO_CONTENT
}
