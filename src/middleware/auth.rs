// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session gate middleware.

use crate::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

use crate::error::AppError;

/// Signed-in user, inserted as a request extension for protected routes.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

/// Middleware that requires an authenticated session.
///
/// There is a single process-wide session, so no token is involved: the
/// request is let through whenever someone is signed in.
pub async fn require_auth(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(user) = state.auth.current_user().await else {
        return AppError::Unauthorized.into_response();
    };

    request.extensions_mut().insert(CurrentUser(user));
    next.run(request).await
}
