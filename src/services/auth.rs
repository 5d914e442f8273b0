// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Local sign-in gate.
//!
//! Stands in for a real identity provider: any non-empty email with a
//! password of six or more characters is accepted, and the resulting user
//! record is kept in the local store. Passwords are neither hashed nor
//! stored. This is not a security boundary.

use crate::models::User;
use crate::store::{self, keys, KeyValueStore, StoreError};
use crate::time_utils::format_utc_iso_millis;
use chrono::Utc;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Minimum accepted password length, in characters.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Session state of the gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// The persisted session has not been read yet.
    Loading,
    Anonymous,
    Authenticated(User),
}

impl AuthState {
    pub fn user(&self) -> Option<&User> {
        match self {
            AuthState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AuthState::Loading => "loading",
            AuthState::Anonymous => "anonymous",
            AuthState::Authenticated(_) => "authenticated",
        }
    }
}

/// Sign-in failures. The messages are shown to the user as is.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Please fill all fields correctly")]
    IncompleteRegistration,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("Password must be at least 6 characters")]
    PasswordTooShort,

    #[error("Failed to save session: {0}")]
    Storage(String),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        AuthError::Storage(err.to_string())
    }
}

/// Holds the single process-wide session.
pub struct AuthGate {
    store: Arc<dyn KeyValueStore>,
    state: RwLock<AuthState>,
}

impl AuthGate {
    /// Create a gate in the loading state. Call [`AuthGate::restore`] once
    /// before serving requests.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            state: RwLock::new(AuthState::Loading),
        }
    }

    /// Read the persisted session, leaving the loading state.
    ///
    /// Only the first call reads the store. A corrupt record is dropped and
    /// the gate starts anonymous.
    pub async fn restore(&self) -> AuthState {
        let mut state = self.state.write().await;
        if *state != AuthState::Loading {
            return state.clone();
        }

        *state = match store::get_json::<User>(self.store.as_ref(), keys::SESSION) {
            Ok(Some(user)) => {
                tracing::info!(uid = %user.uid, "Restored saved session");
                AuthState::Authenticated(user)
            }
            Ok(None) => AuthState::Anonymous,
            Err(e) => {
                tracing::warn!(error = %e, "Discarding unreadable session record");
                if let Err(e) = self.store.remove(keys::SESSION) {
                    tracing::warn!(error = %e, "Failed to remove unreadable session record");
                }
                AuthState::Anonymous
            }
        };

        state.clone()
    }

    pub async fn state(&self) -> AuthState {
        self.state.read().await.clone()
    }

    pub async fn current_user(&self) -> Option<User> {
        self.state.read().await.user().cloned()
    }

    /// Sign in with any non-empty email and a long enough password.
    ///
    /// The display name is the local part of the email.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        if email.is_empty() || !password_long_enough(password) {
            return Err(AuthError::InvalidCredentials);
        }

        let name = User::name_from_email(email).to_string();
        self.start_session(email, name).await
    }

    /// Create a session with a caller-supplied name.
    ///
    /// Nothing checks whether the email was used before; the previous
    /// session, if any, is overwritten.
    pub async fn register(
        &self,
        email: &str,
        password: &str,
        name: &str,
    ) -> Result<User, AuthError> {
        if email.is_empty() || name.is_empty() || !password_long_enough(password) {
            return Err(AuthError::IncompleteRegistration);
        }

        self.start_session(email, name.to_string()).await
    }

    /// Clear the session. Safe to call when already signed out.
    pub async fn logout(&self) {
        let mut state = self.state.write().await;
        if let Some(user) = state.user() {
            tracing::info!(uid = %user.uid, "Signing out");
        }
        *state = AuthState::Anonymous;

        let kv = self.store.clone();
        match tokio::task::spawn_blocking(move || kv.remove(keys::SESSION)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Failed to remove session record"),
            Err(e) => tracing::warn!(error = %e, "Session removal task failed"),
        }
    }

    async fn start_session(&self, email: &str, name: String) -> Result<User, AuthError> {
        let now = Utc::now();
        let user = User {
            uid: now.timestamp_millis().to_string(),
            email: email.to_string(),
            name,
            created_at: format_utc_iso_millis(now),
        };

        let mut state = self.state.write().await;

        // The record must be on disk before the state changes.
        let kv = self.store.clone();
        let record = user.clone();
        tokio::task::spawn_blocking(move || store::set_json(kv.as_ref(), keys::SESSION, &record))
            .await
            .map_err(|e| AuthError::Storage(e.to_string()))??;
        *state = AuthState::Authenticated(user.clone());

        tracing::info!(uid = %user.uid, "Session started");
        Ok(user)
    }
}

fn password_long_enough(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LEN
}
