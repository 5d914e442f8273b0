// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! User model for the local session record.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// The signed-in user, persisted as the session record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct User {
    /// Opaque identifier (millisecond timestamp at creation)
    pub uid: String,
    /// Email address, the effective identity key
    pub email: String,
    /// Display name
    pub name: String,
    /// When the record was created (ISO 8601)
    pub created_at: String,
}

impl User {
    /// Local part of an email address, used as the default display name.
    pub fn name_from_email(email: &str) -> &str {
        email.split('@').next().unwrap_or(email)
    }
}
