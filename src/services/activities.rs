// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Per-user activities persistence.
//!
//! Each save bumps a per-user revision so that slow consumers (the coach)
//! can tell whether the record changed underneath them.

use crate::models::Activities;
use crate::store::{self, keys, KeyValueStore, StoreError};
use dashmap::DashMap;
use std::sync::Arc;

/// Owner of the activities record for each user.
#[derive(Clone)]
pub struct ActivitiesService {
    store: Arc<dyn KeyValueStore>,
    revisions: Arc<DashMap<String, u64>>,
}

impl ActivitiesService {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            revisions: Arc::new(DashMap::new()),
        }
    }

    /// Load a user's activities. Missing or unreadable records load as empty.
    pub fn load(&self, uid: &str) -> Result<Activities, StoreError> {
        match store::get_json(self.store.as_ref(), &keys::activities(uid)) {
            Ok(activities) => Ok(activities.unwrap_or_default()),
            Err(StoreError::Corrupt { key, reason }) => {
                tracing::warn!(key = %key, reason = %reason, "Ignoring unreadable activities record");
                Ok(Activities::default())
            }
            Err(e) => Err(e),
        }
    }

    /// Load together with the revision the record was read at.
    pub fn snapshot(&self, uid: &str) -> Result<(Activities, u64), StoreError> {
        let revision = self.revision(uid);
        Ok((self.load(uid)?, revision))
    }

    /// Replace a user's activities and bump the revision.
    pub fn save(&self, uid: &str, activities: &Activities) -> Result<u64, StoreError> {
        store::set_json(self.store.as_ref(), &keys::activities(uid), activities)?;

        let mut revision = self.revisions.entry(uid.to_string()).or_insert(0);
        *revision += 1;
        tracing::debug!(uid, revision = *revision, "Saved activities");
        Ok(*revision)
    }

    /// Current revision; 0 until the first save in this process.
    pub fn revision(&self, uid: &str) -> u64 {
        self.revisions.get(uid).map(|r| *r).unwrap_or(0)
    }
}
