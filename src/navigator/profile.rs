//! Session/Profile Store
//!
//! Reads and writes the single `learningUser` record through a [`KeyValueStore`].
//! This is the only place profile changes become durable.

use super::goals::GoalSet;
use super::storage::{KeyValueStore, StoreError};
use super::types::UserProfile;
use std::sync::Arc;

/// Key the profile is stored under
pub const PROFILE_KEY: &str = "learningUser";

#[derive(Clone)]
pub struct ProfileStore {
    kv: Arc<dyn KeyValueStore>,
}

impl ProfileStore {
    pub fn new(kv: Arc<dyn KeyValueStore>) -> Self {
        Self { kv }
    }

    /// Load the stored profile.
    ///
    /// Absent → `None`. A payload that does not decode into a valid profile is
    /// deleted and also reported as `None`. Only backend failures are errors.
    pub fn load(&self) -> Result<Option<UserProfile>, StoreError> {
        let raw = match self.kv.get(PROFILE_KEY)? {
            Some(raw) => raw,
            None => return Ok(None),
        };

        match serde_json::from_str::<UserProfile>(&raw) {
            Ok(profile) if profile.is_valid() => Ok(Some(profile)),
            Ok(_) => {
                log::warn!("Stored profile has invalid stats, discarding it");
                self.kv.remove(PROFILE_KEY)?;
                Ok(None)
            }
            Err(e) => {
                log::warn!("Error parsing saved profile, discarding it: {}", e);
                self.kv.remove(PROFILE_KEY)?;
                Ok(None)
            }
        }
    }

    /// Overwrite the stored profile entirely
    pub fn save(&self, profile: &UserProfile) -> Result<(), StoreError> {
        let json = serde_json::to_string(profile)?;
        self.kv.set(PROFILE_KEY, &json)?;
        log::debug!("Saved profile {}", profile.id);
        Ok(())
    }

    /// Delete the stored profile (sign-out)
    pub fn clear(&self) -> Result<(), StoreError> {
        self.kv.remove(PROFILE_KEY)?;
        log::debug!("Cleared stored profile");
        Ok(())
    }

    /// Persist a new goal set and return the updated profile
    pub fn update_goals(&self, profile: &UserProfile, goals: GoalSet) -> Result<UserProfile, StoreError> {
        let updated = UserProfile {
            learning_goals: goals,
            ..profile.clone()
        };
        self.save(&updated)?;
        Ok(updated)
    }

    /// Credit one completed path and its hours, then persist
    pub fn record_completion(&self, profile: &UserProfile, hours: f64) -> Result<UserProfile, StoreError> {
        let updated = UserProfile {
            completed_paths: profile.completed_paths.saturating_add(1),
            total_hours: profile.total_hours + hours.max(0.0),
            ..profile.clone()
        };
        self.save(&updated)?;
        Ok(updated)
    }
}
