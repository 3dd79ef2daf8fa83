//! In-memory user registry
//!
//! Rebuilt from seed data on every start; only the records a user writes
//! are persisted (see `labnote_common::storage`).

use labnote_common::storage::validate_user_id;
use labnote_common::UserProfile;
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("User already exists: {0}")]
    AlreadyExists(String),

    #[error(transparent)]
    InvalidUserId(labnote_common::Error),
}

/// Mapping from user id to profile
#[derive(Default)]
pub struct Lab {
    users: RwLock<HashMap<String, UserProfile>>,
}

impl Lab {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from seed profiles, skipping invalid or duplicate ids
    pub async fn with_seed(seed: Vec<UserProfile>) -> Self {
        let lab = Self::new();
        for profile in seed {
            let user_id = profile.user_id.clone();
            match lab.create_user(profile).await {
                Ok(_) => tracing::info!(user_id = %user_id, "Seeded user"),
                Err(e) => tracing::warn!(user_id = %user_id, "Skipping seed user: {}", e),
            }
        }
        lab
    }

    pub async fn create_user(&self, profile: UserProfile) -> Result<UserProfile, RegistryError> {
        validate_user_id(&profile.user_id).map_err(RegistryError::InvalidUserId)?;

        let mut users = self.users.write().await;
        if users.contains_key(&profile.user_id) {
            return Err(RegistryError::AlreadyExists(profile.user_id));
        }
        users.insert(profile.user_id.clone(), profile.clone());
        Ok(profile)
    }

    pub async fn get_user(&self, user_id: &str) -> Option<UserProfile> {
        self.users.read().await.get(user_id).cloned()
    }

    /// All users, sorted by id
    pub async fn list_users(&self) -> Vec<UserProfile> {
        let mut users: Vec<UserProfile> = self.users.read().await.values().cloned().collect();
        users.sort_by(|a, b| a.user_id.cmp(&b.user_id));
        users
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}
