//! In-memory `UserDirectory`.

use std::sync::RwLock;

use async_trait::async_trait;

use super::{read, write};
use crate::domain::ports::{UserDirectory, UserDirectoryError};
use crate::domain::{UserId, UserProfile};

/// Public profiles keyed by user id.
#[derive(Debug, Default)]
pub struct MemoryUserDirectory {
    profiles: RwLock<Vec<UserProfile>>,
}

impl MemoryUserDirectory {
    /// Add or replace a profile.
    pub fn add_profile(&self, profile: UserProfile) {
        let mut profiles = write(&self.profiles);
        profiles.retain(|stored| stored.id != profile.id);
        profiles.push(profile);
    }
}

#[async_trait]
impl UserDirectory for MemoryUserDirectory {
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, UserDirectoryError> {
        Ok(read(&self.profiles)
            .iter()
            .find(|profile| profile.id == id)
            .cloned())
    }

    async fn find_profiles(&self, ids: &[UserId]) -> Result<Vec<UserProfile>, UserDirectoryError> {
        Ok(read(&self.profiles)
            .iter()
            .filter(|profile| ids.contains(&profile.id))
            .cloned()
            .collect())
    }
}
