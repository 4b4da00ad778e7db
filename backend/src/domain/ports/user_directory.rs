//! Driven port resolving user ids to display profiles.

use async_trait::async_trait;

use crate::domain::{UserId, UserProfile};

use super::define_port_error;

define_port_error! {
    /// Errors raised by user directory adapters.
    pub enum UserDirectoryError {
        /// Directory connection could not be established.
        Connection { message: String } => "user directory connection failed: {message}",
        /// Lookup failed during execution.
        Query { message: String } => "user directory query failed: {message}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserDirectory: Send + Sync {
    /// Profile for one user, `None` when unknown.
    async fn find_profile(&self, id: UserId) -> Result<Option<UserProfile>, UserDirectoryError>;

    /// Profiles for every known id in `ids`. Unknown ids are skipped.
    async fn find_profiles(&self, ids: &[UserId])
    -> Result<Vec<UserProfile>, UserDirectoryError>;
}
