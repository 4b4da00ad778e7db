//! Driving port for login.
//!
//! Inbound adapters call it to turn credentials into an [`Actor`] without
//! knowing how accounts are stored, so handler tests can use a mock.

use async_trait::async_trait;

use crate::domain::{Actor, Error, LoginCredentials};

/// Domain use-case port for authentication.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LoginService: Send + Sync {
    /// Validate credentials and return the signed-in actor.
    ///
    /// Administrator accounts are matched before member accounts. Unknown
    /// usernames and wrong passwords yield
    /// [`crate::domain::ErrorCode::Unauthorized`]; suspended members yield
    /// [`crate::domain::ErrorCode::Forbidden`].
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Actor, Error>;
}
