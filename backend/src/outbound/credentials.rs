//! Argon2 password hashing and the account checks shared by login adapters.

use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use tracing::debug;
use uuid::Uuid;

use crate::domain::{AccountStatus, Actor, Error};

pub(crate) const INVALID_CREDENTIALS: &str = "Invalid username or password";
pub(crate) const ACCOUNT_SUSPENDED: &str =
    "Account is suspended. Please contact the Admin to get support.";

/// Raised when a password cannot be hashed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("failed to hash password: {message}")]
pub struct PasswordHashError {
    message: String,
}

/// Hash `password` into a PHC string with a fresh salt.
///
/// # Examples
/// ```
/// use snapmate::outbound::credentials::hash_password;
///
/// let phc = hash_password("hunter2").unwrap();
/// assert!(phc.starts_with("$argon2id$"));
/// ```
pub fn hash_password(password: &str) -> Result<String, PasswordHashError> {
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes()).map_err(|err| {
        PasswordHashError {
            message: err.to_string(),
        }
    })?;
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| PasswordHashError {
            message: err.to_string(),
        })
}

/// Whether `password` matches the PHC string `stored_hash`.
///
/// Malformed hashes never match.
pub fn verify_password(stored_hash: &str, password: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            debug!(error = %err, "stored password hash is malformed");
            false
        }
    }
}

/// Account row as seen by a login adapter.
#[derive(Debug, Clone)]
pub(crate) struct StoredAccount {
    pub actor: Actor,
    pub password_hash: String,
    pub status: AccountStatus,
}

/// Resolve a looked-up account and a candidate password to an actor.
pub(crate) fn check_account(account: Option<StoredAccount>, password: &str) -> Result<Actor, Error> {
    let Some(account) = account else {
        return Err(Error::unauthorized(INVALID_CREDENTIALS));
    };
    if account.status == AccountStatus::Suspended {
        return Err(Error::forbidden(ACCOUNT_SUSPENDED));
    }
    if !verify_password(&account.password_hash, password) {
        return Err(Error::unauthorized(INVALID_CREDENTIALS));
    }
    Ok(account.actor)
}
