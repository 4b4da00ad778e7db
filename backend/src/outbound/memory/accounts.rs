//! In-memory `LoginService` over seeded accounts.

use std::sync::RwLock;

use async_trait::async_trait;

use super::{read, write};
use crate::domain::ports::LoginService;
use crate::domain::{AccountStatus, Actor, ActorRole, Error, LoginCredentials, UserId};
use crate::outbound::credentials::{PasswordHashError, StoredAccount, check_account, hash_password};

#[derive(Debug, Clone)]
struct Entry {
    username: String,
    account: StoredAccount,
}

/// Member and administrator accounts with Argon2 password hashes.
#[derive(Debug, Default)]
pub struct MemoryAccounts {
    entries: RwLock<Vec<Entry>>,
}

impl MemoryAccounts {
    /// Register an active account and return its id.
    pub fn register(
        &self,
        username: &str,
        password: &str,
        role: ActorRole,
    ) -> Result<UserId, PasswordHashError> {
        let id = UserId::random();
        let entry = Entry {
            username: username.to_owned(),
            account: StoredAccount {
                actor: Actor::new(id, role),
                password_hash: hash_password(password)?,
                status: AccountStatus::Active,
            },
        };
        write(&self.entries).push(entry);
        Ok(id)
    }

    /// Change a member's status. Returns `false` for unknown ids.
    pub fn set_status(&self, id: UserId, status: AccountStatus) -> bool {
        write(&self.entries)
            .iter_mut()
            .find(|entry| entry.account.actor.id() == id)
            .map(|entry| entry.account.status = status)
            .is_some()
    }

    fn lookup(&self, username: &str) -> Option<StoredAccount> {
        let entries = read(&self.entries);
        entries
            .iter()
            .find(|entry| entry.username == username && entry.account.actor.is_admin())
            .or_else(|| entries.iter().find(|entry| entry.username == username))
            .map(|entry| entry.account.clone())
    }
}

#[async_trait]
impl LoginService for MemoryAccounts {
    async fn authenticate(&self, credentials: &LoginCredentials) -> Result<Actor, Error> {
        check_account(self.lookup(credentials.username()), credentials.password())
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ErrorCode;

    fn credentials(username: &str, password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts(username, password).expect("credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn administrators_shadow_members_with_the_same_name() {
        let accounts = MemoryAccounts::default();
        accounts
            .register("root", "member-pw", ActorRole::Member)
            .expect("member");
        let admin = accounts
            .register("root", "admin-pw", ActorRole::Admin)
            .expect("admin");

        let actor = accounts
            .authenticate(&credentials("root", "admin-pw"))
            .await
            .expect("admin login");
        assert_eq!(actor, Actor::admin(admin));
    }

    #[rstest]
    #[tokio::test]
    async fn suspended_members_cannot_sign_in() {
        let accounts = MemoryAccounts::default();
        let id = accounts
            .register("sam", "pw", ActorRole::Member)
            .expect("member");
        assert!(accounts.set_status(id, AccountStatus::Suspended));

        let err = accounts
            .authenticate(&credentials("sam", "pw"))
            .await
            .expect_err("suspended");
        assert_eq!(err.code(), ErrorCode::Forbidden);
    }
}
