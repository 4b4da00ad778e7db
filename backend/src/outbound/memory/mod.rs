//! In-process adapters backed by locked collections.
//!
//! These implement the same ports as the Diesel adapters so the server can
//! start without PostgreSQL and behavioural tests can seed state directly.
//! Data lives only as long as the adapter.

mod accounts;
mod inbox;
mod posts;
mod relationships;
mod users;

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

pub use accounts::MemoryAccounts;
pub use inbox::MemoryNotificationInbox;
pub use posts::MemoryPostRepository;
pub use relationships::MemoryRelationshipStore;
pub use users::MemoryUserDirectory;

// Writers never leave a collection half-updated, so poisoned guards are reused.
fn read<T>(lock: &RwLock<T>) -> RwLockReadGuard<'_, T> {
    lock.read().unwrap_or_else(PoisonError::into_inner)
}

fn write<T>(lock: &RwLock<T>) -> RwLockWriteGuard<'_, T> {
    lock.write().unwrap_or_else(PoisonError::into_inner)
}
