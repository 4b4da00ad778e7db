//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Adapters translate between Diesel rows and domain types and contain no
//! business rules. Row structs (`models.rs`) and table definitions
//! (`schema.rs`) stay private to this module. Connections come from a `bb8`
//! pool through `diesel-async`.
//!
//! # Example
//!
//! ```no_run
//! use snapmate::outbound::persistence::{DbPool, DieselPostRepository, PoolConfig};
//!
//! # async fn wire() -> Result<(), Box<dyn std::error::Error>> {
//! let pool = DbPool::new(PoolConfig::new("postgres://localhost/snapmate")).await?;
//! let posts = DieselPostRepository::new(pool);
//! # let _ = posts;
//! # Ok(())
//! # }
//! ```

mod diesel_basic_error_mapping;
mod diesel_login_service;
mod diesel_notification_inbox;
mod diesel_post_repository;
mod diesel_relationship_store;
mod diesel_user_directory;
mod migrations;
mod models;
mod pool;
mod schema;

pub use diesel_login_service::DieselLoginService;
pub use diesel_notification_inbox::DieselNotificationInbox;
pub use diesel_post_repository::DieselPostRepository;
pub use diesel_relationship_store::DieselRelationshipStore;
pub use diesel_user_directory::DieselUserDirectory;
pub use migrations::{MigrationError, run_pending_migrations};
pub use pool::{DbPool, PoolConfig, PoolError};
