//! Outbound adapters implementing domain ports.
//!
//! - **persistence**: PostgreSQL-backed adapters using Diesel ORM.
//! - **memory**: in-process adapters for running without a database and for
//!   behavioural tests.
//! - **credentials**: Argon2 hashing shared by the login adapters.
//!
//! Adapters translate between domain types and storage representations and
//! contain no business rules.

pub mod credentials;
pub mod memory;
pub mod persistence;
