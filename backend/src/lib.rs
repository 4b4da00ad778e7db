//! SnapMate backend library.
//!
//! - [`domain`]: posts, comments, reactions, feed rules and notifications.
//! - [`inbound`]: the REST adapter.
//! - [`outbound`]: PostgreSQL and in-memory adapters behind the domain ports.
//! - [`middleware`]: request tracing.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
