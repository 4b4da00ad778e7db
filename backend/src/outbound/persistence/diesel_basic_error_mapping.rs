//! Diesel error mapping shared by the port adapters.
//!
//! Every port error enum has `Connection` and `Query` variants; these helpers
//! take the matching constructors so each adapter maps failures the same way.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;

/// Map a pool failure through the adapter's connection constructor.
pub fn map_basic_pool_error<E, C>(error: PoolError, connection: C) -> E
where
    C: FnOnce(String) -> E,
{
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    connection(message)
}

/// Map a Diesel failure through the adapter's query and connection
/// constructors.
///
/// Closed connections are connection errors; everything else is a query
/// error with a redacted message. Details go to the debug log.
pub fn map_basic_diesel_error<E, Q, C>(error: DieselError, query: Q, connection: C) -> E
where
    Q: Fn(&'static str) -> E,
    C: Fn(&'static str) -> E,
{
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => query("record not found"),
        DieselError::QueryBuilderError(_) => query("database query error"),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            connection("database connection error")
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
            query("record already exists")
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            query("referenced record does not exist")
        }
        _ => query("database error"),
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::domain::ports::PostRepositoryError;

    fn map(error: DieselError) -> PostRepositoryError {
        map_basic_diesel_error(
            error,
            PostRepositoryError::query,
            PostRepositoryError::connection,
        )
    }

    #[rstest]
    fn not_found_is_a_query_error() {
        assert_eq!(
            map(DieselError::NotFound),
            PostRepositoryError::query("record not found")
        );
    }

    #[rstest]
    fn closed_connections_are_connection_errors() {
        let error = DieselError::DatabaseError(
            DatabaseErrorKind::ClosedConnection,
            Box::new(String::from("server closed the connection")),
        );
        assert!(matches!(map(error), PostRepositoryError::Connection { .. }));
    }

    #[rstest]
    fn pool_messages_are_preserved() {
        let mapped: PostRepositoryError =
            map_basic_pool_error(PoolError::checkout("timed out"), |message| {
                PostRepositoryError::connection(message)
            });
        assert_eq!(mapped, PostRepositoryError::connection("timed out"));
    }
}
