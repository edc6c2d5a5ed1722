//! Translation of pool and Diesel failures into [`UserPersistenceError`].

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::UserPersistenceError;

use super::pool::PoolError;

pub(super) fn map_pool_error(error: PoolError) -> UserPersistenceError {
    let message = match error {
        PoolError::Checkout { message } | PoolError::Build { message } => message,
    };
    UserPersistenceError::connection(message)
}

/// Map a Diesel error raised while touching the users table.
///
/// `email` names the address being written, so a unique violation can be
/// reported as a duplicate; reads pass `None`.
pub(super) fn map_diesel_error(error: DieselError, email: Option<&str>) -> UserPersistenceError {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match (error, email) {
        (DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _), Some(email)) => {
            UserPersistenceError::duplicate_email(email)
        }
        (DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _), _) => {
            UserPersistenceError::connection("database connection error")
        }
        (DieselError::NotFound, _) => UserPersistenceError::query("record not found"),
        (DieselError::QueryBuilderError(_), _) => {
            UserPersistenceError::query("database query error")
        }
        _ => UserPersistenceError::query("database error"),
    }
}
