//! Shared mapping from pool and Diesel failures to port errors.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use crate::domain::ports::{
    AssetRepositoryError, FavoriteRepositoryError, GameMasterRepositoryError,
    HistoryRepositoryError, NavigationButtonRepositoryError, StickerRepositoryError,
    UserRepositoryError,
};

use super::pool::PoolError;

/// Port errors that distinguish connectivity from query failures.
pub(crate) trait PersistenceError: Sized {
    fn connection_failed(message: String) -> Self;
    fn query_failed(message: String) -> Self;
}

macro_rules! impl_persistence_error {
    ($($error:ty),* $(,)?) => {
        $(
            impl PersistenceError for $error {
                fn connection_failed(message: String) -> Self {
                    Self::connection(message)
                }

                fn query_failed(message: String) -> Self {
                    Self::query(message)
                }
            }
        )*
    };
}

impl_persistence_error!(
    AssetRepositoryError,
    FavoriteRepositoryError,
    GameMasterRepositoryError,
    HistoryRepositoryError,
    NavigationButtonRepositoryError,
    StickerRepositoryError,
    UserRepositoryError,
);

pub(crate) fn map_pool_error<E: PersistenceError>(error: PoolError) -> E {
    E::connection_failed(error.into_message())
}

pub(crate) fn map_diesel_error<E: PersistenceError>(error: DieselError) -> E {
    match &error {
        DieselError::DatabaseError(kind, info) => {
            debug!(?kind, message = info.message(), "diesel operation failed");
        }
        other => debug!(error = %other, "diesel operation failed"),
    }

    match error {
        DieselError::NotFound => E::query_failed("record not found".to_owned()),
        DieselError::QueryBuilderError(_) => E::query_failed("database query error".to_owned()),
        DieselError::DatabaseError(DatabaseErrorKind::ClosedConnection, _) => {
            E::connection_failed("database connection error".to_owned())
        }
        _ => E::query_failed("database error".to_owned()),
    }
}

pub(crate) fn is_unique_violation(error: &DieselError) -> bool {
    matches!(
        error,
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)
    )
}
