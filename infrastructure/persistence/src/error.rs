use business::domain::errors::RepositoryError;

/// Maps a sqlx failure to the domain's repository error, logging it under the
/// given operation label.
pub(crate) fn db_error(operation: &'static str) -> impl FnOnce(sqlx::Error) -> RepositoryError {
    move |e| match &e {
        sqlx::Error::RowNotFound => RepositoryError::NotFound,
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            tracing::warn!(operation, error = %e, "Unique constraint violated");
            RepositoryError::Duplicated
        }
        sqlx::Error::Database(db) if db.is_check_violation() => {
            tracing::error!(operation, error = %e, "Check constraint violated");
            RepositoryError::Persistence
        }
        _ => {
            tracing::error!(operation, error = %e, "Database operation failed");
            RepositoryError::DatabaseError
        }
    }
}

/// Stored enum column that no longer parses.
pub(crate) fn corrupt(column: &'static str, value: &str) -> RepositoryError {
    tracing::error!(column, value, "Unreadable value in column");
    RepositoryError::Persistence
}
