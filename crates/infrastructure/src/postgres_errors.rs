use accessgrid_core::AppError;

const UNIQUE_VIOLATION: &str = "23505";
const FOREIGN_KEY_VIOLATION: &str = "23503";
const SERIALIZATION_FAILURE: &str = "40001";

fn has_code(error: &sqlx::Error, code: &str) -> bool {
    matches!(
        error,
        sqlx::Error::Database(database_error) if database_error.code().as_deref() == Some(code)
    )
}

pub(crate) fn is_unique_violation(error: &sqlx::Error) -> bool {
    has_code(error, UNIQUE_VIOLATION)
}

pub(crate) fn is_foreign_key_violation(error: &sqlx::Error) -> bool {
    has_code(error, FOREIGN_KEY_VIOLATION)
}

/// Maps an unclassified statement failure.
///
/// Serialization failures surface as `Conflict` so callers may retry.
pub(crate) fn map_sqlx_error(error: sqlx::Error, context: &str) -> AppError {
    if has_code(&error, SERIALIZATION_FAILURE) {
        return AppError::Conflict(format!("{context} raced a concurrent update"));
    }

    AppError::Internal(format!("failed to {context}: {error}"))
}

pub(crate) fn begin_error(error: sqlx::Error) -> AppError {
    AppError::Internal(format!("failed to begin transaction: {error}"))
}

pub(crate) fn commit_error(error: sqlx::Error) -> AppError {
    map_sqlx_error(error, "commit transaction")
}
