use sqlx::error::ErrorKind;

use crate::application::ports::RepositoryError;

pub(super) fn map_insert_error(e: sqlx::Error) -> RepositoryError {
    match &e {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::ForeignKeyViolation | ErrorKind::UniqueViolation => {
                RepositoryError::ConstraintViolation(db.message().to_string())
            }
            _ => RepositoryError::InsertFailed(e.to_string()),
        },
        sqlx::Error::PoolTimedOut | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
            RepositoryError::ConnectionFailed(e.to_string())
        }
        _ => RepositoryError::InsertFailed(e.to_string()),
    }
}
