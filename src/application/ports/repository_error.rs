#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("connection failed: {0}")]
    ConnectionFailed(String),
    #[error("insert failed: {0}")]
    InsertFailed(String),
    #[error("constraint violation: {0}")]
    ConstraintViolation(String),
    #[error("rejected by database: status {status}: {body}")]
    Rejected { status: u16, body: String },
}
