use thiserror::Error;

#[derive(Debug, Error)]
pub enum CacheError {
    #[error(transparent)]
    SqlxError(#[from] sqlx::Error),
    #[error("malformed cache body: {0}")]
    SerdeError(#[from] serde_json::Error),
}
