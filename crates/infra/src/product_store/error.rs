use thiserror::Error;

use catalog_core::DomainError;

/// Infrastructure failure inside a product store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("lock poisoned")]
    LockPoisoned,

    #[error("corrupt row: {0}")]
    CorruptRow(String),

    #[error("identifier space exhausted")]
    IdExhausted,
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::storage(err.to_string())
    }
}
