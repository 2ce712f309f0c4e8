use std::error::Error;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LookupError {
    #[error("Record store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Record store query failed: {0}")]
    Store(#[source] Box<dyn Error + Send + Sync>),

    #[error("Failed to write page: {0}")]
    Write(#[from] std::io::Error),
}

impl LookupError {
    pub fn store(err: impl Error + Send + Sync + 'static) -> Self {
        LookupError::Store(Box::new(err))
    }
}
