//! Error types for stockpile

use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid ID")]
    InvalidId(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Invalid data: {0}")]
    InvalidItem(String),

    #[error("Item not found")]
    NotFound,

    #[error("{operation} timed out after {after:?}")]
    Timeout {
        operation: &'static str,
        after: Duration,
    },

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl Error {
    pub fn storage(msg: impl Into<String>) -> Self {
        Error::Storage(msg.into())
    }

    pub fn invalid_item(msg: impl Into<String>) -> Self {
        Error::InvalidItem(msg.into())
    }

    /// Whether the error was caused by the caller rather than the store
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidId(_) | Error::InvalidBody(_) | Error::InvalidItem(_) | Error::NotFound
        )
    }
}
