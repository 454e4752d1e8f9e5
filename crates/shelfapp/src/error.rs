use crate::model::BookId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Book not found: {0}")]
    BookNotFound(BookId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Lookup error: {0}")]
    Lookup(String),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
