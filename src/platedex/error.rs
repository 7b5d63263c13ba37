use thiserror::Error;
use uuid::Uuid;

#[derive(Error, Debug)]
pub enum PlatedexError {
    #[error("Item not found: {0}")]
    ItemNotFound(Uuid),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Import failed: no rows could be read")]
    ImportEmpty,

    #[error("Invalid input: {0}")]
    Validation(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, PlatedexError>;
