use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while managing grocery lists
#[derive(Error, Debug)]
pub enum GroceryError {
    /// Reading or writing a snapshot failed
    #[error("Storage error: {0}")]
    StorageError(#[from] std::io::Error),

    /// A snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),

    /// No list with this id exists in the store
    #[error("List not found: {0}")]
    ListNotFound(Uuid),

    /// No ingredient with this id exists in any list
    #[error("Ingredient not found: {0}")]
    IngredientNotFound(Uuid),
}
