//! Error types for the Naviera system.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum NavieraError {
    #[error("Entity already exists: {entity}")]
    AlreadyExists { entity: String },

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Database error: {0}")]
    Database(String),
}

pub type NavieraResult<T> = Result<T, NavieraError>;
