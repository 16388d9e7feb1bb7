use thiserror::Error;

use crate::types::internal::ValidationErrors;

/// Internal error type for store operations
///
/// Not exposed via the API; endpoints convert these into the API error
/// enums at the boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("{what} not found")]
    NotFound { what: &'static str },

    #[error("invalid email/password combination")]
    InvalidCredentials,

    #[error("crypto error: {operation} failed: {message}")]
    Crypto {
        operation: &'static str,
        message: String,
    },
}

impl StoreError {
    pub fn not_found(what: &'static str) -> Self {
        StoreError::NotFound { what }
    }

    pub fn crypto(operation: &'static str, message: String) -> Self {
        StoreError::Crypto { operation, message }
    }
}
