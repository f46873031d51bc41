//! Handler errors.

use livestock_core::db::DbError;
use thiserror::Error;

/// Reasons a companion job or handler request fails.
#[derive(Error, Debug)]
pub enum FunctionError {
    #[error("Missing authorization header")]
    MissingAuthorization,

    #[error("Invalid or expired token")]
    InvalidToken,

    #[error("Admin access required")]
    Forbidden,

    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Invalid request body: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] DbError),
}

pub type FunctionResult<T> = Result<T, FunctionError>;
