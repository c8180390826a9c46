//! Playmood backend API
//!
//! - `client`: typed HTTP client for every endpoint the TV client uses
//! - `ApiError`: failure classes the screens distinguish (not found, auth,
//!   server, bad payload, transport)

pub mod client;

pub use client::PlaymoodClient;

use thiserror::Error;

/// Playmood API error types
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Resource not found (404)")]
    NotFound,

    #[error("Not signed in or session expired (401)")]
    Unauthorized,

    #[error("Rate limited (429), retries exhausted")]
    RateLimited,

    #[error("Server error: {0}")]
    ServerError(u16),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
}

impl ApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound)
    }
}

pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Helpers for reading API results
pub trait ApiResultExt<T> {
    /// Treat 404 as "no such record" rather than a failure
    fn found(self) -> ApiResult<Option<T>>;

    /// Treat 404 as an empty collection rather than a failure
    fn or_empty(self) -> ApiResult<T>
    where
        T: Default;
}

impl<T> ApiResultExt<T> for ApiResult<T> {
    fn found(self) -> ApiResult<Option<T>> {
        match self {
            Ok(value) => Ok(Some(value)),
            Err(ApiError::NotFound) => Ok(None),
            Err(e) => Err(e),
        }
    }

    fn or_empty(self) -> ApiResult<T>
    where
        T: Default,
    {
        match self {
            Err(ApiError::NotFound) => Ok(T::default()),
            other => other,
        }
    }
}
