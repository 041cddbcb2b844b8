//! Common error types shared across crates.

use thiserror::Error;

/// Message shown for every token that fails to decode or authenticate.
///
/// Format and authentication failures deliberately share this text so the
/// response does not reveal which check rejected the token.
pub const INVALID_TOKEN_MESSAGE: &str = "token tidak valid";

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::InvalidToken`] → 400
/// - [`ServiceError::Unauthorized`] → 401
/// - [`ServiceError::NotFound`] → 404
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed, e.g. an empty member identifier.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The presented card token could not be decoded or authenticated.
    #[error("{INVALID_TOKEN_MESSAGE}")]
    InvalidToken,

    /// The caller did not present a valid issuer credential.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The token was genuine but the member it names is unknown.
    #[error("not found: {0}")]
    NotFound(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::BadRequest(_) => 400,
            ServiceError::InvalidToken => 400,
            ServiceError::Unauthorized(_) => 401,
            ServiceError::NotFound(_) => 404,
            ServiceError::Internal(_) => 500,
        }
    }

    /// Short machine-readable code used in [`crate::protocol::ErrorResponse`].
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::InvalidToken => "invalid_token",
            ServiceError::Unauthorized(_) => "unauthorized",
            ServiceError::NotFound(_) => "member_not_found",
            ServiceError::Internal(_) => "internal_error",
        }
    }
}
