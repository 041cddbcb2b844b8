//! Request and response types exchanged over the public HTTP API.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Token issuance
// ---------------------------------------------------------------------------

/// Request body for `POST /tokens`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenRequest {
    /// Internal member identifier to seal into the token.
    pub member_id: String,
}

/// Successful response body for `POST /tokens`.
///
/// `validation_url` is what the card renderer encodes into the QR image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueTokenResponse {
    /// Opaque base64url card token.
    pub token: String,
    /// Validation page URL with the token as its last path segment.
    pub validation_url: String,
}

// ---------------------------------------------------------------------------
// Token validation
// ---------------------------------------------------------------------------

/// Member fields shown on the validation page.
///
/// Values are passed through exactly as the member directory holds them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberView {
    pub name: String,
    pub member_number: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_until: Option<String>,
}

/// Successful response body for `GET /cek-validasi/{token}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationResponse {
    /// Always `"valid"` on success.
    pub status: String,
    pub member: MemberView,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Standard error response body returned on any non-2xx status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"invalid_token"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

impl From<&crate::ServiceError> for ErrorResponse {
    fn from(err: &crate::ServiceError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Overall service status, `"ok"` while the process is serving.
    pub status: String,
    /// Number of retired secrets still accepted for validation.
    pub retired_keys: usize,
    /// Number of members currently held by the directory.
    pub members_loaded: usize,
}
