//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use super::auth::IssuerKey;
use crate::members::MemberDirectory;
use crate::telemetry::Metrics;
use crate::token::TokenCodec;

/// Application state shared across all request handlers.
///
/// All fields are cheaply cloneable (`Arc`-wrapped or already `Arc`-backed) so
/// that Axum can clone the state for each request without copying key material.
#[derive(Clone)]
pub struct AppState {
    /// Issues and validates card tokens.
    pub codec: TokenCodec,
    /// Member lookup used by the validation page.
    pub members: Arc<dyn MemberDirectory>,
    /// Credential required to mint tokens.
    pub issuer_key: Arc<IssuerKey>,
    /// Base URL that issued tokens are appended to.
    pub validation_base_url: Arc<String>,
    /// Issuance and validation counters.
    pub metrics: Metrics,
}

impl AppState {
    /// Create a new [`AppState`].
    pub fn new(
        codec: TokenCodec,
        members: Arc<dyn MemberDirectory>,
        issuer_key: IssuerKey,
        validation_base_url: String,
    ) -> Self {
        Self {
            codec,
            members,
            issuer_key: Arc::new(issuer_key),
            validation_base_url: Arc::new(validation_base_url),
            metrics: Metrics::new(),
        }
    }
}
