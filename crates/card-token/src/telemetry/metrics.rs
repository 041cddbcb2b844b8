//! Token issuance and validation counters.
//!
//! Validation outcomes keep the format/authentication distinction that the
//! HTTP response deliberately hides.

use opentelemetry::{metrics::Counter, KeyValue};

/// Outcome label values for `card_token_validations_total`.
pub mod outcome {
    pub const VALID: &str = "valid";
    pub const MEMBER_NOT_FOUND: &str = "member_not_found";
}

/// Counter handles, created once from the global meter provider.
#[derive(Clone)]
pub struct Metrics {
    issued: Counter<u64>,
    validations: Counter<u64>,
}

impl Metrics {
    /// Register the counters on the global meter.
    ///
    /// Without an installed provider the global meter is a no-op.
    pub fn new() -> Self {
        let meter = opentelemetry::global::meter("card-token");
        Self {
            issued: meter
                .u64_counter("card_tokens_issued_total")
                .with_description("Card tokens issued")
                .init(),
            validations: meter
                .u64_counter("card_token_validations_total")
                .with_description("Card token validation attempts by outcome")
                .init(),
        }
    }

    pub fn record_issued(&self) {
        self.issued.add(1, &[]);
    }

    /// Record a validation attempt. `outcome` must be a static label, never
    /// token or member data.
    pub fn record_validation(&self, outcome: &'static str) {
        self.validations.add(1, &[KeyValue::new("outcome", outcome)]);
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
