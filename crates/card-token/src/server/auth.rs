//! Issuer credential check for `POST /tokens`.
//!
//! Only the card renderer may mint tokens. It presents the configured issuer
//! key as `Authorization: Bearer <key>`. Validation stays public.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;
use zeroize::Zeroize;

/// SHA-256 of the configured issuer key.
///
/// Both sides are hashed before comparison so the constant-time check runs
/// over equal-length inputs and the key length is not observable.
#[derive(Clone)]
pub struct IssuerKey {
    digest: [u8; 32],
}

impl IssuerKey {
    pub fn new(key: &str) -> Self {
        Self {
            digest: digest(key),
        }
    }

    /// Returns `true` if `headers` carry `Authorization: Bearer <issuer key>`.
    pub fn authorizes(&self, headers: &HeaderMap) -> bool {
        let Some(presented) = bearer_token(headers) else {
            return false;
        };
        let mut presented = digest(presented);
        let ok: bool = presented[..].ct_eq(&self.digest[..]).into();
        presented.zeroize();
        ok
    }
}

impl Drop for IssuerKey {
    fn drop(&mut self) {
        self.digest.zeroize();
    }
}

impl std::fmt::Debug for IssuerKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("IssuerKey([REDACTED])")
    }
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

fn digest(value: &str) -> [u8; 32] {
    let mut out = [0u8; 32];
    out.copy_from_slice(&Sha256::digest(value.as_bytes()));
    out
}
