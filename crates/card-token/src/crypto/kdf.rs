//! Key derivation: shared secret string → 256-bit AES key.
//!
//! The secret is a long, high-entropy configuration value rather than a user
//! password, so a single SHA-256 pass is the default derivation. Other
//! derivations plug in through [`KeyDerivation`] without touching the token
//! wire format.

use sha2::{Digest, Sha256};
use thiserror::Error;
use zeroize::Zeroize;

/// Byte length of an AES-256 key (32 bytes = 256 bits).
pub const KEY_LEN: usize = 32;

/// Errors produced while deriving a key.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyError {
    /// The secret is empty or whitespace-only.
    #[error("card token secret must not be empty")]
    EmptySecret,
}

/// Fixed-size key buffer that holds exactly [`KEY_LEN`] bytes.
///
/// The key bytes are wiped with [`zeroize`] on drop.
#[derive(Clone)]
pub struct DerivedKey(Box<[u8; KEY_LEN]>);

impl DerivedKey {
    /// Wrap raw key material.
    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(Box::new(bytes))
    }

    /// Borrow the raw key bytes.
    pub fn as_bytes(&self) -> &[u8; KEY_LEN] {
        &self.0
    }
}

impl Drop for DerivedKey {
    fn drop(&mut self) {
        self.0.zeroize();
    }
}

impl std::fmt::Debug for DerivedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never print key material — not even in debug builds.
        f.write_str("DerivedKey([REDACTED])")
    }
}

/// Strategy for turning secret bytes into an AES-256 key.
///
/// Implementations must be deterministic: the same secret always yields the
/// same key.
pub trait KeyDerivation: Send + Sync {
    /// Derive a key from the UTF-8 bytes of a secret.
    fn derive(&self, secret: &[u8]) -> DerivedKey;
}

/// Default derivation: the SHA-256 digest of the secret is the key.
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Derivation;

impl KeyDerivation for Sha256Derivation {
    fn derive(&self, secret: &[u8]) -> DerivedKey {
        let mut digest = Sha256::digest(secret);
        let mut key = DerivedKey::from_bytes([0u8; KEY_LEN]);
        key.0.copy_from_slice(&digest);
        digest.as_mut_slice().zeroize();
        key
    }
}

/// Derive a key from `secret` with the default [`Sha256Derivation`].
///
/// # Errors
///
/// Returns [`KeyError::EmptySecret`] if `secret` is empty or blank.
pub fn derive_key(secret: &str) -> Result<DerivedKey, KeyError> {
    derive_key_with(&Sha256Derivation, secret)
}

/// Derive a key from `secret` using an explicit strategy.
///
/// # Errors
///
/// Returns [`KeyError::EmptySecret`] if `secret` is empty or blank.
pub fn derive_key_with(kdf: &dyn KeyDerivation, secret: &str) -> Result<DerivedKey, KeyError> {
    if secret.trim().is_empty() {
        return Err(KeyError::EmptySecret);
    }
    Ok(kdf.derive(secret.as_bytes()))
}
