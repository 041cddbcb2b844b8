//! [`TokenCodec`]: issue a token for an identifier, resolve a token back.

use std::sync::Arc;

use thiserror::Error;

use super::{decode, encode, FormatError, Keyring, Token};
use crate::crypto::{cipher, NonceSource, OsNonceSource};

/// Errors from issuing or resolving a card token.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
    /// Refused to issue a token for an empty identifier.
    #[error("member identifier must not be empty")]
    EmptyIdentifier,

    /// The token string is structurally invalid.
    #[error("token format invalid: {0}")]
    Format(#[from] FormatError),

    /// No key in the keyring authenticates the token.
    #[error("token authentication failed")]
    Authentication,

    /// Encryption failed while issuing.
    #[error("token encryption failed")]
    Encryption,
}

impl TokenError {
    /// Static label for logs and metric attributes.
    pub fn kind(&self) -> &'static str {
        match self {
            TokenError::EmptyIdentifier => "empty_identifier",
            TokenError::Format(_) => "format",
            TokenError::Authentication => "authentication",
            TokenError::Encryption => "encryption",
        }
    }
}

/// Stateless issuer and validator of card tokens.
///
/// Cheap to clone; every clone shares the same keyring and nonce source.
#[derive(Clone)]
pub struct TokenCodec {
    keyring: Arc<Keyring>,
    nonces: Arc<dyn NonceSource>,
}

impl TokenCodec {
    /// Create a codec drawing nonces from the OS CSPRNG.
    pub fn new(keyring: Keyring) -> Self {
        Self::with_nonce_source(keyring, Arc::new(OsNonceSource))
    }

    /// Create a codec with an explicit nonce source.
    pub fn with_nonce_source(keyring: Keyring, nonces: Arc<dyn NonceSource>) -> Self {
        Self {
            keyring: Arc::new(keyring),
            nonces,
        }
    }

    /// The keyring this codec issues and validates with.
    pub fn keyring(&self) -> &Keyring {
        &self.keyring
    }

    /// Seal `identifier` under the current key and encode it as a token.
    ///
    /// Each call uses a fresh nonce, so issuing twice for the same member
    /// yields two different tokens.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::EmptyIdentifier`] for an empty identifier and
    /// [`TokenError::Encryption`] if the AEAD fails.
    pub fn issue(&self, identifier: &str) -> Result<Token, TokenError> {
        if identifier.is_empty() {
            return Err(TokenError::EmptyIdentifier);
        }
        let sealed = cipher::encrypt(identifier, self.keyring.current(), self.nonces.as_ref())
            .map_err(|_| TokenError::Encryption)?;
        Ok(encode(&sealed))
    }

    /// Decode and authenticate `token`, returning the member identifier.
    ///
    /// Keys are tried current first, then retired.
    ///
    /// # Errors
    ///
    /// Returns [`TokenError::Format`] if the token cannot be decoded and
    /// [`TokenError::Authentication`] if no key verifies it.
    pub fn resolve(&self, token: &str) -> Result<String, TokenError> {
        let sealed = decode(token)?;
        self.keyring
            .candidates()
            .find_map(|key| cipher::decrypt(&sealed, key).ok())
            .ok_or(TokenError::Authentication)
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("keyring", &self.keyring)
            .finish_non_exhaustive()
    }
}
