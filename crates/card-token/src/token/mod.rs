//! Card token transport encoding and the issue/resolve protocol.
//!
//! # Token format
//!
//! ```text
//! base64url-no-pad( nonce[12] || tag[16] || ciphertext[n] )
//! ```
//!
//! The token is the only artifact that leaves the service. It is embedded as
//! the last path segment of the validation URL and needs no further escaping.

pub mod codec;
pub mod keyring;

pub use codec::{TokenCodec, TokenError};
pub use keyring::Keyring;

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use thiserror::Error;

use crate::crypto::{Sealed, NONCE_LEN, TAG_LEN};

/// Smallest decoded token: a nonce and a tag with an empty ciphertext.
pub const MIN_DECODED_LEN: usize = NONCE_LEN + TAG_LEN;

/// Structural problems with a presented token string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    /// The token string is empty.
    #[error("token is empty")]
    Empty,

    /// The token contains characters outside the base64url alphabet, padding,
    /// or non-canonical trailing bits.
    #[error("token is not valid base64url")]
    InvalidEncoding,

    /// The token decodes to fewer than [`MIN_DECODED_LEN`] bytes.
    #[error("token decodes to {0} bytes, need at least {MIN_DECODED_LEN}")]
    TooShort(usize),
}

/// An encoded card token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token(String);

impl Token {
    /// Borrow the token text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume the token, returning its text.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Serialise sealed parts into a token.
pub fn encode(sealed: &Sealed) -> Token {
    let mut bytes = Vec::with_capacity(MIN_DECODED_LEN + sealed.ciphertext.len());
    bytes.extend_from_slice(&sealed.nonce);
    bytes.extend_from_slice(&sealed.tag);
    bytes.extend_from_slice(&sealed.ciphertext);
    Token(URL_SAFE_NO_PAD.encode(bytes))
}

/// Parse a token string back into its sealed parts.
///
/// # Errors
///
/// Returns a [`FormatError`] if the string is empty, is not unpadded
/// base64url, or is too short to hold a nonce and tag.
pub fn decode(token: &str) -> Result<Sealed, FormatError> {
    if token.is_empty() {
        return Err(FormatError::Empty);
    }
    let bytes = URL_SAFE_NO_PAD
        .decode(token)
        .map_err(|_| FormatError::InvalidEncoding)?;
    if bytes.len() < MIN_DECODED_LEN {
        return Err(FormatError::TooShort(bytes.len()));
    }

    let (nonce_bytes, rest) = bytes.split_at(NONCE_LEN);
    let (tag_bytes, ciphertext) = rest.split_at(TAG_LEN);

    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(nonce_bytes);
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(tag_bytes);

    Ok(Sealed {
        nonce,
        tag,
        ciphertext: ciphertext.to_vec(),
    })
}

/// Build the validation URL for `token` under `base_url`.
///
/// A trailing `/` on the base is tolerated.
pub fn validation_url(base_url: &str, token: &Token) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), token)
}
