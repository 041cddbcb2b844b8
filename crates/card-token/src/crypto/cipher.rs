//! AES-256-GCM sealing and opening of member identifiers.
//!
//! GCM is not nonce-misuse-resistant: a repeated nonce under the same key
//! breaks both confidentiality and authentication. Every call to [`encrypt`]
//! therefore draws a fresh nonce from the supplied [`NonceSource`].

use aes_gcm::{
    aead::{AeadInPlace, KeyInit},
    Aes256Gcm, Key, Nonce, Tag,
};
use thiserror::Error;

use super::kdf::DerivedKey;
use super::nonce::{NonceSource, NONCE_LEN};

/// Byte length of the GCM authentication tag (16 bytes = 128 bits).
pub const TAG_LEN: usize = 16;

/// Output of one encryption: the three parts carried by a card token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Sealed {
    /// Raw nonce bytes.
    pub nonce: [u8; NONCE_LEN],
    /// Raw authentication tag bytes.
    pub tag: [u8; TAG_LEN],
    /// Ciphertext, the same length as the plaintext.
    pub ciphertext: Vec<u8>,
}

/// Errors produced by the cipher layer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CipherError {
    /// AES-GCM encryption failed (only reachable for absurdly long input).
    #[error("aead encryption failed")]
    Encryption,

    /// Tag verification failed: wrong key, tampered or corrupted data.
    #[error("aead authentication failed")]
    Authentication,

    /// The tag verified but the recovered bytes are not UTF-8.
    #[error("decrypted identifier is not valid UTF-8")]
    InvalidUtf8,
}

/// Encrypt a member identifier under `key`.
///
/// # Errors
///
/// Returns [`CipherError::Encryption`] on an internal AEAD error.
pub fn encrypt(
    plaintext: &str,
    key: &DerivedKey,
    nonces: &dyn NonceSource,
) -> Result<Sealed, CipherError> {
    let cipher = build_cipher(key);
    let nonce = nonces.next_nonce();

    let mut buffer = plaintext.as_bytes().to_vec();
    let tag = cipher
        .encrypt_in_place_detached(Nonce::from_slice(&nonce), b"", &mut buffer)
        .map_err(|_| CipherError::Encryption)?;

    let mut tag_bytes = [0u8; TAG_LEN];
    tag_bytes.copy_from_slice(&tag);

    Ok(Sealed {
        nonce,
        tag: tag_bytes,
        ciphertext: buffer,
    })
}

/// Decrypt a [`Sealed`] value back to the identifier string.
///
/// The tag is verified before any plaintext is released; on failure nothing
/// but the error is returned.
///
/// # Errors
///
/// Returns [`CipherError::Authentication`] if the tag does not verify.
/// Returns [`CipherError::InvalidUtf8`] if the plaintext is not UTF-8.
pub fn decrypt(sealed: &Sealed, key: &DerivedKey) -> Result<String, CipherError> {
    let cipher = build_cipher(key);

    let mut buffer = sealed.ciphertext.clone();
    cipher
        .decrypt_in_place_detached(
            Nonce::from_slice(&sealed.nonce),
            b"",
            &mut buffer,
            Tag::from_slice(&sealed.tag),
        )
        .map_err(|_| CipherError::Authentication)?;

    String::from_utf8(buffer).map_err(|_| CipherError::InvalidUtf8)
}

fn build_cipher(key: &DerivedKey) -> Aes256Gcm {
    Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key.as_bytes()))
}
