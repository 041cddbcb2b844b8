//! Membership card tokens: opaque, tamper-evident QR payloads that carry a
//! member identifier.
//!
//! A token is `base64url-no-pad(nonce || tag || ciphertext)` produced with
//! AES-256-GCM under a key derived from a shared secret. [`token::TokenCodec`]
//! issues and resolves tokens; [`server`] exposes the issue and validation
//! endpoints used by the card renderer and the validation page.

pub mod config;
pub mod crypto;
pub mod members;
pub mod server;
pub mod telemetry;
pub mod token;
