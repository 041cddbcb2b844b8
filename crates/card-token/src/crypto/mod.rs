//! AES-256-GCM identifier encryption primitives.
//!
//! This module is intentionally free of HTTP dependencies. It provides key
//! derivation, nonce generation, and the low-level seal/open operations used
//! by the token layer.
//!
//! # Security invariants
//!
//! - Secrets and derived keys are never logged; [`kdf::DerivedKey`] redacts
//!   itself in `Debug` output and zeroes its memory on drop.
//! - One nonce per encryption, drawn from a [`nonce::NonceSource`].

pub mod cipher;
pub mod kdf;
pub mod nonce;

pub use cipher::{CipherError, Sealed, TAG_LEN};
pub use kdf::{derive_key, DerivedKey, KeyError};
pub use nonce::{NonceSource, OsNonceSource, NONCE_LEN};
