//! Nonce generation behind an injectable source.

use aes_gcm::aead::{rand_core::RngCore, OsRng};

/// Byte length of an AES-GCM nonce (12 bytes = 96 bits).
pub const NONCE_LEN: usize = 12;

/// Source of per-encryption nonces.
///
/// Production code uses [`OsNonceSource`]. A nonce must never repeat under the
/// same key, so any implementation used outside tests must be a CSPRNG.
pub trait NonceSource: Send + Sync {
    /// Produce a fresh nonce.
    fn next_nonce(&self) -> [u8; NONCE_LEN];
}

/// Nonces drawn from the operating system CSPRNG.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsNonceSource;

impl NonceSource for OsNonceSource {
    fn next_nonce(&self) -> [u8; NONCE_LEN] {
        let mut nonce = [0u8; NONCE_LEN];
        OsRng.fill_bytes(&mut nonce);
        nonce
    }
}

/// Deterministic nonces for reproducible tests: a big-endian counter in the
/// low eight bytes.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct CountingNonceSource {
    next: std::sync::atomic::AtomicU64,
}

#[cfg(test)]
impl CountingNonceSource {
    pub fn starting_at(start: u64) -> Self {
        Self {
            next: std::sync::atomic::AtomicU64::new(start),
        }
    }
}

#[cfg(test)]
impl NonceSource for CountingNonceSource {
    fn next_nonce(&self) -> [u8; NONCE_LEN] {
        let n = self.next.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
        let mut nonce = [0u8; NONCE_LEN];
        nonce[4..].copy_from_slice(&n.to_be_bytes());
        nonce
    }
}
