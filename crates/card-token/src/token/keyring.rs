//! [`Keyring`]: the current token key plus retired keys kept for rotation.
//!
//! Keys are derived once when the keyring is built and held for the process
//! lifetime. Tokens are always issued under the current key; validation also
//! accepts retired keys so cards printed before a rotation keep working until
//! the operator drops the old secret.

use crate::crypto::kdf::{derive_key_with, DerivedKey, KeyDerivation, KeyError, Sha256Derivation};

/// Immutable set of derived token keys.
#[derive(Debug, Clone)]
pub struct Keyring {
    current: DerivedKey,
    retired: Vec<DerivedKey>,
}

impl Keyring {
    /// Build a keyring with the default SHA-256 derivation.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::EmptySecret`] if any secret is blank.
    pub fn new<S: AsRef<str>>(current: &str, retired: &[S]) -> Result<Self, KeyError> {
        Self::with_derivation(&Sha256Derivation, current, retired)
    }

    /// Build a keyring with an explicit derivation strategy.
    ///
    /// # Errors
    ///
    /// Returns [`KeyError::EmptySecret`] if any secret is blank.
    pub fn with_derivation<S: AsRef<str>>(
        kdf: &dyn KeyDerivation,
        current: &str,
        retired: &[S],
    ) -> Result<Self, KeyError> {
        let current = derive_key_with(kdf, current)?;
        let retired = retired
            .iter()
            .map(|s| derive_key_with(kdf, s.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { current, retired })
    }

    /// Key used for issuing new tokens.
    pub fn current(&self) -> &DerivedKey {
        &self.current
    }

    /// All keys accepted for validation, current first.
    pub fn candidates(&self) -> impl Iterator<Item = &DerivedKey> {
        std::iter::once(&self.current).chain(self.retired.iter())
    }

    /// Number of retired keys still accepted.
    pub fn retired_len(&self) -> usize {
        self.retired.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::kdf::derive_key;

    #[test]
    fn current_key_comes_first() {
        let ring = Keyring::new("new-secret", &["old-secret"]).unwrap();
        let keys: Vec<_> = ring.candidates().collect();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].as_bytes(), derive_key("new-secret").unwrap().as_bytes());
        assert_eq!(keys[1].as_bytes(), derive_key("old-secret").unwrap().as_bytes());
        assert_eq!(ring.retired_len(), 1);
    }

    #[test]
    fn no_retired_keys() {
        let ring = Keyring::new::<&str>("only-secret", &[]).unwrap();
        assert_eq!(ring.candidates().count(), 1);
        assert_eq!(ring.retired_len(), 0);
    }

    #[test]
    fn blank_current_secret_rejected() {
        assert_eq!(
            Keyring::new::<&str>("", &[]).unwrap_err(),
            KeyError::EmptySecret
        );
    }

    #[test]
    fn blank_retired_secret_rejected() {
        assert!(Keyring::new("good", &["  "]).is_err());
    }

    #[test]
    fn debug_output_hides_keys() {
        let ring = Keyring::new("test-secret-key", &["older"]).unwrap();
        let shown = format!("{ring:?}");
        assert!(shown.contains("REDACTED"));
        assert!(!shown.contains("test-secret-key"));
    }
}
