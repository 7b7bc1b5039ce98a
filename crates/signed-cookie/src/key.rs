use subtle::{Choice, ConstantTimeEq};
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::ConfigError;

/// Secret key material used to sign cookie values.
///
/// The bytes are wiped when the key is dropped and never show up in `Debug` output.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct SigningKey(Vec<u8>);

impl SigningKey {
    /// Wraps raw key material. Any non-empty length is accepted, HMAC hashes longer keys down.
    pub fn new(material: impl AsRef<[u8]>) -> Result<Self, ConfigError> {
        let material = material.as_ref();
        if material.is_empty() {
            return Err(ConfigError::MissingKey);
        }
        Ok(Self(material.to_vec()))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl ConstantTimeEq for SigningKey {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

impl PartialEq for SigningKey {
    fn eq(&self, other: &Self) -> bool {
        self.ct_eq(other).into()
    }
}

// We manually implement this to make sure we don't print any sensitive data
impl std::fmt::Debug for SigningKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningKey").finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(SigningKey::new(""), Err(ConfigError::MissingKey)));
        assert!(matches!(
            SigningKey::new(Vec::<u8>::new()),
            Err(ConfigError::MissingKey)
        ));
    }

    #[test]
    fn test_debug_is_redacted() {
        let key = SigningKey::new("secretkey").unwrap();
        let debug = format!("{key:?}");
        assert_eq!(debug, "SigningKey");
        assert!(!debug.contains("secretkey"));
    }

    #[test]
    fn test_equality() {
        let a = SigningKey::new("secretkey").unwrap();
        let b = SigningKey::new(b"secretkey").unwrap();
        let c = SigningKey::new("otherkey").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
