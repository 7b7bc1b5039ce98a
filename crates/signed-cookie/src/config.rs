use base64::{engine::general_purpose::STANDARD, Engine};
use serde::Deserialize;
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

use crate::ConfigError;

/// Raw signer configuration, as loaded by the caller's bootstrap layer.
///
/// Nothing is validated at deserialization time. Pass the value to
/// [`SignedCookieSigner::from_config`](crate::SignedCookieSigner::from_config), which applies the
/// same checks as [`SignedCookieSigner::new`](crate::SignedCookieSigner::new).
///
/// ```
/// # use signed_cookie::{SignedCookieSigner, SignerConfig};
/// let config: SignerConfig = serde_json::from_str(
///     r#"{ "domain": "example.com", "expiry": 9999999999, "key": "secretkey" }"#,
/// )
/// .unwrap();
/// let signer = SignedCookieSigner::from_config(&config).unwrap();
/// assert_eq!(signer.path(), "/");
/// ```
#[derive(Clone, Deserialize, Zeroize, ZeroizeOnDrop)]
#[serde(rename_all = "camelCase")]
pub struct SignerConfig {
    /// Cookie domain. A single leading dot is allowed.
    pub domain: String,
    /// Cookie path, `/` when empty.
    #[serde(default)]
    pub path: String,
    /// Absolute expiry as a Unix timestamp. Accepts a JSON number or a numeric string.
    #[serde(deserialize_with = "deserialize_expiry")]
    pub expiry: String,
    /// Signing key material, encoded as [`SignerConfig::key_encoding`] says.
    pub key: String,
    /// Encoding of `key`. Raw UTF-8 when absent.
    #[serde(default)]
    #[zeroize(skip)]
    pub key_encoding: KeyEncoding,
    /// HMAC hash algorithm name.
    #[serde(default = "default_algorithm")]
    pub algorithm: String,
}

/// How [`SignerConfig::key`] is turned into key bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyEncoding {
    /// The UTF-8 bytes of the string are the key.
    #[default]
    Raw,
    /// Hex encoded bytes, for binary keys.
    Hex,
    /// Standard, padded base64 encoded bytes, for binary keys.
    Base64,
}

impl SignerConfig {
    /// Decodes the configured key.
    ///
    /// [`SignedCookieSigner::from_config`](crate::SignedCookieSigner::from_config) runs this before
    /// any other check, so a malformed key is reported ahead of the other configuration faults.
    pub fn key_bytes(&self) -> Result<Zeroizing<Vec<u8>>, ConfigError> {
        let bytes = match self.key_encoding {
            KeyEncoding::Raw => self.key.as_bytes().to_vec(),
            KeyEncoding::Hex => {
                hex::decode(&self.key).map_err(|_| ConfigError::InvalidKey("hex".to_string()))?
            }
            KeyEncoding::Base64 => STANDARD
                .decode(&self.key)
                .map_err(|_| ConfigError::InvalidKey("base64".to_string()))?,
        };
        Ok(Zeroizing::new(bytes))
    }
}

fn default_algorithm() -> String {
    "sha256".to_string()
}

fn deserialize_expiry<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawExpiry {
        Integer(i64),
        Float(f64),
        Text(String),
    }

    Ok(match RawExpiry::deserialize(deserializer)? {
        RawExpiry::Integer(timestamp) => timestamp.to_string(),
        RawExpiry::Float(timestamp) => timestamp.to_string(),
        RawExpiry::Text(text) => text,
    })
}

// We manually implement this to make sure we don't print the key
impl std::fmt::Debug for SignerConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignerConfig")
            .field("domain", &self.domain)
            .field("path", &self.path)
            .field("expiry", &self.expiry)
            .field("key_encoding", &self.key_encoding)
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full() {
        let config: SignerConfig = serde_json::from_str(
            r#"{
                "domain": ".example.com",
                "path": "/app",
                "expiry": "1700000000",
                "key": "secretkey",
                "algorithm": "sha512"
            }"#,
        )
        .unwrap();

        assert_eq!(config.domain, ".example.com");
        assert_eq!(config.path, "/app");
        assert_eq!(config.expiry, "1700000000");
        assert_eq!(config.key, "secretkey");
        assert_eq!(config.algorithm, "sha512");
    }

    #[test]
    fn test_deserialize_defaults() {
        let config: SignerConfig = serde_json::from_str(
            r#"{ "domain": "example.com", "expiry": 9999999999, "key": "k" }"#,
        )
        .unwrap();

        assert_eq!(config.path, "");
        assert_eq!(config.expiry, "9999999999");
        assert_eq!(config.key_encoding, KeyEncoding::Raw);
        assert_eq!(config.algorithm, "sha256");
    }

    fn config_with_key(key: &str, encoding: &str) -> SignerConfig {
        serde_json::from_str(&format!(
            r#"{{ "domain": "example.com", "expiry": 1, "key": "{key}", "keyEncoding": "{encoding}" }}"#
        ))
        .unwrap()
    }

    #[test]
    fn test_key_bytes_decodes_encodings() {
        let raw = config_with_key("secretkey", "raw");
        assert_eq!(raw.key_bytes().unwrap().as_slice(), b"secretkey");

        let hex = config_with_key("7365637265746b6579", "hex");
        assert_eq!(hex.key_bytes().unwrap().as_slice(), b"secretkey");

        let base64 = config_with_key("AP8QIA==", "base64");
        assert_eq!(base64.key_bytes().unwrap().as_slice(), &[0x00, 0xff, 0x10, 0x20]);
    }

    #[test]
    fn test_key_bytes_rejects_malformed_keys() {
        assert_eq!(
            config_with_key("not hex", "hex").key_bytes(),
            Err(ConfigError::InvalidKey("hex".to_string()))
        );
        assert_eq!(
            config_with_key("abc", "hex").key_bytes(),
            Err(ConfigError::InvalidKey("hex".to_string()))
        );
        assert_eq!(
            config_with_key("***", "base64").key_bytes(),
            Err(ConfigError::InvalidKey("base64".to_string()))
        );
    }

    #[test]
    fn test_deserialize_rejects_unknown_key_encoding() {
        let result = serde_json::from_str::<SignerConfig>(
            r#"{ "domain": "example.com", "expiry": 1, "key": "k", "keyEncoding": "utf16" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_deserialize_float_expiry() {
        let config: SignerConfig = serde_json::from_str(
            r#"{ "domain": "example.com", "expiry": 1.5e9, "key": "k" }"#,
        )
        .unwrap();

        assert_eq!(config.expiry, "1500000000");
    }

    #[test]
    fn test_deserialize_rejects_non_scalar_expiry() {
        let result = serde_json::from_str::<SignerConfig>(
            r#"{ "domain": "example.com", "expiry": [1], "key": "k" }"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let config: SignerConfig = serde_json::from_str(
            r#"{ "domain": "example.com", "expiry": "1", "key": "supersecret" }"#,
        )
        .unwrap();

        let debug = format!("{config:?}");
        assert!(debug.contains("example.com"));
        assert!(!debug.contains("supersecret"));
    }
}
