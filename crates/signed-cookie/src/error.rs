use crate::CookieError;

/// Top level error returned by [`SignedCookieSigner`](crate::SignedCookieSigner).
///
/// Configuration faults are raised once, at construction, and leave no usable signer behind.
/// Argument faults are raised per call and are recoverable by the caller. A signature mismatch is
/// never an error: [`is_valid`](crate::SignedCookieSigner::is_valid) reports it as `false`.
#[derive(Debug, thiserror::Error)]
pub enum SignedCookieError {
    /// The signer configuration was rejected.
    #[error("Invalid signer configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A call-time argument was rejected.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ArgumentError),

    /// The cookie sink refused the outgoing cookie.
    #[error(transparent)]
    Cookie(#[from] CookieError),
}

/// Reasons a signer configuration is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// No expiry timestamp was provided
    #[error("A unix timestamp is required for the cookie expiry")]
    MissingExpiry,

    /// The expiry is not numeric or does not fit in a signed 64-bit timestamp
    #[error("A valid unix timestamp is required for the cookie expiry (got {0:?})")]
    InvalidExpiry(String),

    /// The cookie path contains a control character or `;`
    #[error("A cookie path without control characters or ';' is required (got {0:?})")]
    InvalidPath(String),

    /// No cookie domain was provided
    #[error("A cookie domain is required")]
    MissingDomain,

    /// The cookie domain is not a valid hostname
    #[error("A valid cookie domain is required (got {0:?})")]
    InvalidDomain(String),

    /// The signing key is empty
    #[error("A signing key is required")]
    MissingKey,

    /// The configured key could not be decoded with its declared encoding
    #[error("The signing key is not valid {0}")]
    InvalidKey(String),

    /// No signing algorithm name was provided
    #[error("A cookie signing algorithm name is required")]
    MissingAlgorithm,

    /// The signing algorithm is not a supported HMAC hash
    #[error("Unsupported cookie signing algorithm: {0}")]
    UnsupportedAlgorithm(String),
}

/// Reasons a call-time argument is rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ArgumentError {
    /// Cookie name is empty
    #[error("Cookie name required")]
    MissingName,

    /// Cookie value is empty
    #[error("Cookie value required")]
    MissingValue,

    /// Name of the incoming cookie to validate is empty
    #[error("Cookie name required for validation")]
    MissingCookieName,

    /// Plaintext value to validate against is empty
    #[error("Cookie unsigned value required")]
    MissingPlaintextValue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = SignedCookieError::from(ConfigError::MissingKey);
        assert_eq!(
            err.to_string(),
            "Invalid signer configuration: A signing key is required"
        );

        let err = SignedCookieError::from(ArgumentError::MissingName);
        assert_eq!(err.to_string(), "Invalid argument: Cookie name required");

        let err = ConfigError::UnsupportedAlgorithm("whirlpool".to_string());
        assert_eq!(
            err.to_string(),
            "Unsupported cookie signing algorithm: whirlpool"
        );
    }

    #[test]
    fn test_cookie_error_is_transparent() {
        let err = SignedCookieError::from(CookieError::StorageFailure("poisoned".to_string()));
        assert_eq!(err.to_string(), "Cookie storage operation failed: poisoned");
    }

    #[test]
    fn test_error_variant_matching() {
        let err = SignedCookieError::from(ConfigError::InvalidDomain("-bad".to_string()));

        match err {
            SignedCookieError::InvalidConfig(ConfigError::InvalidDomain(domain)) => {
                assert_eq!(domain, "-bad")
            }
            _ => panic!("Expected InvalidDomain variant"),
        }
    }
}
