use subtle::ConstantTimeEq;

use crate::{
    cookie::is_valid_attribute_value,
    ensure,
    hostname::{is_valid_hostname, strip_leading_dot},
    ArgumentError, ConfigError, Cookie, CookieSink, CookieSource, Expiry, MacAlgorithm, SameSite,
    SignedCookieError, SignerConfig, SigningKey,
};

const DEFAULT_PATH: &str = "/";

/// Signs outgoing cookie values and validates incoming ones.
///
/// The configuration is validated once by [`SignedCookieSigner::new`] and is immutable
/// afterwards. The signer holds no other state, so a single instance can be shared across threads
/// and requests.
///
/// A signed cookie value is the hex encoded `HMAC(algorithm, key, value)`. The plaintext is not
/// stored in the cookie, so validation needs the plaintext the caller expects.
#[derive(Clone, Debug)]
pub struct SignedCookieSigner {
    domain: String,
    path: String,
    expiry: Expiry,
    key: SigningKey,
    algorithm: MacAlgorithm,
}

impl SignedCookieSigner {
    /// Validates the configuration and creates a signer.
    ///
    /// # Errors
    ///
    /// Returns [`SignedCookieError::InvalidConfig`] when, in this order:
    /// - `expiry` is empty, not numeric, or outside the `i64` range
    /// - `path` contains a control character, a non-ASCII character or `;`
    /// - `domain` is empty, or is not a valid hostname once a single leading `.` is stripped
    /// - `key` is empty
    /// - `algorithm` is empty or not a supported HMAC hash
    ///
    /// An empty `path` falls back to `/`.
    pub fn new(
        domain: &str,
        path: &str,
        expiry: &str,
        key: impl AsRef<[u8]>,
        algorithm: &str,
    ) -> Result<Self, SignedCookieError> {
        Self::validate(domain, path, expiry, key.as_ref(), algorithm).map_err(|error| {
            tracing::warn!(%error, domain, "Rejected signed cookie configuration");
            SignedCookieError::from(error)
        })
    }

    /// Creates a signer from deserialized configuration. See [`SignedCookieSigner::new`].
    ///
    /// # Errors
    ///
    /// [`ConfigError::InvalidKey`] if the key doesn't decode with its declared encoding, then the
    /// same errors as [`SignedCookieSigner::new`].
    pub fn from_config(config: &SignerConfig) -> Result<Self, SignedCookieError> {
        let key = config.key_bytes().map_err(|error| {
            tracing::warn!(%error, "Rejected signed cookie key");
            SignedCookieError::from(error)
        })?;
        Self::new(
            &config.domain,
            &config.path,
            &config.expiry,
            key.as_slice(),
            &config.algorithm,
        )
    }

    fn validate(
        domain: &str,
        path: &str,
        expiry: &str,
        key: &[u8],
        algorithm: &str,
    ) -> Result<Self, ConfigError> {
        let expiry: Expiry = expiry.parse()?;

        let path = if path.is_empty() { DEFAULT_PATH } else { path };
        ensure!(is_valid_attribute_value(path) => ConfigError::InvalidPath(path.to_string()));

        ensure!(!domain.is_empty() => ConfigError::MissingDomain);
        ensure!(
            is_valid_hostname(strip_leading_dot(domain))
                => ConfigError::InvalidDomain(domain.to_string())
        );

        let key = SigningKey::new(key)?;
        let algorithm: MacAlgorithm = algorithm.parse()?;

        tracing::debug!(
            domain,
            path,
            expiry = expiry.timestamp(),
            %algorithm,
            "Created signed cookie signer"
        );

        Ok(Self {
            domain: domain.to_string(),
            path: path.to_string(),
            expiry,
            key,
            algorithm,
        })
    }

    /// Cookie domain, verbatim as configured.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Cookie path, `/` unless configured otherwise.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Absolute expiry of issued cookies.
    pub fn expiry(&self) -> Expiry {
        self.expiry
    }

    /// HMAC hash used for signatures.
    pub fn algorithm(&self) -> MacAlgorithm {
        self.algorithm
    }

    /// Computes the signature of `value`: lowercase hex `HMAC(algorithm, key, value)`.
    ///
    /// Deterministic for a given key and algorithm.
    pub fn sign(&self, value: &str) -> String {
        self.algorithm.mac_hex(self.key.as_bytes(), value.as_bytes())
    }

    /// Builds the signed cookie for `name` without emitting it.
    ///
    /// The cookie carries the signature of `value`, the configured expiry, path and domain, and
    /// is always `Secure` and `HttpOnly`.
    pub fn signed_cookie(&self, name: &str, value: &str) -> Result<Cookie, SignedCookieError> {
        ensure!(!name.is_empty() => ArgumentError::MissingName);
        ensure!(!value.is_empty() => ArgumentError::MissingValue);

        Ok(Cookie {
            name: name.to_string(),
            value: self.sign(value),
            domain: Some(self.domain.clone()),
            path: Some(self.path.clone()),
            expires: Some(self.expiry),
            secure: true,
            http_only: true,
            same_site: SameSite::Lax,
        })
    }

    /// Signs `value` and hands the resulting cookie called `name` to `sink`.
    ///
    /// # Errors
    ///
    /// [`SignedCookieError::InvalidArgument`] if `name` or `value` is empty, and
    /// [`SignedCookieError::Cookie`] if the sink refuses the cookie.
    pub fn set_cookie<S>(&self, sink: &S, name: &str, value: &str) -> Result<(), SignedCookieError>
    where
        S: CookieSink + ?Sized,
    {
        let cookie = self.signed_cookie(name, value)?;
        sink.set_outgoing_cookie(cookie)?;
        Ok(())
    }

    /// Checks whether the incoming cookie `cookie_name` holds the signature of `plaintext_value`.
    ///
    /// Returns `false` when the cookie is absent or its value differs in any byte. A mismatch is
    /// a normal outcome and never an error.
    ///
    /// # Errors
    ///
    /// [`SignedCookieError::InvalidArgument`] if either argument is empty.
    pub fn is_valid<S>(
        &self,
        source: &S,
        cookie_name: &str,
        plaintext_value: &str,
    ) -> Result<bool, SignedCookieError>
    where
        S: CookieSource + ?Sized,
    {
        ensure!(!cookie_name.is_empty() => ArgumentError::MissingCookieName);
        ensure!(!plaintext_value.is_empty() => ArgumentError::MissingPlaintextValue);

        let expected = self.sign(plaintext_value);

        let Some(actual) = source.get_incoming_cookie(cookie_name) else {
            tracing::debug!(cookie_name, "Signed cookie not present");
            return Ok(false);
        };

        let valid = signatures_match(expected.as_bytes(), actual.as_bytes());
        if !valid {
            tracing::debug!(cookie_name, "Signed cookie does not match the expected value");
        }
        Ok(valid)
    }
}

/// Byte-for-byte comparison that doesn't leak the position of the first difference.
fn signatures_match(expected: &[u8], actual: &[u8]) -> bool {
    // Lengths are public: every signature for one algorithm has the same length
    if expected.len() != actual.len() {
        return false;
    }
    expected.ct_eq(actual).into()
}
