use std::fmt::Write;

use crate::{CookieError, Expiry};

/// An outgoing HTTP cookie together with its security attributes.
///
/// Security attributes include HttpOnly (prevents JavaScript access), Secure (HTTPS-only), and
/// SameSite (cross-site request policy). Cookies issued by
/// [`SignedCookieSigner`](crate::SignedCookieSigner) always carry `secure` and `http_only`.
#[derive(Clone, Debug, PartialEq)]
pub struct Cookie {
    /// Cookie name
    pub name: String,
    /// Cookie value
    pub value: String,
    /// Cookie domain
    pub domain: Option<String>,
    /// Cookie path
    pub path: Option<String>,
    /// Cookie expiration timestamp
    pub expires: Option<Expiry>,
    /// Secure attribute (HTTPS-only)
    pub secure: bool,
    /// HttpOnly attribute (prevents JavaScript access)
    pub http_only: bool,
    /// SameSite attribute
    pub same_site: SameSite,
}

/// SameSite cookie attribute for cross-site request policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SameSite {
    /// Cookie only sent to same-site requests
    Strict,
    /// Cookie sent to same-site and top-level navigation
    Lax,
    /// Cookie sent to all requests (requires Secure=true in most browsers)
    None,
}

impl SameSite {
    fn as_str(&self) -> &'static str {
        match self {
            SameSite::Strict => "Strict",
            SameSite::Lax => "Lax",
            SameSite::None => "None",
        }
    }
}

impl Cookie {
    /// Creates a new session cookie.
    ///
    /// Defaults: path="/", same_site=Lax, secure=false, http_only=false, no expiration.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
            domain: None,
            path: Some("/".to_string()),
            expires: None,
            secure: false,
            http_only: false,
            same_site: SameSite::Lax,
        }
    }

    /// Returns true if the cookie has expired (past its expiration timestamp).
    pub fn is_expired(&self) -> bool {
        self.expires.is_some_and(|exp| exp.is_past())
    }

    /// Validates the cookie's name, value and security attributes.
    ///
    /// Logs warnings for missing recommended attributes (HttpOnly, Secure, strict SameSite).
    /// Returns [CookieError::InvalidCookie] for malformed names, values, paths or domains and
    /// [CookieError::SecurityViolation] for `__Host-` and `__Secure-` prefix violations.
    pub fn validate_security_attributes(&self) -> Result<(), CookieError> {
        if self.name.is_empty() || !self.name.bytes().all(is_token_byte) {
            return Err(CookieError::InvalidCookie(format!(
                "Cookie name {:?} is not a valid token",
                self.name
            )));
        }
        if !self.value.bytes().all(is_cookie_value_byte) {
            return Err(CookieError::InvalidCookie(format!(
                "Cookie {} has a value with characters outside the cookie-octet range",
                self.name
            )));
        }
        for (attribute, value) in [("Path", &self.path), ("Domain", &self.domain)] {
            if value.as_deref().is_some_and(|v| !is_valid_attribute_value(v)) {
                return Err(CookieError::InvalidCookie(format!(
                    "Cookie {} has a {attribute} attribute with a control character or ';'",
                    self.name
                )));
            }
        }

        if !self.http_only {
            tracing::warn!(
                cookie_name = %self.name,
                "Cookie missing HttpOnly attribute - vulnerable to JavaScript access"
            );
        }

        if !self.secure {
            tracing::warn!(
                cookie_name = %self.name,
                "Cookie missing Secure attribute - vulnerable to non-HTTPS transmission"
            );
        }

        if matches!(self.same_site, SameSite::None) {
            tracing::warn!(
                cookie_name = %self.name,
                "Cookie using SameSite=None - vulnerable to cross-site requests"
            );
        }

        // Prefix requirements (RFC 6265bis)
        if self.name.starts_with("__Secure-") && !self.secure {
            return Err(CookieError::SecurityViolation(
                "__Secure- prefix cookies must have Secure=true".to_string(),
            ));
        }
        if self.name.starts_with("__Host-") {
            if self.path.as_deref() != Some("/") {
                return Err(CookieError::SecurityViolation(format!(
                    "Cookie with __Host- prefix must have path=/ (got {:?})",
                    self.path
                )));
            }
            if self.domain.is_some() {
                return Err(CookieError::SecurityViolation(
                    "__Host- prefix cookies cannot specify domain attribute".to_string(),
                ));
            }
            if !self.secure {
                return Err(CookieError::SecurityViolation(
                    "__Host- prefix cookies must have Secure=true".to_string(),
                ));
            }
        }

        Ok(())
    }

    /// Formats cookie as "name=value" for the HTTP Cookie request header.
    pub fn to_cookie_header(&self) -> String {
        format!("{}={}", self.name, self.value)
    }

    /// Formats cookie as the value of a `Set-Cookie` response header.
    ///
    /// An expiry outside the HTTP date range is rendered as `Max-Age=0` when in the past and
    /// clamped to [`Expiry::LATEST_HTTP_DATE`] otherwise.
    pub fn to_set_cookie_header(&self) -> String {
        let mut header = self.to_cookie_header();

        // Writing to a String never fails
        if let Some(expires) = self.expires {
            let date = match expires.to_http_date() {
                Some(date) => Some(date),
                None if expires.is_past() => None,
                None => Expiry::LATEST_HTTP_DATE.to_http_date(),
            };
            match date {
                Some(date) => {
                    let _ = write!(header, "; Expires={date}");
                }
                None => header.push_str("; Max-Age=0"),
            }
        }
        if let Some(path) = &self.path {
            let _ = write!(header, "; Path={path}");
        }
        if let Some(domain) = &self.domain {
            let _ = write!(header, "; Domain={domain}");
        }
        if self.secure {
            header.push_str("; Secure");
        }
        if self.http_only {
            header.push_str("; HttpOnly");
        }
        let _ = write!(header, "; SameSite={}", self.same_site.as_str());

        header
    }
}

/// RFC 7230 `tchar`
fn is_token_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b"!#$%&'*+-.^_`|~".contains(&b)
}

/// RFC 6265 `path-value` and `domain-value` characters: printable ASCII except `;`
pub(crate) fn is_valid_attribute_value(value: &str) -> bool {
    value.bytes().all(|b| matches!(b, 0x20..=0x7E) && b != b';')
}

/// RFC 6265 `cookie-octet`
fn is_cookie_value_byte(b: u8) -> bool {
    matches!(b, 0x21 | 0x23..=0x2B | 0x2D..=0x3A | 0x3C..=0x5B | 0x5D..=0x7E)
}
