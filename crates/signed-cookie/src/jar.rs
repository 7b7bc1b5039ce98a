use std::{
    collections::HashMap,
    sync::{PoisonError, RwLock},
};

use crate::{Cookie, CookieError};

/// Receives outgoing cookies, typically by turning them into `Set-Cookie` response headers.
///
/// Owned by the surrounding HTTP layer. Implementations should call
/// [`Cookie::validate_security_attributes`] before emitting a cookie.
pub trait CookieSink {
    /// Emits one outgoing cookie.
    fn set_outgoing_cookie(&self, cookie: Cookie) -> Result<(), CookieError>;
}

/// Reads raw cookie values from the incoming request.
pub trait CookieSource {
    /// Returns the raw value of the incoming cookie called `name`, or `None` if absent.
    fn get_incoming_cookie(&self, name: &str) -> Option<String>;
}

impl<F> CookieSource for F
where
    F: Fn(&str) -> Option<String>,
{
    fn get_incoming_cookie(&self, name: &str) -> Option<String> {
        self(name)
    }
}

impl CookieSource for HashMap<String, String> {
    fn get_incoming_cookie(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

/// In-memory cookie jar using a HashMap behind an RwLock for thread-safe access.
///
/// Acts as both [CookieSink] and [CookieSource], so cookies set on it can be read back. Suitable
/// for tests and for handlers that collect outgoing cookies before writing the response.
#[derive(Debug, Default)]
pub struct InMemoryCookieJar {
    cookies: RwLock<HashMap<String, Cookie>>,
}

impl InMemoryCookieJar {
    /// Creates a new empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves a non-expired cookie by name.
    pub fn get_cookie(&self, name: &str) -> Result<Option<Cookie>, CookieError> {
        let cookies = self.cookies.read().map_err(poisoned)?;
        Ok(cookies.get(name).filter(|c| !c.is_expired()).cloned())
    }

    /// Stores a cookie after validating its security attributes, replacing any cookie with the
    /// same name.
    pub fn set_cookie(&self, cookie: Cookie) -> Result<(), CookieError> {
        cookie.validate_security_attributes()?;

        let mut cookies = self.cookies.write().map_err(poisoned)?;
        cookies.insert(cookie.name.clone(), cookie);
        Ok(())
    }

    /// Removes a cookie by name. Succeeds even if the cookie doesn't exist.
    pub fn remove_cookie(&self, name: &str) -> Result<(), CookieError> {
        let mut cookies = self.cookies.write().map_err(poisoned)?;
        cookies.remove(name);
        Ok(())
    }

    /// Clears all stored cookies.
    pub fn clear(&self) -> Result<(), CookieError> {
        let mut cookies = self.cookies.write().map_err(poisoned)?;
        cookies.clear();
        Ok(())
    }

    /// Lists all non-expired cookie names, sorted.
    pub fn list_cookies(&self) -> Result<Vec<String>, CookieError> {
        let cookies = self.cookies.read().map_err(poisoned)?;
        let mut names: Vec<String> = cookies
            .iter()
            .filter(|(_, c)| !c.is_expired())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    /// Renders every non-expired cookie as a `Set-Cookie` header value, sorted by name.
    pub fn set_cookie_headers(&self) -> Result<Vec<String>, CookieError> {
        let cookies = self.cookies.read().map_err(poisoned)?;
        let mut stored: Vec<&Cookie> = cookies.values().filter(|c| !c.is_expired()).collect();
        stored.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(stored.into_iter().map(Cookie::to_set_cookie_header).collect())
    }
}

fn poisoned<T>(_: PoisonError<T>) -> CookieError {
    CookieError::StorageFailure("cookie jar lock poisoned".to_string())
}

impl CookieSink for InMemoryCookieJar {
    fn set_outgoing_cookie(&self, cookie: Cookie) -> Result<(), CookieError> {
        self.set_cookie(cookie)
    }
}

impl CookieSource for InMemoryCookieJar {
    fn get_incoming_cookie(&self, name: &str) -> Option<String> {
        match self.get_cookie(name) {
            Ok(cookie) => cookie.map(|c| c.value),
            Err(error) => {
                tracing::warn!(%error, cookie_name = %name, "Failed to read cookie from jar");
                None
            }
        }
    }
}
