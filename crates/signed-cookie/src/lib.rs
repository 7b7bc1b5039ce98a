#![doc = include_str!("../README.md")]

//! # Domain and path
//!
//! The configured domain must be a valid hostname once a single leading `.` is stripped, so both
//! `example.com` and `.example.com` are accepted. Issued cookies carry the configured path, which
//! defaults to `/` and may not contain control characters or `;`.

mod algorithm;
pub use algorithm::MacAlgorithm;
mod config;
pub use config::{KeyEncoding, SignerConfig};
mod cookie;
pub use cookie::{Cookie, SameSite};
mod cookie_error;
pub use cookie_error::CookieError;
mod ensure;
mod error;
pub use error::{ArgumentError, ConfigError, SignedCookieError};
mod expiry;
pub use expiry::Expiry;
mod hostname;
pub use hostname::is_valid_hostname;
mod jar;
pub use jar::{CookieSink, CookieSource, InMemoryCookieJar};
mod key;
pub use key::SigningKey;
mod signer;
pub use signer::SignedCookieSigner;
