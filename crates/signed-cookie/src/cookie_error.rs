/// Errors raised by cookie sinks and by cookie attribute validation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    /// Cookie storage backend operation failed (poisoned lock, I/O error, etc.)
    #[error("Cookie storage operation failed: {0}")]
    StorageFailure(String),

    /// Cookie has invalid format or attributes
    #[error("Invalid cookie format or attributes: {0}")]
    InvalidCookie(String),

    /// Cookie violates security policy (e.g. a `__Host-` cookie carrying a domain)
    #[error("Cookie security policy violation: {0}")]
    SecurityViolation(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_messages() {
        let err = CookieError::StorageFailure("lock poisoned".to_string());
        assert_eq!(
            err.to_string(),
            "Cookie storage operation failed: lock poisoned"
        );

        let err = CookieError::InvalidCookie("empty name".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid cookie format or attributes: empty name"
        );
    }

    #[test]
    fn test_error_variant_matching() {
        let err = CookieError::SecurityViolation("domain".to_string());

        match err {
            CookieError::SecurityViolation(reason) => assert_eq!(reason, "domain"),
            _ => panic!("Expected SecurityViolation variant"),
        }
    }
}
