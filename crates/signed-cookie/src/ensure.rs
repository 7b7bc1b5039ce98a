//! Helper macro to express precondition checks concisely.

/// Ensures that an expression is true. Otherwise the given error is returned.
/// ```
/// use signed_cookie::{ensure, ArgumentError};
/// fn example(name: &str) -> Result<(), ArgumentError> {
///     ensure!(!name.is_empty() => ArgumentError::MissingName);
///     Ok(())
/// }
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr => $err:expr) => {
        if !$cond {
            return Err($err.into());
        }
    };
}
