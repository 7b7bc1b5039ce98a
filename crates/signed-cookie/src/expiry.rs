use std::{
    fmt,
    str::FromStr,
    time::{Duration, SystemTime, UNIX_EPOCH},
};

use chrono::{TimeZone, Utc};

use crate::ConfigError;

/// Absolute cookie expiry as a Unix timestamp in seconds.
///
/// Timestamps in the past are accepted, they produce a cookie the client discards immediately.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Expiry(i64);

impl Expiry {
    /// `Sat, 01 Jan 0000 00:00:00 GMT`
    pub const EARLIEST_HTTP_DATE: Expiry = Expiry(-62_167_219_200);
    /// `Fri, 31 Dec 9999 23:59:59 GMT`
    pub const LATEST_HTTP_DATE: Expiry = Expiry(253_402_300_799);

    /// Creates an expiry from a Unix timestamp.
    pub fn from_timestamp(timestamp: i64) -> Self {
        Self(timestamp)
    }

    /// Unix timestamp in seconds.
    pub fn timestamp(&self) -> i64 {
        self.0
    }

    /// Converts to a [SystemTime], or `None` if the platform can't represent the instant.
    pub fn to_system_time(&self) -> Option<SystemTime> {
        let offset = Duration::from_secs(self.0.unsigned_abs());
        if self.0 >= 0 {
            UNIX_EPOCH.checked_add(offset)
        } else {
            UNIX_EPOCH.checked_sub(offset)
        }
    }

    /// Returns true if the expiry lies strictly in the past.
    pub fn is_past(&self) -> bool {
        self.to_system_time()
            .map_or(self.0 < 0, |exp| SystemTime::now() > exp)
    }

    /// Formats the expiry as an HTTP date (`Sun, 06 Nov 1994 08:49:37 GMT`), or `None` if the
    /// year falls outside `0000..=9999`, which an IMF-fixdate can't express.
    pub fn to_http_date(&self) -> Option<String> {
        if !(Self::EARLIEST_HTTP_DATE.0..=Self::LATEST_HTTP_DATE.0).contains(&self.0) {
            return None;
        }
        Utc.timestamp_opt(self.0, 0)
            .single()
            .map(|date| date.format("%a, %d %b %Y %H:%M:%S GMT").to_string())
    }
}

impl FromStr for Expiry {
    type Err = ConfigError;

    /// Parses a numeric timestamp. Decimal and exponent notation are accepted and truncated
    /// toward zero, as long as the value fits in an `i64`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::MissingExpiry);
        }

        let invalid = || ConfigError::InvalidExpiry(s.to_string());
        let trimmed = s.trim();

        if let Ok(timestamp) = trimmed.parse::<i64>() {
            return Ok(Self(timestamp));
        }

        // Plain integers that failed to parse above overflowed the i64 range.
        if !is_numeric(trimmed) || !trimmed.contains(['.', 'e', 'E']) {
            return Err(invalid());
        }

        let value: f64 = trimmed.parse().map_err(|_| invalid())?;
        if !(I64_MIN_F64..I64_UPPER_F64).contains(&value) {
            return Err(invalid());
        }

        Ok(Self(value.trunc() as i64))
    }
}

impl fmt::Display for Expiry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// `-2^63`, exactly representable.
const I64_MIN_F64: f64 = -9_223_372_036_854_775_808.0;
/// `2^63`, the first value above `i64::MAX`.
const I64_UPPER_F64: f64 = 9_223_372_036_854_775_808.0;

/// Decimal number grammar: `[sign] (digits [. digits] | . digits) [(e|E) [sign] digits]`.
fn is_numeric(s: &str) -> bool {
    let s = s.strip_prefix(['+', '-']).unwrap_or(s);

    let (mantissa, exponent) = match s.split_once(['e', 'E']) {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (s, None),
    };

    let mantissa_ok = match mantissa.split_once('.') {
        Some((int, frac)) => {
            (!int.is_empty() || !frac.is_empty()) && all_digits(int) && all_digits(frac)
        }
        None => !mantissa.is_empty() && all_digits(mantissa),
    };

    let exponent_ok = exponent.is_none_or(|exp| {
        let exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
        !exp.is_empty() && all_digits(exp)
    });

    mantissa_ok && exponent_ok
}

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_integer() {
        assert_eq!("9999999999".parse(), Ok(Expiry(9_999_999_999)));
        assert_eq!("-1".parse(), Ok(Expiry(-1)));
        assert_eq!("+42".parse(), Ok(Expiry(42)));
        assert_eq!(" 1700000000 ".parse(), Ok(Expiry(1_700_000_000)));
        assert_eq!("0".parse(), Ok(Expiry(0)));
    }

    #[test]
    fn test_parse_decimal_and_exponent() {
        assert_eq!("1.7e9".parse(), Ok(Expiry(1_700_000_000)));
        assert_eq!("1700000000.9".parse(), Ok(Expiry(1_700_000_000)));
        assert_eq!("-2.5".parse(), Ok(Expiry(-2)));
        assert_eq!(".5".parse(), Ok(Expiry(0)));
        assert_eq!("5.".parse(), Ok(Expiry(5)));
    }

    #[test]
    fn test_parse_empty() {
        assert_eq!("".parse::<Expiry>(), Err(ConfigError::MissingExpiry));
    }

    #[test]
    fn test_parse_non_numeric() {
        for input in [
            " ", "abc", "12abc", "0x1A", "1e", "e5", ".", "+", "inf", "NaN", "1_000", "1 000",
        ] {
            assert_eq!(
                input.parse::<Expiry>(),
                Err(ConfigError::InvalidExpiry(input.to_string())),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_parse_out_of_range() {
        assert_eq!(
            "9223372036854775807".parse(),
            Ok(Expiry(i64::MAX)),
            "i64::MAX is representable"
        );
        assert_eq!("-9223372036854775808".parse(), Ok(Expiry(i64::MIN)));

        for input in ["9223372036854775808", "-9223372036854775809", "1e19", "-1e300"] {
            assert_eq!(
                input.parse::<Expiry>(),
                Err(ConfigError::InvalidExpiry(input.to_string())),
                "{input:?}"
            );
        }
    }

    #[test]
    fn test_http_date() {
        assert_eq!(
            Expiry(784111777).to_http_date().as_deref(),
            Some("Sun, 06 Nov 1994 08:49:37 GMT")
        );
        assert_eq!(Expiry(i64::MAX).to_http_date(), None);
    }

    #[test]
    fn test_http_date_four_digit_years_only() {
        assert_eq!(
            Expiry::LATEST_HTTP_DATE.to_http_date().as_deref(),
            Some("Fri, 31 Dec 9999 23:59:59 GMT")
        );
        assert_eq!(
            Expiry::EARLIEST_HTTP_DATE.to_http_date().as_deref(),
            Some("Sat, 01 Jan 0000 00:00:00 GMT")
        );

        // 10000-01-01T00:00:00Z and 0000-01-01T00:00:00Z minus one second
        assert_eq!(Expiry(253_402_300_800).to_http_date(), None);
        assert_eq!(Expiry(-62_167_219_201).to_http_date(), None);
    }

    #[test]
    fn test_is_past() {
        assert!(Expiry(0).is_past());
        assert!(Expiry(-1).is_past());
        assert!(!Expiry(9_999_999_999).is_past());
    }
}
