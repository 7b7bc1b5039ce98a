use std::{fmt, str::FromStr};

use hmac::{digest::KeyInit, Hmac, Mac};

use crate::ConfigError;

/// Hash functions a cookie signature can be computed with.
///
/// Names follow the common `hash_hmac` vocabulary and are matched case-insensitively.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MacAlgorithm {
    /// HMAC-SHA1, `sha1`. Kept for interoperability with existing cookies.
    Sha1,
    /// HMAC-SHA224, `sha224`
    Sha224,
    /// HMAC-SHA256, `sha256`
    Sha256,
    /// HMAC-SHA384, `sha384`
    Sha384,
    /// HMAC-SHA512, `sha512`
    Sha512,
    /// HMAC-SHA512/224, `sha512/224`
    Sha512_224,
    /// HMAC-SHA512/256, `sha512/256`
    Sha512_256,
    /// HMAC-SHA3-224, `sha3-224`
    Sha3_224,
    /// HMAC-SHA3-256, `sha3-256`
    Sha3_256,
    /// HMAC-SHA3-384, `sha3-384`
    Sha3_384,
    /// HMAC-SHA3-512, `sha3-512`
    Sha3_512,
    /// HMAC-MD5, `md5`. Only for validating cookies issued by legacy deployments.
    Md5,
    /// HMAC-RIPEMD-128, `ripemd128`
    Ripemd128,
    /// HMAC-RIPEMD-160, `ripemd160`
    Ripemd160,
    /// HMAC-RIPEMD-256, `ripemd256`
    Ripemd256,
    /// HMAC-RIPEMD-320, `ripemd320`
    Ripemd320,
}

impl MacAlgorithm {
    /// Every supported algorithm.
    pub const ALL: [MacAlgorithm; 16] = [
        MacAlgorithm::Md5,
        MacAlgorithm::Ripemd128,
        MacAlgorithm::Ripemd160,
        MacAlgorithm::Ripemd256,
        MacAlgorithm::Ripemd320,
        MacAlgorithm::Sha1,
        MacAlgorithm::Sha224,
        MacAlgorithm::Sha512_224,
        MacAlgorithm::Sha256,
        MacAlgorithm::Sha512_256,
        MacAlgorithm::Sha384,
        MacAlgorithm::Sha512,
        MacAlgorithm::Sha3_224,
        MacAlgorithm::Sha3_256,
        MacAlgorithm::Sha3_384,
        MacAlgorithm::Sha3_512,
    ];

    /// Canonical lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            MacAlgorithm::Sha1 => "sha1",
            MacAlgorithm::Sha224 => "sha224",
            MacAlgorithm::Sha256 => "sha256",
            MacAlgorithm::Sha384 => "sha384",
            MacAlgorithm::Sha512 => "sha512",
            MacAlgorithm::Sha512_224 => "sha512/224",
            MacAlgorithm::Sha512_256 => "sha512/256",
            MacAlgorithm::Sha3_224 => "sha3-224",
            MacAlgorithm::Sha3_256 => "sha3-256",
            MacAlgorithm::Sha3_384 => "sha3-384",
            MacAlgorithm::Sha3_512 => "sha3-512",
            MacAlgorithm::Md5 => "md5",
            MacAlgorithm::Ripemd128 => "ripemd128",
            MacAlgorithm::Ripemd160 => "ripemd160",
            MacAlgorithm::Ripemd256 => "ripemd256",
            MacAlgorithm::Ripemd320 => "ripemd320",
        }
    }

    /// Length of the hex encoded signature in characters.
    pub fn hex_len(&self) -> usize {
        match self {
            MacAlgorithm::Md5 | MacAlgorithm::Ripemd128 => 32,
            MacAlgorithm::Sha1 | MacAlgorithm::Ripemd160 => 40,
            MacAlgorithm::Sha224 | MacAlgorithm::Sha512_224 | MacAlgorithm::Sha3_224 => 56,
            MacAlgorithm::Sha256
            | MacAlgorithm::Sha512_256
            | MacAlgorithm::Sha3_256
            | MacAlgorithm::Ripemd256 => 64,
            MacAlgorithm::Ripemd320 => 80,
            MacAlgorithm::Sha384 | MacAlgorithm::Sha3_384 => 96,
            MacAlgorithm::Sha512 | MacAlgorithm::Sha3_512 => 128,
        }
    }

    /// Computes `HMAC(self, key, value)` and returns it lowercase hex encoded.
    pub(crate) fn mac_hex(&self, key: &[u8], value: &[u8]) -> String {
        match self {
            MacAlgorithm::Sha1 => mac_hex::<Hmac<sha1::Sha1>>(key, value),
            MacAlgorithm::Sha224 => mac_hex::<Hmac<sha2::Sha224>>(key, value),
            MacAlgorithm::Sha256 => mac_hex::<Hmac<sha2::Sha256>>(key, value),
            MacAlgorithm::Sha384 => mac_hex::<Hmac<sha2::Sha384>>(key, value),
            MacAlgorithm::Sha512 => mac_hex::<Hmac<sha2::Sha512>>(key, value),
            MacAlgorithm::Sha512_224 => mac_hex::<Hmac<sha2::Sha512_224>>(key, value),
            MacAlgorithm::Sha512_256 => mac_hex::<Hmac<sha2::Sha512_256>>(key, value),
            MacAlgorithm::Sha3_224 => mac_hex::<Hmac<sha3::Sha3_224>>(key, value),
            MacAlgorithm::Sha3_256 => mac_hex::<Hmac<sha3::Sha3_256>>(key, value),
            MacAlgorithm::Sha3_384 => mac_hex::<Hmac<sha3::Sha3_384>>(key, value),
            MacAlgorithm::Sha3_512 => mac_hex::<Hmac<sha3::Sha3_512>>(key, value),
            MacAlgorithm::Md5 => mac_hex::<Hmac<md5::Md5>>(key, value),
            MacAlgorithm::Ripemd128 => mac_hex::<Hmac<ripemd::Ripemd128>>(key, value),
            MacAlgorithm::Ripemd160 => mac_hex::<Hmac<ripemd::Ripemd160>>(key, value),
            MacAlgorithm::Ripemd256 => mac_hex::<Hmac<ripemd::Ripemd256>>(key, value),
            MacAlgorithm::Ripemd320 => mac_hex::<Hmac<ripemd::Ripemd320>>(key, value),
        }
    }
}

fn mac_hex<M: Mac + KeyInit>(key: &[u8], value: &[u8]) -> String {
    let mut mac = <M as KeyInit>::new_from_slice(key).expect("HMAC can take a key of any size");
    mac.update(value);
    hex::encode(mac.finalize().into_bytes())
}

impl FromStr for MacAlgorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ConfigError::MissingAlgorithm);
        }

        MacAlgorithm::ALL
            .into_iter()
            .find(|alg| alg.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| ConfigError::UnsupportedAlgorithm(s.to_string()))
    }
}

impl fmt::Display for MacAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
