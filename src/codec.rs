//! URL → hash → short code transform
//!
//! A URL is digested with SHA-256 and truncated to a 10 hex character prefix
//! (40 bits). That prefix is the store's lookup key; the short code shown to
//! users is the same 40-bit value written in base 62. Everything here is pure
//! and safe to call from any thread.

use std::fmt;

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::errors::{Result, ShorturlError};

/// Number of hex characters kept from the digest.
pub const HASH_HEX_LEN: usize = 10;

/// Longest code a 40-bit value can produce (62^7 > 2^40).
pub const MAX_CODE_LEN: usize = 7;

const HASH_BITS: u32 = (HASH_HEX_LEN as u32) * 4;
const MAX_HASH_VALUE: u64 = (1u64 << HASH_BITS) - 1;

const ALPHABET: &[u8; 62] = b"0123456789abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Truncated URL digest, always exactly 10 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct UrlHash(String);

impl UrlHash {
    /// Validate an externally supplied hash string.
    pub fn parse(value: &str) -> Result<Self> {
        let valid = value.len() == HASH_HEX_LEN
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        if !valid {
            return Err(ShorturlError::invalid_code(format!(
                "'{}' is not a {}-character lowercase hex hash",
                value, HASH_HEX_LEN
            )));
        }
        Ok(Self(value.to_string()))
    }

    fn from_value(value: u64) -> Self {
        Self(format!("{:0width$x}", value, width = HASH_HEX_LEN))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn value(&self) -> u64 {
        // parse() / from_value() guarantee 10 hex digits
        u64::from_str_radix(&self.0, 16).unwrap_or_default()
    }
}

impl fmt::Display for UrlHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Base-62 token presented to end users.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShortCode(String);

impl ShortCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for ShortCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full SHA-256 of the URL in lowercase hex.
pub fn url_digest(url: &str) -> String {
    let digest = Sha256::digest(url.as_bytes());
    digest.iter().map(|b| format!("{:02x}", b)).collect()
}

/// Hash a URL down to its 40-bit lookup key.
pub fn hash_url(url: &str) -> UrlHash {
    let digest = Sha256::digest(url.as_bytes());
    // 前 5 字节 = 前 10 个十六进制字符
    let value = digest[..HASH_HEX_LEN / 2]
        .iter()
        .fold(0u64, |acc, b| (acc << 8) | u64::from(*b));
    UrlHash::from_value(value)
}

/// Encode a hash as a base-62 short code (most significant digit first).
pub fn encode(hash: &UrlHash) -> ShortCode {
    let mut value = hash.value();
    if value == 0 {
        return ShortCode("0".to_string());
    }

    let mut buf = Vec::with_capacity(MAX_CODE_LEN);
    while value > 0 {
        buf.push(ALPHABET[(value % 62) as usize]);
        value /= 62;
    }
    buf.reverse();

    // ALPHABET 只含 ASCII
    ShortCode(buf.into_iter().map(char::from).collect())
}

/// Decode a short code back to the hash it was encoded from.
pub fn decode(code: &str) -> Result<UrlHash> {
    if code.is_empty() {
        return Err(ShorturlError::invalid_code("short code is empty"));
    }
    if code.len() > MAX_CODE_LEN {
        return Err(ShorturlError::invalid_code(format!(
            "short code '{}' is longer than {} characters",
            code, MAX_CODE_LEN
        )));
    }

    let mut value: u64 = 0;
    for c in code.chars() {
        let digit = digit_value(c).ok_or_else(|| {
            ShorturlError::invalid_code(format!(
                "short code '{}' contains invalid character '{}'",
                code, c
            ))
        })?;
        // 7 位 base62 最大约 3.5e12，不会溢出 u64
        value = value * 62 + digit;
    }

    if value > MAX_HASH_VALUE {
        return Err(ShorturlError::invalid_code(format!(
            "short code '{}' exceeds the {}-bit hash range",
            code, HASH_BITS
        )));
    }

    Ok(UrlHash::from_value(value))
}

fn digit_value(c: char) -> Option<u64> {
    match c {
        '0'..='9' => Some(c as u64 - '0' as u64),
        'a'..='z' => Some(c as u64 - 'a' as u64 + 10),
        'A'..='Z' => Some(c as u64 - 'A' as u64 + 36),
        _ => None,
    }
}
