//! Hash strategies and hash related utils.
//!
//! A [`HashStrategy`] maps the canonical string to its signature. Any
//! `Fn(&str) -> String` is a strategy too, so callers can plug in a digest
//! this crate doesn't ship.

use std::fmt::{Debug, Formatter};
use std::str::FromStr;
use std::sync::Arc;

use base64::prelude::BASE64_STANDARD;
use base64::Engine;
use hmac::Hmac;
use hmac::Mac;
use serde::Deserialize;
use sha1::Sha1 as Sha1Digest;
use sha2::Digest;
use sha2::Sha256 as Sha256Digest;

use crate::utils::Redact;
use crate::Error;

/// HashStrategy turns the canonical string into a signature.
///
/// Implementations must be pure: the same input always yields the same output.
pub trait HashStrategy: Send + Sync + 'static {
    /// Hash the input.
    fn hash(&self, input: &str) -> String;

    /// Name used when logging which strategy signed a payload.
    fn name(&self) -> &str {
        "custom"
    }

    /// Whether signatures may be compared ignoring ASCII case.
    ///
    /// True only for hex output. Custom strategies are compared exactly.
    fn case_insensitive(&self) -> bool {
        false
    }
}

impl<F> HashStrategy for F
where
    F: Fn(&str) -> String + Send + Sync + 'static,
{
    fn hash(&self, input: &str) -> String {
        self(input)
    }
}

/// Output encoding for keyed digests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Lower-case hex.
    #[default]
    Hex,
    /// Upper-case hex.
    HexUpper,
    /// Standard base64 with padding.
    Base64,
}

impl Encoding {
    fn encode(self, digest: &[u8]) -> String {
        match self {
            Encoding::Hex => hex::encode(digest),
            Encoding::HexUpper => hex::encode_upper(digest),
            Encoding::Base64 => base64_encode(digest),
        }
    }

    fn from_upper(upper: bool) -> Self {
        if upper {
            Encoding::HexUpper
        } else {
            Encoding::Hex
        }
    }
}

/// MD5 hex digest, the default strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Md5 {
    upper: bool,
}

impl Md5 {
    /// Create an MD5 strategy, upper-casing the hex digest if `upper` is set.
    pub fn new(upper: bool) -> Self {
        Self { upper }
    }
}

impl HashStrategy for Md5 {
    fn hash(&self, input: &str) -> String {
        Encoding::from_upper(self.upper).encode(&::md5::Md5::digest(input.as_bytes()))
    }

    fn name(&self) -> &str {
        "md5"
    }

    fn case_insensitive(&self) -> bool {
        true
    }
}

/// SHA1 hex digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha1 {
    upper: bool,
}

impl Sha1 {
    /// Create a SHA1 strategy, upper-casing the hex digest if `upper` is set.
    pub fn new(upper: bool) -> Self {
        Self { upper }
    }
}

impl HashStrategy for Sha1 {
    fn hash(&self, input: &str) -> String {
        Encoding::from_upper(self.upper).encode(&Sha1Digest::digest(input.as_bytes()))
    }

    fn name(&self) -> &str {
        "sha1"
    }

    fn case_insensitive(&self) -> bool {
        true
    }
}

/// SHA256 hex digest.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sha256 {
    upper: bool,
}

impl Sha256 {
    /// Create a SHA256 strategy, upper-casing the hex digest if `upper` is set.
    pub fn new(upper: bool) -> Self {
        Self { upper }
    }
}

impl HashStrategy for Sha256 {
    fn hash(&self, input: &str) -> String {
        Encoding::from_upper(self.upper).encode(&Sha256Digest::digest(input.as_bytes()))
    }

    fn name(&self) -> &str {
        "sha256"
    }

    fn case_insensitive(&self) -> bool {
        true
    }
}

/// HMAC-SHA256 keyed digest.
///
/// Schemes using this usually skip the appended key token, see
/// [`crate::NoKey`].
#[derive(Clone)]
pub struct HmacSha256 {
    key: Vec<u8>,
    encoding: Encoding,
}

impl HmacSha256 {
    /// Create an HMAC-SHA256 strategy with the given key.
    pub fn new(key: impl AsRef<[u8]>, encoding: Encoding) -> Self {
        Self {
            key: key.as_ref().to_vec(),
            encoding,
        }
    }
}

impl Debug for HmacSha256 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha256")
            .field("key", &Redact::from(&*String::from_utf8_lossy(&self.key)))
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl HashStrategy for HmacSha256 {
    fn hash(&self, input: &str) -> String {
        self.encoding.encode(&hmac_sha256(&self.key, input.as_bytes()))
    }

    fn name(&self) -> &str {
        "hmac-sha256"
    }

    fn case_insensitive(&self) -> bool {
        self.encoding != Encoding::Base64
    }
}

/// HMAC-SHA1 keyed digest.
#[derive(Clone)]
pub struct HmacSha1 {
    key: Vec<u8>,
    encoding: Encoding,
}

impl HmacSha1 {
    /// Create an HMAC-SHA1 strategy with the given key.
    pub fn new(key: impl AsRef<[u8]>, encoding: Encoding) -> Self {
        Self {
            key: key.as_ref().to_vec(),
            encoding,
        }
    }
}

impl Debug for HmacSha1 {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HmacSha1")
            .field("key", &Redact::from(&*String::from_utf8_lossy(&self.key)))
            .field("encoding", &self.encoding)
            .finish()
    }
}

impl HashStrategy for HmacSha1 {
    fn hash(&self, input: &str) -> String {
        self.encoding.encode(&hmac_sha1(&self.key, input.as_bytes()))
    }

    fn name(&self) -> &str {
        "hmac-sha1"
    }

    fn case_insensitive(&self) -> bool {
        self.encoding != Encoding::Base64
    }
}

/// Build an MD5 strategy.
pub fn md5(upper: bool) -> Md5 {
    Md5::new(upper)
}

/// Build a SHA1 strategy.
pub fn sha1(upper: bool) -> Sha1 {
    Sha1::new(upper)
}

/// Unkeyed algorithms selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HashAlgorithm {
    /// MD5
    #[default]
    Md5,
    /// SHA1
    Sha1,
    /// SHA256
    Sha256,
}

impl HashAlgorithm {
    /// Build the strategy for this algorithm.
    pub fn strategy(self, upper: bool) -> Arc<dyn HashStrategy> {
        match self {
            HashAlgorithm::Md5 => Arc::new(Md5::new(upper)),
            HashAlgorithm::Sha1 => Arc::new(Sha1::new(upper)),
            HashAlgorithm::Sha256 => Arc::new(Sha256::new(upper)),
        }
    }
}

impl FromStr for HashAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(HashAlgorithm::Md5),
            "sha1" => Ok(HashAlgorithm::Sha1),
            "sha256" => Ok(HashAlgorithm::Sha256),
            v => Err(Error::config_invalid(format!("unknown hash algorithm: {v}"))),
        }
    }
}

/// Base64 encode
pub fn base64_encode(content: &[u8]) -> String {
    BASE64_STANDARD.encode(content)
}

/// Hex encoded MD5 hash.
pub fn hex_md5(content: &[u8]) -> String {
    hex::encode(::md5::Md5::digest(content).as_slice())
}

/// Hex encoded SHA1 hash.
pub fn hex_sha1(content: &[u8]) -> String {
    hex::encode(Sha1Digest::digest(content).as_slice())
}

/// Hex encoded SHA256 hash.
pub fn hex_sha256(content: &[u8]) -> String {
    hex::encode(Sha256Digest::digest(content).as_slice())
}

/// HMAC with SHA256 hash.
pub fn hmac_sha256(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha256Digest>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// HMAC with SHA1 hash.
pub fn hmac_sha1(key: &[u8], content: &[u8]) -> Vec<u8> {
    // SAFETY: HMAC's new_from_slice always returns Ok - it handles any key length
    let mut h = Hmac::<Sha1Digest>::new_from_slice(key).unwrap();
    h.update(content);

    h.finalize().into_bytes().to_vec()
}

/// Hex encoded HMAC with SHA256 hash.
pub fn hex_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    hex::encode(hmac_sha256(key, content))
}

/// Base64 encoded HMAC with SHA256 hash.
pub fn base64_hmac_sha256(key: &[u8], content: &[u8]) -> String {
    base64_encode(&hmac_sha256(key, content))
}
