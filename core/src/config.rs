use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};

use serde::Deserialize;

use crate::constants::*;
use crate::hash::HashAlgorithm;
use crate::utils::Redact;
use crate::Env;
use crate::Error;
use crate::Result;

/// Config is the data part of a signer's configuration.
///
/// Strategies that can't be expressed as data (custom pair join,
/// post-processing or hashing) are set on [`crate::SignerBuilder`] instead.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Secret key folded into the string to sign.
    pub secret_key: String,
    /// Keys that are never signed, `{"sign"}` by default.
    pub ignore_keys: BTreeSet<String>,
    /// Drop keys whose value is empty, `true` by default.
    pub skip_empty: bool,
    /// Tag source used to rename record fields.
    pub tag: Option<String>,
    /// Separator between pairs, `&` by default.
    pub separator: String,
    /// Hash algorithm, `md5` by default.
    pub hash: HashAlgorithm,
    /// Upper-case the hex digest.
    pub uppercase: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            secret_key: String::new(),
            ignore_keys: BTreeSet::from([DEFAULT_IGNORE_KEY.to_string()]),
            skip_empty: true,
            tag: None,
            separator: DEFAULT_SEPARATOR.to_string(),
            hash: HashAlgorithm::default(),
            uppercase: false,
        }
    }
}

impl Debug for Config {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("ignore_keys", &self.ignore_keys)
            .field("skip_empty", &self.skip_empty)
            .field("tag", &self.tag)
            .field("separator", &self.separator)
            .field("hash", &self.hash)
            .field("uppercase", &self.uppercase)
            .finish()
    }
}

impl Config {
    /// Load config from environment variables.
    ///
    /// Unset variables keep their default. `KVSIGN_IGNORE_KEYS` is a comma
    /// separated list that replaces the default set; an empty value ignores
    /// nothing.
    pub fn from_env(env: &impl Env) -> Result<Self> {
        let mut config = Self::default();

        if let Some(v) = env.var(KVSIGN_SECRET_KEY) {
            config.secret_key = v;
        }
        if let Some(v) = env.var(KVSIGN_IGNORE_KEYS) {
            config.ignore_keys = v
                .split(',')
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string)
                .collect();
        }
        if let Some(v) = env.var(KVSIGN_SKIP_EMPTY) {
            config.skip_empty = parse_bool(KVSIGN_SKIP_EMPTY, &v)?;
        }
        if let Some(v) = env.var(KVSIGN_TAG) {
            config.tag = Some(v).filter(|v| !v.is_empty());
        }
        if let Some(v) = env.var(KVSIGN_SEPARATOR) {
            config.separator = v;
        }
        if let Some(v) = env.var(KVSIGN_HASH) {
            config.hash = v.parse()?;
        }
        if let Some(v) = env.var(KVSIGN_HASH_UPPERCASE) {
            config.uppercase = parse_bool(KVSIGN_HASH_UPPERCASE, &v)?;
        }

        Ok(config)
    }

    /// Parse config from a TOML document.
    pub fn from_toml(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    /// Parse config from a JSON document.
    pub fn from_json(content: &str) -> Result<Self> {
        serde_json::from_str(content)
            .map_err(|e| Error::config_invalid("failed to parse JSON config").with_source(e))
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(Error::config_invalid(format!(
            "{name} must be a boolean, got {value:?}"
        ))),
    }
}
