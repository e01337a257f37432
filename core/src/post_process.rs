//! Final transforms applied to the joined string before hashing.
//!
//! They fold the secret key into the string to sign.

use crate::constants::DEFAULT_KEY_LABEL;
use crate::PairJoin;

/// PostProcess transforms the joined pairs before hashing.
///
/// `joined` is the separator-joined token list, `separator` and `pair_join`
/// are the ones the signer uses so the secret can be rendered as one more
/// token.
pub trait PostProcess: Send + Sync + 'static {
    /// Transform the joined string.
    fn post_process(
        &self,
        joined: &str,
        separator: &str,
        secret_key: &str,
        pair_join: &dyn PairJoin,
    ) -> String;
}

impl<F> PostProcess for F
where
    F: Fn(&str, &str, &str, &dyn PairJoin) -> String + Send + Sync + 'static,
{
    fn post_process(
        &self,
        joined: &str,
        separator: &str,
        secret_key: &str,
        pair_join: &dyn PairJoin,
    ) -> String {
        self(joined, separator, secret_key, pair_join)
    }
}

/// AppendKey appends `separator + pair_join(label, secret_key)`.
///
/// This is the default post-processor and its label is the literal `key`,
/// whatever the secret is called elsewhere. The token is appended even when
/// no pair survived filtering, which yields `&key=<secret>`.
#[derive(Debug, Clone)]
pub struct AppendKey {
    label: String,
}

impl Default for AppendKey {
    fn default() -> Self {
        Self {
            label: DEFAULT_KEY_LABEL.to_string(),
        }
    }
}

impl AppendKey {
    /// Use another label for the secret token, e.g. `secret` or `app_key`.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PostProcess for AppendKey {
    fn post_process(
        &self,
        joined: &str,
        separator: &str,
        secret_key: &str,
        pair_join: &dyn PairJoin,
    ) -> String {
        format!("{joined}{separator}{}", pair_join.join(&self.label, secret_key))
    }
}

/// PrependKey puts the secret token before the pairs.
#[derive(Debug, Clone)]
pub struct PrependKey {
    label: String,
}

impl Default for PrependKey {
    fn default() -> Self {
        Self {
            label: DEFAULT_KEY_LABEL.to_string(),
        }
    }
}

impl PrependKey {
    /// Use another label for the secret token.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl PostProcess for PrependKey {
    fn post_process(
        &self,
        joined: &str,
        separator: &str,
        secret_key: &str,
        pair_join: &dyn PairJoin,
    ) -> String {
        let token = pair_join.join(&self.label, secret_key);
        if joined.is_empty() {
            token
        } else {
            format!("{token}{separator}{joined}")
        }
    }
}

/// SkipEmptyKey behaves like [`AppendKey`] but adds nothing when the secret
/// is empty.
#[derive(Debug, Clone, Default)]
pub struct SkipEmptyKey(AppendKey);

impl SkipEmptyKey {
    /// Use another label for the secret token.
    pub fn with_label(label: impl Into<String>) -> Self {
        Self(AppendKey::with_label(label))
    }
}

impl PostProcess for SkipEmptyKey {
    fn post_process(
        &self,
        joined: &str,
        separator: &str,
        secret_key: &str,
        pair_join: &dyn PairJoin,
    ) -> String {
        if secret_key.is_empty() {
            return joined.to_string();
        }
        self.0.post_process(joined, separator, secret_key, pair_join)
    }
}

/// NoKey leaves the joined string untouched.
///
/// Pair it with a keyed hash such as [`crate::hash::HmacSha256`].
#[derive(Debug, Clone, Copy, Default)]
pub struct NoKey;

impl PostProcess for NoKey {
    fn post_process(&self, joined: &str, _: &str, _: &str, _: &dyn PairJoin) -> String {
        joined.to_string()
    }
}
