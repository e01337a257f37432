use std::collections::BTreeSet;
use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use log::{debug, trace};

use crate::canonical;
use crate::hash::HashStrategy;
use crate::utils::{constant_time_eq, redact_in, Redact};
use crate::AppendKey;
use crate::Config;
use crate::KeyValue;
use crate::PairJoin;
use crate::PostProcess;
use crate::Result;
use crate::Signable;

#[derive(Clone)]
struct Inner {
    secret_key: String,
    ignore_keys: BTreeSet<String>,
    skip_empty: bool,
    tag: Option<String>,
    separator: String,
    pair_join: Arc<dyn PairJoin>,
    post_process: Arc<dyn PostProcess>,
    hash: Arc<dyn HashStrategy>,
}

impl Default for Inner {
    fn default() -> Self {
        Self::from(Config::default())
    }
}

impl From<Config> for Inner {
    fn from(config: Config) -> Self {
        let hash = config.hash.strategy(config.uppercase);
        Self {
            secret_key: config.secret_key,
            ignore_keys: config.ignore_keys,
            skip_empty: config.skip_empty,
            tag: config.tag,
            separator: config.separator,
            pair_join: Arc::new(KeyValue::default()),
            post_process: Arc::new(AppendKey::default()),
            hash,
        }
    }
}

impl Inner {
    fn fmt_as(&self, name: &str, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(name)
            .field("secret_key", &Redact::from(&self.secret_key))
            .field("ignore_keys", &self.ignore_keys)
            .field("skip_empty", &self.skip_empty)
            .field("tag", &self.tag)
            .field("separator", &self.separator)
            .field("hash", &self.hash.name())
            .finish_non_exhaustive()
    }
}

/// Signer builds the string to sign for an input and hashes it.
///
/// A signer is immutable once built, so it can be cloned and shared across
/// threads freely. Use [`Signer::to_builder`] to derive a differently
/// configured signer.
///
/// ```
/// use std::collections::HashMap;
/// use kvsign_core::Signer;
///
/// let signer = Signer::builder().key("s3cr3t").build();
/// let params = HashMap::from([("b", "2"), ("a", "1"), ("sign", "ignored")]);
///
/// assert_eq!(signer.str_to_sign(&params).unwrap(), "a=1&b=2&key=s3cr3t");
/// assert_eq!(signer.sign(&params).unwrap().len(), 32);
/// ```
#[derive(Clone, Default)]
pub struct Signer {
    inner: Arc<Inner>,
}

impl Debug for Signer {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt_as("Signer", f)
    }
}

impl Signer {
    /// Create a signer with the default configuration.
    ///
    /// Ignores `sign`, skips empty values, joins `key=value` pairs with `&`,
    /// appends `&key=<secret>` and hashes with lower-case MD5. The secret is
    /// empty.
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a signer from the default configuration.
    pub fn builder() -> SignerBuilder {
        SignerBuilder::default()
    }

    /// Copy this signer's configuration into a new builder.
    pub fn to_builder(&self) -> SignerBuilder {
        SignerBuilder {
            inner: self.inner.as_ref().clone(),
        }
    }

    /// Canonical pairs of the input after filtering, in signing order.
    pub fn canonical_pairs<T: Signable + ?Sized>(
        &self,
        data: &T,
    ) -> Result<Vec<(String, String)>> {
        let inner = &self.inner;
        let pairs = canonical::extract(data, inner.tag.as_deref())?;
        let keys = canonical::order(canonical::filter(
            &pairs,
            &inner.ignore_keys,
            inner.skip_empty,
        ));
        debug!("signing keys: {keys:?}");

        Ok(keys
            .into_iter()
            .filter_map(|k| pairs.get_key_value(k))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    /// Build the string to sign, everything but the final hash.
    ///
    /// Exposed for debugging and for verifying signatures independently.
    pub fn str_to_sign<T: Signable + ?Sized>(&self, data: &T) -> Result<String> {
        let inner = &self.inner;
        let pairs = self.canonical_pairs(data)?;

        let joined = canonical::join_all(&pairs, &inner.separator, inner.pair_join.as_ref());
        let s = inner.post_process.post_process(
            &joined,
            &inner.separator,
            &inner.secret_key,
            inner.pair_join.as_ref(),
        );
        trace!("string to sign: {}", redact_in(&s, &inner.secret_key));
        Ok(s)
    }

    /// Sign the input.
    pub fn sign<T: Signable + ?Sized>(&self, data: &T) -> Result<String> {
        let s = self.str_to_sign(data)?;
        debug!("signing with {} hash strategy", self.inner.hash.name());
        Ok(self.inner.hash.hash(&s))
    }

    /// Check a signature received alongside the input.
    ///
    /// The comparison runs in constant time. It ignores ASCII case only when
    /// the hash strategy says its output is case-insensitive, as hex is.
    pub fn verify<T: Signable + ?Sized>(&self, data: &T, signature: &str) -> Result<bool> {
        let expected = self.sign(data)?;
        let matched = constant_time_eq(
            expected.as_bytes(),
            signature.trim().as_bytes(),
            self.inner.hash.case_insensitive(),
        );
        if !matched {
            debug!("signature mismatch");
        }
        Ok(matched)
    }
}

/// SignerBuilder collects configuration before a [`Signer`] is built.
///
/// Every setter consumes and returns the builder, so configuration is
/// finished before the signer can be shared.
#[derive(Clone, Default)]
pub struct SignerBuilder {
    inner: Inner,
}

impl Debug for SignerBuilder {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.inner.fmt_as("SignerBuilder", f)
    }
}

impl From<Config> for SignerBuilder {
    fn from(config: Config) -> Self {
        Self::from_config(config)
    }
}

impl SignerBuilder {
    /// Start from a loaded [`Config`].
    pub fn from_config(config: Config) -> Self {
        Self {
            inner: Inner::from(config),
        }
    }

    /// Replace the set of ignored keys.
    ///
    /// Passing nothing signs every key, including `sign`.
    pub fn ignore_keys<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.inner.ignore_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    /// Keep keys even if their value is empty.
    pub fn no_skip_empty(self) -> Self {
        self.skip_empty(false)
    }

    /// Set whether keys with an empty value are dropped.
    pub fn skip_empty(mut self, skip_empty: bool) -> Self {
        self.inner.skip_empty = skip_empty;
        self
    }

    /// Rename record fields by the tag of this source.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.inner.tag = Some(tag.into());
        self
    }

    /// Set the secret key.
    pub fn key(mut self, key: impl Into<String>) -> Self {
        self.inner.secret_key = key.into();
        self
    }

    /// Set the separator between pairs.
    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.inner.separator = separator.into();
        self
    }

    /// Set how a single pair is rendered.
    pub fn pair_join(mut self, pair_join: impl PairJoin) -> Self {
        self.inner.pair_join = Arc::new(pair_join);
        self
    }

    /// Set the transform applied to the joined pairs before hashing.
    pub fn post_process(mut self, post_process: impl PostProcess) -> Self {
        self.inner.post_process = Arc::new(post_process);
        self
    }

    /// Set the hash strategy.
    pub fn hash(mut self, hash: impl HashStrategy) -> Self {
        self.inner.hash = Arc::new(hash);
        self
    }

    /// Set a shared hash strategy.
    pub fn hash_arc(mut self, hash: Arc<dyn HashStrategy>) -> Self {
        self.inner.hash = hash;
        self
    }

    /// Freeze the configuration.
    pub fn build(self) -> Signer {
        Signer {
            inner: Arc::new(self.inner),
        }
    }
}
