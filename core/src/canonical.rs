//! The canonicalization pipeline.
//!
//! `extract -> filter -> order -> join`, each step a plain function so they
//! can be tested and reused on their own. [`crate::Signer`] composes them.

use std::collections::BTreeSet;
use std::collections::HashMap;

use log::debug;

use crate::signable::Entries;
use crate::PairJoin;
use crate::Result;
use crate::Signable;
use crate::Value;

/// Canonical key-value pairs, unique keys, unordered.
pub type CanonicalPairs = HashMap<String, String>;

/// Extract canonical pairs from an input.
///
/// For records the key is the name carried by the `tag` source when
/// configured and present, otherwise the declared name. For mappings a
/// sequence value is signed by its first element and an empty sequence
/// drops the key.
pub fn extract<T: Signable + ?Sized>(input: &T, tag: Option<&str>) -> Result<CanonicalPairs> {
    let mut pairs = CanonicalPairs::new();

    match input.entries()? {
        Entries::Record(fields) => {
            for field in &fields {
                let key = field.key(tag);
                let value = field.value().stringify(key)?;
                if pairs.insert(key.to_string(), value).is_some() {
                    debug!("record has duplicate key {key:?}, the later field wins");
                }
            }
        }
        Entries::Mapping(entries) => {
            for (key, value) in entries {
                let value = match value {
                    Value::Seq(vs) => match vs.first() {
                        Some(v) => v.stringify(&key)?,
                        None => continue,
                    },
                    v => v.stringify(&key)?,
                };
                pairs.insert(key, value);
            }
        }
    }

    Ok(pairs)
}

/// Select the keys that survive filtering.
///
/// Ignored keys are always dropped. Keys with an empty value are dropped too
/// when `skip_empty` is set.
pub fn filter<'a>(
    pairs: &'a CanonicalPairs,
    ignore_keys: &BTreeSet<String>,
    skip_empty: bool,
) -> Vec<&'a str> {
    pairs
        .iter()
        .filter(|(k, _)| !ignore_keys.contains(k.as_str()))
        .filter(|(_, v)| !(skip_empty && v.is_empty()))
        .map(|(k, _)| k.as_str())
        .collect()
}

/// Sort keys in byte-wise ascending order.
pub fn order(mut keys: Vec<&str>) -> Vec<&str> {
    keys.sort_unstable();
    keys
}

/// Render every ordered pair and join the tokens with `separator`.
pub fn join_all(pairs: &[(String, String)], separator: &str, pair_join: &dyn PairJoin) -> String {
    pairs
        .iter()
        .map(|(k, v)| pair_join.join(k, v))
        .collect::<Vec<_>>()
        .join(separator)
}
