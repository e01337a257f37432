//! Rendering of a single key-value pair.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// PairJoin renders one `(key, value)` pair as a token of the string to sign.
pub trait PairJoin: Send + Sync + 'static {
    /// Render the pair.
    fn join(&self, key: &str, value: &str) -> String;
}

impl<F> PairJoin for F
where
    F: Fn(&str, &str) -> String + Send + Sync + 'static,
{
    fn join(&self, key: &str, value: &str) -> String {
        self(key, value)
    }
}

/// KeyValue renders `<key><delimiter><value>`, `key=value` by default.
#[derive(Debug, Clone)]
pub struct KeyValue {
    delimiter: String,
}

impl Default for KeyValue {
    fn default() -> Self {
        Self {
            delimiter: "=".to_string(),
        }
    }
}

impl KeyValue {
    /// Use a custom delimiter between key and value.
    pub fn with_delimiter(delimiter: impl Into<String>) -> Self {
        Self {
            delimiter: delimiter.into(),
        }
    }
}

impl PairJoin for KeyValue {
    fn join(&self, key: &str, value: &str) -> String {
        let mut s = String::with_capacity(key.len() + self.delimiter.len() + value.len());
        s.push_str(key);
        s.push_str(&self.delimiter);
        s.push_str(value);
        s
    }
}

/// AsciiSet for [RFC3986](https://datatracker.ietf.org/doc/html/rfc3986#section-2.3)
///
/// Everything except `A-Z a-z 0-9 - . _ ~` is encoded.
pub static RFC3986_UNRESERVED: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// PercentEncoded renders `key=value` with both sides percent-encoded.
///
/// Useful when the signed string must match the query string on the wire.
#[derive(Debug, Clone, Copy, Default)]
pub struct PercentEncoded;

impl PairJoin for PercentEncoded {
    fn join(&self, key: &str, value: &str) -> String {
        format!(
            "{}={}",
            utf8_percent_encode(key, &RFC3986_UNRESERVED),
            utf8_percent_encode(value, &RFC3986_UNRESERVED)
        )
    }
}
