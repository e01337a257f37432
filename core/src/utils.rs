//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret so it can appear in `Debug` output and logs.
///
/// - Empty secrets print as `EMPTY`, so a missing key is still visible.
/// - Secrets shorter than 12 bytes are entirely redacted.
/// - Longer secrets keep their first and last three characters.
pub struct Redact<'a>(&'a str);

impl<'a> From<&'a str> for Redact<'a> {
    fn from(value: &'a str) -> Self {
        Redact(value)
    }
}

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl Debug for Redact<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12
            || !self.0.is_char_boundary(3)
            || !self.0.is_char_boundary(length - 3)
        {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..3])?;
            f.write_str("***")?;
            f.write_str(&self.0[length - 3..])
        }
    }
}

/// Replace every occurrence of `secret` in `s` with its redacted form.
///
/// Used before tracing a canonical string that embeds the secret key.
pub fn redact_in(s: &str, secret: &str) -> String {
    if secret.is_empty() {
        return s.to_string();
    }
    s.replace(secret, &format!("{:?}", Redact(secret)))
}

/// Compare two byte strings in time independent of where they differ.
///
/// Only the length may leak. With `ignore_ascii_case` set, ASCII letters
/// compare case-insensitively.
pub fn constant_time_eq(a: &[u8], b: &[u8], ignore_ascii_case: bool) -> bool {
    if a.len() != b.len() {
        return false;
    }

    let fold = |c: u8| {
        if ignore_ascii_case {
            c.to_ascii_lowercase()
        } else {
            c
        }
    };
    a.iter()
        .zip(b)
        .fold(0u8, |acc, (x, y)| acc | (fold(*x) ^ fold(*y)))
        == 0
}
