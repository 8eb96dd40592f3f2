//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a secret when formatting debug output.
///
/// Only the first two characters survive; the rest collapses to `***`. Inputs
/// of six characters or fewer are fully masked so short secrets never leak a
/// prefix at all.
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

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            f.write_str("<empty>")
        } else if self.0.len() <= 6 || !self.0.is_char_boundary(2) {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..2])?;
            f.write_str("***")
        }
    }
}
