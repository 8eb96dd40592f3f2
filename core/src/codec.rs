//! Percent-encoding and canonical ordering of protocol parameters.
//!
//! OAuth 1.0a signs over a canonical parameter string, so every byte of the
//! encoding here is load-bearing: both sides of the wire must produce the same
//! string or the signatures will not match.

use percent_encoding::utf8_percent_encode;
use percent_encoding::AsciiSet;
use percent_encoding::NON_ALPHANUMERIC;

/// AsciiSet for [RFC 5849 parameter encoding](https://www.rfc-editor.org/rfc/rfc5849#section-3.6)
///
/// - Encode every byte except the unreserved characters: 'A'-'Z', 'a'-'z',
///   '0'-'9', '-', '.', '_', and '~'. Space becomes `%20`, never `+`.
pub static PARAMETER_ENCODE_SET: AsciiSet = NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encode a string for use as a protocol parameter key or value.
///
/// Total over any input; non-ASCII text is encoded as UTF-8 bytes.
pub fn percent_encode(raw: &str) -> String {
    utf8_percent_encode(raw, &PARAMETER_ENCODE_SET).to_string()
}

/// Normalize a parameter multiset into its canonical wire form.
///
/// Pairs are encoded first, then sorted byte-wise by encoded key with the
/// encoded value breaking ties, and joined as `k=v&k2=v2`. Duplicate keys are
/// legal and every occurrence is kept. An empty multiset yields the empty
/// string.
pub fn normalize_parameters<'a, I>(pairs: I) -> String
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let mut encoded: Vec<(String, String)> = pairs
        .into_iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();

    // The canonical order is over the encoded representation, so encoding
    // must happen before the sort.
    encoded.sort_unstable();

    let mut s = String::with_capacity(encoded.iter().map(|(k, v)| k.len() + v.len() + 2).sum());
    for (idx, (k, v)) in encoded.iter().enumerate() {
        if idx != 0 {
            s.push('&');
        }

        s.push_str(k);
        s.push('=');
        s.push_str(v);
    }

    s
}
