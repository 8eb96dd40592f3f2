//! Signature base string construction (RFC 5849 section 3.4.1).

use http::Method;

use reqwire_core::codec::percent_encode;

/// Assemble the exact string that gets signed.
///
/// `UPPER(method) & encode(base_uri) & encode(normalized_params)`. The base
/// URI must already be normalized (lower-case scheme and host, default port
/// dropped, query and fragment stripped), which is what
/// [`SigningRequest::base_uri`](reqwire_core::SigningRequest::base_uri)
/// produces. Pure; no failure modes.
pub fn signature_base_string(method: &Method, base_uri: &str, normalized_params: &str) -> String {
    let encoded_uri = percent_encode(base_uri);
    let encoded_params = percent_encode(normalized_params);

    let mut s =
        String::with_capacity(method.as_str().len() + encoded_uri.len() + encoded_params.len() + 2);
    s.push_str(&method.as_str().to_ascii_uppercase());
    s.push('&');
    s.push_str(&encoded_uri);
    s.push('&');
    s.push_str(&encoded_params);

    s
}
