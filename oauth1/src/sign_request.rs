use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::request::Parts;
use http::HeaderValue;
use log::debug;
use rand::RngCore;

use crate::base_string::signature_base_string;
use crate::constants::*;
use crate::provider::ProviderRegistry;
use crate::{Config, Credential, ParameterPlacement};
use reqwire_core::codec::{normalize_parameters, percent_encode};
use reqwire_core::time::{now, unix_timestamp};
use reqwire_core::{Error, Result, SigningRequest};

/// RequestSigner that implements OAuth 1.0a request signing.
///
/// - [RFC 5849](https://www.rfc-editor.org/rfc/rfc5849)
#[derive(Debug)]
pub struct RequestSigner {
    registry: ProviderRegistry,
    config: Config,

    nonce: Option<String>,
    timestamp: Option<u64>,
}

impl RequestSigner {
    /// Create a signer with the default provider registry.
    pub fn new(config: Config) -> Self {
        Self {
            registry: ProviderRegistry::default(),
            config,

            nonce: None,
            timestamp: None,
        }
    }

    /// Replace the provider registry, e.g. to add RSA-SHA1.
    pub fn with_registry(mut self, registry: ProviderRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Specify the nonce.
    ///
    /// # Note
    ///
    /// Nonces must be unique per request to prevent replay.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = Some(nonce.into());
        self
    }

    /// Specify the timestamp.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_timestamp(mut self, timestamp: u64) -> Self {
        self.timestamp = Some(timestamp);
        self
    }

    /// Sign the request, placing the protocol parameters per the config.
    ///
    /// `body` is consulted only when the request's `Content-Type` is
    /// `application/x-www-form-urlencoded`: those pairs take part in the
    /// signature. Multipart and binary bodies contribute nothing and may be
    /// passed as an empty slice.
    pub fn sign(&self, parts: &mut Parts, body: &[u8], credential: &Credential) -> Result<()> {
        if !credential.is_valid() {
            return Err(Error::credential_missing(
                "a consumer key is required to sign requests",
            ));
        }

        let provider = self.registry.get(&self.config.signature_method)?;

        let mut req = SigningRequest::build(parts)?;

        let nonce = match &self.nonce {
            Some(nonce) => nonce.clone(),
            None => generate_nonce(),
        };
        let timestamp = self.timestamp.unwrap_or_else(|| unix_timestamp(now()));

        // Protocol parameters (RFC 5849 section 3.1).
        let mut protocol: Vec<(String, String)> = vec![
            (OAUTH_CONSUMER_KEY.into(), credential.consumer_key.clone()),
            (OAUTH_NONCE.into(), nonce),
            (OAUTH_SIGNATURE_METHOD.into(), provider.method().into()),
            (OAUTH_TIMESTAMP.into(), timestamp.to_string()),
        ];
        if let Some(token) = &credential.token {
            protocol.push((OAUTH_TOKEN.into(), token.clone()));
        }
        if self.config.include_version {
            protocol.push((OAUTH_VERSION.into(), OAUTH_VERSION_VALUE.into()));
        }
        if let Some(callback) = &self.config.callback {
            protocol.push((OAUTH_CALLBACK.into(), callback.clone()));
        }
        if let Some(verifier) = &self.config.verifier {
            protocol.push((OAUTH_VERIFIER.into(), verifier.clone()));
        }
        protocol.extend(self.config.extra_params.iter().cloned());

        // The signature covers the protocol parameters, the query pairs, and
        // the body pairs of a form-urlencoded body. `oauth_signature` itself
        // and the realm stay out.
        let mut signature_params = protocol.clone();
        signature_params.extend(req.query.iter().cloned());
        if is_form_urlencoded(&req)? {
            signature_params.extend(
                form_urlencoded::parse(body).map(|(k, v)| (k.into_owned(), v.into_owned())),
            );
        }

        let normalized = normalize_parameters(
            signature_params.iter().map(|(k, v)| (k.as_str(), v.as_str())),
        );
        let base_string = signature_base_string(&req.method, &req.base_uri(), &normalized);
        debug!("signature base string: {base_string}");

        let signature = provider.sign(
            &base_string,
            &credential.consumer_secret,
            credential.token_secret(),
        )?;
        protocol.push((OAUTH_SIGNATURE.into(), signature));

        match self.config.placement {
            ParameterPlacement::Header => {
                let mut value: HeaderValue =
                    authorization_header(self.config.realm.as_deref(), protocol).parse()?;
                value.set_sensitive(true);

                req.headers.insert(AUTHORIZATION, value);
            }
            ParameterPlacement::Query => {
                for (k, v) in protocol {
                    req.query_push(k, v);
                }
            }
        }

        req.apply(parts)
    }
}

/// Render the `Authorization` header value.
///
/// The realm, when present, leads and is emitted verbatim; every protocol
/// parameter value is percent-encoded and double-quoted, pairs sorted by name
/// and comma-space separated.
fn authorization_header(realm: Option<&str>, mut params: Vec<(String, String)>) -> String {
    params.sort_unstable();

    let mut s = String::with_capacity(
        params.iter().map(|(k, v)| k.len() + v.len() + 6).sum::<usize>() + 8,
    );
    s.push_str("OAuth ");
    if let Some(realm) = realm {
        s.push_str("realm=\"");
        s.push_str(realm);
        s.push('"');
        if !params.is_empty() {
            s.push_str(", ");
        }
    }
    for (idx, (k, v)) in params.iter().enumerate() {
        if idx != 0 {
            s.push_str(", ");
        }

        s.push_str(k);
        s.push_str("=\"");
        s.push_str(&percent_encode(v));
        s.push('"');
    }

    s
}

fn is_form_urlencoded(req: &SigningRequest) -> Result<bool> {
    let content_type = req.header_get_or_default(&CONTENT_TYPE)?;
    let essence = content_type.split(';').next().unwrap_or("").trim();

    Ok(essence.eq_ignore_ascii_case(FORM_URLENCODED))
}

/// 16 random bytes, hex encoded. Collisions over a request's lifetime are
/// negligible.
fn generate_nonce() -> String {
    let mut buf = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use http::{Method, Request, Uri};
    use pretty_assertions::assert_eq;

    use super::*;
    use reqwire_core::ErrorKind;

    fn parts_for(method: Method, uri: &str) -> Parts {
        let mut req = Request::new(());
        *req.method_mut() = method;
        *req.uri_mut() = Uri::from_str(uri).expect("uri must be valid");
        req.into_parts().0
    }

    fn header_value<'a>(parts: &'a Parts) -> &'a str {
        parts
            .headers
            .get(AUTHORIZATION)
            .expect("authorization header must be present")
            .to_str()
            .expect("header must be valid utf-8")
    }

    #[test]
    fn test_sign_header_placement() -> Result<()> {
        let _ = env_logger::builder().is_test(true).try_init();

        let credential =
            Credential::new("consumer", "secret").with_token("access-token", "token-secret");
        let signer = RequestSigner::new(Config::default())
            .with_nonce("abc123")
            .with_timestamp(1704067200);

        let mut parts = parts_for(Method::GET, "http://example.com/path?x=1");
        signer.sign(&mut parts, &[], &credential)?;

        // Recorded from a known-good run over the same inputs.
        assert_eq!(
            header_value(&parts),
            "OAuth oauth_consumer_key=\"consumer\", oauth_nonce=\"abc123\", \
             oauth_signature=\"cb03h0BL1A9IvvObVVdeeF2FBXs%3D\", \
             oauth_signature_method=\"HMAC-SHA1\", oauth_timestamp=\"1704067200\", \
             oauth_token=\"access-token\", oauth_version=\"1.0\"",
        );

        // The query string is untouched in header placement.
        assert_eq!(parts.uri.query(), Some("x=1"));
        Ok(())
    }

    #[test]
    fn test_sign_rfc5849_example() -> Result<()> {
        // The worked example of RFC 5849 section 3.4.1.1, which omits
        // oauth_version. Expected signature matches the published erratum.
        let credential = Credential::new("9djdj82h48djs9d2", "j49sk3j29djd")
            .with_token("kkk9d7dh3k39sjv7", "dh893hdasih9");
        let signer = RequestSigner::new(Config::default().without_version())
            .with_nonce("7d8f3e4a")
            .with_timestamp(137131201);

        let mut parts = parts_for(
            Method::POST,
            "http://example.com/request?b5=%3D%253D&a3=a&c%40=&a2=r%20b",
        );
        parts.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded"),
        );

        signer.sign(&mut parts, b"c2&a3=2+q", &credential)?;

        let auth = header_value(&parts);
        assert!(
            auth.contains("oauth_signature=\"r6%2FTJjbCOr97%2F%2BUU0NsvSne7s5g%3D\""),
            "unexpected signature in: {auth}",
        );
        Ok(())
    }

    #[test]
    fn test_sign_form_body_without_token() -> Result<()> {
        let credential = Credential::new("key", "consumer-secret");
        let signer = RequestSigner::new(Config::default())
            .with_nonce("n0nce")
            .with_timestamp(1700000000);

        let mut parts = parts_for(Method::POST, "https://api.example.com/statuses/update");
        parts.headers.insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/x-www-form-urlencoded; charset=utf-8"),
        );

        signer.sign(&mut parts, b"status=hello%20world", &credential)?;

        let auth = header_value(&parts);
        assert!(
            auth.contains("oauth_signature=\"EpMYo3fc4heMZX2OYvLpnR8JUy4%3D\""),
            "unexpected signature in: {auth}",
        );
        Ok(())
    }

    #[test]
    fn test_sign_query_placement() -> Result<()> {
        let credential = Credential::new("consumer", "secret");
        let signer = RequestSigner::new(
            Config::default().with_placement(ParameterPlacement::Query),
        )
        .with_nonce("abc123")
        .with_timestamp(1704067200);

        let mut parts = parts_for(Method::GET, "http://example.com/path?x=1");
        signer.sign(&mut parts, &[], &credential)?;

        assert!(parts.headers.get(AUTHORIZATION).is_none());
        let query = parts.uri.query().expect("query must be present");
        assert!(query.contains("x=1"), "original pair lost: {query}");
        assert!(query.contains("oauth_nonce=abc123"), "nonce missing: {query}");
        assert!(query.contains("oauth_signature="), "signature missing: {query}");
        Ok(())
    }

    #[test]
    fn test_sign_with_realm_and_callback() -> Result<()> {
        let credential = Credential::new("consumer", "secret");
        let signer = RequestSigner::new(
            Config::default()
                .with_realm("Photos")
                .with_callback("https://printer.example.com/ready"),
        );

        let mut parts = parts_for(Method::POST, "https://photos.example.net/initiate");
        signer.sign(&mut parts, &[], &credential)?;

        let auth = header_value(&parts);
        assert!(auth.starts_with("OAuth realm=\"Photos\", "), "realm must lead: {auth}");
        assert!(
            auth.contains("oauth_callback=\"https%3A%2F%2Fprinter.example.com%2Fready\""),
            "callback missing: {auth}",
        );
        Ok(())
    }

    #[test]
    fn test_sign_missing_credential() {
        let signer = RequestSigner::new(Config::default());
        let mut parts = parts_for(Method::GET, "http://example.com/");

        let err = signer
            .sign(&mut parts, &[], &Credential::default())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::CredentialMissing);
    }

    #[test]
    fn test_sign_unsupported_method() {
        let signer =
            RequestSigner::new(Config::default().with_signature_method("RSA-SHA1"));
        let mut parts = parts_for(Method::GET, "http://example.com/");

        let err = signer
            .sign(&mut parts, &[], &Credential::new("k", "s"))
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::SignatureMethodUnsupported);
    }

    #[test]
    fn test_nonces_are_unique() {
        assert_ne!(generate_nonce(), generate_nonce());
        assert_eq!(generate_nonce().len(), 32);
    }

    #[test]
    fn test_binary_body_contributes_no_parameters() -> Result<()> {
        // Same request signed with and without an opaque body must agree.
        let credential = Credential::new("consumer", "secret");
        let signer = RequestSigner::new(Config::default())
            .with_nonce("abc123")
            .with_timestamp(1704067200);

        let mut with_body = parts_for(Method::POST, "http://example.com/upload");
        with_body
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        signer.sign(&mut with_body, b"\x00\x01\x02", &credential)?;

        let mut without_body = parts_for(Method::POST, "http://example.com/upload");
        without_body
            .headers
            .insert(CONTENT_TYPE, HeaderValue::from_static("application/octet-stream"));
        signer.sign(&mut without_body, &[], &credential)?;

        assert_eq!(header_value(&with_body), header_value(&without_body));
        Ok(())
    }
}
