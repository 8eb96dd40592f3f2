//! Content-Encoding handlers.
//!
//! Encoding is a best-effort transparency layer, not a validated contract
//! with the server: unknown tokens pass bodies through unmodified, while a
//! known token whose payload turns out corrupt fails with
//! [`ErrorKind::EncodingMalformed`](reqwire_core::ErrorKind::EncodingMalformed).

use std::collections::HashMap;
use std::fmt::Debug;
use std::io::{Read, Write};
use std::sync::Arc;

use bytes::Bytes;
use flate2::read::{DeflateDecoder, GzDecoder};
use flate2::write::{DeflateEncoder, GzEncoder};
use flate2::Compression;
use log::debug;

use reqwire_core::{Error, Result};

/// A reversible body transform negotiated through `Content-Encoding`.
///
/// Every handler satisfies `decode(encode(x)) == x` for all byte sequences.
pub trait ContentEncoding: Debug + Send + Sync + 'static {
    /// The token carried in `Content-Encoding` header values.
    fn name(&self) -> &'static str;

    /// Compress a body.
    fn encode(&self, body: &[u8]) -> Result<Bytes>;

    /// Decompress a body.
    ///
    /// Accepts exactly what the paired [`encode`](ContentEncoding::encode)
    /// produces; externally sourced data may be corrupt or truncated.
    fn decode(&self, body: &[u8]) -> Result<Bytes>;
}

/// gzip (RFC 1952).
#[derive(Debug, Default)]
pub struct GzipEncoding;

impl ContentEncoding for GzipEncoding {
    fn name(&self) -> &'static str {
        "gzip"
    }

    fn encode(&self, body: &[u8]) -> Result<Bytes> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(body)?;
        Ok(Bytes::from(encoder.finish()?))
    }

    fn decode(&self, body: &[u8]) -> Result<Bytes> {
        let mut decoder = GzDecoder::new(body);
        let mut buf = Vec::new();
        decoder
            .read_to_end(&mut buf)
            .map_err(|e| Error::encoding_malformed("gzip decode failed").with_source(e))?;
        Ok(Bytes::from(buf))
    }
}

/// deflate (RFC 1951, raw stream as flate2 produces it).
#[derive(Debug, Default)]
pub struct DeflateEncoding;

impl ContentEncoding for DeflateEncoding {
    fn name(&self) -> &'static str {
        "deflate"
    }

    fn encode(&self, body: &[u8]) -> Result<Bytes> {
        let mut encoder = DeflateEncoder::new(Vec::new(), Compression::default());
        encoder.write_all(body)?;
        Ok(Bytes::from(encoder.finish()?))
    }

    fn decode(&self, body: &[u8]) -> Result<Bytes> {
        let mut decoder = DeflateDecoder::new(body);
        let mut buf = Vec::new();
        decoder
            .read_to_end(&mut buf)
            .map_err(|e| Error::encoding_malformed("deflate decode failed").with_source(e))?;
        Ok(Bytes::from(buf))
    }
}

/// Registry of content-encoding handlers keyed by token.
///
/// Populated when the client is constructed and read-only afterwards; lookup
/// is case-insensitive.
#[derive(Debug, Clone)]
pub struct EncodingRegistry {
    handlers: HashMap<String, Arc<dyn ContentEncoding>>,
}

impl Default for EncodingRegistry {
    fn default() -> Self {
        Self {
            handlers: HashMap::new(),
        }
        .register(GzipEncoding)
        .register(DeflateEncoding)
    }
}

impl EncodingRegistry {
    /// Register a handler under its token.
    pub fn register(mut self, handler: impl ContentEncoding) -> Self {
        self.handlers
            .insert(handler.name().to_ascii_lowercase(), Arc::new(handler));
        self
    }

    /// Look up the handler for a token, if any.
    pub fn get(&self, token: &str) -> Option<&Arc<dyn ContentEncoding>> {
        self.handlers.get(&token.trim().to_ascii_lowercase())
    }

    /// Compress an outgoing body with the handler for `token`.
    ///
    /// Returns `None` when no handler is registered for the token; the caller
    /// then sends the body as-is and must not emit a `Content-Encoding`
    /// header.
    pub fn encode_body(&self, token: &str, body: &[u8]) -> Option<Result<Bytes>> {
        self.get(token).map(|handler| handler.encode(body))
    }

    /// Decode a response body according to its `Content-Encoding` header.
    ///
    /// The first token in the header with a registered handler wins; an
    /// absent header, `identity`, and unknown tokens all pass the body
    /// through unchanged.
    pub fn decode_body(&self, content_encoding: Option<&str>, body: Bytes) -> Result<Bytes> {
        let Some(header) = content_encoding else {
            return Ok(body);
        };

        for token in header.split(',') {
            if let Some(handler) = self.get(token) {
                debug!("decoding response body with {}", handler.name());
                return handler.decode(&body);
            }
        }

        Ok(body)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use test_case::test_case;

    use super::*;
    use reqwire_core::ErrorKind;

    #[test_case(&GzipEncoding as &dyn ContentEncoding; "gzip")]
    #[test_case(&DeflateEncoding as &dyn ContentEncoding; "deflate")]
    fn test_round_trip(handler: &dyn ContentEncoding) {
        let highly_compressible = vec![b'a'; 64 * 1024];
        let cases: Vec<&[u8]> = vec![
            b"",
            b"hello world",
            b"\x00\x01\x02\xff\xfe",
            &highly_compressible,
        ];

        for body in cases {
            let encoded = handler.encode(body).unwrap();
            let decoded = handler.decode(&encoded).unwrap();
            assert_eq!(decoded.as_ref(), body, "{} round trip", handler.name());
        }
    }

    #[test_case(&GzipEncoding as &dyn ContentEncoding; "gzip")]
    #[test_case(&DeflateEncoding as &dyn ContentEncoding; "deflate")]
    fn test_decode_rejects_garbage(handler: &dyn ContentEncoding) {
        let err = handler.decode(b"definitely not compressed").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingMalformed);
    }

    #[test]
    fn test_decode_rejects_truncated_gzip() {
        let encoded = GzipEncoding.encode(b"some payload to truncate").unwrap();
        let err = GzipEncoding.decode(&encoded[..encoded.len() / 2]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::EncodingMalformed);
    }

    #[test]
    fn test_registry_lookup_is_case_insensitive() {
        let registry = EncodingRegistry::default();
        assert!(registry.get("GZIP").is_some());
        assert!(registry.get(" Deflate ").is_some());
        assert!(registry.get("br").is_none());
    }

    #[test]
    fn test_decode_body_first_known_token_wins() {
        let registry = EncodingRegistry::default();
        let body = GzipEncoding.encode(b"payload").unwrap();

        let decoded = registry
            .decode_body(Some("br, gzip"), body)
            .unwrap();
        assert_eq!(decoded.as_ref(), b"payload");
    }

    #[test]
    fn test_decode_body_unknown_token_passes_through() {
        let registry = EncodingRegistry::default();
        let body = Bytes::from_static(b"opaque");

        let decoded = registry.decode_body(Some("zstd"), body.clone()).unwrap();
        assert_eq!(decoded, body);

        let decoded = registry.decode_body(None, body.clone()).unwrap();
        assert_eq!(decoded, body);
    }

    #[test]
    fn test_encode_body_unknown_token_is_none() {
        let registry = EncodingRegistry::default();
        assert!(registry.encode_body("zstd", b"payload").is_none());

        let encoded = registry.encode_body("gzip", b"payload").unwrap().unwrap();
        assert_eq!(GzipEncoding.decode(&encoded).unwrap().as_ref(), b"payload");
    }
}
