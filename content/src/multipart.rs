//! Multipart envelope assembly.
//!
//! Serializes ordered parts into the CRLF-delimited, boundary-fenced wire
//! format of RFC 2046 `multipart/form-data`, and computes the exact
//! `Content-Length` whenever every part body length is statically known.

use std::fmt::{Debug, Formatter};
use std::io::Read;

use bytes::{BufMut, Bytes, BytesMut};
use rand::RngCore;

use reqwire_core::{Error, Result};

/// Body payload of a single part.
pub enum PartBody {
    /// Fully buffered bytes with a statically known length.
    Bytes(Bytes),
    /// A lazy byte producer, drained only when the envelope is serialized.
    Stream {
        /// The byte source, consumed on serialization.
        reader: Box<dyn Read + Send>,
        /// Length when determinable without consuming the reader.
        len: Option<u64>,
    },
}

impl PartBody {
    /// Statically known length of this body, if any.
    pub fn len(&self) -> Option<u64> {
        match self {
            PartBody::Bytes(b) => Some(b.len() as u64),
            PartBody::Stream { len, .. } => *len,
        }
    }

    /// Check whether the body is known to be empty.
    pub fn is_empty(&self) -> bool {
        self.len() == Some(0)
    }
}

impl Debug for PartBody {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PartBody::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            PartBody::Stream { len, .. } => f.debug_struct("Stream").field("len", len).finish(),
        }
    }
}

impl From<Bytes> for PartBody {
    fn from(value: Bytes) -> Self {
        PartBody::Bytes(value)
    }
}

impl From<Vec<u8>> for PartBody {
    fn from(value: Vec<u8>) -> Self {
        PartBody::Bytes(Bytes::from(value))
    }
}

impl From<String> for PartBody {
    fn from(value: String) -> Self {
        PartBody::Bytes(Bytes::from(value.into_bytes()))
    }
}

impl From<&'static str> for PartBody {
    fn from(value: &'static str) -> Self {
        PartBody::Bytes(Bytes::from_static(value.as_bytes()))
    }
}

/// A single part: ordered headers plus its payload.
///
/// Headers keep insertion order; adding a value for an existing name extends
/// that name's value sequence rather than creating a second line.
#[derive(Debug)]
pub struct Part {
    headers: Vec<(String, Vec<String>)>,
    body: PartBody,
}

impl Part {
    /// Create a part with no headers.
    pub fn new(body: impl Into<PartBody>) -> Self {
        Self {
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Create a `form-data` part for the given field name.
    pub fn form_data(name: &str, body: impl Into<PartBody>) -> Self {
        Self::new(body).header(
            "Content-Disposition",
            format!("form-data; name=\"{name}\""),
        )
    }

    /// Append a header value, extending the value sequence of an existing
    /// name.
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        let name = name.into();
        let value = value.into();

        match self.headers.iter_mut().find(|(n, _)| *n == name) {
            Some((_, values)) => values.push(value),
            None => self.headers.push((name, vec![value])),
        }
        self
    }

    /// Wrap a reader as the part body, with its length when known upfront.
    pub fn stream(reader: impl Read + Send + 'static, len: Option<u64>) -> Self {
        Self::new(PartBody::Stream {
            reader: Box::new(reader),
            len,
        })
    }
}

/// Builds a boundary-fenced multipart envelope.
#[derive(Debug, Default)]
pub struct MultipartBuilder {
    parts: Vec<Part>,
}

impl MultipartBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a part. Order is preserved on the wire.
    pub fn part(mut self, part: Part) -> Self {
        self.parts.push(part);
        self
    }

    /// Build the envelope, generating its boundary.
    ///
    /// An envelope always has at least one part; an empty builder is an
    /// error.
    pub fn build(self) -> Result<MultipartEnvelope> {
        if self.parts.is_empty() {
            return Err(Error::request_invalid(
                "a multipart envelope requires at least one part",
            ));
        }

        Ok(MultipartEnvelope {
            boundary: generate_boundary(),
            parts: self.parts,
        })
    }
}

/// An ordered sequence of parts fenced by a single boundary.
///
/// The boundary is generated once per envelope. It is random enough that a
/// collision with part content is negligible, but part bodies are not scanned
/// to rule one out.
#[derive(Debug)]
pub struct MultipartEnvelope {
    boundary: String,
    parts: Vec<Part>,
}

impl MultipartEnvelope {
    /// The boundary token fencing the parts.
    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// The `Content-Type` header value for this envelope.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// The exact serialized length, when every part body length is known.
    ///
    /// `None` means some stream body has no determinable length; the caller
    /// must use chunked transfer instead of `Content-Length`.
    pub fn content_length(&self) -> Option<u64> {
        let mut total = 0u64;

        for part in &self.parts {
            // --boundary\r\n
            total += 2 + self.boundary.len() as u64 + 2;
            // Name: v1, v2\r\n
            for (name, values) in &part.headers {
                let values_len: usize = values.iter().map(String::len).sum::<usize>()
                    + values.len().saturating_sub(1) * 2;
                total += name.len() as u64 + 2 + values_len as u64 + 2;
            }
            // Blank line, body, trailing CRLF.
            total += 2 + part.body.len()? + 2;
        }

        // --boundary--\r\n
        Some(total + 2 + self.boundary.len() as u64 + 4)
    }

    /// Serialize the envelope, draining any stream bodies.
    pub fn into_bytes(self) -> Result<Bytes> {
        let MultipartEnvelope { boundary, parts } = self;

        let mut buf = BytesMut::new();
        for part in parts {
            buf.put_slice(b"--");
            buf.put_slice(boundary.as_bytes());
            buf.put_slice(b"\r\n");

            for (name, values) in &part.headers {
                buf.put_slice(name.as_bytes());
                buf.put_slice(b": ");
                for (idx, value) in values.iter().enumerate() {
                    if idx != 0 {
                        buf.put_slice(b", ");
                    }
                    buf.put_slice(value.as_bytes());
                }
                buf.put_slice(b"\r\n");
            }

            buf.put_slice(b"\r\n");
            match part.body {
                PartBody::Bytes(b) => buf.put_slice(&b),
                PartBody::Stream { mut reader, .. } => {
                    let mut body = Vec::new();
                    reader.read_to_end(&mut body)?;
                    buf.put_slice(&body);
                }
            }
            buf.put_slice(b"\r\n");
        }

        buf.put_slice(b"--");
        buf.put_slice(boundary.as_bytes());
        buf.put_slice(b"--\r\n");

        Ok(buf.freeze())
    }
}

/// 16 random bytes, hex encoded.
fn generate_boundary() -> String {
    let mut buf = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut buf);
    hex::encode(buf)
}
