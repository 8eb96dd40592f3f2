//! Body transformation for REST clients.
//!
//! Three concerns live here, each behind a registry that is populated once at
//! client construction and only read afterwards:
//!
//! - [`encoding`]: reversible `Content-Encoding` transforms (gzip, deflate)
//!   applied to request and response bodies
//! - [`negotiate`]: serializer and deserializer selection by media type
//!   (JSON, XML)
//! - [`multipart`]: boundary-fenced multipart envelope assembly with exact
//!   length computation
//!
//! A request body flows serialize → (optionally) multipart-assemble → encode;
//! a response body flows decode → deserialize. Every step is synchronous CPU
//! work over byte buffers and safe to run concurrently.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod encoding;
pub use encoding::{ContentEncoding, DeflateEncoding, EncodingRegistry, GzipEncoding};

pub mod negotiate;
pub use negotiate::{BodyFormat, ContentNegotiator};

pub mod multipart;
pub use multipart::{MultipartBuilder, MultipartEnvelope, Part, PartBody};
