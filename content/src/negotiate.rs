//! Serializer and deserializer selection by media type.
//!
//! The protocol only ever needs a small, known set of body formats, so
//! dispatch is a closed variant set keyed by media type rather than
//! open-ended dynamic dispatch.

use std::collections::HashMap;

use bytes::Bytes;
use log::debug;
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Serialize;

use reqwire_core::{Error, Result};

/// The body formats understood by the negotiator.
///
/// A format is both the serializer and the deserializer for its media types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyFormat {
    /// JSON via serde_json.
    Json,
    /// XML via quick-xml's serde support.
    Xml,
}

impl BodyFormat {
    /// The default `Content-Type` emitted for bodies of this format.
    pub const fn content_type(&self) -> &'static str {
        match self {
            BodyFormat::Json => "application/json; charset=utf-8",
            BodyFormat::Xml => "text/xml; charset=utf-8",
        }
    }

    /// Serialize a value into body bytes.
    pub fn serialize<T: Serialize>(&self, value: &T) -> Result<Bytes> {
        match self {
            BodyFormat::Json => serde_json::to_vec(value)
                .map(Bytes::from)
                .map_err(|e| Error::unexpected("JSON serialization failed").with_source(e)),
            BodyFormat::Xml => quick_xml::se::to_string(value)
                .map(|s| Bytes::from(s.into_bytes()))
                .map_err(|e| Error::unexpected("XML serialization failed").with_source(e)),
        }
    }

    /// Deserialize body bytes into a value.
    ///
    /// Failures carry the underlying parser error as source. Date and time
    /// representations are a property of the target type's serde attributes,
    /// not of the negotiator.
    pub fn deserialize<T: DeserializeOwned>(&self, body: &[u8]) -> Result<T> {
        match self {
            BodyFormat::Json => serde_json::from_slice(body).map_err(|e| {
                Error::deserialize_failed("payload does not match the target shape").with_source(e)
            }),
            BodyFormat::Xml => {
                let text = std::str::from_utf8(body).map_err(|e| {
                    Error::deserialize_failed("XML payload is not valid UTF-8").with_source(e)
                })?;
                quick_xml::de::from_str(text).map_err(|e| {
                    Error::deserialize_failed("payload does not match the target shape")
                        .with_source(e)
                })
            }
        }
    }
}

// Media types routed out of the box.
static DEFAULT_FORMATS: Lazy<Vec<(&'static str, BodyFormat)>> = Lazy::new(|| {
    vec![
        ("application/json", BodyFormat::Json),
        ("text/xml", BodyFormat::Xml),
        ("application/xml", BodyFormat::Xml),
    ]
});

/// Selects the serializer or deserializer for a media type.
///
/// Matching strips media-type parameters (`application/json; charset=utf-8`
/// resolves like `application/json`) and ignores case, but only exact primary
/// type/subtype pairs match: a `+vendor` suffix does not route to the base
/// format. Populated at client construction and read-only afterwards.
#[derive(Debug, Clone)]
pub struct ContentNegotiator {
    formats: HashMap<String, BodyFormat>,
    fallback: Option<BodyFormat>,
}

impl Default for ContentNegotiator {
    fn default() -> Self {
        let mut negotiator = Self {
            formats: HashMap::new(),
            fallback: None,
        };
        for (media_type, format) in DEFAULT_FORMATS.iter() {
            negotiator = negotiator.register(media_type, *format);
        }

        negotiator
    }
}

impl ContentNegotiator {
    /// Route a media type to a format.
    pub fn register(mut self, media_type: &str, format: BodyFormat) -> Self {
        self.formats
            .insert(media_type.to_ascii_lowercase(), format);
        self
    }

    /// Format used when no registration matches.
    pub fn with_fallback(mut self, format: BodyFormat) -> Self {
        self.fallback = Some(format);
        self
    }

    /// Select the serializer for an outgoing body.
    ///
    /// `None` means the caller declared no content type; only a configured
    /// fallback can serve that.
    pub fn serializer_for(&self, content_type: Option<&str>) -> Result<BodyFormat> {
        let format = match content_type {
            Some(hint) => self.lookup(hint).or(self.fallback),
            None => self.fallback,
        };

        format.ok_or_else(|| {
            Error::serializer_missing(format!(
                "no serializer registered for {}",
                content_type.unwrap_or("<no content type>"),
            ))
        })
    }

    /// Select the deserializer for a response's `Content-Type`.
    pub fn deserializer_for(&self, content_type: &str) -> Result<BodyFormat> {
        self.lookup(content_type).or(self.fallback).ok_or_else(|| {
            Error::serializer_missing(format!(
                "no deserializer registered for {content_type}",
            ))
        })
    }

    fn lookup(&self, content_type: &str) -> Option<BodyFormat> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or("")
            .trim()
            .to_ascii_lowercase();

        let format = self.formats.get(&essence).copied();
        debug!("negotiated {essence} -> {format:?}");

        format
    }
}
