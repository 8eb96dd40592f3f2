use std::fmt;
use thiserror::Error;

/// The error type for reqwire operations
#[derive(Error, Debug)]
#[error("{message}")]
pub struct Error {
    kind: ErrorKind,
    message: String,
    #[source]
    source: Option<anyhow::Error>,
}

/// The kind of error that occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Consumer credentials are absent where signing requires them
    CredentialMissing,

    /// No signature provider is registered for the requested method
    SignatureMethodUnsupported,

    /// The signing key or crypto primitive failed
    SigningFailed,

    /// A compressed body is corrupt, truncated, or not the declared encoding
    EncodingMalformed,

    /// No serializer or deserializer is registered for the media type
    SerializerMissing,

    /// The payload could not be parsed into the target shape
    DeserializeFailed,

    /// Request cannot be processed (missing authority, invalid header, etc.)
    RequestInvalid,

    /// Unexpected errors (I/O, internal invariant breaks, etc.)
    Unexpected,
}

impl Error {
    /// Create a new error with the given kind and message
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Get the error kind
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }
}

// Convenience constructors
impl Error {
    /// Create a credential missing error
    pub fn credential_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::CredentialMissing, message)
    }

    /// Create an unsupported signature method error
    pub fn signature_method_unsupported(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SignatureMethodUnsupported, message)
    }

    /// Create a signing failed error
    pub fn signing_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SigningFailed, message)
    }

    /// Create a malformed encoding error
    pub fn encoding_malformed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::EncodingMalformed, message)
    }

    /// Create a missing serializer error
    pub fn serializer_missing(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::SerializerMissing, message)
    }

    /// Create a deserialize failed error
    pub fn deserialize_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::DeserializeFailed, message)
    }

    /// Create a request invalid error
    pub fn request_invalid(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RequestInvalid, message)
    }

    /// Create an unexpected error
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::CredentialMissing => write!(f, "missing credentials"),
            ErrorKind::SignatureMethodUnsupported => write!(f, "unsupported signature method"),
            ErrorKind::SigningFailed => write!(f, "signing failed"),
            ErrorKind::EncodingMalformed => write!(f, "malformed content encoding"),
            ErrorKind::SerializerMissing => write!(f, "no serializer for media type"),
            ErrorKind::DeserializeFailed => write!(f, "deserialization failed"),
            ErrorKind::RequestInvalid => write!(f, "invalid request"),
            ErrorKind::Unexpected => write!(f, "unexpected error"),
        }
    }
}

/// Convenience type alias for Results
pub type Result<T> = std::result::Result<T, Error>;

// Common From implementations
impl From<anyhow::Error> for Error {
    fn from(err: anyhow::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(err)
    }
}

impl From<http::Error> for Error {
    fn from(err: http::Error) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::InvalidHeaderValue> for Error {
    fn from(err: http::header::InvalidHeaderValue) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUri> for Error {
    fn from(err: http::uri::InvalidUri) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::uri::InvalidUriParts> for Error {
    fn from(err: http::uri::InvalidUriParts) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<http::header::ToStrError> for Error {
    fn from(err: http::header::ToStrError) -> Self {
        Self::request_invalid(err.to_string()).with_source(anyhow::Error::from(err))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::unexpected(err.to_string()).with_source(anyhow::Error::from(err))
    }
}
