//! Core components for signing and shaping REST client requests.
//!
//! This crate provides the foundational types shared by the reqwire ecosystem:
//! the workspace error type, the strict RFC 3986 parameter codec that OAuth 1.0a
//! canonicalization is built on, and [`SigningRequest`], a decomposed view of
//! `http::request::Parts` that signing operations mutate and write back.
//!
//! ## Overview
//!
//! - [`codec`]: percent-encoding and canonical ordering of parameter multisets
//! - [`SigningRequest`]: build/apply round-trip over `http::request::Parts`,
//!   including the normalized base URI used for signature base strings
//! - [`hash`]: the hashing primitives signature providers are made of
//! - [`Error`]: the error type for every reqwire operation
//!
//! Everything here is synchronous, pure or immutable-per-call, and safe to use
//! from any thread without coordination.

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod codec;
pub mod hash;
pub mod time;
pub mod utils;

mod error;
pub use error::{Error, ErrorKind, Result};
mod request;
pub use request::SigningRequest;
