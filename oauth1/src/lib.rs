//! OAuth 1.0a request signing.
//!
//! Implements the signing half of [RFC 5849](https://www.rfc-editor.org/rfc/rfc5849):
//! canonical parameter normalization, signature base string construction, the
//! three standard signature methods, and injection of the resulting
//! `Authorization` header (or signed query string) into an outgoing request.
//!
//! ## Example
//!
//! ```no_run
//! use reqwire_oauth1::{Config, Credential, RequestSigner};
//!
//! # fn example() -> reqwire_core::Result<()> {
//! let credential = Credential::new("consumer-key", "consumer-secret")
//!     .with_token("access-token", "token-secret");
//! let signer = RequestSigner::new(Config::default());
//!
//! let mut parts = http::Request::get("https://api.example.com/resource?page=2")
//!     .body(())
//!     .unwrap()
//!     .into_parts()
//!     .0;
//!
//! signer.sign(&mut parts, &[], &credential)?;
//! # Ok(())
//! # }
//! ```

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

mod config;
pub use config::{Config, ParameterPlacement};

mod credential;
pub use credential::Credential;

mod provider;
pub use provider::{HmacSha1, Plaintext, ProviderRegistry, RsaSha1, SignatureProvider};

mod base_string;
pub use base_string::signature_base_string;

mod sign_request;
pub use sign_request::RequestSigner;

mod constants;
