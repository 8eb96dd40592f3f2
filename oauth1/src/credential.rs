use std::fmt::{Debug, Formatter};

use reqwire_core::utils::Redact;

/// Client credentials for OAuth 1.0a.
///
/// The consumer pair identifies the client application. The token pair is
/// optional: it is absent during the request-token leg of the three-legged
/// flow and present once a request or access token has been obtained.
#[derive(Clone, Default)]
pub struct Credential {
    /// Identifies the client to the server (`oauth_consumer_key`).
    pub consumer_key: String,
    /// Shared secret for the consumer key. May legitimately be the empty
    /// string; it then signs as the empty string per RFC 5849, it is never
    /// substituted with a default.
    pub consumer_secret: String,
    /// Request or access token (`oauth_token`).
    pub token: Option<String>,
    /// Shared secret for the token. Absent signs as the empty string.
    pub token_secret: Option<String>,
}

impl Credential {
    /// Create a new credential from the consumer pair.
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
            token: None,
            token_secret: None,
        }
    }

    /// Attach a token pair.
    pub fn with_token(
        mut self,
        token: impl Into<String>,
        token_secret: impl Into<String>,
    ) -> Self {
        self.token = Some(token.into());
        self.token_secret = Some(token_secret.into());
        self
    }

    /// Check if the credential can sign requests.
    ///
    /// An empty consumer key cannot identify a client; empty secrets are
    /// legal.
    pub fn is_valid(&self) -> bool {
        !self.consumer_key.is_empty()
    }

    pub(crate) fn token_secret(&self) -> &str {
        self.token_secret.as_deref().unwrap_or("")
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &Redact::from(&self.consumer_key))
            .field("consumer_secret", &Redact::from(&self.consumer_secret))
            .field("token", &self.token.as_ref().map(Redact::from))
            .field("token_secret", &self.token_secret.as_ref().map(Redact::from))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        assert!(Credential::new("key", "secret").is_valid());
        assert!(Credential::new("key", "").is_valid());
        assert!(!Credential::default().is_valid());
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let cred = Credential::new("9djdj82h48djs9d2", "j49sk3j29djd")
            .with_token("kkk9d7dh3k39sjv7", "dh893hdasih9");

        let repr = format!("{cred:?}");
        assert!(!repr.contains("j49sk3j29djd"), "secret leaked: {repr}");
        assert!(!repr.contains("dh893hdasih9"), "token secret leaked: {repr}");
    }

    #[test]
    fn test_token_secret_defaults_to_empty() {
        assert_eq!(Credential::new("k", "s").token_secret(), "");
    }
}
