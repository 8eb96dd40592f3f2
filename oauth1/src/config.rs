/// Where the protocol parameters and signature are placed on the request.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParameterPlacement {
    /// An `Authorization: OAuth ...` header.
    #[default]
    Header,
    /// Appended to the request query string.
    Query,
}

/// Config carries the signing configuration for OAuth 1.0a requests.
#[derive(Debug, Clone)]
pub struct Config {
    /// Signature method name, dispatched through the provider registry.
    pub signature_method: String,
    /// Where the protocol parameters end up on the signed request.
    pub placement: ParameterPlacement,
    /// Optional protection realm, emitted first in the header and excluded
    /// from the signature.
    pub realm: Option<String>,
    /// `oauth_callback`, sent on the request-token leg.
    pub callback: Option<String>,
    /// `oauth_verifier`, sent on the access-token leg.
    pub verifier: Option<String>,
    /// Whether to emit `oauth_version="1.0"`. On by default; some servers
    /// reject the parameter.
    pub include_version: bool,
    /// Additional protocol parameters included in the signature and the
    /// emitted header or query string.
    pub extra_params: Vec<(String, String)>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            signature_method: "HMAC-SHA1".to_string(),
            placement: ParameterPlacement::default(),
            realm: None,
            callback: None,
            verifier: None,
            include_version: true,
            extra_params: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new Config
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the signature method
    pub fn with_signature_method(mut self, method: impl Into<String>) -> Self {
        self.signature_method = method.into();
        self
    }

    /// Set the parameter placement
    pub fn with_placement(mut self, placement: ParameterPlacement) -> Self {
        self.placement = placement;
        self
    }

    /// Set the protection realm
    pub fn with_realm(mut self, realm: impl Into<String>) -> Self {
        self.realm = Some(realm.into());
        self
    }

    /// Set `oauth_callback`
    pub fn with_callback(mut self, callback: impl Into<String>) -> Self {
        self.callback = Some(callback.into());
        self
    }

    /// Set `oauth_verifier`
    pub fn with_verifier(mut self, verifier: impl Into<String>) -> Self {
        self.verifier = Some(verifier.into());
        self
    }

    /// Suppress the `oauth_version` parameter
    pub fn without_version(mut self) -> Self {
        self.include_version = false;
        self
    }

    /// Add an extra protocol parameter
    pub fn with_extra_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_params.push((key.into(), value.into()));
        self
    }
}
