// Protocol parameter names (RFC 5849 section 3.1).
pub const OAUTH_CONSUMER_KEY: &str = "oauth_consumer_key";
pub const OAUTH_NONCE: &str = "oauth_nonce";
pub const OAUTH_SIGNATURE: &str = "oauth_signature";
pub const OAUTH_SIGNATURE_METHOD: &str = "oauth_signature_method";
pub const OAUTH_TIMESTAMP: &str = "oauth_timestamp";
pub const OAUTH_TOKEN: &str = "oauth_token";
pub const OAUTH_VERSION: &str = "oauth_version";
pub const OAUTH_CALLBACK: &str = "oauth_callback";
pub const OAUTH_VERIFIER: &str = "oauth_verifier";

pub const OAUTH_VERSION_VALUE: &str = "1.0";

// Bodies of this media type contribute their pairs to the signature.
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded";
