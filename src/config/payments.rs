//! Payment provider keys.
//!
//! The provider is mocked, so these are only reported, never used to sign requests.

/// Env var holding the publishable key.
pub const PUBLISHABLE_KEY_VAR: &str = "STRIPE_PUBLISHABLE_KEY";
/// Env var holding the secret key.
pub const SECRET_KEY_VAR: &str = "STRIPE_SECRET_KEY";
/// Env var holding the webhook signing secret.
pub const WEBHOOK_SECRET_VAR: &str = "STRIPE_WEBHOOK_SECRET";

/// Payment provider credentials; empty when unset.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PaymentsConfig {
    /// Client-side key
    pub publishable_key: String,
    /// Server-side key
    pub secret_key: String,
    /// Webhook signing secret
    pub webhook_secret: String,
}

impl std::fmt::Debug for PaymentsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentsConfig")
            .field("publishable_key", &self.publishable_key)
            .field("secret_key", &"<redacted>")
            .field("webhook_secret", &"<redacted>")
            .finish()
    }
}

impl PaymentsConfig {
    /// Reads keys through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            publishable_key: lookup(PUBLISHABLE_KEY_VAR).unwrap_or_default(),
            secret_key: lookup(SECRET_KEY_VAR).unwrap_or_default(),
            webhook_secret: lookup(WEBHOOK_SECRET_VAR).unwrap_or_default(),
        }
    }

    /// Whether real provider calls could be made. They never are in this build.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.publishable_key.is_empty() && !self.secret_key.is_empty()
    }
}
