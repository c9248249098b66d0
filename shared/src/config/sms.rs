//! SMS provider configuration module

use serde::{Deserialize, Serialize};

/// Placeholder replaced by the issued token in `message_template`
pub const TOKEN_PLACEHOLDER: &str = "{token}";

/// Fill `template` with `token`, appending it when the placeholder is absent
pub fn render_message(template: &str, token: &str) -> String {
    if template.contains(TOKEN_PLACEHOLDER) {
        template.replace(TOKEN_PLACEHOLDER, token)
    } else {
        format!("{} {}", template.trim_end(), token)
    }
}

/// Which SMS dispatcher backs the service
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmsProvider {
    /// Telnyx messaging API
    #[default]
    Telnyx,
    /// Logs messages instead of sending them
    Mock,
}

/// SMS provider configuration
#[derive(Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SmsConfig {
    /// SMS provider
    pub provider: SmsProvider,

    /// Provider API base URL; messages are posted to `{base_url}/messages`
    pub base_url: String,

    /// Messaging profile secret sent in the `x-profile-secret` header
    pub profile_secret: String,

    /// Display label of the service, used in logs and health output
    pub service_name: String,

    /// Alphanumeric sender used outside the North American numbering plan
    pub origin_identity: String,

    /// Message body; `{token}` is replaced by the issued token
    pub message_template: String,

    /// Timeout for provider requests in seconds
    pub request_timeout_secs: u64,

    /// Revoke a freshly issued token when its SMS was not accepted
    pub revoke_on_dispatch_failure: bool,
}

impl Default for SmsConfig {
    fn default() -> Self {
        Self {
            provider: SmsProvider::default(),
            base_url: String::from("https://sms.telnyx.com"),
            profile_secret: String::new(),
            service_name: String::from("OTPApp-Telnyx"),
            origin_identity: String::from("Telnyx OTP"),
            message_template: String::from("Your Telnyx token is {token}"),
            request_timeout_secs: 5,
            revoke_on_dispatch_failure: true,
        }
    }
}

impl std::fmt::Debug for SmsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SmsConfig")
            .field("provider", &self.provider)
            .field("base_url", &self.base_url)
            .field("profile_secret", &"[REDACTED]")
            .field("service_name", &self.service_name)
            .field("origin_identity", &self.origin_identity)
            .field("message_template", &self.message_template)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("revoke_on_dispatch_failure", &self.revoke_on_dispatch_failure)
            .finish()
    }
}

impl SmsConfig {
    /// Render the SMS body for a token
    pub fn render_message(&self, token: &str) -> String {
        render_message(&self.message_template, token)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.provider == SmsProvider::Telnyx && self.profile_secret.trim().is_empty() {
            return Err("sms.profile_secret is required for the telnyx provider".to_string());
        }
        if self.request_timeout_secs == 0 {
            return Err("sms.request_timeout_secs must be positive".to_string());
        }
        if self.origin_identity.trim().is_empty() {
            return Err("sms.origin_identity must not be empty".to_string());
        }
        Ok(())
    }
}
