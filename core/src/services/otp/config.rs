//! Configuration for the OTP service

use otp_shared::config::{sms, SmsConfig};

/// Configuration for the OTP service
#[derive(Debug, Clone)]
pub struct OtpServiceConfig {
    /// Alphanumeric sender for non North American destinations
    pub origin_identity: String,
    /// Message template, `{token}` is replaced by the token
    pub message_template: String,
    /// Revoke the token when its SMS was not accepted
    pub revoke_on_dispatch_failure: bool,
}

impl Default for OtpServiceConfig {
    fn default() -> Self {
        Self::from_sms_config(&SmsConfig::default())
    }
}

impl OtpServiceConfig {
    pub fn from_sms_config(sms: &SmsConfig) -> Self {
        Self {
            origin_identity: sms.origin_identity.clone(),
            message_template: sms.message_template.clone(),
            revoke_on_dispatch_failure: sms.revoke_on_dispatch_failure,
        }
    }

    /// Render the SMS body for a token
    pub fn render_message(&self, token: &str) -> String {
        sms::render_message(&self.message_template, token)
    }
}
