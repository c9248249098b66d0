//! Redirect targets for the OTP endpoints

use serde::{Deserialize, Serialize};

/// Pages the OTP endpoints redirect to in redirect mode
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RedirectConfig {
    /// Token issued and SMS accepted
    pub token_sent: String,
    /// Token could not be delivered to the number
    pub number_nok: String,
    /// Submitted token was valid
    pub token_ok: String,
    /// Submitted token was invalid
    pub token_nok: String,
}

impl Default for RedirectConfig {
    fn default() -> Self {
        Self {
            token_sent: String::from("https://localhost/telnyx-otp-token.html"),
            number_nok: String::from("https://localhost/telnyx-otp-number-nok.html"),
            token_ok: String::from("https://localhost/telnyx-otp-token-ok.html"),
            token_nok: String::from("https://localhost/telnyx-otp-token-nok.html"),
        }
    }
}

impl RedirectConfig {
    /// Target after an issue request
    pub fn after_issue(&self, sent: bool) -> &str {
        if sent {
            &self.token_sent
        } else {
            &self.number_nok
        }
    }

    /// Target after a verify request
    pub fn after_check(&self, valid: bool) -> &str {
        if valid {
            &self.token_ok
        } else {
            &self.token_nok
        }
    }
}
