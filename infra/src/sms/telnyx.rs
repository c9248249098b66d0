//! Telnyx SMS Service Implementation
//!
//! Sends messages through the Telnyx messaging API:
//! `POST {base_url}/messages` with the messaging profile secret in the
//! `x-profile-secret` header and a form-encoded `to`, `body` and optional
//! `from`.
//!
//! ## Sender rules
//!
//! - North American destinations (`+1`) are sent without `from`; Telnyx picks
//!   a number from the profile's pool
//! - Every other destination uses the configured alphanumeric sender
//!
//! A message counts as accepted only when Telnyx answers `"status": "queued"`.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info, warn};

use otp_core::errors::DomainError;
use otp_core::services::SmsDispatcherTrait;
use otp_shared::config::SmsConfig;
use otp_shared::utils::phone::{is_north_american, mask_phone_number};

use crate::InfrastructureError;

/// Header carrying the messaging profile secret
pub const PROFILE_SECRET_HEADER: &str = "x-profile-secret";

/// Status Telnyx reports for an accepted message
pub const QUEUED_STATUS: &str = "queued";

/// Telnyx SMS service configuration
#[derive(Clone)]
pub struct TelnyxConfig {
    /// API base URL, without the `/messages` suffix
    pub base_url: String,
    /// Messaging profile secret
    pub profile_secret: String,
    /// Timeout for API requests in seconds
    pub request_timeout_secs: u64,
}

impl TelnyxConfig {
    pub fn from_sms_config(config: &SmsConfig) -> Self {
        Self {
            base_url: config.base_url.clone(),
            profile_secret: config.profile_secret.clone(),
            request_timeout_secs: config.request_timeout_secs,
        }
    }

    /// Full URL of the message endpoint
    pub fn messages_url(&self) -> String {
        format!("{}/messages", self.base_url.trim_end_matches('/'))
    }
}

impl std::fmt::Debug for TelnyxConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelnyxConfig")
            .field("base_url", &self.base_url)
            .field("profile_secret", &"[REDACTED]")
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

/// Body of a Telnyx message response; only the status matters here
#[derive(Debug, Deserialize)]
struct TelnyxMessageResponse {
    status: Option<String>,
}

/// Telnyx SMS service implementation
pub struct TelnyxSmsService {
    client: Client,
    config: TelnyxConfig,
}

impl TelnyxSmsService {
    /// Create a new Telnyx SMS service
    pub fn new(config: TelnyxConfig) -> Result<Self, InfrastructureError> {
        if config.profile_secret.trim().is_empty() {
            return Err(InfrastructureError::Config(
                "Telnyx profile secret is not set".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        info!(
            url = %config.messages_url(),
            timeout_secs = config.request_timeout_secs,
            "Telnyx SMS service initialized"
        );

        Ok(Self { client, config })
    }

    /// Form fields for one message
    ///
    /// `from` is left out for North American destinations.
    pub fn build_form<'a>(
        destination_number: &'a str,
        origin_identity: &'a str,
        message: &'a str,
    ) -> Vec<(&'static str, &'a str)> {
        let mut form = vec![("to", destination_number), ("body", message)];
        if !is_north_american(destination_number) {
            form.push(("from", origin_identity));
        }
        form
    }

    /// Post one message and report whether Telnyx queued it
    pub async fn post_message(
        &self,
        destination_number: &str,
        origin_identity: &str,
        message: &str,
    ) -> Result<bool, InfrastructureError> {
        let masked = mask_phone_number(destination_number);
        let form = Self::build_form(destination_number, origin_identity, message);

        debug!(
            phone = %masked,
            with_sender = form.len() == 3,
            message_length = message.len(),
            "Sending SMS via Telnyx"
        );

        let response = self
            .client
            .post(self.config.messages_url())
            .header(PROFILE_SECRET_HEADER, &self.config.profile_secret)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(phone = %masked, http_status = status.as_u16(), "Telnyx rejected the request");
            return Err(InfrastructureError::Sms(format!(
                "Telnyx answered HTTP {}",
                status.as_u16()
            )));
        }

        let body = response.text().await?;
        let parsed: TelnyxMessageResponse = serde_json::from_str(&body).map_err(|e| {
            InfrastructureError::Sms(format!("Unreadable Telnyx response: {}", e))
        })?;

        let queued = parsed.status.as_deref() == Some(QUEUED_STATUS);
        info!(
            target: "sms_service",
            provider = "telnyx",
            phone = %masked,
            status = parsed.status.as_deref().unwrap_or("<none>"),
            queued = queued,
            "Telnyx answered"
        );

        Ok(queued)
    }
}

#[async_trait]
impl SmsDispatcherTrait for TelnyxSmsService {
    async fn send(
        &self,
        destination_number: &str,
        origin_identity: &str,
        message: &str,
    ) -> Result<bool, DomainError> {
        self.post_message(destination_number, origin_identity, message)
            .await
            .map_err(DomainError::from)
    }

    fn provider_name(&self) -> &str {
        "Telnyx"
    }
}
