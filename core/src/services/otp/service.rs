//! Main OTP service implementation

use std::sync::Arc;

use otp_shared::utils::phone::{is_valid_international_phone, mask_phone_number, normalize_phone_number};

use crate::domain::entities::token::is_issuable_token;
use crate::errors::{DomainError, DomainResult};
use crate::repositories::TokenStore;

use super::config::OtpServiceConfig;
use super::traits::SmsDispatcherTrait;
use super::types::{DeliveryStatus, IssueOutcome};

/// Issues one-time tokens over SMS and verifies them
pub struct OtpService<S: TokenStore, D: SmsDispatcherTrait + ?Sized> {
    /// Token store
    store: Arc<S>,
    /// SMS dispatcher
    dispatcher: Arc<D>,
    /// Service configuration
    config: OtpServiceConfig,
}

impl<S: TokenStore, D: SmsDispatcherTrait + ?Sized> OtpService<S, D> {
    /// Create a new OTP service
    ///
    /// # Arguments
    ///
    /// * `store` - Token store implementation
    /// * `dispatcher` - SMS dispatcher implementation
    /// * `config` - Service configuration
    pub fn new(store: Arc<S>, dispatcher: Arc<D>, config: OtpServiceConfig) -> Self {
        Self {
            store,
            dispatcher,
            config,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    pub fn config(&self) -> &OtpServiceConfig {
        &self.config
    }

    /// Issue a token for a phone number and send it by SMS
    ///
    /// This method:
    /// 1. Validates the destination number
    /// 2. Issues and persists a token
    /// 3. Sends the token via SMS and waits for the provider's answer
    /// 4. Revokes the token if the SMS was not accepted (when configured)
    ///
    /// Dispatch problems are reported through `IssueOutcome::delivery`; only
    /// bad input and storage failures are returned as errors.
    pub async fn request_token(&self, number: &str) -> DomainResult<IssueOutcome> {
        let number = Self::validate_number(number)?;
        let masked = mask_phone_number(&number);

        let record = self.store.issue(&number).await.map_err(|e| {
            tracing::error!(
                phone = %masked,
                error = %e,
                event = "token_issue_failed",
                "Failed to issue token"
            );
            e
        })?;

        tracing::info!(phone = %masked, event = "token_issued", "Token requested");

        let message = self.config.render_message(&record.token);
        let delivery = match self
            .dispatcher
            .send(&number, &self.config.origin_identity, &message)
            .await
        {
            Ok(true) => DeliveryStatus::Accepted,
            Ok(false) => {
                tracing::warn!(
                    phone = %masked,
                    provider = self.dispatcher.provider_name(),
                    event = "sms_rejected",
                    "SMS provider did not queue the message"
                );
                DeliveryStatus::Rejected
            }
            Err(e) => {
                tracing::error!(
                    phone = %masked,
                    provider = self.dispatcher.provider_name(),
                    error = %e,
                    event = "sms_dispatch_failed",
                    "Failed to send SMS"
                );
                DeliveryStatus::Failed(e.to_string())
            }
        };

        let mut revoked = false;
        if delivery != DeliveryStatus::Accepted && self.config.revoke_on_dispatch_failure {
            match self.store.revoke(&record.token).await {
                Ok(existed) => revoked = existed,
                Err(e) => {
                    tracing::error!(
                        phone = %masked,
                        error = %e,
                        event = "token_revoke_failed",
                        "Failed to revoke undelivered token"
                    );
                }
            }
        }

        tracing::debug!(
            phone = %masked,
            delivered = delivery == DeliveryStatus::Accepted,
            revoked = revoked,
            event = "token_request_completed",
            "Send SMS result"
        );

        Ok(IssueOutcome {
            record,
            delivery,
            revoked,
        })
    }

    /// Check a submitted token, consuming it when valid
    ///
    /// Tokens that cannot have been issued under any token length, or that
    /// use another alphabet, are answered `false` without touching the store.
    pub async fn check_token(&self, token: &str) -> DomainResult<bool> {
        let token = token.trim();
        if token.is_empty() {
            return Err(DomainError::missing("token"));
        }

        let token = token.to_ascii_uppercase();
        if !is_issuable_token(&token) {
            tracing::info!(event = "token_invalid", "Malformed token received");
            return Ok(false);
        }

        let valid = self.store.verify(&token).await.map_err(|e| {
            tracing::error!(error = %e, event = "token_verify_failed", "Failed to verify token");
            e
        })?;

        if valid {
            tracing::info!(event = "token_valid", "Valid token received");
        } else {
            tracing::info!(event = "token_invalid", "Invalid token received");
        }

        Ok(valid)
    }

    /// Check presence and E.164 shape of a destination number
    fn validate_number(number: &str) -> DomainResult<String> {
        let number = number.trim();
        if number.is_empty() {
            return Err(DomainError::missing("number"));
        }
        if !is_valid_international_phone(number) {
            return Err(DomainError::invalid(
                "number",
                "must be in E.164 format (e.g. +15551234567)",
            ));
        }
        Ok(normalize_phone_number(number))
    }
}
