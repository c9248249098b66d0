//! One-time token route handlers
//!
//! This module contains the two OTP endpoints:
//! - Token issuance (`gettoken`)
//! - Token verification (`checktoken`)

pub mod check_token;
pub mod get_token;

use actix_web::{http::header, HttpResponse};
use serde::Serialize;
use std::sync::Arc;

use otp_core::repositories::TokenStore;
use otp_core::services::{OtpService, SmsDispatcherTrait};
use otp_shared::config::{AppConfig, RedirectConfig, ResponseMode};

pub use check_token::check_token;
pub use get_token::get_token;

/// Application state that holds shared services
pub struct AppState<S, D>
where
    S: TokenStore,
    D: SmsDispatcherTrait + ?Sized,
{
    pub otp_service: Arc<OtpService<S, D>>,
    /// Redirect targets for redirect mode
    pub redirects: RedirectConfig,
    pub response_mode: ResponseMode,
    /// Service label reported by the health check
    pub service_name: String,
    /// Prefix the OTP routes are mounted under
    pub scope_path: String,
}

impl<S, D> AppState<S, D>
where
    S: TokenStore,
    D: SmsDispatcherTrait + ?Sized,
{
    pub fn new(otp_service: Arc<OtpService<S, D>>, config: &AppConfig) -> Self {
        Self {
            otp_service,
            redirects: config.redirects.clone(),
            response_mode: config.server.response_mode,
            service_name: config.sms.service_name.clone(),
            scope_path: config.server.scope_path(),
        }
    }

    /// Answer an endpoint outcome in the configured response mode
    pub fn respond<T: Serialize>(&self, location: &str, body: T) -> HttpResponse {
        match self.response_mode {
            ResponseMode::Redirect => HttpResponse::Found()
                .insert_header((header::LOCATION, location))
                .finish(),
            ResponseMode::Json => HttpResponse::Ok().json(body),
        }
    }
}
