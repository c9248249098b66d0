//! Application factory
//!
//! Builds the Actix-web application around an `AppState`. Middleware such as
//! the request logger is added by the caller so tests can use the bare app.

use actix_web::{web, App, HttpResponse};
use chrono::Utc;

use otp_core::repositories::TokenStore;
use otp_core::services::SmsDispatcherTrait;

use crate::dto::HealthResponse;
use crate::handlers::{domain_error_response, not_found, query_error_handler};
use crate::routes::otp::{check_token, get_token, AppState};

/// Create and configure the application with all dependencies
pub fn create_app<S, D>(
    app_state: web::Data<AppState<S, D>>,
) -> App<
    impl actix_web::dev::ServiceFactory<
        actix_web::dev::ServiceRequest,
        Config = (),
        Response = actix_web::dev::ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
>
where
    S: TokenStore + 'static,
    D: SmsDispatcherTrait + ?Sized + 'static,
{
    let scope_path = app_state.scope_path.clone();

    App::new()
        // Add application state
        .app_data(app_state)
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        // Health check endpoint
        .route("/health", web::get().to(health_check::<S, D>))
        // OTP routes
        .service(
            web::scope(&scope_path)
                .route("/gettoken", web::get().to(get_token::<S, D>))
                .route("/checktoken", web::get().to(check_token::<S, D>)),
        )
        // Default 404 handler
        .default_service(web::route().to(not_found))
}

/// Health check endpoint handler
async fn health_check<S, D>(state: web::Data<AppState<S, D>>) -> HttpResponse
where
    S: TokenStore + 'static,
    D: SmsDispatcherTrait + ?Sized + 'static,
{
    match state.otp_service.store().len().await {
        Ok(active_tokens) => HttpResponse::Ok().json(HealthResponse {
            status: "healthy".to_string(),
            service: state.service_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            active_tokens,
            timestamp: Utc::now(),
        }),
        Err(error) => domain_error_response(&error),
    }
}
