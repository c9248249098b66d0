use actix_web::{web, HttpResponse};

use otp_core::repositories::TokenStore;
use otp_core::services::SmsDispatcherTrait;

use crate::dto::{CheckTokenQuery, TokenCheckResponse};
use crate::handlers::domain_error_response;

use super::AppState;

/// Handler for GET /{app}/checktoken?token=...
///
/// A valid token is consumed; submitting it again reports it invalid.
///
/// # Response
///
/// - Redirect mode: 302 to `redirects.token_ok` or `redirects.token_nok`
/// - JSON mode: 200 with `{"valid": bool}`
pub async fn check_token<S, D>(
    state: web::Data<AppState<S, D>>,
    query: web::Query<CheckTokenQuery>,
) -> HttpResponse
where
    S: TokenStore + 'static,
    D: SmsDispatcherTrait + ?Sized + 'static,
{
    let token = query.into_inner().token.unwrap_or_default();

    match state.otp_service.check_token(&token).await {
        Ok(valid) => {
            log::info!("Token check completed, valid: {}", valid);
            state.respond(state.redirects.after_check(valid), TokenCheckResponse { valid })
        }
        Err(error) => domain_error_response(&error),
    }
}
