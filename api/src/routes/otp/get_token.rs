use actix_web::{web, HttpResponse};

use otp_core::repositories::TokenStore;
use otp_core::services::SmsDispatcherTrait;
use otp_shared::utils::phone::mask_phone_number;

use crate::dto::{GetTokenQuery, TokenSentResponse};
use crate::handlers::domain_error_response;

use super::AppState;

/// Handler for GET /{app}/gettoken?number=...
///
/// Issues a token for the number and sends it by SMS.
///
/// # Response
///
/// - Redirect mode: 302 to `redirects.token_sent` when the SMS was accepted,
///   otherwise to `redirects.number_nok`
/// - JSON mode: 200 with `{"sent": bool}`
///
/// A failed SMS call arrives as an undelivered outcome, not as an error.
///
/// ## Errors
/// - 400 when `number` is missing, blank or not E.164
/// - 500 when the token store cannot be written
pub async fn get_token<S, D>(
    state: web::Data<AppState<S, D>>,
    query: web::Query<GetTokenQuery>,
) -> HttpResponse
where
    S: TokenStore + 'static,
    D: SmsDispatcherTrait + ?Sized + 'static,
{
    let number = query.into_inner().number.unwrap_or_default();

    match state.otp_service.request_token(&number).await {
        Ok(outcome) => {
            let sent = outcome.delivered();
            log::info!(
                "Token request for {} completed, sent: {}",
                mask_phone_number(&outcome.record.destination_number),
                sent
            );
            state.respond(state.redirects.after_issue(sent), TokenSentResponse { sent })
        }
        Err(error) => domain_error_response(&error),
    }
}
