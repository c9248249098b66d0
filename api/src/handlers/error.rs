use actix_web::{error::InternalError, error::QueryPayloadError, HttpRequest, HttpResponse};
use otp_core::errors::DomainError;

use crate::dto::ErrorResponse;

/// Map a domain error to its HTTP response
///
/// Only bad requests echo details back; storage and configuration problems
/// are logged in full and answered with a generic message.
pub fn domain_error_response(error: &DomainError) -> HttpResponse {
    match error {
        DomainError::BadRequest { field, reason } => {
            log::warn!("Rejected request: {}", error);
            HttpResponse::BadRequest().json(
                ErrorResponse::new(error.code(), format!("{} {}", field, reason))
                    .add_detail("field", field),
            )
        }
        DomainError::Dispatch { .. } => {
            log::error!("SMS dispatch error: {}", error);
            HttpResponse::BadGateway().json(ErrorResponse::new(
                error.code(),
                "The SMS provider could not be reached",
            ))
        }
        DomainError::Storage { .. } | DomainError::Config { .. } => {
            log::error!("Internal error: {}", error);
            HttpResponse::InternalServerError().json(ErrorResponse::new(
                error.code(),
                "An internal error occurred",
            ))
        }
    }
}

/// Answer unparseable query strings with the standard error body
pub fn query_error_handler(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    log::warn!("Malformed query string: {}", err);
    let response = HttpResponse::BadRequest().json(ErrorResponse::new(
        "bad_request",
        "The query string could not be parsed",
    ));
    InternalError::from_response(err, response).into()
}

/// Default handler for unknown routes
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        "not_found",
        "The requested resource was not found",
    ))
}
