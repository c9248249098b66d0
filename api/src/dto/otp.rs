//! Query parameters of the OTP endpoints

use serde::{Deserialize, Serialize};

/// Query of `GET /{app}/gettoken`
///
/// Fields are optional so a missing parameter reaches the handler and is
/// answered with the API's own error body.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GetTokenQuery {
    /// Destination phone number in E.164 format
    pub number: Option<String>,
}

/// Query of `GET /{app}/checktoken`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CheckTokenQuery {
    /// Token received by SMS
    pub token: Option<String>,
}
