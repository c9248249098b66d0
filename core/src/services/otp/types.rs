//! Types for OTP service results

use crate::domain::entities::token::TokenRecord;

/// What happened to the SMS carrying a token
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeliveryStatus {
    /// Provider queued the message
    Accepted,
    /// Provider answered with a status other than queued
    Rejected,
    /// Provider could not be reached or answered unreadably
    Failed(String),
}

/// Result of a token request
#[derive(Debug, Clone)]
pub struct IssueOutcome {
    /// The record that was issued
    pub record: TokenRecord,
    /// Outcome of the SMS dispatch
    pub delivery: DeliveryStatus,
    /// Whether the token was revoked because the SMS was not accepted
    pub revoked: bool,
}

impl IssueOutcome {
    /// Whether the caller should be told the token is on its way
    pub fn delivered(&self) -> bool {
        self.delivery == DeliveryStatus::Accepted
    }
}
