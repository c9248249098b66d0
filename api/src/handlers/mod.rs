//! Response mapping shared by the route handlers

pub mod error;

pub use error::{domain_error_response, not_found, query_error_handler};
