//! Repository interfaces for token persistence.

pub mod token;

pub use token::TokenStore;

#[cfg(test)]
pub use token::InMemoryTokenStore;
