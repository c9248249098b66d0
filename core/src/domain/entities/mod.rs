//! Domain entities representing core business objects.

pub mod token;
pub mod token_map;

// Re-export commonly used types
pub use token::{
    is_issuable_token, is_valid_token_format, OsRngTokenGenerator, TokenGenerator, TokenRecord,
    DEFAULT_TOKEN_BYTES,
};
pub use token_map::{TokenLookup, TokenMap, MAX_GENERATION_ATTEMPTS};
