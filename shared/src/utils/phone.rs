//! Phone number utilities

use once_cell::sync::Lazy;
use regex::Regex;

/// Prefix of destinations in the North American numbering plan
pub const NORTH_AMERICA_PREFIX: &str = "+1";

// International phone number regex (E.164 format)
static INTERNATIONAL_PHONE_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+[1-9]\d{1,14}$").expect("valid E.164 regex"));

/// Characters people type between digits that carry no meaning
const FORMATTING_CHARS: [char; 5] = [' ', '-', '(', ')', '.'];

/// Normalize a phone number by removing common formatting characters
///
/// Anything else, letters included, is kept so that validation rejects it.
pub fn normalize_phone_number(phone: &str) -> String {
    phone
        .chars()
        .filter(|c| !FORMATTING_CHARS.contains(c))
        .collect()
}

/// Check if a phone number is valid (international E.164 format)
pub fn is_valid_international_phone(phone: &str) -> bool {
    INTERNATIONAL_PHONE_REGEX.is_match(&normalize_phone_number(phone))
}

/// Whether the provider should pick the sender from its numeric pool
pub fn is_north_american(phone: &str) -> bool {
    phone.starts_with(NORTH_AMERICA_PREFIX)
}

/// Mask a phone number for logging, keeping the last four digits
pub fn mask_phone_number(phone: &str) -> String {
    let chars: Vec<char> = phone.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }

    let visible_digits = 4;
    let masked_count = chars.len() - visible_digits;
    let last_digits: String = chars[masked_count..].iter().collect();

    if phone.starts_with('+') {
        format!("+{}{}", "*".repeat(masked_count - 1), last_digits)
    } else {
        format!("{}{}", "*".repeat(masked_count), last_digits)
    }
}
