//! Common regex patterns for contact field cleaning.

use lazy_static::lazy_static;
use regex::Regex;

/// Local numbers: 3-3-3/4 digit groups, or a leading-zero area code
/// followed by two groups.
pub const LOCAL_PHONE: &str =
    r"\b\d{3}[-.]?\d{3}[-.]?\d{3,4}\b|\b0\d{2,3}[- ]?\d{3,4}[- ]?\d{3,4}\b";

/// Default country calling code.
pub const DEFAULT_COUNTRY_CODE: &str = "254";

/// Phone pattern for a country calling code, tried before the local forms.
pub fn phone_pattern(country_code: &str) -> String {
    format!(
        r"\+?\b{}[- ]?\d{{3}}[- ]?\d{{3}}[- ]?\d{{3}}\b|{}",
        regex::escape(country_code),
        LOCAL_PHONE
    )
}

lazy_static! {
    // Phone pattern with the default country code
    pub static ref PHONE: Regex = Regex::new(&phone_pattern(DEFAULT_COUNTRY_CODE)).unwrap();

    // Email pattern
    pub static ref EMAIL: Regex = Regex::new(
        r"(?i)\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b"
    ).unwrap();

    // Website pattern (runs to whitespace or comma)
    pub static ref WEBSITE: Regex = Regex::new(
        r"(?:https?://|www\.)[^\s,]+"
    ).unwrap();
}
