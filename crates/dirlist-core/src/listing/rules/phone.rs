//! Phone number extraction and trunk-code normalization.

use regex::Regex;

use super::FieldCleaner;
use super::patterns::{DEFAULT_COUNTRY_CODE, PHONE, phone_pattern};
use crate::error::{DirlistError, Result};

/// Phone field cleaner.
#[derive(Debug, Clone)]
pub struct PhoneCleaner {
    pattern: Regex,
    country_code: String,
}

impl PhoneCleaner {
    /// Create a phone cleaner for the default country code.
    pub fn new() -> Self {
        Self {
            pattern: PHONE.clone(),
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
        }
    }

    /// Create a phone cleaner rewriting another country calling code.
    pub fn with_country_code(country_code: &str) -> Result<Self> {
        if country_code.is_empty() || !country_code.chars().all(|c| c.is_ascii_digit()) {
            return Err(DirlistError::Config(format!(
                "country code must be digits, got {:?}",
                country_code
            )));
        }
        Ok(Self {
            pattern: Regex::new(&phone_pattern(country_code))?,
            country_code: country_code.to_string(),
        })
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }
}

impl Default for PhoneCleaner {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldCleaner for PhoneCleaner {
    fn extract_all(&self, text: &str) -> Vec<String> {
        self.pattern
            .find_iter(text)
            .map(|m| {
                let digits: String = m.as_str().chars().filter(|c| c.is_ascii_digit()).collect();
                normalize_phone_digits(&digits, &self.country_code)
            })
            .collect()
    }
}

/// Normalize a digit-only phone number to its trunk form.
///
/// Nine digits starting 2-9 get a leading zero; a country code followed by
/// nine digits has the code replaced by a zero. Anything else is returned
/// unchanged.
pub fn normalize_phone_digits(digits: &str, country_code: &str) -> String {
    let starts_with_area_digit = digits
        .chars()
        .next()
        .is_some_and(|c| ('2'..='9').contains(&c));

    if digits.len() == 9 && starts_with_area_digit {
        format!("0{}", digits)
    } else if digits.len() == country_code.len() + 9 && digits.starts_with(country_code) {
        format!("0{}", &digits[country_code.len()..])
    } else {
        digits.to_string()
    }
}
