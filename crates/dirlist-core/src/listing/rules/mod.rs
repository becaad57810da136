//! Rule-based cleaners for captured field values.

pub mod email;
pub mod patterns;
pub mod phone;
pub mod website;

pub use email::EmailCleaner;
pub use patterns::*;
pub use phone::{PhoneCleaner, normalize_phone_digits};
pub use website::WebsiteCleaner;

use crate::models::record::VALUE_SEPARATOR;

/// Trait for field value cleaners.
pub trait FieldCleaner {
    /// Extract every cleaned value found in a captured field value.
    fn extract_all(&self, text: &str) -> Vec<String>;

    /// Deduplicated values joined by [`VALUE_SEPARATOR`], `None` if nothing
    /// matched.
    ///
    /// The join order is unspecified; callers must treat the result as a set.
    fn clean(&self, text: &str) -> Option<String> {
        let values = dedup(self.extract_all(text));
        if values.is_empty() {
            None
        } else {
            Some(values.join(VALUE_SEPARATOR))
        }
    }
}

/// Drop repeated values.
pub fn dedup(values: Vec<String>) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(&value) {
            unique.push(value);
        }
    }
    unique
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedup() {
        let values = vec!["a".to_string(), "b".to_string(), "a".to_string()];
        assert_eq!(dedup(values).len(), 2);
    }

    #[test]
    fn test_clean_nothing_found() {
        assert_eq!(EmailCleaner.clean("see website"), None);
        assert_eq!(PhoneCleaner::new().clean("n/a"), None);
    }
}
