//! Email address extraction.

use super::FieldCleaner;
use super::patterns::EMAIL;

/// Email field cleaner.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailCleaner;

impl FieldCleaner for EmailCleaner {
    fn extract_all(&self, text: &str) -> Vec<String> {
        EMAIL.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}
