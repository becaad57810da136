//! Website URL extraction.

use super::FieldCleaner;
use super::patterns::WEBSITE;

/// Website field cleaner.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebsiteCleaner;

impl FieldCleaner for WebsiteCleaner {
    fn extract_all(&self, text: &str) -> Vec<String> {
        WEBSITE.find_iter(text).map(|m| m.as_str().to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefixes() {
        assert_eq!(
            WebsiteCleaner.extract_all("http://a.ac.ke, https://b.org/home www.c.sc.ke"),
            vec!["http://a.ac.ke", "https://b.org/home", "www.c.sc.ke"]
        );
    }

    #[test]
    fn test_bare_domain_is_ignored() {
        assert!(WebsiteCleaner.extract_all("alpha.ac.ke").is_empty());
    }

    #[test]
    fn test_clean_dedups() {
        assert_eq!(
            WebsiteCleaner.clean("www.alpha.ac.ke,www.alpha.ac.ke"),
            Some("www.alpha.ac.ke".to_string())
        );
    }
}
