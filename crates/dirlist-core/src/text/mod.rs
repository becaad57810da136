//! Page text input and normalization.
//!
//! Text arrives from an external extraction step as one string per logical
//! page. Pages are joined with a separator and normalized before the
//! segmenter sees them.

mod normalize;

pub use normalize::{collapse_whitespace, dehyphenate, normalize_text};

use tracing::debug;

use crate::error::{Result, SourceError};
use crate::models::config::InputConfig;

/// Extracted text of a document, one entry per logical page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageText {
    pages: Vec<String>,
}

impl PageText {
    /// Wrap already-split pages.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            pages: pages.into_iter().map(Into::into).collect(),
        }
    }

    /// Split a single text dump into pages on `page_break`.
    ///
    /// An empty `page_break` keeps the whole text as one page.
    pub fn from_text(text: &str, page_break: &str) -> Self {
        if page_break.is_empty() {
            return Self::from_pages([text]);
        }
        Self::from_pages(text.split(page_break))
    }

    /// Decode raw bytes as UTF-8 and split them into pages.
    pub fn from_bytes(data: Vec<u8>, page_break: &str) -> Result<Self> {
        let text = String::from_utf8(data).map_err(SourceError::from)?;
        if text.trim().is_empty() {
            return Err(SourceError::Empty.into());
        }
        let pages = Self::from_text(&text, page_break);
        debug!("Read {} pages ({} bytes)", pages.page_count(), text.len());
        Ok(pages)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// Concatenate all pages with `separator`.
    pub fn join(&self, separator: &str) -> String {
        self.pages.join(separator)
    }

    /// Join pages and apply the normalization required before segmentation.
    pub fn normalized(&self, config: &InputConfig) -> String {
        normalize_text(&self.join(&config.page_separator), config.dehyphenate)
    }
}
