//! Directory listing extraction: segmentation and field extraction.

pub mod labels;
mod parser;
pub mod rules;
mod segment;

pub use labels::{LabelHit, LabelIndex};
pub use parser::{DirectoryParser, ExtractionResult};
pub use segment::{RawSpan, Segmenter};

use crate::models::record::Record;

/// Trait for listing parsing.
pub trait ListingParser {
    /// Parse raw listing text into records, in document order.
    ///
    /// Parsing never fails: unrecognized input produces an empty result and
    /// missing fields hold the sentinel.
    fn parse(&self, text: &str) -> ExtractionResult;
}

/// Parse listing text with default settings.
pub fn parse_listing(text: &str) -> Vec<Record> {
    DirectoryParser::new().parse(text).records
}
