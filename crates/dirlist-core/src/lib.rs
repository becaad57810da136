//! Core library for directory listing extraction.
//!
//! This crate provides:
//! - Page text normalization (de-hyphenation, whitespace collapsing)
//! - Segmentation of the normalized stream into per-entity spans
//! - Label-anchored field extraction into a fixed ten-field schema
//! - Phone, email and website cleaning rules

pub mod error;
pub mod listing;
pub mod models;
pub mod schema;
pub mod text;

pub use error::{DirlistError, Result, SourceError};
pub use listing::{DirectoryParser, ExtractionResult, ListingParser, RawSpan, Segmenter};
pub use models::config::DirlistConfig;
pub use models::record::Record;
pub use schema::{FIELDS, Field, SENTINEL};
pub use text::{PageText, normalize_text};
