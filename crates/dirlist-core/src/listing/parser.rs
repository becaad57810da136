//! Directory listing parser: normalization, segmentation and per-span
//! field extraction.

use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::Result;
use crate::models::config::{DirlistConfig, InputConfig};
use crate::models::record::Record;
use crate::schema::{CleaningRule, Field, LABELED_FIELDS};
use crate::text::{PageText, normalize_text};

use super::ListingParser;
use super::labels::LabelIndex;
use super::rules::{EmailCleaner, FieldCleaner, PhoneCleaner, WebsiteCleaner};
use super::segment::{RawSpan, Segmenter};

/// Result of parsing one document.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionResult {
    /// Records in document order, one per span.
    pub records: Vec<Record>,
    /// Extraction warnings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
    /// When the extraction ran.
    pub extracted_at: DateTime<Utc>,
}

impl ExtractionResult {
    /// True when no entity was recognized in the input.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Listing parser built from a segmenter and the field cleaners.
#[derive(Debug, Clone)]
pub struct DirectoryParser {
    segmenter: Segmenter,
    phone: PhoneCleaner,
    input: InputConfig,
    /// Extract spans on the rayon pool.
    parallel: bool,
    /// Minimum span count for parallel extraction.
    parallel_threshold: usize,
    /// Warn about spans without labeled fields.
    flag_unlabeled: bool,
}

impl DirectoryParser {
    /// Create a parser with default settings.
    pub fn new() -> Self {
        let defaults = DirlistConfig::default();
        Self {
            segmenter: Segmenter::default(),
            phone: PhoneCleaner::new(),
            input: defaults.input,
            parallel: defaults.extraction.parallel,
            parallel_threshold: defaults.extraction.parallel_threshold,
            flag_unlabeled: defaults.extraction.flag_unlabeled,
        }
    }

    /// Create a parser from configuration.
    ///
    /// Fails when the anchor keywords or the country code are unusable.
    pub fn from_config(config: &DirlistConfig) -> Result<Self> {
        Ok(Self {
            segmenter: Segmenter::from_config(&config.segmentation)?,
            phone: PhoneCleaner::with_country_code(&config.extraction.country_code)?,
            input: config.input.clone(),
            parallel: config.extraction.parallel,
            parallel_threshold: config.extraction.parallel_threshold,
            flag_unlabeled: config.extraction.flag_unlabeled,
        })
    }

    /// Set parallel span extraction.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Set the minimum span count for parallel extraction.
    pub fn with_parallel_threshold(mut self, threshold: usize) -> Self {
        self.parallel_threshold = threshold;
        self
    }

    /// Set warnings for spans without labeled fields.
    pub fn with_unlabeled_warnings(mut self, flag: bool) -> Self {
        self.flag_unlabeled = flag;
        self
    }

    /// Normalize raw text the way segmentation expects.
    pub fn normalize(&self, text: &str) -> String {
        normalize_text(text, self.input.dehyphenate)
    }

    /// Split normalized text into raw spans.
    pub fn segment<'a>(&self, normalized: &'a str) -> Vec<RawSpan<'a>> {
        self.segmenter.segment(normalized)
    }

    /// Extract one record from a span. Never fails.
    pub fn extract_span(&self, span: &str) -> Record {
        let mut record = Record::new();
        let labels = LabelIndex::scan(span);

        let name_end = labels.name_end().unwrap_or(span.len());
        record.set(Field::SchoolName, &span[..name_end]);

        if labels.is_empty() {
            return record;
        }

        for field in LABELED_FIELDS {
            let Some(value) = labels.value(field, span) else {
                continue;
            };
            let cleaned = match field.cleaning_rule() {
                CleaningRule::Verbatim => Some(value.to_string()),
                CleaningRule::Phone => self.phone.clean(value),
                CleaningRule::Email => EmailCleaner.clean(value),
                CleaningRule::Website => WebsiteCleaner.clean(value),
            };
            if let Some(cleaned) = cleaned {
                record.set(field, cleaned);
            }
        }

        record
    }

    /// Extract records for all spans, preserving span order.
    pub fn extract_spans(&self, spans: &[RawSpan<'_>]) -> Vec<Record> {
        #[cfg(feature = "parallel")]
        if self.parallel && spans.len() >= self.parallel_threshold {
            use rayon::prelude::*;

            debug!("Extracting {} spans in parallel", spans.len());
            return spans.par_iter().map(|s| self.extract_span(s.text)).collect();
        }

        spans.iter().map(|s| self.extract_span(s.text)).collect()
    }

    /// Join pages, normalize and parse them.
    pub fn parse_pages(&self, pages: &PageText) -> ExtractionResult {
        debug!("Parsing {} pages", pages.page_count());
        self.parse(&pages.join(&self.input.page_separator))
    }

    fn collect_warnings(&self, spans: &[RawSpan<'_>], records: &[Record]) -> Vec<String> {
        let mut warnings = Vec::new();

        if spans.is_empty() {
            warnings.push("No entity-start anchors found; no records extracted".to_string());
            return warnings;
        }

        if self.flag_unlabeled {
            for (span, record) in spans.iter().zip(records) {
                if record.labeled_field_count() == 0 {
                    warnings.push(format!(
                        "Span {} at byte {} has no labeled fields: {:?}",
                        span.index,
                        span.offset,
                        truncate(record.name(), 60)
                    ));
                }
            }
        }

        warnings
    }
}

impl Default for DirectoryParser {
    fn default() -> Self {
        Self::new()
    }
}

impl ListingParser for DirectoryParser {
    fn parse(&self, text: &str) -> ExtractionResult {
        let start = Instant::now();

        let normalized = self.normalize(text);
        let spans = self.segment(&normalized);
        let records = self.extract_spans(&spans);
        let warnings = self.collect_warnings(&spans, &records);

        if records.is_empty() {
            warn!("No entities recognized in {} bytes of text", normalized.len());
        } else {
            info!(
                "Extracted {} records ({} warnings)",
                records.len(),
                warnings.len()
            );
        }

        ExtractionResult {
            records,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
            extracted_at: Utc::now(),
        }
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max).collect();
        format!("{}...", truncated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FIELDS, SENTINEL};
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;

    fn set(value: &str) -> HashSet<&str> {
        value.split(", ").collect()
    }

    #[test]
    fn test_parse_two_entities() {
        let text = "Alpha Boys High School Location: Kasarani Phone: 0712345678 \
                    Beta Girls Academy Phone: 712-345-678";
        let result = DirectoryParser::new().parse(text);
        assert_eq!(result.records.len(), 2);

        let alpha = &result.records[0];
        assert_eq!(alpha.name(), "Alpha Boys High School");
        assert_eq!(alpha.get(Field::Location), "Kasarani");
        assert_eq!(alpha.get(Field::Phone), "0712345678");

        let beta = &result.records[1];
        assert_eq!(beta.name(), "Beta Girls Academy");
        assert_eq!(beta.get(Field::Phone), "0712345678");
        for field in FIELDS {
            if field != Field::SchoolName && field != Field::Phone {
                assert_eq!(beta.get(field), SENTINEL, "{}", field);
            }
        }
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_extract_full_entry() {
        let span = "Upper Hill School Location: Upper Hill Address: P.O. Box 30005-00100 \
                    City/ Town: Nairobi County: Nairobi Country: Kenya \
                    Website: www.upperhill.sc.ke Phone: 020 272 0946, 0722 202 123 \
                    Email: info@upperhill.sc.ke, principal@upperhill.sc.ke Fax: 020 272 0000";
        let record = DirectoryParser::new().extract_span(span);

        assert_eq!(record.name(), "Upper Hill School");
        assert_eq!(record.get(Field::Location), "Upper Hill");
        assert_eq!(record.get(Field::Address), "P.O. Box 30005-00100");
        assert_eq!(record.get(Field::CityTown), "Nairobi");
        assert_eq!(record.get(Field::County), "Nairobi");
        assert_eq!(record.get(Field::Country), "Kenya");
        assert_eq!(record.get(Field::Website), "www.upperhill.sc.ke");
        assert_eq!(
            set(record.get(Field::Phone)),
            HashSet::from(["0202720946", "0722202123"])
        );
        assert_eq!(
            set(record.get(Field::Email)),
            HashSet::from(["info@upperhill.sc.ke", "principal@upperhill.sc.ke"])
        );
        assert_eq!(record.get(Field::Fax), "020 272 0000");
    }

    #[test]
    fn test_no_labels_whole_span_is_name() {
        let record = DirectoryParser::new().extract_span("Moi Forces Academy ");
        assert_eq!(record.name(), "Moi Forces Academy");
        assert_eq!(record.labeled_field_count(), 0);
    }

    #[test]
    fn test_email_capture() {
        let record = DirectoryParser::new().extract_span("X School Email: info@school.ac.ke More text");
        assert_eq!(record.get(Field::Email), "info@school.ac.ke");
    }

    #[test]
    fn test_empty_capture_is_sentinel() {
        let record = DirectoryParser::new().extract_span("X School Phone: 0712345678 Fax: ");
        assert_eq!(record.get(Field::Fax), SENTINEL);
    }

    #[test]
    fn test_uncleanable_value_is_sentinel() {
        let record = DirectoryParser::new()
            .extract_span("X School Phone: none listed Website: see notice board");
        assert_eq!(record.get(Field::Phone), SENTINEL);
        assert_eq!(record.get(Field::Website), SENTINEL);
    }

    #[test]
    fn test_label_first_span_has_sentinel_name() {
        let record = DirectoryParser::new().extract_span("Location: Westlands");
        assert_eq!(record.name(), SENTINEL);
        assert_eq!(record.get(Field::Location), "Westlands");
    }

    #[test]
    fn test_no_anchor_is_empty_result() {
        let result = DirectoryParser::new().parse("Location: Nairobi Phone: 0712345678");
        assert!(result.is_empty());
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_spurious_span_is_flagged() {
        let text = "Hill Crest Academy Address: Next To Moi Forces High School";
        let result = DirectoryParser::new().parse(text);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].get(Field::Address), SENTINEL);
        assert_eq!(result.records[1].name(), "Next To Moi Forces High School");
        assert_eq!(result.warnings.len(), 2);

        let quiet = DirectoryParser::new().with_unlabeled_warnings(false).parse(text);
        assert!(quiet.warnings.is_empty());
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let entry = "Alpha School Location: Kasarani Phone: 0712345678 Email: a@alpha.ac.ke ";
        let text: String = (0..200)
            .map(|i| entry.replace("Alpha", &format!("Alpha {}", letter(i))))
            .collect();

        let sequential = DirectoryParser::new().with_parallel(false).parse(&text);
        let parallel = DirectoryParser::new()
            .with_parallel(true)
            .with_parallel_threshold(1)
            .parse(&text);

        assert_eq!(sequential.records.len(), 200);
        assert_eq!(sequential.records, parallel.records);
    }

    fn letter(i: usize) -> String {
        let a = (b'A' + (i / 26) as u8) as char;
        let b = (b'a' + (i % 26) as u8) as char;
        format!("{}{}", a, b)
    }

    #[test]
    fn test_parse_pages_rejoins_hyphenation() {
        let pages = PageText::from_pages([
            "Kasarani Sec-",
            "ondary School Location: Kasa-\nrani",
        ]);
        let result = DirectoryParser::new().parse_pages(&pages);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name(), "Kasarani Secondary School");
        assert_eq!(result.records[0].get(Field::Location), "Kasarani");
    }

    #[test]
    fn test_from_config_rejects_bad_country_code() {
        let mut config = DirlistConfig::default();
        config.extraction.country_code = "+254".to_string();
        assert!(DirectoryParser::from_config(&config).is_err());
    }
}
