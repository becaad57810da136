//! Label-boundary scanning within a single span.
//!
//! All label occurrences are collected in one pass. A field's value is the
//! text after its first label up to the next label of a different field, or
//! the end of the span.

use lazy_static::lazy_static;
use regex::Regex;

use crate::schema::{Field, LABELED_FIELDS};

lazy_static! {
    /// Any label token followed by a colon, case-insensitive. Capture group
    /// `i + 1` corresponds to `LABELED_FIELDS[i]`.
    static ref LABEL: Regex = Regex::new(&format!(r"(?i)\b(?:{}):", label_groups())).unwrap();

    /// Exact-case label token, anchored to a whole hit.
    static ref EXACT_LABEL: Regex = Regex::new(&format!(r"^(?:{}):$", label_groups())).unwrap();
}

fn label_groups() -> String {
    LABELED_FIELDS
        .iter()
        .filter_map(|f| f.label_pattern())
        .map(|p| format!("({})", p))
        .collect::<Vec<_>>()
        .join("|")
}

/// One label occurrence in a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LabelHit {
    pub field: Field,
    /// Byte offset of the label token.
    pub start: usize,
    /// Byte offset just past the colon.
    pub end: usize,
    /// Whether the label was written with its canonical capitalization.
    pub exact_case: bool,
}

/// Label occurrences of one span, in text order.
#[derive(Debug, Clone, Default)]
pub struct LabelIndex {
    hits: Vec<LabelHit>,
}

impl LabelIndex {
    /// Scan `span` for every label occurrence.
    pub fn scan(span: &str) -> Self {
        let hits = LABEL
            .captures_iter(span)
            .filter_map(|caps| {
                let whole = caps.get(0)?;
                let group = (1..caps.len()).find(|&i| caps.get(i).is_some())?;
                Some(LabelHit {
                    field: LABELED_FIELDS[group - 1],
                    start: whole.start(),
                    end: whole.end(),
                    exact_case: EXACT_LABEL.is_match(whole.as_str()),
                })
            })
            .collect();
        Self { hits }
    }

    pub fn hits(&self) -> &[LabelHit] {
        &self.hits
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Offset where the unlabeled name ends: the first exact-case label.
    pub fn name_end(&self) -> Option<usize> {
        self.hits.iter().find(|h| h.exact_case).map(|h| h.start)
    }

    /// Byte range of `field`'s value.
    ///
    /// The first occurrence of the label wins. The value stops at the next
    /// label of any other field; repeats of the same label stay inside it.
    pub fn value_range(&self, field: Field, span_len: usize) -> Option<std::ops::Range<usize>> {
        let (pos, hit) = self
            .hits
            .iter()
            .enumerate()
            .find(|(_, h)| h.field == field)?;

        let end = self.hits[pos + 1..]
            .iter()
            .find(|h| h.field != field)
            .map(|h| h.start)
            .unwrap_or(span_len);

        Some(hit.end..end)
    }

    /// Trimmed value of `field` in `span`, `None` when missing or blank.
    pub fn value<'a>(&self, field: Field, span: &'a str) -> Option<&'a str> {
        let range = self.value_range(field, span.len())?;
        let value = span[range].trim();
        (!value.is_empty()).then_some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_collects_hits_in_order() {
        let span = "X School Location: A Phone: 1 email: b";
        let index = LabelIndex::scan(span);
        let fields: Vec<Field> = index.hits().iter().map(|h| h.field).collect();
        assert_eq!(fields, vec![Field::Location, Field::Phone, Field::Email]);
        assert!(index.hits()[0].exact_case);
        assert!(!index.hits()[2].exact_case);
    }

    #[test]
    fn test_address_stops_at_city_town() {
        let span = "Address: 123 Main St City/ Town: Nairobi";
        let index = LabelIndex::scan(span);
        assert_eq!(index.value(Field::Address, span), Some("123 Main St"));
        assert_eq!(index.value(Field::CityTown, span), Some("Nairobi"));
    }

    #[test]
    fn test_city_town_without_space() {
        let span = "City/Town: Thika County: Kiambu";
        let index = LabelIndex::scan(span);
        assert_eq!(index.value(Field::CityTown, span), Some("Thika"));
        assert_eq!(index.value(Field::County, span), Some("Kiambu"));
    }

    #[test]
    fn test_county_and_country_are_distinct() {
        let span = "Country: Kenya County: Nairobi";
        let index = LabelIndex::scan(span);
        assert_eq!(index.value(Field::Country, span), Some("Kenya"));
        assert_eq!(index.value(Field::County, span), Some("Nairobi"));
    }

    #[test]
    fn test_label_requires_word_boundary() {
        let span = "Telefax: 020 111 222 Fax: 020 333 444";
        let index = LabelIndex::scan(span);
        assert_eq!(index.hits().len(), 1);
        assert_eq!(index.value(Field::Fax, span), Some("020 333 444"));
    }

    #[test]
    fn test_repeated_label_stays_in_value() {
        let span = "Phone: 0711111111 Phone: 0722222222 Email: a@b.co";
        let index = LabelIndex::scan(span);
        assert_eq!(
            index.value(Field::Phone, span),
            Some("0711111111 Phone: 0722222222")
        );
    }

    #[test]
    fn test_blank_value_is_none() {
        let span = "Fax: ";
        let index = LabelIndex::scan(span);
        assert_eq!(index.value_range(Field::Fax, span.len()), Some(4..5));
        assert_eq!(index.value(Field::Fax, span), None);
    }

    #[test]
    fn test_name_end_ignores_lowercase_labels() {
        let span = "Moi Girls School phone: 0711111111 Location: Kilimani";
        let index = LabelIndex::scan(span);
        assert_eq!(index.name_end(), Some(35));
        assert_eq!(index.value(Field::Phone, span), Some("0711111111"));
    }
}
