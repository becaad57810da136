//! Splitting normalized text into per-entity spans.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::debug;

use crate::error::{DirlistError, Result};
use crate::models::config::SegmentationConfig;

lazy_static! {
    static ref DEFAULT_ANCHOR: Regex = Regex::new(&anchor_pattern(
        &SegmentationConfig::default().anchor_keywords
    )).unwrap();
}

/// Slice of the normalized text attributed to one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawSpan<'a> {
    /// Position of the span in document order.
    pub index: usize,
    /// Byte offset of the span in the normalized text.
    pub offset: usize,
    /// Span content, starting with the anchor that opened it.
    pub text: &'a str,
}

impl RawSpan<'_> {
    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}

/// Finds entity-start anchors and cuts the text between them.
///
/// An anchor is a capitalized word followed by letters, spaces and
/// `, & . ' -`, ending in an institutional keyword such as "School". Anchors
/// are accepted wherever they occur, including inside another entry's field
/// value, so a school named in an address opens a new (mostly empty) span.
#[derive(Debug, Clone)]
pub struct Segmenter {
    anchor: Regex,
}

impl Segmenter {
    /// Create a segmenter ending anchors in the given keywords.
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        if keywords.iter().all(|k| k.as_ref().trim().is_empty()) {
            return Err(DirlistError::Config(
                "segmentation.anchor_keywords must not be empty".to_string(),
            ));
        }
        let anchor = Regex::new(&anchor_pattern(keywords))?;
        Ok(Self { anchor })
    }

    pub fn from_config(config: &SegmentationConfig) -> Result<Self> {
        Self::new(&config.anchor_keywords)
    }

    /// Byte ranges of all anchors, leftmost-first and non-overlapping.
    pub fn anchors(&self, text: &str) -> Vec<std::ops::Range<usize>> {
        self.anchor.find_iter(text).map(|m| m.range()).collect()
    }

    /// Split `text` into spans. Text before the first anchor is dropped.
    ///
    /// Returns an empty vector when no anchor is found.
    pub fn segment<'a>(&self, text: &'a str) -> Vec<RawSpan<'a>> {
        let starts: Vec<usize> = self.anchor.find_iter(text).map(|m| m.start()).collect();

        if let Some(&first) = starts.first() {
            debug!("Found {} anchors, skipping {} header bytes", starts.len(), first);
        } else {
            debug!("No entity anchors in {} bytes of text", text.len());
        }

        starts
            .iter()
            .enumerate()
            .map(|(index, &start)| {
                let end = starts.get(index + 1).copied().unwrap_or(text.len());
                RawSpan {
                    index,
                    offset: start,
                    text: &text[start..end],
                }
            })
            .collect()
    }
}

impl Default for Segmenter {
    fn default() -> Self {
        Self {
            anchor: DEFAULT_ANCHOR.clone(),
        }
    }
}

/// Build the anchor regex for a keyword set.
///
/// Keywords ending in a word character must end on a word boundary;
/// abbreviations such as "Sch." end at their final period.
fn anchor_pattern<S: AsRef<str>>(keywords: &[S]) -> String {
    let alternatives: Vec<String> = keywords
        .iter()
        .map(|k| k.as_ref().trim())
        .filter(|k| !k.is_empty())
        .map(|k| {
            let escaped = regex::escape(k);
            if k.ends_with(|c: char| c.is_alphanumeric() || c == '_') {
                format!(r"{}\b", escaped)
            } else {
                escaped
            }
        })
        .collect();

    format!(r"\b[A-Z][a-zA-Z\s,&.'-]+(?:{})", alternatives.join("|"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts<'a>(spans: &[RawSpan<'a>]) -> Vec<&'a str> {
        spans.iter().map(|s| s.text).collect()
    }

    #[test]
    fn test_two_entities() {
        let text = "Alpha Boys High School Location: Kasarani Phone: 0712345678 \
                    Beta Girls Academy Phone: 712-345-678";
        let spans = Segmenter::default().segment(text);
        assert_eq!(
            texts(&spans),
            vec![
                "Alpha Boys High School Location: Kasarani Phone: 0712345678 ",
                "Beta Girls Academy Phone: 712-345-678",
            ]
        );
        assert_eq!(spans[1].index, 1);
        assert_eq!(&text[spans[1].offset..], spans[1].text);
    }

    #[test]
    fn test_header_noise_is_dropped() {
        let text = "PRIVATE SECONDARY 2019 page 1 Upper Hill School County: Nairobi";
        let spans = Segmenter::default().segment(text);
        assert_eq!(spans.len(), 1);
        assert!(spans[0].text.starts_with("Upper Hill School"));
    }

    #[test]
    fn test_no_anchor_is_empty() {
        assert!(Segmenter::default().segment("Location: Nairobi Phone: 0712345678").is_empty());
        assert!(Segmenter::default().segment("").is_empty());
    }

    #[test]
    fn test_anchor_inside_field_value_splits() {
        // Known over-segmentation: the school in the address opens its own span.
        let text = "Hill Crest Academy Address: Next To Moi Forces High School Phone: 0202345678";
        let spans = Segmenter::default().segment(text);
        assert_eq!(spans.len(), 2);
        assert_eq!(spans[1].text, "Next To Moi Forces High School Phone: 0202345678");
    }

    #[test]
    fn test_abbreviated_keyword() {
        let text = "St. Mary's Sec. Sch. Location: Langata";
        let anchors = Segmenter::default().anchors(text);
        assert_eq!(anchors, vec![0..20]);
    }

    #[test]
    fn test_keyword_needs_word_boundary() {
        // "Highway" must not end an anchor at "High".
        let text = "Thika Highway Location: Ruaraka";
        assert!(Segmenter::default().anchors(text).is_empty());
    }

    #[test]
    fn test_custom_keywords() {
        let segmenter = Segmenter::new(&["College"]).unwrap();
        let spans = segmenter.segment("Page 3 Strathmore College Phone: 0712345678");
        assert_eq!(texts(&spans), vec!["Strathmore College Phone: 0712345678"]);
    }

    #[test]
    fn test_empty_keywords_rejected() {
        let empty: [&str; 0] = [];
        assert!(matches!(Segmenter::new(&empty), Err(DirlistError::Config(_))));
        assert!(matches!(Segmenter::new(&[" "]), Err(DirlistError::Config(_))));
    }
}
