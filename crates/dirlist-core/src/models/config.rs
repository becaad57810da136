//! Configuration structures for the extraction pipeline.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Main configuration for the dirlist pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DirlistConfig {
    /// Page text input configuration.
    pub input: InputConfig,

    /// Entity segmentation configuration.
    pub segmentation: SegmentationConfig,

    /// Field extraction configuration.
    pub extraction: ExtractionConfig,
}

/// How page text is read and joined before normalization.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Separator inserted between consecutive pages.
    pub page_separator: String,

    /// Marker splitting a single text file into pages.
    pub page_break: String,

    /// Rejoin words hyphenated across a line break.
    pub dehyphenate: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            page_separator: "\n".to_string(),
            page_break: "\u{c}".to_string(),
            dehyphenate: true,
        }
    }
}

/// Entity-start anchor configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentationConfig {
    /// Institutional-type keywords that end an entity-start anchor.
    pub anchor_keywords: Vec<String>,
}

impl Default for SegmentationConfig {
    fn default() -> Self {
        Self {
            anchor_keywords: ["School", "Academy", "Sch.", "High", "Centre", "Foundation"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
        }
    }
}

/// Field extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Extract spans on a worker pool.
    pub parallel: bool,

    /// Minimum number of spans before the worker pool is used.
    pub parallel_threshold: usize,

    /// Country calling code rewritten to a trunk zero in phone numbers.
    pub country_code: String,

    /// Emit a warning for spans without any labeled field.
    pub flag_unlabeled: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            parallel_threshold: 64,
            country_code: "254".to_string(),
            flag_unlabeled: true,
        }
    }
}

impl DirlistConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
