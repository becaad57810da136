//! CLI subcommands and the helpers they share.

pub mod batch;
pub mod config;
pub mod extract;

use std::path::{Path, PathBuf};

use dirlist_core::models::config::DirlistConfig;
use dirlist_core::{ExtractionResult, Record};
use tracing::debug;

/// Output format for extracted records.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON array of records
    Json,
    /// One JSON record per line
    Jsonl,
    /// Plain text listing
    Text,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
            OutputFormat::Text => "txt",
        }
    }
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("dirlist")
        .join("config.json")
}

/// Load the explicit config file, else the default one if present, else
/// built-in defaults.
pub fn load_config(config_path: Option<&str>) -> anyhow::Result<DirlistConfig> {
    if let Some(path) = config_path {
        return Ok(DirlistConfig::from_file(Path::new(path))?);
    }

    let default_path = default_config_path();
    if default_path.exists() {
        debug!("Using config from {}", default_path.display());
        Ok(DirlistConfig::from_file(&default_path)?)
    } else {
        Ok(DirlistConfig::default())
    }
}

pub fn format_records(result: &ExtractionResult, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&result.records)?),
        OutputFormat::Jsonl => {
            let mut output = String::new();
            for record in &result.records {
                output.push_str(&serde_json::to_string(record)?);
                output.push('\n');
            }
            Ok(output)
        }
        OutputFormat::Text => Ok(format_text(&result.records)),
    }
}

fn format_text(records: &[Record]) -> String {
    let mut output = String::new();

    for (i, record) in records.iter().enumerate() {
        output.push_str(&format!("{}. {}\n", i + 1, record.name()));
        for (field, _) in record.iter().skip(1) {
            // One line per value; continuation lines leave the label column blank.
            for (j, value) in record.values(field).into_iter().enumerate() {
                let label = if j == 0 { format!("{}:", field) } else { String::new() };
                output.push_str(&format!("   {:<10} {}\n", label, value));
            }
        }
        output.push('\n');
    }

    output
}

/// Write `content` to `path`, refusing to replace an existing file unless
/// `force` is set.
pub async fn write_output(path: &Path, content: &str, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Output file already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }

    tokio::fs::write(path, content).await?;
    debug!("Wrote output to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dirlist_core::Field;

    #[test]
    fn test_text_lists_each_value() {
        let mut record = Record::new();
        record.set(Field::SchoolName, "Alpha Academy");
        record.set(Field::Phone, "0712345678, 0202345678");

        assert_eq!(
            format_text(&[record]),
            "1. Alpha Academy\n   Phone:     0712345678\n              0202345678\n\n"
        );
    }
}
