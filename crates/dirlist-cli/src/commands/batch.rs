//! Batch processing command for multiple page-text files.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use serde::Serialize;
use tracing::{error, warn};

use dirlist_core::{DirectoryParser, ExtractionResult, PageText};

use super::{OutputFormat, format_records, load_config, write_output};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Also write a summary.json
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Overwrite existing output files
    #[arg(long)]
    force: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One line of summary.json.
#[derive(Serialize)]
struct SummaryEntry<'a> {
    filename: &'a str,
    status: &'static str,
    records: usize,
    warnings: usize,
    processing_time_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<&'a str>,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            ext.eq_ignore_ascii_case("txt")
        })
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        check_output_names(&files, args.format, args.summary)?;
        tokio::fs::create_dir_all(output_dir).await?;
    }

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(args.jobs.max(1))
        .build_global()
    {
        warn!("Worker pool already initialized: {}", e);
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let parser = DirectoryParser::from_config(&config)?;
    let page_break = config.input.page_break.clone();
    let pb = overall_pb.clone();
    let continue_on_error = args.continue_on_error;

    // Without --continue-on-error the collect short-circuits on the first failure.
    let outcome = tokio::task::spawn_blocking(move || {
        files
            .par_iter()
            .map(|path| {
                let file_start = Instant::now();
                let outcome = process_single_file(path, &parser, &page_break);
                pb.inc(1);

                let processing_time_ms = file_start.elapsed().as_millis() as u64;
                match outcome {
                    Ok(extraction) => Ok(ProcessResult {
                        path: path.clone(),
                        extraction: Some(extraction),
                        error: None,
                        processing_time_ms,
                    }),
                    Err(e) if !continue_on_error => Err(anyhow::anyhow!(
                        "Failed to process {}: {}",
                        path.display(),
                        e
                    )),
                    Err(e) => Ok(ProcessResult {
                        path: path.clone(),
                        extraction: None,
                        error: Some(e.to_string()),
                        processing_time_ms,
                    }),
                }
            })
            .collect::<anyhow::Result<Vec<ProcessResult>>>()
    })
    .await?;

    let results = match outcome {
        Ok(results) => results,
        Err(e) => {
            overall_pb.abandon();
            error!("{}", e);
            return Err(e.context("Processing failed"));
        }
    };

    overall_pb.finish_with_message("Complete");

    for result in &results {
        if let Some(error_msg) = &result.error {
            warn!("Failed to process {}: {}", result.path.display(), error_msg);
        }
    }

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    if let Some(output_dir) = &args.output_dir {
        for result in &successful {
            if let Some(extraction) = &result.extraction {
                let output_path = output_dir.join(output_file_name(&result.path, args.format));

                let content = format_records(extraction, args.format)?;
                write_output(&output_path, &content, args.force).await?;
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.json"))
            .unwrap_or_else(|| PathBuf::from("summary.json"));

        write_summary(&summary_path, &results, args.force).await?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let total_records: usize = successful
        .iter()
        .filter_map(|r| r.extraction.as_ref())
        .map(|e| e.records.len())
        .sum();

    println!();
    println!(
        "{} Processed {} files ({} records) in {:?}",
        style("✓").green(),
        results.len(),
        total_records,
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for result in &failed {
            println!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

fn output_file_name(path: &Path, format: OutputFormat) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("listing");
    format!("{}.{}", stem, format.extension())
}

/// Fail before any work is done if two inputs would write the same output file.
fn check_output_names(files: &[PathBuf], format: OutputFormat, summary: bool) -> anyhow::Result<()> {
    let mut seen: HashMap<String, &Path> = HashMap::new();
    for path in files {
        let name = output_file_name(path, format);
        if summary && name == "summary.json" {
            anyhow::bail!("{} would overwrite the batch summary.json", path.display());
        }
        if let Some(first) = seen.insert(name.clone(), path) {
            anyhow::bail!(
                "{} and {} would both be written to {}",
                first.display(),
                path.display(),
                name
            );
        }
    }
    Ok(())
}

fn process_single_file(
    path: &Path,
    parser: &DirectoryParser,
    page_break: &str,
) -> anyhow::Result<ExtractionResult> {
    let data = std::fs::read(path)?;
    let pages = PageText::from_bytes(data, page_break)?;
    Ok(parser.parse_pages(&pages))
}

async fn write_summary(path: &Path, results: &[ProcessResult], force: bool) -> anyhow::Result<()> {
    let entries: Vec<SummaryEntry> = results
        .iter()
        .map(|result| {
            let filename = result
                .path
                .file_name()
                .and_then(|s| s.to_str())
                .unwrap_or("");

            match &result.extraction {
                Some(extraction) => SummaryEntry {
                    filename,
                    status: if extraction.is_empty() { "empty" } else { "success" },
                    records: extraction.records.len(),
                    warnings: extraction.warnings.len(),
                    processing_time_ms: result.processing_time_ms,
                    error: None,
                },
                None => SummaryEntry {
                    filename,
                    status: "error",
                    records: 0,
                    warnings: 0,
                    processing_time_ms: result.processing_time_ms,
                    error: result.error.as_deref(),
                },
            }
        })
        .collect();

    write_output(path, &serde_json::to_string_pretty(&entries)?, force).await
}
