//! Extract command - records from a single page-text file.

use std::path::PathBuf;
use std::time::Instant;

use clap::Args;
use console::style;
use serde::Serialize;
use tokio::io::AsyncReadExt;
use tracing::{debug, info};

use dirlist_core::{DirectoryParser, PageText};

use super::{OutputFormat, format_records, load_config, write_output};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input page-text file ("-" reads stdin)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Overwrite the output file if it exists
    #[arg(long)]
    force: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "json")]
    format: OutputFormat,

    /// Print the raw entity spans instead of records
    #[arg(long)]
    spans: bool,

    /// Extract spans on a single thread
    #[arg(long)]
    sequential: bool,

    /// Show extraction warnings and timing
    #[arg(long)]
    show_warnings: bool,
}

/// A raw span as printed by `--spans`.
#[derive(Serialize)]
struct SpanView<'a> {
    index: usize,
    offset: usize,
    text: &'a str,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();
    let config = load_config(config_path)?;

    let data = if args.input.as_os_str() == "-" {
        let mut buf = Vec::new();
        tokio::io::stdin().read_to_end(&mut buf).await?;
        buf
    } else {
        if !args.input.exists() {
            anyhow::bail!("Input file not found: {}", args.input.display());
        }
        info!("Processing file: {}", args.input.display());
        tokio::fs::read(&args.input).await?
    };

    let pages = PageText::from_bytes(data, &config.input.page_break)?;
    let parser = DirectoryParser::from_config(&config)?
        .with_parallel(config.extraction.parallel && !args.sequential);

    let output = if args.spans {
        let normalized = pages.normalized(&config.input);
        let spans: Vec<SpanView> = parser
            .segment(&normalized)
            .iter()
            .map(|s| SpanView {
                index: s.index,
                offset: s.offset,
                text: s.text.trim(),
            })
            .collect();
        format_spans(&spans, args.format)?
    } else {
        let result = parser.parse_pages(&pages);

        if result.is_empty() {
            eprintln!(
                "{} No data extracted. Check that the text is a directory listing.",
                style("!").yellow()
            );
        }

        if args.show_warnings {
            for warning in &result.warnings {
                eprintln!("  - {}", warning);
            }
            eprintln!(
                "{} {} records in {}ms",
                style("ℹ").blue(),
                result.records.len(),
                result.processing_time_ms
            );
        }

        format_records(&result, args.format)?
    };

    if let Some(output_path) = &args.output {
        write_output(output_path, &output, args.force).await?;
        eprintln!(
            "{} Output written to {}",
            style("✓").green(),
            output_path.display()
        );
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

fn format_spans(spans: &[SpanView], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(spans)?),
        OutputFormat::Jsonl => {
            let mut output = String::new();
            for span in spans {
                output.push_str(&serde_json::to_string(span)?);
                output.push('\n');
            }
            Ok(output)
        }
        OutputFormat::Text => Ok(spans
            .iter()
            .map(|s| format!("[{}] @{} {}\n", s.index, s.offset, s.text))
            .collect()),
    }
}
