//! Process command - extract financial fields from a single policy file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use tracing::{debug, info};

use insurefin_core::InsuranceParser;

use super::config::load_config;
use crate::output::{render, OutputFormat};

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input policy text file
    #[arg(required = true)]
    input: PathBuf,

    /// Output format: json, csv or text (unknown formats fall back to json)
    format: Option<String>,

    /// Output file (default: <input>_parsed.<ext> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Also report every currency-marked amount
    #[arg(long)]
    all_amounts: bool,
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;

    let text = fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read input file: {}", args.input.display()))?;

    let format = OutputFormat::parse_or_json(
        args.format.as_deref().unwrap_or(&config.output.format),
    );
    let include_all_amounts = args.all_amounts || config.extraction.include_all_amounts;

    info!("Processing file: {}", args.input.display());

    let result = InsuranceParser::new(text)
        .with_config(config.extraction.clone())
        .parse(include_all_amounts);

    let output = render(&result, format, &config)?;
    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&args.input, format));

    fs::write(&output_path, output)
        .with_context(|| format!("Failed to write output file: {}", output_path.display()))?;

    println!("{} Parsing completed successfully", style("✓").green());
    println!(
        "{} Results saved to: {}",
        style("✓").green(),
        output_path.display()
    );

    println!();
    println!("Summary:");
    println!(
        "  Total fields extracted: {}",
        result.metadata.total_fields_extracted
    );
    println!("  Pattern matches: {}", result.metadata.pattern_matches);
    println!("  Context matches: {}", result.metadata.context_matches);
    if include_all_amounts {
        println!("  All-amounts matches: {}", result.metadata.all_amounts_matches);
    }
    println!(
        "  High confidence fields: {}",
        result.summary.high_confidence_fields
    );

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}

/// `<input without extension>_parsed.<ext>`, in the input's directory.
pub fn default_output_path(input: &Path, format: OutputFormat) -> PathBuf {
    let stem = input
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("policy");

    input.with_file_name(format!("{}_parsed.{}", stem, format.extension()))
}
