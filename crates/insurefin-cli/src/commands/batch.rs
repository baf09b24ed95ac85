//! Batch processing command for multiple policy files.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use tracing::{debug, error, warn};

use insurefin_core::models::config::InsurefinConfig;
use insurefin_core::{ExtractionResult, InsuranceParser};

use super::config::load_config;
use super::process::default_output_path;
use crate::output::{render, OutputFormat};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Glob pattern matching policy text files
    #[arg(required = true)]
    input: String,

    /// Output directory (default: next to each input)
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format for each file: json, csv or text (default: config output.format)
    #[arg(short, long)]
    format: Option<String>,

    /// Also generate batch_summary.csv
    #[arg(long)]
    summary: bool,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,

    /// Also report every currency-marked amount
    #[arg(long)]
    all_amounts: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    result: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

/// One row of batch_summary.csv.
#[derive(Serialize)]
struct SummaryRow<'a> {
    filename: &'a str,
    status: &'static str,
    total_fields: Option<usize>,
    pattern_matches: Option<usize>,
    context_matches: Option<usize>,
    all_amounts_matches: Option<usize>,
    high_confidence_fields: Option<usize>,
    total_premium_amount: Option<f64>,
    total_coverage_amount: Option<f64>,
    total_claims_amount: Option<f64>,
    processing_time_ms: u64,
    error: &'a str,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let format = OutputFormat::parse_or_json(
        args.format.as_deref().unwrap_or(&config.output.format),
    );
    let include_all_amounts = args.all_amounts || config.extraction.include_all_amounts;

    // Earlier outputs share the .txt extension with inputs
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| is_policy_text(p))
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
        fs::create_dir_all(output_dir)?;
    }

    let pb = ProgressBar::new(files.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let mut results = Vec::with_capacity(files.len());

    for path in files {
        let file_start = Instant::now();
        let outcome = process_single_file(&path, &config, include_all_amounts);
        let processing_time_ms = file_start.elapsed().as_millis() as u64;

        match outcome {
            Ok(result) => results.push(ProcessResult {
                path,
                result: Some(result),
                error: None,
                processing_time_ms,
            }),
            Err(e) => {
                let error_msg = format!("{:#}", e);
                if args.continue_on_error {
                    warn!("Failed to process {}: {}", path.display(), error_msg);
                    results.push(ProcessResult {
                        path,
                        result: None,
                        error: Some(error_msg),
                        processing_time_ms,
                    });
                } else {
                    pb.abandon();
                    error!("Failed to process {}: {}", path.display(), error_msg);
                    anyhow::bail!("Processing failed: {}", error_msg);
                }
            }
        }

        pb.inc(1);
    }

    pb.finish_with_message("Complete");

    let successful: Vec<_> = results.iter().filter(|r| r.result.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    for entry in &successful {
        let Some(result) = &entry.result else {
            continue;
        };

        let output_path = match &args.output_dir {
            Some(dir) => {
                let file_name = default_output_path(&entry.path, format);
                dir.join(file_name.file_name().unwrap_or_default())
            }
            None => default_output_path(&entry.path, format),
        };

        fs::write(&output_path, render(result, format, &config)?)
            .with_context(|| format!("Failed to write {}", output_path.display()))?;
        debug!("Wrote output to {}", output_path.display());
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("batch_summary.csv"))
            .unwrap_or_else(|| PathBuf::from("batch_summary.csv"));

        write_summary(&summary_path, &results)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
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
        for entry in &failed {
            println!(
                "  - {}: {}",
                entry.path.display(),
                entry.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// A `.txt` file that is not itself a `_parsed` output.
fn is_policy_text(path: &Path) -> bool {
    let is_txt = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("txt"));
    let is_output = path
        .file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|s| s.ends_with("_parsed"));

    is_txt && !is_output
}

fn process_single_file(
    path: &Path,
    config: &InsurefinConfig,
    include_all_amounts: bool,
) -> anyhow::Result<ExtractionResult> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    Ok(InsuranceParser::new(text)
        .with_config(config.extraction.clone())
        .parse(include_all_amounts))
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    for entry in results {
        let filename = entry
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("");
        let result = entry.result.as_ref();

        wtr.serialize(SummaryRow {
            filename,
            status: if result.is_some() { "success" } else { "error" },
            total_fields: result.map(|r| r.metadata.total_fields_extracted),
            pattern_matches: result.map(|r| r.metadata.pattern_matches),
            context_matches: result.map(|r| r.metadata.context_matches),
            all_amounts_matches: result.map(|r| r.metadata.all_amounts_matches),
            high_confidence_fields: result.map(|r| r.summary.high_confidence_fields),
            total_premium_amount: result.map(|r| r.summary.total_premium_amount),
            total_coverage_amount: result.map(|r| r.summary.total_coverage_amount),
            total_claims_amount: result.map(|r| r.summary.total_claims_amount),
            processing_time_ms: entry.processing_time_ms,
            error: entry.error.as_deref().unwrap_or(""),
        })?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_text_filter() {
        assert!(is_policy_text(Path::new("a/policy.txt")));
        assert!(is_policy_text(Path::new("POLICY.TXT")));
        assert!(!is_policy_text(Path::new("policy_parsed.txt")));
        assert!(!is_policy_text(Path::new("policy.pdf")));
        assert!(!is_policy_text(Path::new("policy")));
    }
}
