//! Exporters for extraction results.

use std::str::FromStr;

use tracing::warn;

use insurefin_core::models::config::InsurefinConfig;
use insurefin_core::{ExtractionResult, FieldCategory};

/// Header row of the CSV export.
pub const CSV_HEADER: [&str; 8] = [
    "Field Name",
    "Value",
    "Currency",
    "Category",
    "Confidence",
    "Line Number",
    "Context",
    "Extraction Method",
];

/// Fields listed per section of the text report.
const REPORT_SECTION_LIMIT: usize = 5;

/// High-confidence fields listed in the text report.
const REPORT_HIGH_CONFIDENCE_LIMIT: usize = 15;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// CSV output
    Csv,
    /// Plain text report
    Text,
}

impl OutputFormat {
    /// Parse a format name, falling back to JSON for anything unknown.
    pub fn parse_or_json(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            warn!("Unknown output format '{}', using json", name);
            OutputFormat::Json
        })
    }

    /// File extension for files written in this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
            OutputFormat::Text => "txt",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "json" => Ok(OutputFormat::Json),
            "csv" => Ok(OutputFormat::Csv),
            "text" | "txt" => Ok(OutputFormat::Text),
            other => Err(format!("unsupported output format: {}", other)),
        }
    }
}

/// Render a result in the requested format.
pub fn render(
    result: &ExtractionResult,
    format: OutputFormat,
    config: &InsurefinConfig,
) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => format_json(result, config.output.pretty),
        OutputFormat::Csv => format_csv(result),
        OutputFormat::Text => Ok(format_text(result, config)),
    }
}

pub fn format_json(result: &ExtractionResult, pretty: bool) -> anyhow::Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    Ok(json)
}

pub fn format_csv(result: &ExtractionResult) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(CSV_HEADER)?;

    for field in &result.fields {
        wtr.write_record([
            field.field_name.as_str(),
            &field.value.to_string(),
            field.currency.code(),
            field.category.as_str(),
            &field.confidence.to_string(),
            &field.line_number.map(|n| n.to_string()).unwrap_or_default(),
            &field.context,
            field.extraction_method.as_str(),
        ])?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

pub fn format_text(result: &ExtractionResult, config: &InsurefinConfig) -> String {
    let high_threshold = config.extraction.high_confidence_threshold;
    let section_threshold = config.extraction.summary_confidence_threshold;
    let rule = "-".repeat(80);
    let metadata = &result.metadata;
    let mut output = String::new();

    output.push_str("Insurance Policy Extraction Report\n");
    output.push_str(&format!("{}\n", "=".repeat(80)));
    output.push_str(&format!("Total fields extracted: {}\n", metadata.total_fields_extracted));
    output.push_str(&format!("Pattern-based matches:  {}\n", metadata.pattern_matches));
    output.push_str(&format!("Context-aware matches:  {}\n", metadata.context_matches));
    if metadata.all_amounts_matches > 0 {
        output.push_str(&format!("All-amounts matches:    {}\n", metadata.all_amounts_matches));
    }
    output.push('\n');

    let high: Vec<_> = result
        .fields
        .iter()
        .filter(|f| f.confidence >= high_threshold)
        .collect();

    output.push_str(&format!(
        "High-Confidence Fields (>= {:.0}% confidence):\n",
        high_threshold * 100.0
    ));
    output.push_str(&format!("{}\n", rule));
    for field in high.iter().take(REPORT_HIGH_CONFIDENCE_LIMIT) {
        output.push_str(&format!(
            "  • {:30}: {} {:>15}\n",
            field.field_name,
            field.currency,
            format_amount(field.value)
        ));
        output.push_str(&format!(
            "    Category: {:15} | Confidence: {:.0}%\n",
            field.category.as_str(),
            field.confidence * 100.0
        ));
    }
    if high.len() > REPORT_HIGH_CONFIDENCE_LIMIT {
        output.push_str(&format!(
            "  ... and {} more high-confidence fields\n",
            high.len() - REPORT_HIGH_CONFIDENCE_LIMIT
        ));
    }
    output.push('\n');

    output.push_str("Fields by Category:\n");
    output.push_str(&format!("{}\n", rule));
    for (category, count) in &result.summary.by_category {
        output.push_str(&format!("  • {:20}: {:3} fields\n", category.to_uppercase(), count));
    }
    output.push('\n');

    output.push_str("Key Financial Summaries:\n");
    output.push_str(&format!("{}\n", rule));
    for (category, title) in [
        (FieldCategory::Premium, "PREMIUM INFORMATION"),
        (FieldCategory::Coverage, "COVERAGE INFORMATION"),
        (FieldCategory::Claim, "CLAIM INFORMATION"),
    ] {
        let fields = result.fields_by_category(category);
        if fields.is_empty() {
            continue;
        }

        output.push_str(&format!("  {}:\n", title));
        for field in fields
            .iter()
            .take(REPORT_SECTION_LIMIT)
            .filter(|f| f.confidence >= section_threshold)
        {
            output.push_str(&format!(
                "    • {:25}: {}{:>12}\n",
                field.field_name,
                field.currency.symbol(),
                format_amount(field.value)
            ));
        }
        output.push('\n');
    }

    output
}

/// Format an amount with two decimals and comma thousands separators.
pub fn format_amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, fraction) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, fraction)
}
