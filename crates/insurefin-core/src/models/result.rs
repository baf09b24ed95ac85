//! Parse result structure handed to exporters.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::field::{FieldCategory, FinancialField};

/// Version tag written into every result.
pub const PARSER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Complete output of one parse call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Counts and provenance of the run.
    pub metadata: ExtractionMetadata,

    /// Fields sorted by confidence, highest first.
    pub fields: Vec<FinancialField>,

    /// Aggregate statistics over `fields`.
    pub summary: ExtractionSummary,
}

impl ExtractionResult {
    /// First field with the given name.
    pub fn field_by_name(&self, name: &str) -> Option<&FinancialField> {
        self.fields.iter().find(|f| f.field_name == name)
    }

    /// All fields of a category, in result order.
    pub fn fields_by_category(&self, category: FieldCategory) -> Vec<&FinancialField> {
        self.fields.iter().filter(|f| f.category == category).collect()
    }
}

/// Metadata about the extraction run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Number of fields in the result.
    pub total_fields_extracted: usize,

    /// Fields produced by the pattern table in the latest round.
    pub pattern_matches: usize,

    /// Fields produced by keyword context scanning in the latest round.
    pub context_matches: usize,

    /// Fields produced by exhaustive amount scanning in the latest round.
    pub all_amounts_matches: usize,

    /// When the extraction ran.
    pub extraction_date: DateTime<Utc>,

    /// Library version that produced the result.
    pub parser_version: String,
}

/// Summary statistics over extracted fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionSummary {
    /// Field count per category tag.
    pub by_category: BTreeMap<String, usize>,

    /// Field count per currency code.
    pub by_currency: BTreeMap<String, usize>,

    /// Fields at or above the high-confidence threshold.
    pub high_confidence_fields: usize,

    /// Sum of confident premium values.
    pub total_premium_amount: f64,

    /// Sum of confident coverage values.
    pub total_coverage_amount: f64,

    /// Sum of confident claim values.
    pub total_claims_amount: f64,
}

impl ExtractionSummary {
    /// Compute summary statistics.
    ///
    /// Totals add raw values regardless of currency.
    pub fn from_fields(
        fields: &[FinancialField],
        high_confidence_threshold: f64,
        summary_confidence_threshold: f64,
    ) -> Self {
        let mut summary = Self::default();

        for field in fields {
            *summary
                .by_category
                .entry(field.category.as_str().to_string())
                .or_insert(0) += 1;
            *summary
                .by_currency
                .entry(field.currency.code().to_string())
                .or_insert(0) += 1;

            if field.confidence >= high_confidence_threshold {
                summary.high_confidence_fields += 1;
            }

            if field.confidence < summary_confidence_threshold {
                continue;
            }
            match field.category {
                FieldCategory::Premium => summary.total_premium_amount += field.value,
                FieldCategory::Coverage => summary.total_coverage_amount += field.value,
                FieldCategory::Claim => summary.total_claims_amount += field.value,
                _ => {}
            }
        }

        summary
    }
}
