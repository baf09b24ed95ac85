//! Exhaustive scan for currency-marked amounts.

use tracing::trace;

use crate::models::field::{ExtractionMethod, FieldCategory, FinancialField};
use crate::policy::PolicyDocument;

use super::amounts::{detect_currency, parse_amount};
use super::patterns::MARKED_AMOUNT;
use super::{FieldStrategy, SeenAmounts};

/// Lowest-precision strategy: every amount carrying a currency marker.
pub struct AllAmountsScanner {
    confidence: f64,
}

impl AllAmountsScanner {
    pub fn new() -> Self {
        Self { confidence: 0.5 }
    }

    /// Set the flat confidence given to every match.
    pub fn with_confidence(mut self, confidence: f64) -> Self {
        self.confidence = confidence;
        self
    }
}

impl Default for AllAmountsScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStrategy for AllAmountsScanner {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::AllAmounts
    }

    fn extract(&self, document: &PolicyDocument, seen: &mut SeenAmounts) -> Vec<FinancialField> {
        let mut results = Vec::new();

        for (line_number, line) in document.lines() {
            for caps in MARKED_AMOUNT.captures_iter(line) {
                let Some(value) = parse_amount(&caps[1]).filter(|v| *v > 0.0) else {
                    continue;
                };

                if seen.contains(Some(line_number), value) {
                    trace!("Line {}: {} already extracted", line_number, value);
                    continue;
                }

                let field = FinancialField {
                    field_name: format!("amount_line_{}", line_number),
                    value,
                    currency: detect_currency(&caps[0]),
                    category: FieldCategory::Benefit,
                    context: line.trim().to_string(),
                    confidence: self.confidence,
                    line_number: Some(line_number),
                    extraction_method: self.method(),
                };

                seen.record(&field);
                results.push(field);
            }
        }

        results
    }
}
