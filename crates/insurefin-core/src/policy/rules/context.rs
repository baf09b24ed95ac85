//! Keyword-triggered amount detection, line by line.

use tracing::trace;

use crate::models::field::{ExtractionMethod, FinancialField};
use crate::policy::PolicyDocument;

use super::amounts::{detect_currency, parse_amount};
use super::category::categorize;
use super::confidence::score;
use super::patterns::{CONTEXT_AMOUNT, CONTEXT_KEYWORDS};
use super::{FieldStrategy, SeenAmounts};

/// Medium-precision strategy for amounts on lines that mention a financial
/// keyword but match no labelled pattern.
pub struct ContextScanner {
    penalty: f64,
}

impl ContextScanner {
    pub fn new() -> Self {
        Self { penalty: 0.8 }
    }

    /// Set the multiplier applied to every score.
    pub fn with_penalty(mut self, penalty: f64) -> Self {
        self.penalty = penalty;
        self
    }
}

impl Default for ContextScanner {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStrategy for ContextScanner {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::ContextAware
    }

    fn extract(&self, document: &PolicyDocument, seen: &mut SeenAmounts) -> Vec<FinancialField> {
        let mut results = Vec::new();

        for (line_number, line) in document.lines() {
            let line_lower = line.to_lowercase();
            let context = line.trim();

            for keyword in CONTEXT_KEYWORDS.iter().filter(|k| line_lower.contains(*k)) {
                for caps in CONTEXT_AMOUNT.captures_iter(line) {
                    let Some(value) = parse_amount(&caps[1]).filter(|v| *v > 0.0) else {
                        continue;
                    };

                    if seen.contains(Some(line_number), value) {
                        trace!("Line {}: {} already extracted", line_number, value);
                        continue;
                    }

                    let field_name = format!("{}_line_{}", keyword, line_number);
                    let field = FinancialField {
                        value,
                        currency: detect_currency(context),
                        category: categorize(keyword),
                        context: context.to_string(),
                        confidence: score(&field_name, value, context) * self.penalty,
                        line_number: Some(line_number),
                        extraction_method: self.method(),
                        field_name,
                    };

                    seen.record(&field);
                    results.push(field);
                }
            }
        }

        results
    }
}
