//! Labelled field extraction from the pattern table.

use regex::Regex;
use tracing::trace;

use crate::models::field::{ExtractionMethod, FinancialField};
use crate::policy::PolicyDocument;

use super::amounts::{detect_currency, parse_amount};
use super::category::categorize;
use super::confidence::score;
use super::patterns::{FieldRule, FIELD_RULES};
use super::{FieldStrategy, SeenAmounts};

/// Highest-precision strategy: one field per table entry at most.
pub struct PatternMatcher {
    context_radius: usize,
}

impl PatternMatcher {
    pub fn new() -> Self {
        Self { context_radius: 50 }
    }

    /// Set the number of characters kept on each side of a match.
    pub fn with_context_radius(mut self, radius: usize) -> Self {
        self.context_radius = radius;
        self
    }

    /// First parseable match of the first pattern that has one.
    fn match_rule(&self, rule: &FieldRule, document: &PolicyDocument) -> Option<FinancialField> {
        rule.patterns
            .iter()
            .find_map(|pattern| self.first_match(rule.name, pattern, document))
    }

    fn first_match(
        &self,
        field_name: &str,
        pattern: &Regex,
        document: &PolicyDocument,
    ) -> Option<FinancialField> {
        pattern.captures_iter(document.text()).find_map(|caps| {
            let span = caps.get(0)?;
            let raw = caps.get(1)?.as_str();
            let Some(value) = parse_amount(raw) else {
                trace!("Skipping unparseable amount {:?} for {}", raw, field_name);
                return None;
            };

            let context = document.context_window(span.start(), span.end(), self.context_radius);

            Some(FinancialField {
                field_name: field_name.to_string(),
                value,
                currency: detect_currency(&context),
                category: categorize(field_name),
                confidence: score(field_name, value, &context),
                context,
                line_number: Some(document.line_number_at(span.start())),
                extraction_method: self.method(),
            })
        })
    }
}

impl Default for PatternMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldStrategy for PatternMatcher {
    fn method(&self) -> ExtractionMethod {
        ExtractionMethod::PatternMatching
    }

    fn extract(&self, document: &PolicyDocument, seen: &mut SeenAmounts) -> Vec<FinancialField> {
        let mut results = Vec::new();

        for rule in FIELD_RULES.iter() {
            if let Some(field) = self.match_rule(rule, document) {
                seen.record(&field);
                results.push(field);
            }
        }

        results
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::{Currency, FieldCategory};
    use pretty_assertions::assert_eq;

    fn extract(text: &str) -> Vec<FinancialField> {
        PatternMatcher::new().extract(&PolicyDocument::new(text), &mut SeenAmounts::new())
    }

    #[test]
    fn test_annual_premium() {
        let fields = extract("Annual Premium: Rs. 12,500.00 for policy XYZ");

        assert_eq!(fields.len(), 1);
        let field = &fields[0];
        assert_eq!(field.field_name, "annual_premium");
        assert_eq!(field.value, 12500.0);
        assert_eq!(field.currency, Currency::Inr);
        assert_eq!(field.category, FieldCategory::Premium);
        assert_eq!(field.line_number, Some(1));
        assert_eq!(field.extraction_method, ExtractionMethod::PatternMatching);
        assert_eq!(field.context, "Annual Premium: Rs. 12,500.00 for policy XYZ");
        assert!(field.confidence >= 0.8);
    }

    #[test]
    fn test_currency_comes_from_context_window() {
        let fields = extract("Deductible: 500 (USD)");

        let field = fields.iter().find(|f| f.field_name == "deductible").unwrap();
        assert_eq!(field.value, 500.0);
        assert_eq!(field.currency, Currency::Usd);
        assert_eq!(field.category, FieldCategory::Deductible);
    }

    #[test]
    fn test_dollar_sign_is_not_a_label_marker() {
        // Only rupee markers may sit between label and number.
        let fields = extract("Deductible Amount: $500");
        assert!(fields.iter().all(|f| f.field_name != "deductible"));
    }

    #[test]
    fn test_first_match_wins_per_field() {
        let text = "Sum Insured: Rs. 5,00,000\nnotes\nSum Insured: Rs. 7,00,000\nCoverage Amount: 9,00,000";
        let fields = extract(text);

        let insured: Vec<_> = fields.iter().filter(|f| f.field_name == "sum_insured").collect();
        assert_eq!(insured.len(), 1);
        assert_eq!(insured[0].value, 500000.0);
        assert_eq!(insured[0].line_number, Some(1));
    }

    #[test]
    fn test_later_pattern_used_when_earlier_misses() {
        let fields = extract("header\nYearly Premium: 9,000");

        let premium = fields.iter().find(|f| f.field_name == "annual_premium").unwrap();
        assert_eq!(premium.value, 9000.0);
        assert_eq!(premium.line_number, Some(2));
    }

    #[test]
    fn test_unparseable_capture_is_skipped() {
        let fields = extract("Co-payment: 1.2.3%\nCo-payment: 10%");

        let copay = fields.iter().find(|f| f.field_name == "copayment_percentage").unwrap();
        assert_eq!(copay.value, 10.0);
        assert_eq!(copay.line_number, Some(2));
    }

    #[test]
    fn test_non_ascii_digits() {
        let fields = extract("Sum Insured: Rs. ५,००,०००\nAnnual Premium: 1२3");

        let insured = fields.iter().find(|f| f.field_name == "sum_insured").unwrap();
        assert_eq!(insured.value, 500000.0);
        assert_eq!(insured.line_number, Some(1));

        let premium = fields.iter().find(|f| f.field_name == "annual_premium").unwrap();
        assert_eq!(premium.value, 123.0);
        assert_eq!(premium.line_number, Some(2));
    }

    #[test]
    fn test_matching_is_case_insensitive() {
        let fields = extract("total amount paid: 18,250.50");

        let paid = fields.iter().find(|f| f.field_name == "total_amount_paid").unwrap();
        assert_eq!(paid.value, 18250.5);
        assert_eq!(paid.category, FieldCategory::Benefit);
    }

    #[test]
    fn test_records_seen_amounts() {
        let mut seen = SeenAmounts::new();
        PatternMatcher::new().extract(&PolicyDocument::new("Ambulance Charges: Rs. 2,000"), &mut seen);
        assert!(seen.contains(Some(1), 2000.0));
    }

    #[test]
    fn test_empty_document() {
        assert!(extract("").is_empty());
    }
}
