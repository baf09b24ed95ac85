//! Multi-strategy policy parser.

use std::time::Instant;

use chrono::Utc;
use tracing::{debug, info};

use crate::models::config::ExtractionConfig;
use crate::models::field::{FieldCategory, FinancialField};
use crate::models::result::{ExtractionMetadata, ExtractionResult, ExtractionSummary, PARSER_VERSION};

use super::rules::{AllAmountsScanner, ContextScanner, FieldStrategy, PatternMatcher, SeenAmounts};
use super::PolicyDocument;

/// Parser for one policy document.
///
/// Runs pattern matching, then keyword context scanning, then (optionally)
/// exhaustive amount scanning, sharing one dedup index across the three.
pub struct InsuranceParser {
    document: PolicyDocument,
    config: ExtractionConfig,
    /// Fields from every round since the last reset, sorted by confidence.
    parsed_fields: Vec<FinancialField>,
}

/// Per-strategy output of a single round.
struct RoundOutput {
    pattern: Vec<FinancialField>,
    context: Vec<FinancialField>,
    all_amounts: Vec<FinancialField>,
}

impl InsuranceParser {
    /// Create a parser with default settings.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            document: PolicyDocument::new(text),
            config: ExtractionConfig::default(),
            parsed_fields: Vec::new(),
        }
    }

    /// Set extraction configuration.
    pub fn with_config(mut self, config: ExtractionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn document(&self) -> &PolicyDocument {
        &self.document
    }

    pub fn config(&self) -> &ExtractionConfig {
        &self.config
    }

    /// Parse the document, discarding fields from earlier calls.
    ///
    /// Repeated calls return the same fields.
    pub fn parse(&mut self, include_all_amounts: bool) -> ExtractionResult {
        self.reset();
        self.parse_accumulate(include_all_amounts)
    }

    /// Parse the document and append the fields to those already held.
    ///
    /// Each round deduplicates only against itself, so a second round on the
    /// same document doubles the accumulated field count. Summary statistics
    /// cover every accumulated field; strategy counts cover this round.
    pub fn parse_accumulate(&mut self, include_all_amounts: bool) -> ExtractionResult {
        let start = Instant::now();

        info!(
            "Parsing policy from {} characters of text",
            self.document.text().len()
        );

        let round = self.run_strategies(include_all_amounts);
        let pattern_matches = round.pattern.len();
        let context_matches = round.context.len();
        let all_amounts_matches = round.all_amounts.len();

        self.parsed_fields.extend(round.pattern);
        self.parsed_fields.extend(round.context);
        self.parsed_fields.extend(round.all_amounts);

        // Stable: ties keep strategy order.
        self.parsed_fields
            .sort_by(|a, b| b.confidence.total_cmp(&a.confidence));

        let summary = ExtractionSummary::from_fields(
            &self.parsed_fields,
            self.config.high_confidence_threshold,
            self.config.summary_confidence_threshold,
        );

        debug!(
            "Extracted {} fields ({} pattern, {} context, {} all-amounts) in {:?}",
            self.parsed_fields.len(),
            pattern_matches,
            context_matches,
            all_amounts_matches,
            start.elapsed()
        );

        ExtractionResult {
            metadata: ExtractionMetadata {
                total_fields_extracted: self.parsed_fields.len(),
                pattern_matches,
                context_matches,
                all_amounts_matches,
                extraction_date: Utc::now(),
                parser_version: PARSER_VERSION.to_string(),
            },
            fields: self.parsed_fields.clone(),
            summary,
        }
    }

    /// Drop all accumulated fields.
    pub fn reset(&mut self) {
        self.parsed_fields.clear();
    }

    /// Accumulated fields, highest confidence first.
    pub fn fields(&self) -> &[FinancialField] {
        &self.parsed_fields
    }

    /// First accumulated field with the given name.
    pub fn field_by_name(&self, name: &str) -> Option<&FinancialField> {
        self.parsed_fields.iter().find(|f| f.field_name == name)
    }

    /// All accumulated fields of a category.
    pub fn fields_by_category(&self, category: FieldCategory) -> Vec<&FinancialField> {
        self.parsed_fields
            .iter()
            .filter(|f| f.category == category)
            .collect()
    }

    fn run_strategies(&self, include_all_amounts: bool) -> RoundOutput {
        let mut seen = SeenAmounts::new();

        let pattern = PatternMatcher::new()
            .with_context_radius(self.config.context_radius)
            .extract(&self.document, &mut seen);
        debug!("Pattern matching found {} fields", pattern.len());

        let context = ContextScanner::new()
            .with_penalty(self.config.context_penalty)
            .extract(&self.document, &mut seen);
        debug!("Context scanning found {} fields", context.len());

        let all_amounts = if include_all_amounts {
            let fields = AllAmountsScanner::new()
                .with_confidence(self.config.generic_confidence)
                .extract(&self.document, &mut seen);
            debug!("Exhaustive scanning found {} fields", fields.len());
            fields
        } else {
            Vec::new()
        };

        RoundOutput {
            pattern,
            context,
            all_amounts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::field::{Currency, ExtractionMethod};
    use crate::policy::rules::categorize;
    use pretty_assertions::assert_eq;

    const POLICY: &str = "HEALTH SHIELD POLICY SCHEDULE
Policy No: HS-2024-88213
Annual Premium: Rs. 24,000.00
Sum Insured: Rs. 5,00,000
Deductible Amount: Rs. 10,000
Service charge of Rs. 200 applies
Claim Amount Approved: Rs. 45,000
Refund of $ 35 processed";

    #[test]
    fn test_parse_sample_policy() {
        let result = InsuranceParser::new(POLICY).parse(false);

        assert_eq!(
            result.metadata.total_fields_extracted,
            result.metadata.pattern_matches + result.metadata.context_matches
        );
        assert_eq!(result.metadata.all_amounts_matches, 0);

        let premium = result.field_by_name("annual_premium").unwrap();
        assert_eq!(premium.value, 24000.0);
        assert_eq!(premium.line_number, Some(3));

        let charge = result.field_by_name("charge_line_6").unwrap();
        assert_eq!(charge.category, FieldCategory::Fee);
        assert_eq!(charge.extraction_method, ExtractionMethod::ContextAware);

        assert!(result.field_by_name("amount_line_8").is_none());
    }

    #[test]
    fn test_fields_sorted_by_confidence() {
        let result = InsuranceParser::new(POLICY).parse(true);

        for pair in result.fields.windows(2) {
            assert!(pair[0].confidence >= pair[1].confidence);
        }
    }

    #[test]
    fn test_ties_keep_strategy_order() {
        let result = InsuranceParser::new(POLICY).parse(true);

        let rank = |m: ExtractionMethod| match m {
            ExtractionMethod::PatternMatching => 0,
            ExtractionMethod::ContextAware => 1,
            ExtractionMethod::AllAmounts => 2,
        };
        for pair in result.fields.windows(2) {
            if pair[0].confidence == pair[1].confidence {
                assert!(rank(pair[0].extraction_method) <= rank(pair[1].extraction_method));
            }
        }
    }

    #[test]
    fn test_all_amounts_adds_marked_leftovers() {
        let result = InsuranceParser::new(POLICY).parse(true);

        let refund = result.field_by_name("amount_line_8").unwrap();
        assert_eq!(refund.value, 35.0);
        assert_eq!(refund.currency, Currency::Usd);
        assert_eq!(refund.confidence, 0.5);
        assert_eq!(result.metadata.all_amounts_matches, 1);
    }

    #[test]
    fn test_no_cross_strategy_duplicates() {
        let result = InsuranceParser::new(POLICY).parse(true);

        for (i, a) in result.fields.iter().enumerate() {
            for b in &result.fields[i + 1..] {
                if a.extraction_method == b.extraction_method {
                    continue;
                }
                assert!(
                    a.line_number != b.line_number || (a.value - b.value).abs() >= 0.01,
                    "{} and {} collide",
                    a.field_name,
                    b.field_name
                );
            }
        }
    }

    #[test]
    fn test_field_invariants() {
        let result = InsuranceParser::new(POLICY).parse(true);

        for field in &result.fields {
            assert!(field.value >= 0.0);
            assert!((0.0..=1.0).contains(&field.confidence));
            assert_eq!(field.category, categorize(&field.field_name));
        }
    }

    #[test]
    fn test_parse_is_idempotent() {
        let mut parser = InsuranceParser::new(POLICY);
        let first = parser.parse(false);
        let second = parser.parse(false);

        assert_eq!(first.fields, second.fields);
        assert_eq!(parser.fields().len(), first.metadata.total_fields_extracted);
    }

    #[test]
    fn test_accumulate_doubles_fields() {
        let mut parser = InsuranceParser::new(POLICY);
        let first = parser.parse_accumulate(false);
        let second = parser.parse_accumulate(false);

        assert_eq!(
            second.metadata.total_fields_extracted,
            first.metadata.total_fields_extracted * 2
        );
        assert_eq!(second.metadata.pattern_matches, first.metadata.pattern_matches);
        assert_eq!(
            second.summary.by_category["premium"],
            first.summary.by_category["premium"] * 2
        );

        parser.reset();
        assert!(parser.fields().is_empty());
    }

    #[test]
    fn test_empty_document() {
        let result = InsuranceParser::new("").parse(true);

        assert_eq!(result.metadata.total_fields_extracted, 0);
        assert!(result.fields.is_empty());
        assert!(result.summary.by_category.is_empty());
        assert!(result.summary.by_currency.is_empty());
        assert_eq!(result.summary.high_confidence_fields, 0);
        assert_eq!(result.summary.total_premium_amount, 0.0);
    }

    #[test]
    fn test_lookup_helpers() {
        let mut parser = InsuranceParser::new(POLICY);
        parser.parse(false);

        assert!(parser.field_by_name("sum_insured").is_some());
        assert!(parser.field_by_name("missing").is_none());

        let claims = parser.fields_by_category(FieldCategory::Claim);
        assert!(claims.iter().any(|f| f.field_name == "claim_amount_approved"));
        assert!(claims.iter().all(|f| f.category == FieldCategory::Claim));
    }

    #[test]
    fn test_config_thresholds_apply() {
        let config = ExtractionConfig {
            high_confidence_threshold: 0.0,
            ..ExtractionConfig::default()
        };
        let result = InsuranceParser::new(POLICY).with_config(config).parse(false);

        assert_eq!(result.summary.high_confidence_fields, result.fields.len());
    }
}
