//! Rule-based extraction strategies for insurance policy text.

pub mod all_amounts;
pub mod amounts;
pub mod category;
pub mod confidence;
pub mod context;
pub mod field_patterns;
pub mod patterns;

use std::collections::HashMap;

pub use all_amounts::AllAmountsScanner;
pub use amounts::{detect_currency, parse_amount, CURRENCY_MARKERS};
pub use category::{categorize, CATEGORY_RULES};
pub use confidence::score;
pub use context::ContextScanner;
pub use field_patterns::PatternMatcher;
pub use patterns::*;

use crate::models::field::{ExtractionMethod, FinancialField};

use super::PolicyDocument;

/// Values closer than this on the same line count as the same amount.
pub const DEDUP_TOLERANCE: f64 = 0.01;

/// Trait for extraction strategies.
pub trait FieldStrategy {
    /// Tag stamped on every field this strategy produces.
    fn method(&self) -> ExtractionMethod;

    /// Extract fields from the document.
    ///
    /// Every emitted field is recorded in `seen`; strategies that deduplicate
    /// skip candidates already present there.
    fn extract(&self, document: &PolicyDocument, seen: &mut SeenAmounts) -> Vec<FinancialField>;
}

/// Amounts already extracted in a run, indexed by line.
#[derive(Debug, Clone, Default)]
pub struct SeenAmounts {
    by_line: HashMap<Option<usize>, Vec<f64>>,
}

impl SeenAmounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an amount within [`DEDUP_TOLERANCE`] is recorded on this line.
    pub fn contains(&self, line_number: Option<usize>, value: f64) -> bool {
        self.by_line
            .get(&line_number)
            .is_some_and(|values| values.iter().any(|v| (v - value).abs() < DEDUP_TOLERANCE))
    }

    pub fn insert(&mut self, line_number: Option<usize>, value: f64) {
        self.by_line.entry(line_number).or_default().push(value);
    }

    pub fn record(&mut self, field: &FinancialField) {
        self.insert(field.line_number, field.value);
    }

    pub fn len(&self) -> usize {
        self.by_line.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seen_amounts_tolerance() {
        let mut seen = SeenAmounts::new();
        seen.insert(Some(3), 1500.0);

        assert!(seen.contains(Some(3), 1500.0));
        assert!(seen.contains(Some(3), 1500.005));
        assert!(!seen.contains(Some(3), 1500.02));
        assert!(!seen.contains(Some(4), 1500.0));
        assert!(!seen.contains(None, 1500.0));
        assert_eq!(seen.len(), 1);
    }
}
