//! Financial field model for extracted policy amounts.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single financial fact extracted from a policy document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialField {
    /// Field identifier (rule table name or synthesized `<keyword>_line_<n>`).
    pub field_name: String,

    /// Non-negative amount.
    pub value: f64,

    /// Detected currency (default: INR).
    pub currency: Currency,

    /// Semantic category derived from the field name.
    pub category: FieldCategory,

    /// Surrounding text used for scoring and auditing.
    pub context: String,

    /// Heuristic confidence score (0.0 - 1.0).
    pub confidence: f64,

    /// 1-based line of the match start.
    pub line_number: Option<usize>,

    /// Strategy that produced the field.
    pub extraction_method: ExtractionMethod,
}

/// Semantic categories of financial fields in insurance documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldCategory {
    Premium,
    Coverage,
    Deductible,
    Claim,
    Tax,
    Fee,
    /// Fallback category for amounts without a more specific keyword.
    Benefit,
    Limit,
}

impl FieldCategory {
    /// All categories in declaration order.
    pub const ALL: [FieldCategory; 8] = [
        FieldCategory::Premium,
        FieldCategory::Coverage,
        FieldCategory::Deductible,
        FieldCategory::Claim,
        FieldCategory::Tax,
        FieldCategory::Fee,
        FieldCategory::Benefit,
        FieldCategory::Limit,
    ];

    /// Lowercase tag used in exported output.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldCategory::Premium => "premium",
            FieldCategory::Coverage => "coverage",
            FieldCategory::Deductible => "deductible",
            FieldCategory::Claim => "claim",
            FieldCategory::Tax => "tax",
            FieldCategory::Fee => "fee",
            FieldCategory::Benefit => "benefit",
            FieldCategory::Limit => "limit",
        }
    }

    /// Parse a category from its tag (case-insensitive).
    pub fn from_tag(s: &str) -> Option<Self> {
        let s = s.trim().to_lowercase();
        Self::ALL.into_iter().find(|c| c.as_str() == s)
    }
}

impl fmt::Display for FieldCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported currency codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Indian rupee, assumed when no marker is present.
    #[default]
    Inr,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    /// ISO 4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Inr => "INR",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
        }
    }

    /// Display symbol for reports.
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Inr => "₹",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Extraction strategy tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtractionMethod {
    /// Labelled field patterns from the rule table.
    PatternMatching,
    /// Keyword-triggered amounts on the same line.
    ContextAware,
    /// Any currency-marked amount.
    AllAmounts,
}

impl ExtractionMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionMethod::PatternMatching => "pattern_matching",
            ExtractionMethod::ContextAware => "context_aware",
            ExtractionMethod::AllAmounts => "all_amounts",
        }
    }
}

impl fmt::Display for ExtractionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_field_serialization_tags() {
        let field = FinancialField {
            field_name: "annual_premium".to_string(),
            value: 12500.0,
            currency: Currency::Inr,
            category: FieldCategory::Premium,
            context: "Annual Premium: Rs. 12,500.00".to_string(),
            confidence: 1.0,
            line_number: None,
            extraction_method: ExtractionMethod::PatternMatching,
        };

        let json = serde_json::to_value(&field).unwrap();
        assert_eq!(json["category"], "premium");
        assert_eq!(json["currency"], "INR");
        assert_eq!(json["extraction_method"], "pattern_matching");
        assert!(json["line_number"].is_null());
    }

    #[test]
    fn test_category_from_tag() {
        assert_eq!(FieldCategory::from_tag("Premium"), Some(FieldCategory::Premium));
        assert_eq!(FieldCategory::from_tag(" limit "), Some(FieldCategory::Limit));
        assert_eq!(FieldCategory::from_tag("bonus"), None);
    }
}
