//! Regex rule tables for insurance policy extraction.

use lazy_static::lazy_static;
use regex::{Regex, RegexBuilder};

/// Labelled field patterns: field name and its patterns, tried in order.
///
/// Every pattern captures the numeric part in group 1.
pub const FIELD_PATTERN_TABLE: &[(&str, &[&str])] = &[
    // Premiums
    ("annual_premium", &[
        r"Annual\s+Premium(?:\s+Amount)?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Total\s+Annual\s+Premium[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Yearly\s+Premium[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("monthly_premium", &[
        r"Monthly\s+Premium(?:\s+Amount)?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Per\s+Month\s+Premium[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("quarterly_premium", &[
        r"Quarterly\s+Premium(?:\s+Amount)?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Coverage
    ("sum_insured", &[
        r"Sum\s+Insured[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Coverage\s+(?:Amount|Limit)[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Annual\s+Coverage\s+Limit[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("maximum_coverage", &[
        r"Maximum\s+Coverage[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Max(?:imum)?\s+Limit[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Deductibles and co-payment
    ("deductible", &[
        r"(?:Annual\s+)?Deductible(?:\s+Amount)?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Out[-\s]of[-\s]Pocket\s+(?:Maximum|Limit)[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("copayment_percentage", &[
        r"Co[-\s]?payment(?:\s+Percentage)?[:\s]+([\d.]+)%",
        r"Co[-\s]?pay[:\s]+([\d.]+)%",
    ]),
    ("copayment_maximum", &[
        r"Co[-\s]?payment\s+Maximum[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Taxes and fees
    ("gst", &[
        r"(?:GST|Goods\s+and\s+Services\s+Tax)[^:]*@?\s*[\d.]+%[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Tax\s+Amount[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("admin_fee", &[
        r"(?:Policy\s+)?Administration\s+Fee[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Admin\s+Charges?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("service_charge", &[
        r"Service\s+Charges?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("total_amount_paid", &[
        r"TOTAL\s+AMOUNT\s+PAID[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
        r"Total\s+Premium\s+Paid[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Claims
    ("claim_amount_submitted", &[
        r"Claim\s+Amount\s+Submitted[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("claim_amount_approved", &[
        r"Claim\s+Amount\s+Approved[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("total_claims_paid", &[
        r"Total\s+Claim\s+Payouts?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Specific benefits
    ("maternity_coverage", &[
        r"Maternity\s+Coverage(?:\s+Limit)?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("critical_illness_coverage", &[
        r"Critical\s+Illness\s+(?:Sum\s+Assured|Coverage)[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("ambulance_charges", &[
        r"Ambulance\s+Charges?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Room limits
    ("room_limit_per_day", &[
        r"Room\s+Limit[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)\s*per\s+day",
        r"Per\s+(?:Hospitalization\s+)?Room\s+Limit[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    ("icu_limit_per_day", &[
        r"ICU\s+Room\s+Limit[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Renewal
    ("renewal_premium", &[
        r"(?:Estimated\s+)?Renewal\s+Premium[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
    // Bonus
    ("no_claim_bonus", &[
        r"No\s+Claim\s+Bonus\s+Discount(?:\s+Amount)?[:\s]+(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)",
    ]),
];

/// Keywords that make a line worth scanning for amounts, in scan order.
pub const CONTEXT_KEYWORDS: &[&str] = &[
    "premium",
    "deductible",
    "coverage",
    "claim",
    "fee",
    "charge",
    "limit",
    "benefit",
    "tax",
    "payment",
    "amount",
    "total",
];

/// A field name with its compiled patterns.
#[derive(Debug)]
pub struct FieldRule {
    pub name: &'static str,
    pub patterns: Vec<Regex>,
}

lazy_static! {
    /// Compiled [`FIELD_PATTERN_TABLE`], case-insensitive, in table order.
    pub static ref FIELD_RULES: Vec<FieldRule> = FIELD_PATTERN_TABLE
        .iter()
        .map(|&(name, patterns)| FieldRule {
            name,
            patterns: patterns
                .iter()
                .map(|p| RegexBuilder::new(p).case_insensitive(true).build().unwrap())
                .collect(),
        })
        .collect();

    // Amount with optional rupee marker (keyword context scan)
    pub static ref CONTEXT_AMOUNT: Regex = Regex::new(
        r"(?:₹|Rs\.?|INR)?\s*([\d,]+\.?\d*)"
    ).unwrap();

    // Amount with required currency marker (exhaustive scan)
    pub static ref MARKED_AMOUNT: Regex = Regex::new(
        r"(?i)(?:₹|Rs\.?|INR|USD|\$|EUR|€|GBP|£)\s*([\d,]+\.?\d*)"
    ).unwrap();

    // One Unicode decimal digit, as `\d` matches it in the amount patterns
    pub static ref DECIMAL_DIGIT: Regex = Regex::new(r"^\d$").unwrap();

    // Digits with optional thousands groups and cents (confidence signal)
    pub static ref GROUPED_NUMBER: Regex = Regex::new(
        r"\d{1,3}(?:,\d{3})*(?:\.\d{2})?"
    ).unwrap();
}
