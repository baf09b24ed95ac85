//! Field name categorization.

use crate::models::field::FieldCategory;

/// Substring rules checked in order; the first hit wins.
pub const CATEGORY_RULES: &[(&[&str], FieldCategory)] = &[
    (&["premium"], FieldCategory::Premium),
    (&["claim"], FieldCategory::Claim),
    (&["deductible", "copay"], FieldCategory::Deductible),
    (&["tax", "gst"], FieldCategory::Tax),
    (&["fee", "charge"], FieldCategory::Fee),
    (&["coverage", "insured", "benefit"], FieldCategory::Coverage),
    (&["limit", "maximum"], FieldCategory::Limit),
];

/// Map a field name to its category. Names matching no rule are benefits.
pub fn categorize(field_name: &str) -> FieldCategory {
    let name = field_name.to_lowercase();

    CATEGORY_RULES
        .iter()
        .find(|(needles, _)| needles.iter().any(|needle| name.contains(needle)))
        .map_or(FieldCategory::Benefit, |(_, category)| *category)
}
