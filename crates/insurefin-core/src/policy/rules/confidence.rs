//! Heuristic confidence scoring.

use super::patterns::GROUPED_NUMBER;

const BASE_CONFIDENCE: f64 = 0.5;

/// Score an extraction from its name, value and surrounding text.
///
/// Starts at 0.5 and adds a boost for each signal present: a rupee marker
/// (+0.1), the field name spelled out in the context (+0.2), a positive value
/// (+0.1) and a number in the context (+0.1). Capped at 1.0.
pub fn score(field_name: &str, value: f64, context: &str) -> f64 {
    let spelled_name = field_name.to_lowercase().replace('_', " ");

    let signals = [
        (context.contains('₹') || context.contains("Rs"), 0.1),
        (context.to_lowercase().contains(&spelled_name), 0.2),
        (value > 0.0, 0.1),
        (GROUPED_NUMBER.is_match(context), 0.1),
    ];

    let confidence = signals
        .iter()
        .filter(|(present, _)| *present)
        .fold(BASE_CONFIDENCE, |acc, (_, boost)| acc + boost);

    confidence.min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_all_signals_cap_at_one() {
        let confidence = score("annual_premium", 12500.0, "Annual Premium: Rs. 12,500.00 for policy XYZ");
        assert!(approx(confidence, 1.0));
    }

    #[test]
    fn test_no_signals_is_base() {
        assert!(approx(score("gst", 0.0, "nothing relevant"), 0.5));
    }

    #[test]
    fn test_individual_signals() {
        assert!(approx(score("x", 0.0, "₹"), 0.6));
        assert!(approx(score("service_charge", 0.0, "SERVICE CHARGE"), 0.7));
        assert!(approx(score("x", 5.0, ""), 0.6));
        assert!(approx(score("x", 0.0, "7"), 0.6));
    }

    #[test]
    fn test_score_is_deterministic() {
        let context = "Deductible Amount: $500";
        assert_eq!(score("deductible", 500.0, context), score("deductible", 500.0, context));
    }
}
