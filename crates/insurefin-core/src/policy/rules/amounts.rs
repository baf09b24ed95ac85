//! Amount parsing and currency detection.

use crate::models::field::Currency;

use super::patterns::DECIMAL_DIGIT;

/// Currency markers in detection priority order.
///
/// Longer markers come before their prefixes ("Rs." before "Rs").
pub const CURRENCY_MARKERS: &[(&str, Currency)] = &[
    ("₹", Currency::Inr),
    ("Rs.", Currency::Inr),
    ("Rs", Currency::Inr),
    ("INR", Currency::Inr),
    ("$", Currency::Usd),
    ("USD", Currency::Usd),
    ("€", Currency::Eur),
    ("EUR", Currency::Eur),
    ("£", Currency::Gbp),
    ("GBP", Currency::Gbp),
];

/// Parse a captured amount such as "12,500.00".
///
/// Commas are dropped as thousands separators and non-ASCII decimal digits
/// (Devanagari, Arabic-Indic, ...) are read by value. Returns `None` for
/// empty, non-numeric, non-finite or negative input.
pub fn parse_amount(raw: &str) -> Option<f64> {
    let cleaned: String = raw
        .chars()
        .filter(|&c| c != ',')
        .map(|c| ascii_digit(c).unwrap_or(c))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return None;
    }

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite() && *value >= 0.0)
}

/// ASCII form of a Unicode decimal digit.
///
/// Decimal digits come in runs of whole 0-9 blocks, so a digit's value is its
/// distance from the start of its run, modulo 10.
fn ascii_digit(c: char) -> Option<char> {
    if c.is_ascii_digit() {
        return Some(c);
    }
    if !is_decimal_digit(c) {
        return None;
    }

    let mut run_start = c as u32;
    while let Some(prev) = run_start.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        run_start -= 1;
    }

    char::from_digit((c as u32 - run_start) % 10, 10)
}

fn is_decimal_digit(c: char) -> bool {
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut [0; 4]))
}

/// Detect the currency named in `text`, defaulting to INR.
pub fn detect_currency(text: &str) -> Currency {
    CURRENCY_MARKERS
        .iter()
        .find(|(marker, _)| text.contains(marker))
        .map(|(_, currency)| *currency)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("12,500.00"), Some(12500.0));
        assert_eq!(parse_amount("5,00,000"), Some(500000.0));
        assert_eq!(parse_amount(" 750 "), Some(750.0));
        assert_eq!(parse_amount("20."), Some(20.0));
        assert_eq!(parse_amount("0"), Some(0.0));
    }

    #[test]
    fn test_parse_amount_unicode_digits() {
        assert_eq!(parse_amount("५,००,०००"), Some(500000.0));
        assert_eq!(parse_amount("1२3"), Some(123.0));
        assert_eq!(parse_amount("٢٥٠.٥"), Some(250.5));
        // Mathematical digits: five 0-9 blocks back to back.
        assert_eq!(parse_amount("\u{1D7D5}"), Some(7.0));
        assert_eq!(parse_amount("\u{1D7E1}\u{1D7D8}"), Some(90.0));
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount(","), None);
        assert_eq!(parse_amount("1.2.3"), None);
        assert_eq!(parse_amount("-40"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
    }

    #[test]
    fn test_detect_currency() {
        assert_eq!(detect_currency("Premium: ₹ 1,000"), Currency::Inr);
        assert_eq!(detect_currency("Rs. 200"), Currency::Inr);
        assert_eq!(detect_currency("Deductible Amount: $500"), Currency::Usd);
        assert_eq!(detect_currency("EUR 75"), Currency::Eur);
        assert_eq!(detect_currency("GBP 10 or £10"), Currency::Gbp);
        assert_eq!(detect_currency("no marker 400"), Currency::Inr);
    }

    #[test]
    fn test_detect_currency_priority() {
        // Rupee markers outrank dollar markers regardless of position.
        assert_eq!(detect_currency("$20 and Rs 30"), Currency::Inr);
        assert_eq!(detect_currency("USD 20 and € 5"), Currency::Usd);
    }
}
