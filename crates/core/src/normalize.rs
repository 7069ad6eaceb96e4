//! Numeric normalization for spreadsheet cells.
//!
//! Prices and sizes arrive either as native numbers or as strings in
//! German (`1.480,92`) or plain (`1480.92`) notation. Both conversions
//! return `None` instead of failing; the reconciler treats `None` as an
//! absent field.

use std::sync::LazyLock;

use regex::Regex;

use crate::cell::CellValue;
use crate::types::Cents;

/// A length given in meters, e.g. `3.01m` (after lower-casing and
/// whitespace removal).
static METERS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d+(?:\.\d+)?)m$").expect("valid regex"));

/// Convert a price cell (euros) to cents.
///
/// - Native numbers are multiplied by 100 and rounded.
/// - Strings lose the euro sign and all whitespace. When both `,` and `.`
///   are present the dots are thousands separators and the comma is the
///   decimal point; a lone `,` is the decimal point.
pub fn euro_to_cents(value: &CellValue) -> Option<Cents> {
    match value {
        CellValue::Empty => None,
        CellValue::Number(euros) => to_units(euros * 100.0),
        CellValue::Text(text) => {
            let mut s: String = text
                .chars()
                .filter(|c| *c != '€' && !c.is_whitespace())
                .collect();

            if s.contains(',') && s.contains('.') {
                s = s.replace('.', "").replace(',', ".");
            } else if s.contains(',') {
                s = s.replace(',', ".");
            }

            parse_decimal(&s).and_then(|euros| to_units(euros * 100.0))
        }
    }
}

/// Convert a length cell to whole centimeters.
///
/// `"3.01m"` is read as meters. Anything else has every character except
/// digits and the decimal point removed, so `"150 cm"` becomes `150`.
pub fn to_cm(value: &CellValue) -> Option<i64> {
    let text = value.to_text()?;
    let s: String = text
        .to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .replace(',', ".");

    if let Some(caps) = METERS_RE.captures(&s) {
        let meters = parse_decimal(&caps[1])?;
        return to_units(meters * 100.0);
    }

    let digits: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    parse_decimal(&digits).and_then(to_units)
}

/// Round half away from zero to an integer, rejecting NaN and infinities.
pub fn to_units(value: f64) -> Option<i64> {
    if value.is_finite() {
        Some(value.round() as i64)
    } else {
        None
    }
}

fn parse_decimal(s: &str) -> Option<f64> {
    if s.is_empty() {
        return None;
    }
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn cents(s: &str) -> Option<Cents> {
        euro_to_cents(&CellValue::from(s))
    }

    fn cm(s: &str) -> Option<i64> {
        to_cm(&CellValue::from(s))
    }

    // -- euro_to_cents --------------------------------------------------------

    #[test]
    fn decimal_comma() {
        assert_eq!(cents("1480,92"), Some(148_092));
    }

    #[test]
    fn thousands_dot_and_decimal_comma() {
        assert_eq!(cents("1.480,92"), Some(148_092));
        assert_eq!(cents("12.345.678,50"), Some(1_234_567_850));
    }

    #[test]
    fn plain_decimal_point() {
        assert_eq!(cents("1480.92"), Some(148_092));
    }

    #[test]
    fn euro_sign_and_spaces_are_stripped() {
        assert_eq!(cents("1 480,92 €"), Some(148_092));
        assert_eq!(cents("€ 99"), Some(9_900));
    }

    #[test]
    fn native_number() {
        assert_eq!(euro_to_cents(&CellValue::Number(1480.92)), Some(148_092));
        assert_eq!(euro_to_cents(&CellValue::Number(0.0)), Some(0));
    }

    #[test]
    fn unparseable_prices_are_none() {
        assert_eq!(euro_to_cents(&CellValue::Empty), None);
        assert_eq!(cents(""), None);
        assert_eq!(cents("abc"), None);
        assert_eq!(cents("   "), None);
        assert_eq!(euro_to_cents(&CellValue::Number(f64::NAN)), None);
        assert_eq!(euro_to_cents(&CellValue::Number(f64::INFINITY)), None);
    }

    #[test]
    fn half_cent_rounds_away_from_zero() {
        assert_eq!(cents("0,125"), Some(13));
        assert_eq!(cents("-0,125"), Some(-13));
    }

    // -- to_cm ----------------------------------------------------------------

    #[test]
    fn meters_suffix() {
        assert_eq!(cm("3.01m"), Some(301));
        assert_eq!(cm("3,01 m"), Some(301));
        assert_eq!(cm("2M"), Some(200));
    }

    #[test]
    fn plain_centimeters() {
        assert_eq!(cm("272"), Some(272));
        assert_eq!(to_cm(&CellValue::Number(141.0)), Some(141));
    }

    #[test]
    fn stray_units_are_stripped() {
        assert_eq!(cm("150 cm"), Some(150));
        assert_eq!(cm("ca 80cm"), Some(80));
    }

    #[test]
    fn fractional_centimeters_round() {
        assert_eq!(cm("140,5"), Some(141));
        assert_eq!(to_cm(&CellValue::Number(71.4)), Some(71));
    }

    #[test]
    fn empty_or_non_numeric_length_is_none() {
        assert_eq!(to_cm(&CellValue::Empty), None);
        assert_eq!(cm(""), None);
        assert_eq!(cm("n/a"), None);
        assert_eq!(cm("1.2.3"), None);
    }

    #[test]
    fn to_units_rejects_non_finite() {
        assert_eq!(to_units(f64::NAN), None);
        assert_eq!(to_units(2.5), Some(3));
        assert_eq!(to_units(-2.5), Some(-3));
    }
}
