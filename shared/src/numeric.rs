//! Numeric coercion applied to raw form fields before any calculation
//!
//! Form fields arrive as optional numbers (an empty input is `None`, a
//! half-typed value may be NaN on the JavaScript side). Everything here is
//! total: missing or non-finite values become zero.

use rust_decimal::Decimal;

/// Treat a missing amount as zero
pub fn coerce(value: Option<Decimal>) -> Decimal {
    value.unwrap_or(Decimal::ZERO)
}

/// Treat a missing, NaN or non-finite float as zero
///
/// Finite floats outside the `Decimal` range or below its precision also
/// collapse to zero.
pub fn coerce_f64(value: Option<f64>) -> Decimal {
    match value {
        Some(v) if v.is_finite() => Decimal::try_from(v).unwrap_or(Decimal::ZERO),
        _ => Decimal::ZERO,
    }
}

/// Treat a missing quantity as zero
pub fn coerce_quantity(value: Option<i64>) -> i64 {
    value.unwrap_or(0)
}

/// Division where a zero denominator yields exactly zero
pub fn ratio(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    numerator.checked_div(denominator).unwrap_or(Decimal::ZERO)
}

/// Percentage of `part` over `whole`, zero when `whole` is zero
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    ratio(part, whole).saturating_mul(Decimal::ONE_HUNDRED)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_coerce_missing_is_zero() {
        assert_eq!(coerce(None), Decimal::ZERO);
        assert_eq!(coerce(Some(Decimal::from(42))), Decimal::from(42));
        assert_eq!(coerce(Some(Decimal::from(-3))), Decimal::from(-3));
    }

    #[test]
    fn test_coerce_f64_non_finite() {
        assert_eq!(coerce_f64(None), Decimal::ZERO);
        assert_eq!(coerce_f64(Some(f64::NAN)), Decimal::ZERO);
        assert_eq!(coerce_f64(Some(f64::INFINITY)), Decimal::ZERO);
        assert_eq!(coerce_f64(Some(f64::NEG_INFINITY)), Decimal::ZERO);
        assert_eq!(coerce_f64(Some(1e300)), Decimal::ZERO);
    }

    #[test]
    fn test_coerce_f64_keeps_value() {
        assert_eq!(coerce_f64(Some(12.25)), Decimal::from_str("12.25").unwrap());
        assert_eq!(coerce_f64(Some(0.0)), Decimal::ZERO);
        assert_eq!(coerce_f64(Some(-12.5)), Decimal::from_str("-12.5").unwrap());
    }

    #[test]
    fn test_coerce_quantity() {
        assert_eq!(coerce_quantity(None), 0);
        assert_eq!(coerce_quantity(Some(7)), 7);
    }

    #[test]
    fn test_ratio_zero_denominator() {
        assert_eq!(ratio(Decimal::from(10), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(ratio(Decimal::ZERO, Decimal::ZERO), Decimal::ZERO);
        assert_eq!(
            ratio(Decimal::from(260), Decimal::from(500)),
            Decimal::from_str("0.52").unwrap()
        );
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(Decimal::from(1), Decimal::from(4)), Decimal::from(25));
        assert_eq!(percent_of(Decimal::from(1), Decimal::ZERO), Decimal::ZERO);
    }
}
