//! Money helpers.
//!
//! All monetary fields of a [`Lot`](crate::Lot) are whole cents stored as
//! [`Cents`]. Arithmetic that can produce fractions of a cent (proportional
//! splits) goes through [`Decimal`] and is rounded back to whole cents.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// A signed amount of money in cents.
pub type Cents = i64;

/// Scale `value` by `numerator / denominator`, rounding to the nearest cent.
///
/// Midpoints round away from zero, so `scale_cents(5, 1, 2) == 3` and
/// `scale_cents(-5, 1, 2) == -3`. A zero denominator yields zero, and results
/// beyond the range of [`Cents`] saturate.
///
/// # Examples
///
/// ```
/// use washsale_core::scale_cents;
///
/// assert_eq!(scale_cents(12_000, 4, 10), 4_800);
/// assert_eq!(scale_cents(100, 1, 3), 33);
/// assert_eq!(scale_cents(100, 2, 3), 67);
/// ```
#[must_use]
pub fn scale_cents(value: Cents, numerator: u64, denominator: u64) -> Cents {
    if denominator == 0 {
        return 0;
    }
    let saturated = if value < 0 { Cents::MIN } else { Cents::MAX };
    let (value, numerator, denominator) = (
        Decimal::from(value),
        Decimal::from(numerator),
        Decimal::from(denominator),
    );
    // Multiply first for exact midpoints; scale by the ratio when that overflows.
    let Some(scaled) = value
        .checked_mul(numerator)
        .and_then(|product| product.checked_div(denominator))
        .or_else(|| {
            numerator
                .checked_div(denominator)
                .and_then(|ratio| value.checked_mul(ratio))
        })
    else {
        return saturated;
    };
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(saturated)
}

/// Render cents as a dollar string, e.g. `$12.00` or `-$3.05`.
#[must_use]
pub fn format_cents(value: Cents) -> String {
    let dollars = Decimal::new(value, 2);
    if dollars.is_sign_negative() {
        format!("-${}", dollars.abs())
    } else {
        format!("${dollars}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_exact() {
        assert_eq!(scale_cents(12_000, 6, 10), 7_200);
        assert_eq!(scale_cents(12_000, 10, 10), 12_000);
        assert_eq!(scale_cents(12_000, 0, 10), 0);
    }

    #[test]
    fn test_scale_rounds_to_nearest() {
        assert_eq!(scale_cents(100, 1, 3), 33);
        assert_eq!(scale_cents(100, 2, 3), 67);
        assert_eq!(scale_cents(1, 1, 2), 1);
        assert_eq!(scale_cents(-1, 1, 2), -1);
        assert_eq!(scale_cents(-100, 2, 3), -67);
    }

    #[test]
    fn test_scale_zero_denominator() {
        assert_eq!(scale_cents(100, 1, 0), 0);
    }

    #[test]
    fn test_split_halves_within_one_cent() {
        for value in [0, 1, 7, 99, 101, 12_345, 999_999] {
            for total in 2..12u64 {
                for k in 1..total {
                    let sum = scale_cents(value, k, total) + scale_cents(value, total - k, total);
                    assert!((sum - value).abs() <= 1, "{value} split {k}/{total} gave {sum}");
                }
            }
        }
    }

    #[test]
    fn test_scale_large_values_do_not_overflow() {
        let shares = 10_000_000_000u64;
        let basis = 9_000_000_000_000_000_000;
        let kept = scale_cents(basis, shares - 1, shares);
        let rest = scale_cents(basis, 1, shares);
        assert_eq!(kept, 8_999_999_999_100_000_000);
        assert_eq!(rest, 900_000_000);
        assert_eq!(kept + rest, basis);
        assert_eq!(scale_cents(Cents::MAX, u64::MAX, 1), Cents::MAX);
        assert_eq!(scale_cents(Cents::MIN, u64::MAX, 1), Cents::MIN);
    }

    #[test]
    fn test_format_cents() {
        assert_eq!(format_cents(12_000), "$120.00");
        assert_eq!(format_cents(5), "$0.05");
        assert_eq!(format_cents(0), "$0.00");
        assert_eq!(format_cents(-305), "-$3.05");
    }
}
