//! Stock and payment status tests
//!
//! Status labels are stored as text in PostgreSQL and parsed back on read,
//! so labels, tones and classification boundaries are checked here.

use proptest::prelude::*;
use rust_decimal::Decimal;
use shared::{classify_payment, classify_stock, PaymentStatus, StockStatus, Tone};
use std::str::FromStr;

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn test_stock_boundaries() {
        assert_eq!(classify_stock(0, 5), StockStatus::Depleted);
        assert_eq!(classify_stock(5, 5), StockStatus::Low);
        assert_eq!(classify_stock(6, 5), StockStatus::Available);
        assert_eq!(classify_stock(1, 0), StockStatus::Available);
    }

    #[test]
    fn test_payment_boundaries() {
        let total = Decimal::from(100);
        assert_eq!(classify_payment(Decimal::ZERO, total), PaymentStatus::Pending);
        assert_eq!(classify_payment(Decimal::new(1, 2), total), PaymentStatus::Partial);
        assert_eq!(classify_payment(total, total), PaymentStatus::Complete);
        assert_eq!(classify_payment(Decimal::from(120), total), PaymentStatus::Complete);
        assert_eq!(classify_payment(Decimal::ZERO, Decimal::ZERO), PaymentStatus::Complete);
    }

    #[test]
    fn test_stored_labels_parse_back() {
        for status in [PaymentStatus::Complete, PaymentStatus::Partial, PaymentStatus::Pending] {
            assert_eq!(PaymentStatus::from_str(status.as_str()), Ok(status));
        }
        assert_eq!(StockStatus::from_str("bajo"), Ok(StockStatus::Low));
    }

    #[test]
    fn test_unknown_label_is_rejected() {
        let err = PaymentStatus::from_str("pagado").unwrap_err();
        assert_eq!(err.to_string(), "unknown payment status: pagado");
    }

    #[test]
    fn test_tones() {
        assert_eq!(StockStatus::Depleted.tone(), Tone::Danger);
        assert_eq!(StockStatus::Low.tone(), Tone::Warning);
        assert_eq!(PaymentStatus::Complete.tone(), Tone::Success);
        assert_eq!(PaymentStatus::Pending.tone(), Tone::Danger);
    }

    #[test]
    fn test_json_uses_spanish_labels() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Partial).unwrap(),
            "\"parcial\""
        );
        assert_eq!(
            serde_json::to_string(&StockStatus::Available).unwrap(),
            "\"disponible\""
        );
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod property_tests {
    use super::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Only an empty shelf is depleted
        #[test]
        fn prop_depleted_iff_empty(quantity in 0i64..100_000, minimum in 0i64..1_000) {
            let status = classify_stock(quantity, minimum);
            prop_assert_eq!(status == StockStatus::Depleted, quantity == 0);
        }

        /// Paying more never lowers the payment status
        #[test]
        fn prop_payment_status_is_monotonic(
            total_cents in 0i64..10_000_000,
            paid_cents in 0i64..10_000_000,
            extra_cents in 0i64..10_000_000
        ) {
            let total = Decimal::new(total_cents, 2);
            let before = classify_payment(Decimal::new(paid_cents, 2), total);
            let after = classify_payment(Decimal::new(paid_cents + extra_cents, 2), total);

            let rank = |status: PaymentStatus| match status {
                PaymentStatus::Pending => 0,
                PaymentStatus::Partial => 1,
                PaymentStatus::Complete => 2,
            };
            prop_assert!(rank(after) >= rank(before));
        }
    }
}
