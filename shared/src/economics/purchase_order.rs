//! Purchase-order totals and payment tracking

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::extend;
use crate::numeric::coerce;
use crate::status::{classify_payment, PaymentStatus};

/// Raw purchase-order form values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct PurchaseOrderInput {
    pub quantity: i64,
    pub unit_price: Decimal,
    pub freight_per_unit: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
}

/// Values derived from a [`PurchaseOrderInput`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PurchaseOrderDerived {
    pub total_cost: Decimal,
    pub total_freight: Decimal,
    pub total_amount: Decimal,
    pub remaining_balance: Decimal,
    pub payment_status: PaymentStatus,
}

impl PurchaseOrderDerived {
    /// More was paid than the order is worth
    pub fn is_overpaid(&self) -> bool {
        self.remaining_balance < Decimal::ZERO
    }
}

/// Compute totals, balance and payment status for a purchase order
///
/// Overpayment is reported as a negative remaining balance.
pub fn compute_purchase_order_economics(input: &PurchaseOrderInput) -> PurchaseOrderDerived {
    let freight_per_unit = coerce(input.freight_per_unit);
    let amount_paid = coerce(input.amount_paid);

    let total_cost = extend(input.quantity, input.unit_price);
    let total_freight = extend(input.quantity, freight_per_unit);
    let total_amount = total_cost.saturating_add(total_freight);

    PurchaseOrderDerived {
        total_cost,
        total_freight,
        total_amount,
        remaining_balance: total_amount.saturating_sub(amount_paid),
        payment_status: classify_payment(amount_paid, total_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_totals_with_freight() {
        let input = PurchaseOrderInput {
            quantity: 12,
            unit_price: dec("85.50"),
            freight_per_unit: Some(dec("4.25")),
            amount_paid: Some(dec("500")),
        };
        let derived = compute_purchase_order_economics(&input);

        assert_eq!(derived.total_cost, dec("1026"));
        assert_eq!(derived.total_freight, dec("51"));
        assert_eq!(derived.total_amount, dec("1077"));
        assert_eq!(derived.remaining_balance, dec("577"));
        assert_eq!(derived.payment_status, PaymentStatus::Partial);
    }

    #[test]
    fn test_optional_fields_default_to_zero() {
        let input = PurchaseOrderInput {
            quantity: 3,
            unit_price: dec("10"),
            ..Default::default()
        };
        let derived = compute_purchase_order_economics(&input);

        assert_eq!(derived.total_freight, Decimal::ZERO);
        assert_eq!(derived.total_amount, dec("30"));
        assert_eq!(derived.remaining_balance, dec("30"));
        assert_eq!(derived.payment_status, PaymentStatus::Pending);
    }

    #[test]
    fn test_overpayment_is_negative_balance() {
        let input = PurchaseOrderInput {
            quantity: 1,
            unit_price: Decimal::ZERO,
            freight_per_unit: Some(Decimal::ZERO),
            amount_paid: Some(dec("50")),
        };
        let derived = compute_purchase_order_economics(&input);

        assert_eq!(derived.remaining_balance, dec("-50"));
        assert!(derived.is_overpaid());
        assert_eq!(derived.payment_status, PaymentStatus::Complete);
    }

    #[test]
    fn test_fully_paid() {
        let input = PurchaseOrderInput {
            quantity: 2,
            unit_price: dec("40"),
            freight_per_unit: Some(dec("5")),
            amount_paid: Some(dec("90")),
        };
        let derived = compute_purchase_order_economics(&input);

        assert_eq!(derived.remaining_balance, Decimal::ZERO);
        assert_eq!(derived.payment_status, PaymentStatus::Complete);
        assert!(!derived.is_overpaid());
    }
}
