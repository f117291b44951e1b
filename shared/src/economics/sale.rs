//! Sale profit and proportional distribution of collected money

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::extend;
use crate::numeric::{coerce, ratio};
use crate::status::{classify_payment, PaymentStatus};

/// Raw sale form values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SaleInput {
    pub quantity: i64,
    pub sale_unit_price: Decimal,
    pub purchase_unit_price: Option<Decimal>,
    pub freight_per_unit: Option<Decimal>,
    pub amount_paid: Option<Decimal>,
}

/// Share of the collected money assigned to each bucket
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Distribution {
    pub cost_bucket: Decimal,
    pub freight_bucket: Decimal,
    pub profit_bucket: Decimal,
}

impl Distribution {
    pub fn total(&self) -> Decimal {
        self.cost_bucket
            .saturating_add(self.freight_bucket)
            .saturating_add(self.profit_bucket)
    }
}

/// Values derived from a [`SaleInput`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SaleDerived {
    pub total_sale_value: Decimal,
    pub total_cost: Decimal,
    pub total_freight: Decimal,
    pub gross_profit: Decimal,
    pub remaining_balance: Decimal,
    pub payment_status: PaymentStatus,
    pub payment_fraction: Decimal,
    pub distribution: Distribution,
}

impl SaleDerived {
    pub fn has_loss(&self) -> bool {
        self.gross_profit < Decimal::ZERO
    }
}

/// Compute totals, profit, payment status and bucket distribution for a sale
///
/// Money collected so far is split across cost recovery, freight recovery and
/// profit in the same ratio those components bear to the full sale value.
/// Each bucket is its component total times the paid fraction; there is no
/// first-dollars-to-cost ordering. The fraction is not clamped, so an
/// overpaid sale yields buckets larger than their components.
pub fn compute_sale_economics(input: &SaleInput) -> SaleDerived {
    let purchase_unit_price = coerce(input.purchase_unit_price);
    let freight_per_unit = coerce(input.freight_per_unit);
    let amount_paid = coerce(input.amount_paid);

    let total_sale_value = extend(input.quantity, input.sale_unit_price);
    let total_cost = extend(input.quantity, purchase_unit_price);
    let total_freight = extend(input.quantity, freight_per_unit);
    let gross_profit = total_sale_value
        .saturating_sub(total_cost)
        .saturating_sub(total_freight);

    let payment_fraction = ratio(amount_paid, total_sale_value);

    SaleDerived {
        total_sale_value,
        total_cost,
        total_freight,
        gross_profit,
        remaining_balance: total_sale_value.saturating_sub(amount_paid),
        payment_status: classify_payment(amount_paid, total_sale_value),
        payment_fraction,
        distribution: Distribution {
            cost_bucket: total_cost.saturating_mul(payment_fraction),
            freight_bucket: total_freight.saturating_mul(payment_fraction),
            profit_bucket: gross_profit.saturating_mul(payment_fraction),
        },
    }
}
