//! Product margin and inventory valuation

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::extend;
use crate::numeric::{coerce, percent_of};
use crate::status::{classify_stock, StockStatus};

/// Raw product form values
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ProductInput {
    pub purchase_unit_price: Decimal,
    pub sale_unit_price: Decimal,
    pub quantity_on_hand: i64,
    pub minimum_stock: Option<i64>,
    pub average_freight: Option<Decimal>,
}

/// Values derived from a [`ProductInput`]
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductDerived {
    pub unit_margin: Decimal,
    pub margin_percent: Decimal,
    pub inventory_value: Decimal,
    pub potential_sale_value: Decimal,
    pub potential_profit: Decimal,
    pub stock_status: StockStatus,
}

impl ProductDerived {
    /// A negative margin is shown as a warning, not rejected
    pub fn has_negative_margin(&self) -> bool {
        self.unit_margin < Decimal::ZERO
    }
}

/// Compute margin, valuation and stock status for a product
///
/// Freight is part of the unit cost. Prices are not range-checked, so a sale
/// price below cost simply produces a negative margin.
pub fn compute_product_economics(input: &ProductInput) -> ProductDerived {
    let freight = coerce(input.average_freight);
    let minimum = input.minimum_stock.unwrap_or(0);

    let cost_per_unit = input.purchase_unit_price.saturating_add(freight);
    let unit_margin = input.sale_unit_price.saturating_sub(cost_per_unit);

    ProductDerived {
        unit_margin,
        margin_percent: percent_of(unit_margin, input.sale_unit_price),
        inventory_value: extend(input.quantity_on_hand, cost_per_unit),
        potential_sale_value: extend(input.quantity_on_hand, input.sale_unit_price),
        potential_profit: extend(input.quantity_on_hand, unit_margin),
        stock_status: classify_stock(input.quantity_on_hand, minimum),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn product(purchase: &str, sale: &str, quantity: i64) -> ProductInput {
        ProductInput {
            purchase_unit_price: dec(purchase),
            sale_unit_price: dec(sale),
            quantity_on_hand: quantity,
            minimum_stock: None,
            average_freight: None,
        }
    }

    #[test]
    fn test_margin_includes_freight() {
        let input = ProductInput {
            average_freight: Some(dec("5")),
            minimum_stock: Some(10),
            ..product("60", "100", 20)
        };
        let derived = compute_product_economics(&input);

        assert_eq!(derived.unit_margin, dec("35"));
        assert_eq!(derived.margin_percent, dec("35"));
        assert_eq!(derived.inventory_value, dec("1300"));
        assert_eq!(derived.potential_sale_value, dec("2000"));
        assert_eq!(derived.potential_profit, dec("700"));
        assert_eq!(derived.stock_status, StockStatus::Available);
        assert!(!derived.has_negative_margin());
    }

    #[test]
    fn test_zero_sale_price_gives_zero_percent() {
        let input = ProductInput {
            average_freight: Some(dec("3")),
            ..product("40", "0", 4)
        };
        let derived = compute_product_economics(&input);

        assert_eq!(derived.margin_percent, Decimal::ZERO);
        assert_eq!(derived.unit_margin, dec("-43"));
        assert!(derived.has_negative_margin());
    }

    #[test]
    fn test_negative_margin_is_a_value() {
        let derived = compute_product_economics(&product("120", "100", 3));
        assert_eq!(derived.unit_margin, dec("-20"));
        assert_eq!(derived.margin_percent, dec("-20"));
        assert_eq!(derived.potential_profit, dec("-60"));
    }

    #[test]
    fn test_stock_status_follows_minimum() {
        let low = ProductInput {
            minimum_stock: Some(5),
            ..product("10", "20", 5)
        };
        assert_eq!(compute_product_economics(&low).stock_status, StockStatus::Low);

        let empty = product("10", "20", 0);
        let derived = compute_product_economics(&empty);
        assert_eq!(derived.stock_status, StockStatus::Depleted);
        assert_eq!(derived.inventory_value, Decimal::ZERO);
    }

    #[test]
    fn test_repeat_calls_are_identical() {
        let input = ProductInput {
            average_freight: Some(dec("1.15")),
            minimum_stock: Some(2),
            ..product("7.30", "12.99", 13)
        };
        assert_eq!(compute_product_economics(&input), compute_product_economics(&input));
    }

    #[test]
    fn test_huge_values_saturate() {
        let input = product("1", &Decimal::MAX.to_string(), i64::MAX);
        let derived = compute_product_economics(&input);
        assert_eq!(derived.potential_sale_value, Decimal::MAX);
    }
}
