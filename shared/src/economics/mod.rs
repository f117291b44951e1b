//! Derived financial values for the product, purchase-order and sale forms
//!
//! Every calculator here is pure and total: it never fails, never mutates
//! anything and returns a complete record for any numeric input. Results are
//! meant to be recomputed from scratch whenever a form field changes.
//! Arithmetic saturates at the `Decimal` bounds instead of panicking.

mod product;
mod purchase_order;
mod sale;

pub use product::*;
pub use purchase_order::*;
pub use sale::*;

use rust_decimal::Decimal;

/// `quantity × amount`, saturating
pub(crate) fn extend(quantity: i64, amount: Decimal) -> Decimal {
    Decimal::from(quantity).saturating_mul(amount)
}
