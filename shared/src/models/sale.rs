//! Sale (venta) models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::economics::{compute_sale_economics, SaleDerived, SaleInput};
use crate::numeric::coerce;
use crate::validation::{non_negative_amount, payment_within_total, price_spread};

/// A stored sale together with the values derived at submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: Uuid,
    pub client_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    pub sale_unit_price: Decimal,
    pub purchase_unit_price: Decimal,
    pub freight_per_unit: Decimal,
    pub amount_paid: Decimal,
    #[serde(flatten)]
    pub economics: SaleDerived,
    pub bank_id: Option<Uuid>,
    pub currency: String,
    pub sale_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Sale {
    pub fn economics_input(&self) -> SaleInput {
        SaleInput {
            quantity: self.quantity,
            sale_unit_price: self.sale_unit_price,
            purchase_unit_price: Some(self.purchase_unit_price),
            freight_per_unit: Some(self.freight_per_unit),
            amount_paid: Some(self.amount_paid),
        }
    }
}

/// Input for registering a sale
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_sale_form", skip_on_field_errors = false))]
pub struct CreateSaleInput {
    pub client_id: Uuid,
    #[validate(length(min = 2, max = 120, message = "Product name must be between 2 and 120 characters"))]
    pub product_name: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    #[validate(custom = "non_negative_amount")]
    pub sale_unit_price: Decimal,
    #[validate(custom = "non_negative_amount")]
    pub purchase_unit_price: Option<Decimal>,
    #[validate(custom = "non_negative_amount")]
    pub freight_per_unit: Option<Decimal>,
    #[validate(custom = "non_negative_amount")]
    pub amount_paid: Option<Decimal>,
    /// Account the collected money goes into
    pub bank_id: Option<Uuid>,
    pub sale_date: Option<NaiveDate>,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

impl CreateSaleInput {
    pub fn economics_input(&self) -> SaleInput {
        SaleInput {
            quantity: self.quantity,
            sale_unit_price: self.sale_unit_price,
            purchase_unit_price: self.purchase_unit_price,
            freight_per_unit: self.freight_per_unit,
            amount_paid: self.amount_paid,
        }
    }

    pub fn economics(&self) -> SaleDerived {
        compute_sale_economics(&self.economics_input())
    }
}

fn validate_sale_form(input: &CreateSaleInput) -> Result<(), ValidationError> {
    price_spread(coerce(input.purchase_unit_price), input.sale_unit_price)?;
    let derived = input.economics();
    payment_within_total(coerce(input.amount_paid), derived.total_sale_value)
}
