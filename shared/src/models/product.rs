//! Product catalog models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::economics::{compute_product_economics, ProductDerived, ProductInput};
use crate::numeric::coerce;
use crate::validation::{non_negative_amount, price_spread};

/// A product kept in the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub sku: Option<String>,
    pub purchase_unit_price: Decimal,
    pub sale_unit_price: Decimal,
    pub quantity_on_hand: i64,
    pub minimum_stock: i64,
    pub average_freight: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    pub fn economics_input(&self) -> ProductInput {
        ProductInput {
            purchase_unit_price: self.purchase_unit_price,
            sale_unit_price: self.sale_unit_price,
            quantity_on_hand: self.quantity_on_hand,
            minimum_stock: Some(self.minimum_stock),
            average_freight: Some(self.average_freight),
        }
    }

    pub fn economics(&self) -> ProductDerived {
        compute_product_economics(&self.economics_input())
    }
}

/// Product form as submitted
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_product_prices", skip_on_field_errors = false))]
pub struct ProductForm {
    #[validate(length(min = 2, max = 120, message = "Name must be between 2 and 120 characters"))]
    pub name: String,
    #[validate(length(min = 1, max = 40, message = "SKU must be between 1 and 40 characters"))]
    pub sku: Option<String>,
    #[validate(custom = "non_negative_amount")]
    pub purchase_unit_price: Decimal,
    #[validate(custom = "non_negative_amount")]
    pub sale_unit_price: Decimal,
    #[validate(range(min = 0, message = "Stock cannot be negative"))]
    pub quantity_on_hand: i64,
    #[validate(range(min = 0, message = "Minimum stock cannot be negative"))]
    pub minimum_stock: Option<i64>,
    #[validate(custom = "non_negative_amount")]
    pub average_freight: Option<Decimal>,
}

impl ProductForm {
    pub fn economics_input(&self) -> ProductInput {
        ProductInput {
            purchase_unit_price: self.purchase_unit_price,
            sale_unit_price: self.sale_unit_price,
            quantity_on_hand: self.quantity_on_hand,
            minimum_stock: self.minimum_stock,
            average_freight: Some(coerce(self.average_freight)),
        }
    }
}

fn validate_product_prices(form: &ProductForm) -> Result<(), ValidationError> {
    price_spread(form.purchase_unit_price, form.sale_unit_price)
}
