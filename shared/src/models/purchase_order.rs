//! Purchase order (orden de compra) models

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::economics::{compute_purchase_order_economics, PurchaseOrderDerived, PurchaseOrderInput};
use crate::validation::{non_negative_amount, payment_within_total};

/// A stored purchase order together with the values derived at submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: Uuid,
    pub distributor_id: Uuid,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: Decimal,
    pub freight_per_unit: Decimal,
    pub amount_paid: Decimal,
    #[serde(flatten)]
    pub economics: PurchaseOrderDerived,
    pub bank_id: Option<Uuid>,
    pub currency: String,
    pub order_date: NaiveDate,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PurchaseOrder {
    pub fn economics_input(&self) -> PurchaseOrderInput {
        PurchaseOrderInput {
            quantity: self.quantity,
            unit_price: self.unit_price,
            freight_per_unit: Some(self.freight_per_unit),
            amount_paid: Some(self.amount_paid),
        }
    }
}

/// Input for creating or replacing a purchase order
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_order_payment", skip_on_field_errors = false))]
pub struct CreatePurchaseOrderInput {
    pub distributor_id: Uuid,
    #[validate(length(min = 2, max = 120, message = "Product name must be between 2 and 120 characters"))]
    pub product_name: String,
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i64,
    #[validate(custom = "non_negative_amount")]
    pub unit_price: Decimal,
    #[validate(custom = "non_negative_amount")]
    pub freight_per_unit: Option<Decimal>,
    #[validate(custom = "non_negative_amount")]
    pub amount_paid: Option<Decimal>,
    /// Account the payment leaves from
    pub bank_id: Option<Uuid>,
    pub order_date: Option<NaiveDate>,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

impl CreatePurchaseOrderInput {
    pub fn economics_input(&self) -> PurchaseOrderInput {
        PurchaseOrderInput {
            quantity: self.quantity,
            unit_price: self.unit_price,
            freight_per_unit: self.freight_per_unit,
            amount_paid: self.amount_paid,
        }
    }

    pub fn economics(&self) -> PurchaseOrderDerived {
        compute_purchase_order_economics(&self.economics_input())
    }
}

fn validate_order_payment(input: &CreatePurchaseOrderInput) -> Result<(), ValidationError> {
    let derived = input.economics();
    payment_within_total(input.amount_paid.unwrap_or_default(), derived.total_amount)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::status::PaymentStatus;

    fn input(amount_paid: i64) -> CreatePurchaseOrderInput {
        CreatePurchaseOrderInput {
            distributor_id: Uuid::new_v4(),
            product_name: "Arroz 25kg".to_string(),
            quantity: 10,
            unit_price: Decimal::from(300),
            freight_per_unit: Some(Decimal::from(20)),
            amount_paid: Some(Decimal::from(amount_paid)),
            bank_id: None,
            order_date: None,
            notes: None,
        }
    }

    #[test]
    fn test_valid_order() {
        let order = input(1000);
        assert!(order.validate().is_ok());
        assert_eq!(order.economics().payment_status, PaymentStatus::Partial);
    }

    #[test]
    fn test_payment_up_to_total_is_accepted() {
        assert!(input(3200).validate().is_ok());
    }

    #[test]
    fn test_overpayment_rejected_on_submission() {
        let errors = input(3201).validate().unwrap_err();
        assert!(errors.errors().contains_key("__all__"));
    }

    #[test]
    fn test_zero_quantity_rejected() {
        let mut order = input(0);
        order.quantity = 0;
        assert!(order.validate().unwrap_err().field_errors().contains_key("quantity"));
    }

    #[test]
    fn test_negative_freight_rejected() {
        let mut order = input(0);
        order.freight_per_unit = Some(Decimal::from(-1));
        assert!(order
            .validate()
            .unwrap_err()
            .field_errors()
            .contains_key("freight_per_unit"));
    }
}
