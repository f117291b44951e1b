//! WebAssembly module for CHRONOS
//!
//! Provides client-side computation for the browser forms:
//! - Product, purchase-order and sale derived values (recomputed on every edit)
//! - Stock and payment status labels
//! - Form validation before submission
//!
//! Calculator inputs arrive as JSON with every field optional; empty, `null`
//! and `NaN` fields count as zero. Outputs are JSON with plain numbers.

use std::collections::BTreeMap;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::Validate;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::economics::*;
pub use shared::models::*;
pub use shared::status::*;

use shared::numeric::coerce_f64;

fn to_number(value: Decimal) -> f64 {
    value.normalize().to_f64().unwrap_or(0.0)
}

/// Whole units from a raw form number; fractions are truncated
fn to_quantity(value: Option<f64>) -> i64 {
    match value {
        Some(v) if v.is_finite() => v.trunc() as i64,
        _ => 0,
    }
}

fn to_js_error(context: &str, message: String) -> JsValue {
    web_sys::console::warn_1(&JsValue::from_str(&format!("{}: {}", context, message)));
    JsValue::from_str(&message)
}

// ============================================================================
// Form Fields
// ============================================================================

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ProductFields {
    purchase_unit_price: Option<f64>,
    sale_unit_price: Option<f64>,
    quantity_on_hand: Option<f64>,
    minimum_stock: Option<f64>,
    average_freight: Option<f64>,
}

impl From<ProductFields> for ProductInput {
    fn from(fields: ProductFields) -> Self {
        ProductInput {
            purchase_unit_price: coerce_f64(fields.purchase_unit_price),
            sale_unit_price: coerce_f64(fields.sale_unit_price),
            quantity_on_hand: to_quantity(fields.quantity_on_hand),
            minimum_stock: Some(to_quantity(fields.minimum_stock)),
            average_freight: Some(coerce_f64(fields.average_freight)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct PurchaseOrderFields {
    quantity: Option<f64>,
    unit_price: Option<f64>,
    freight_per_unit: Option<f64>,
    amount_paid: Option<f64>,
}

impl From<PurchaseOrderFields> for PurchaseOrderInput {
    fn from(fields: PurchaseOrderFields) -> Self {
        PurchaseOrderInput {
            quantity: to_quantity(fields.quantity),
            unit_price: coerce_f64(fields.unit_price),
            freight_per_unit: Some(coerce_f64(fields.freight_per_unit)),
            amount_paid: Some(coerce_f64(fields.amount_paid)),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SaleFields {
    quantity: Option<f64>,
    sale_unit_price: Option<f64>,
    purchase_unit_price: Option<f64>,
    freight_per_unit: Option<f64>,
    amount_paid: Option<f64>,
}

impl From<SaleFields> for SaleInput {
    fn from(fields: SaleFields) -> Self {
        SaleInput {
            quantity: to_quantity(fields.quantity),
            sale_unit_price: coerce_f64(fields.sale_unit_price),
            purchase_unit_price: Some(coerce_f64(fields.purchase_unit_price)),
            freight_per_unit: Some(coerce_f64(fields.freight_per_unit)),
            amount_paid: Some(coerce_f64(fields.amount_paid)),
        }
    }
}

// ============================================================================
// Views
// ============================================================================

#[derive(Debug, Serialize)]
struct ProductView {
    unit_margin: f64,
    margin_percent: f64,
    inventory_value: f64,
    potential_sale_value: f64,
    potential_profit: f64,
    stock_status: StockStatus,
    stock_tone: Tone,
    negative_margin: bool,
}

impl From<ProductDerived> for ProductView {
    fn from(derived: ProductDerived) -> Self {
        ProductView {
            unit_margin: to_number(derived.unit_margin),
            margin_percent: to_number(derived.margin_percent),
            inventory_value: to_number(derived.inventory_value),
            potential_sale_value: to_number(derived.potential_sale_value),
            potential_profit: to_number(derived.potential_profit),
            stock_status: derived.stock_status,
            stock_tone: derived.stock_status.tone(),
            negative_margin: derived.has_negative_margin(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PurchaseOrderView {
    total_cost: f64,
    total_freight: f64,
    total_amount: f64,
    remaining_balance: f64,
    payment_status: PaymentStatus,
    payment_tone: Tone,
    overpaid: bool,
}

impl From<PurchaseOrderDerived> for PurchaseOrderView {
    fn from(derived: PurchaseOrderDerived) -> Self {
        PurchaseOrderView {
            total_cost: to_number(derived.total_cost),
            total_freight: to_number(derived.total_freight),
            total_amount: to_number(derived.total_amount),
            remaining_balance: to_number(derived.remaining_balance),
            payment_status: derived.payment_status,
            payment_tone: derived.payment_status.tone(),
            overpaid: derived.is_overpaid(),
        }
    }
}

#[derive(Debug, Serialize)]
struct DistributionView {
    cost_bucket: f64,
    freight_bucket: f64,
    profit_bucket: f64,
}

#[derive(Debug, Serialize)]
struct SaleView {
    total_sale_value: f64,
    total_cost: f64,
    total_freight: f64,
    gross_profit: f64,
    remaining_balance: f64,
    payment_status: PaymentStatus,
    payment_tone: Tone,
    payment_fraction: f64,
    distribution: DistributionView,
    loss: bool,
}

impl From<SaleDerived> for SaleView {
    fn from(derived: SaleDerived) -> Self {
        SaleView {
            total_sale_value: to_number(derived.total_sale_value),
            total_cost: to_number(derived.total_cost),
            total_freight: to_number(derived.total_freight),
            gross_profit: to_number(derived.gross_profit),
            remaining_balance: to_number(derived.remaining_balance),
            payment_status: derived.payment_status,
            payment_tone: derived.payment_status.tone(),
            payment_fraction: to_number(derived.payment_fraction),
            loss: derived.has_loss(),
            distribution: DistributionView {
                cost_bucket: to_number(derived.distribution.cost_bucket),
                freight_bucket: to_number(derived.distribution.freight_bucket),
                profit_bucket: to_number(derived.distribution.profit_bucket),
            },
        }
    }
}

// ============================================================================
// Calculations
// ============================================================================

fn parse_form<T: DeserializeOwned>(form_json: &str) -> Result<T, String> {
    serde_json::from_str(form_json).map_err(|e| format!("Invalid form JSON: {}", e))
}

fn to_json<T: Serialize>(view: &T) -> Result<String, String> {
    serde_json::to_string(view).map_err(|e| format!("Could not encode result: {}", e))
}

fn product_economics_json(form_json: &str) -> Result<String, String> {
    let fields: ProductFields = parse_form(form_json)?;
    let derived = compute_product_economics(&ProductInput::from(fields));
    to_json(&ProductView::from(derived))
}

fn purchase_order_economics_json(form_json: &str) -> Result<String, String> {
    let fields: PurchaseOrderFields = parse_form(form_json)?;
    let derived = compute_purchase_order_economics(&PurchaseOrderInput::from(fields));
    to_json(&PurchaseOrderView::from(derived))
}

fn sale_economics_json(form_json: &str) -> Result<String, String> {
    let fields: SaleFields = parse_form(form_json)?;
    let derived = compute_sale_economics(&SaleInput::from(fields));
    to_json(&SaleView::from(derived))
}

/// Coerce a raw form number: missing or NaN becomes 0
///
/// Infinities also become 0, as do finite values beyond `Decimal`'s range
/// (about 7.9e28 in magnitude) or smaller than its 28-digit precision.
#[wasm_bindgen]
pub fn coerce_number(value: Option<f64>) -> f64 {
    to_number(coerce_f64(value))
}

/// Derived values for the product form
#[wasm_bindgen]
pub fn calculate_product_economics(form_json: &str) -> Result<String, JsValue> {
    product_economics_json(form_json).map_err(|e| to_js_error("calculate_product_economics", e))
}

/// Derived values for the purchase-order form
#[wasm_bindgen]
pub fn calculate_purchase_order_economics(form_json: &str) -> Result<String, JsValue> {
    purchase_order_economics_json(form_json)
        .map_err(|e| to_js_error("calculate_purchase_order_economics", e))
}

/// Derived values for the sale form, including the bucket distribution
#[wasm_bindgen]
pub fn calculate_sale_economics(form_json: &str) -> Result<String, JsValue> {
    sale_economics_json(form_json).map_err(|e| to_js_error("calculate_sale_economics", e))
}

/// Stock label (`disponible`, `bajo`, `agotado`)
#[wasm_bindgen]
pub fn classify_stock_status(quantity: f64, minimum: f64) -> String {
    classify_stock(to_quantity(Some(quantity)), to_quantity(Some(minimum))).to_string()
}

/// Payment label (`completo`, `parcial`, `pendiente`)
#[wasm_bindgen]
pub fn classify_payment_status(amount_paid: f64, total_due: f64) -> String {
    classify_payment(coerce_f64(Some(amount_paid)), coerce_f64(Some(total_due))).to_string()
}

// ============================================================================
// Form Validation
// ============================================================================

/// Validate a form payload, returning field -> messages on failure
fn check_form<T: DeserializeOwned + Validate>(form_json: &str) -> Result<(), String> {
    let form: T = parse_form(form_json)?;
    form.validate().map_err(|errors| {
        let by_field: BTreeMap<&str, Vec<String>> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (field, messages)
            })
            .collect();
        serde_json::to_string(&by_field).unwrap_or_else(|e| e.to_string())
    })
}

macro_rules! form_validator {
    ($name:ident, $form:ty) => {
        #[wasm_bindgen]
        pub fn $name(form_json: &str) -> Result<(), JsValue> {
            check_form::<$form>(form_json).map_err(|e| to_js_error(stringify!($name), e))
        }
    };
}

form_validator!(validate_client_form, CreateClientInput);
form_validator!(validate_distributor_form, CreateDistributorInput);
form_validator!(validate_product_form, ProductForm);
form_validator!(validate_purchase_order_form, CreatePurchaseOrderInput);
form_validator!(validate_sale_form, CreateSaleInput);
form_validator!(validate_expense_form, ExpenseInput);
form_validator!(validate_deposit_form, DepositInput);
form_validator!(validate_transfer_form, TransferInput);

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json: &str) -> serde_json::Value {
        serde_json::from_str(json).unwrap()
    }

    fn assert_close(value: &serde_json::Value, expected: f64) {
        let actual = value.as_f64().unwrap();
        assert!((actual - expected).abs() < 1e-9, "{} != {}", actual, expected);
    }

    #[test]
    fn test_coerce_number() {
        assert_eq!(coerce_number(None), 0.0);
        assert_eq!(coerce_number(Some(f64::NAN)), 0.0);
        assert_eq!(coerce_number(Some(12.5)), 12.5);
        assert_eq!(coerce_number(Some(f64::INFINITY)), 0.0);
        assert_eq!(coerce_number(Some(1e29)), 0.0);
        assert_eq!(coerce_number(Some(-1e29)), 0.0);
    }

    #[test]
    fn test_product_economics_with_empty_fields() {
        let out = parse(&product_economics_json(r#"{"sale_unit_price": 100, "purchase_unit_price": null}"#).unwrap());
        assert_eq!(out["unit_margin"], 100.0);
        assert_eq!(out["margin_percent"], 100.0);
        assert_eq!(out["stock_status"], "agotado");
        assert_eq!(out["stock_tone"], "danger");
    }

    #[test]
    fn test_product_zero_sale_price() {
        let out = parse(&product_economics_json(r#"{"purchase_unit_price": 10, "quantity_on_hand": 3}"#).unwrap());
        assert_eq!(out["margin_percent"], 0.0);
        assert_eq!(out["negative_margin"], true);
    }

    #[test]
    fn test_purchase_order_overpayment() {
        let out = parse(
            &purchase_order_economics_json(r#"{"quantity": 1, "unit_price": 0, "amount_paid": 50}"#).unwrap(),
        );
        assert_eq!(out["remaining_balance"], -50.0);
        assert_eq!(out["payment_status"], "completo");
        assert_eq!(out["overpaid"], true);
    }

    #[test]
    fn test_sale_distribution() {
        let out = parse(
            &sale_economics_json(
                r#"{"quantity": 10, "sale_unit_price": 50, "purchase_unit_price": 30,
                    "freight_per_unit": 2, "amount_paid": 260}"#,
            )
            .unwrap(),
        );
        assert_close(&out["payment_fraction"], 0.52);
        assert_eq!(out["payment_status"], "parcial");
        assert_close(&out["distribution"]["cost_bucket"], 156.0);
        assert_close(&out["distribution"]["freight_bucket"], 10.4);
        assert_close(&out["distribution"]["profit_bucket"], 93.6);
    }

    #[test]
    fn test_fractional_quantity_truncates() {
        let out = parse(&purchase_order_economics_json(r#"{"quantity": 2.9, "unit_price": 10}"#).unwrap());
        assert_eq!(out["total_amount"], 20.0);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(sale_economics_json("{not json").is_err());
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(classify_stock_status(0.0, 0.0), "agotado");
        assert_eq!(classify_stock_status(5.0, 5.0), "bajo");
        assert_eq!(classify_stock_status(6.0, 5.0), "disponible");
        assert_eq!(classify_payment_status(100.0, 100.0), "completo");
        assert_eq!(classify_payment_status(99.99, 100.0), "parcial");
        assert_eq!(classify_payment_status(0.0, 100.0), "pendiente");
    }

    #[test]
    fn test_check_form_reports_fields() {
        let err = check_form::<CreateClientInput>(r#"{"name": "A", "email": "nope", "phone": null, "address": null}"#)
            .unwrap_err();
        let fields = parse(&err);
        assert!(fields.get("name").is_some());
        assert!(fields.get("email").is_some());
    }

    #[test]
    fn test_check_form_accepts_valid_transfer() {
        let json = r#"{
            "origin_bank_id": "8b0f8c2e-3c59-4f38-9d0a-0c4b8a3f6e11",
            "destination_bank_id": "0d6f1c1a-6a53-4d8b-8f4e-2f0b7a9c1d22",
            "amount": "1500.00",
            "concept": null
        }"#;
        assert!(check_form::<TransferInput>(json).is_ok());
    }
}
