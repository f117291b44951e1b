//! Stateless previews of the derived financial values
//!
//! These endpoints run the same calculators the forms use, without touching
//! the database, so a client can show totals before submitting.

use axum::Json;

use shared::{
    compute_product_economics, compute_purchase_order_economics, compute_sale_economics,
    ProductDerived, ProductInput, PurchaseOrderDerived, PurchaseOrderInput, SaleDerived,
    SaleInput,
};

/// Margin, inventory value and stock status for a product
pub async fn calculate_product(Json(input): Json<ProductInput>) -> Json<ProductDerived> {
    Json(compute_product_economics(&input))
}

/// Totals, balance and payment status for a purchase order
pub async fn calculate_purchase_order(
    Json(input): Json<PurchaseOrderInput>,
) -> Json<PurchaseOrderDerived> {
    Json(compute_purchase_order_economics(&input))
}

/// Totals, profit and collected-money distribution for a sale
pub async fn calculate_sale(Json(input): Json<SaleInput>) -> Json<SaleDerived> {
    Json(compute_sale_economics(&input))
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use rust_decimal::Decimal;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::routes::calculation_routes;

    async fn post(uri: &str, body: Value) -> (StatusCode, Value) {
        let app = calculation_routes::<()>();
        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    // Decimals serialize as strings and keep their scale, so compare by value
    fn money(value: &Value) -> Decimal {
        Decimal::from_str(value.as_str().unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_sale_preview_distributes_collected_money() {
        let (status, body) = post(
            "/sale",
            json!({
                "quantity": 10,
                "sale_unit_price": "50",
                "purchase_unit_price": "30",
                "freight_per_unit": "2",
                "amount_paid": "260"
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(money(&body["total_sale_value"]), Decimal::from(500));
        assert_eq!(money(&body["gross_profit"]), Decimal::from(180));
        assert_eq!(body["payment_status"], "parcial");
        assert_eq!(money(&body["distribution"]["cost_bucket"]), Decimal::from(156));
    }

    #[tokio::test]
    async fn test_product_preview_reports_stock() {
        let (status, body) = post(
            "/product",
            json!({
                "purchase_unit_price": "100",
                "sale_unit_price": "150",
                "quantity_on_hand": 0
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(money(&body["unit_margin"]), Decimal::from(50));
        assert_eq!(body["stock_status"], "agotado");
    }

    #[tokio::test]
    async fn test_purchase_order_preview_pending_without_payment() {
        let (status, body) = post(
            "/purchase-order",
            json!({ "quantity": 4, "unit_price": "25" }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(money(&body["total_amount"]), Decimal::from(100));
        assert_eq!(body["payment_status"], "pendiente");
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let (status, _) = post("/sale", json!({ "quantity": "many" })).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }
}
