//! Purchase order service: validation, derived totals and persistence
//!
//! Every write recomputes the derived values from the submitted inputs and
//! stores both together, so a stored order always carries the totals and
//! payment status that match its own inputs.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::{
    compute_purchase_order_economics, CreatePurchaseOrderInput, DepositInput, PaginatedResponse,
    Pagination, PaymentStatus, PurchaseOrder, PurchaseOrderDerived,
};

use crate::error::{AppError, AppResult};

/// Purchase order service backed by PostgreSQL
#[derive(Clone)]
pub struct PurchaseOrderService {
    db: PgPool,
}

/// Optional filters for listing purchase orders
#[derive(Debug, Default, Deserialize)]
pub struct PurchaseOrderFilter {
    pub distributor_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
}

const ORDER_COLUMNS: &str = "id, distributor_id, product_name, quantity, unit_price, \
     freight_per_unit, amount_paid, total_cost, total_freight, total_amount, \
     remaining_balance, payment_status, bank_id, currency, order_date, notes, \
     created_at, updated_at";

/// Row for purchase order queries
#[derive(Debug, FromRow)]
struct PurchaseOrderRow {
    id: Uuid,
    distributor_id: Uuid,
    product_name: String,
    quantity: i64,
    unit_price: Decimal,
    freight_per_unit: Decimal,
    amount_paid: Decimal,
    total_cost: Decimal,
    total_freight: Decimal,
    total_amount: Decimal,
    remaining_balance: Decimal,
    payment_status: String,
    bank_id: Option<Uuid>,
    currency: String,
    order_date: NaiveDate,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<PurchaseOrderRow> for PurchaseOrder {
    type Error = AppError;

    fn try_from(row: PurchaseOrderRow) -> Result<Self, Self::Error> {
        Ok(PurchaseOrder {
            id: row.id,
            distributor_id: row.distributor_id,
            product_name: row.product_name,
            quantity: row.quantity,
            unit_price: row.unit_price,
            freight_per_unit: row.freight_per_unit,
            amount_paid: row.amount_paid,
            economics: PurchaseOrderDerived {
                total_cost: row.total_cost,
                total_freight: row.total_freight,
                total_amount: row.total_amount,
                remaining_balance: row.remaining_balance,
                payment_status: row.payment_status.parse()?,
            },
            bank_id: row.bank_id,
            currency: row.currency,
            order_date: row.order_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl PurchaseOrderService {
    /// Create a new PurchaseOrderService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Validate, compute and store a new purchase order
    pub async fn create(
        &self,
        input: CreatePurchaseOrderInput,
        currency: &str,
    ) -> AppResult<PurchaseOrder> {
        input.validate()?;
        self.ensure_distributor(input.distributor_id).await?;

        let derived = input.economics();
        let order_date = input.order_date.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            INSERT INTO purchase_orders (
                distributor_id, product_name, quantity, unit_price, freight_per_unit,
                amount_paid, total_cost, total_freight, total_amount, remaining_balance,
                payment_status, bank_id, currency, order_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15)
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(input.distributor_id)
        .bind(&input.product_name)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(input.freight_per_unit.unwrap_or_default())
        .bind(input.amount_paid.unwrap_or_default())
        .bind(derived.total_cost)
        .bind(derived.total_freight)
        .bind(derived.total_amount)
        .bind(derived.remaining_balance)
        .bind(derived.payment_status.as_str())
        .bind(input.bank_id)
        .bind(currency)
        .bind(order_date)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            order_id = %row.id,
            total = %derived.total_amount,
            status = %derived.payment_status,
            "Purchase order created"
        );

        row.try_into()
    }

    /// Get a purchase order by ID
    pub async fn get(&self, order_id: Uuid) -> AppResult<PurchaseOrder> {
        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM purchase_orders WHERE id = $1"
        ))
        .bind(order_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        row.try_into()
    }

    /// List purchase orders, newest first
    pub async fn list(
        &self,
        filter: &PurchaseOrderFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<PurchaseOrder>> {
        let status = filter.payment_status.map(|s| s.as_str());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM purchase_orders
            WHERE ($1::uuid IS NULL OR distributor_id = $1)
              AND ($2::text IS NULL OR payment_status = $2)
            "#,
        )
        .bind(filter.distributor_id)
        .bind(status)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            SELECT {ORDER_COLUMNS} FROM purchase_orders
            WHERE ($1::uuid IS NULL OR distributor_id = $1)
              AND ($2::text IS NULL OR payment_status = $2)
            ORDER BY order_date DESC, created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.distributor_id)
        .bind(status)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let orders = rows
            .into_iter()
            .map(PurchaseOrder::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse::new(orders, pagination, total.max(0) as u64))
    }

    /// Replace the inputs of a purchase order and recompute its totals
    ///
    /// Once deposits are recorded the paid amount belongs to them, so an
    /// update may change everything except `amount_paid`.
    pub async fn update(
        &self,
        order_id: Uuid,
        input: CreatePurchaseOrderInput,
    ) -> AppResult<PurchaseOrder> {
        input.validate()?;
        self.ensure_distributor(input.distributor_id).await?;

        let mut tx = self.db.begin().await?;

        let stored_paid = sqlx::query_scalar::<_, Decimal>(
            "SELECT amount_paid FROM purchase_orders WHERE id = $1 FOR UPDATE",
        )
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let has_deposits = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM deposits WHERE purchase_order_id = $1)",
        )
        .bind(order_id)
        .fetch_one(&mut *tx)
        .await?;

        ensure_paid_amount_unchanged(has_deposits, stored_paid, input.amount_paid)?;

        let derived = input.economics();

        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            UPDATE purchase_orders SET
                distributor_id = $2, product_name = $3, quantity = $4, unit_price = $5,
                freight_per_unit = $6, amount_paid = $7, total_cost = $8, total_freight = $9,
                total_amount = $10, remaining_balance = $11, payment_status = $12,
                bank_id = $13, order_date = COALESCE($14, order_date), notes = $15,
                updated_at = now()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(input.distributor_id)
        .bind(&input.product_name)
        .bind(input.quantity)
        .bind(input.unit_price)
        .bind(input.freight_per_unit.unwrap_or_default())
        .bind(input.amount_paid.unwrap_or_default())
        .bind(derived.total_cost)
        .bind(derived.total_freight)
        .bind(derived.total_amount)
        .bind(derived.remaining_balance)
        .bind(derived.payment_status.as_str())
        .bind(input.bank_id)
        .bind(input.order_date)
        .bind(&input.notes)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(order_id = %order_id, status = %derived.payment_status, "Purchase order updated");

        row.try_into()
    }

    /// Delete a purchase order that has no recorded deposits
    pub async fn delete(&self, order_id: Uuid) -> AppResult<()> {
        let has_deposits = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM deposits WHERE purchase_order_id = $1)",
        )
        .bind(order_id)
        .fetch_one(&self.db)
        .await?;

        if has_deposits {
            return Err(AppError::Conflict {
                resource: "purchase_order".to_string(),
                message: "Purchase order has recorded deposits".to_string(),
                message_es: "La orden de compra tiene abonos registrados".to_string(),
            });
        }

        let result = sqlx::query("DELETE FROM purchase_orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.db)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Purchase order".to_string()));
        }

        tracing::info!(order_id = %order_id, "Purchase order deleted");
        Ok(())
    }

    /// Apply a deposit (abono) to the order's remaining balance
    pub async fn record_deposit(
        &self,
        order_id: Uuid,
        deposit: DepositInput,
    ) -> AppResult<PurchaseOrder> {
        deposit.validate()?;

        let mut tx = self.db.begin().await?;

        let current = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            "SELECT {ORDER_COLUMNS} FROM purchase_orders WHERE id = $1 FOR UPDATE"
        ))
        .bind(order_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Purchase order".to_string()))?;

        let current = PurchaseOrder::try_from(current)?;
        let amount_paid = deposit
            .apply_to(Some(current.amount_paid), current.economics.total_amount)
            .map_err(|msg| AppError::Overpayment(msg.to_string()))?;

        let mut economics_input = current.economics_input();
        economics_input.amount_paid = Some(amount_paid);
        let derived = compute_purchase_order_economics(&economics_input);

        let row = sqlx::query_as::<_, PurchaseOrderRow>(&format!(
            r#"
            UPDATE purchase_orders SET
                amount_paid = $2, remaining_balance = $3, payment_status = $4, updated_at = now()
            WHERE id = $1
            RETURNING {ORDER_COLUMNS}
            "#
        ))
        .bind(order_id)
        .bind(amount_paid)
        .bind(derived.remaining_balance)
        .bind(derived.payment_status.as_str())
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            "INSERT INTO deposits (purchase_order_id, amount, bank_id, notes) VALUES ($1, $2, $3, $4)",
        )
        .bind(order_id)
        .bind(deposit.amount)
        .bind(deposit.bank_id.or(current.bank_id))
        .bind(&deposit.notes)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        tracing::info!(
            order_id = %order_id,
            amount = %deposit.amount,
            remaining = %derived.remaining_balance,
            "Deposit applied to purchase order"
        );

        row.try_into()
    }

    async fn ensure_distributor(&self, distributor_id: Uuid) -> AppResult<()> {
        let exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM distributors WHERE id = $1)")
                .bind(distributor_id)
                .fetch_one(&self.db)
                .await?;

        if !exists {
            return Err(AppError::NotFound("Distributor".to_string()));
        }
        Ok(())
    }
}

/// Refuse an edit that rewrites the paid amount of an order with deposits
fn ensure_paid_amount_unchanged(
    has_deposits: bool,
    stored_paid: Decimal,
    requested_paid: Option<Decimal>,
) -> AppResult<()> {
    if has_deposits && requested_paid.unwrap_or_default() != stored_paid {
        return Err(AppError::Conflict {
            resource: "amount_paid".to_string(),
            message: "Amount paid is managed by the recorded deposits".to_string(),
            message_es: "El monto pagado se administra con los abonos registrados".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paid_amount_is_free_without_deposits() {
        assert!(ensure_paid_amount_unchanged(false, Decimal::from(300), None).is_ok());
        assert!(ensure_paid_amount_unchanged(false, Decimal::ZERO, Some(Decimal::from(80))).is_ok());
    }

    #[test]
    fn test_paid_amount_locked_once_deposits_exist() {
        let stored = Decimal::from(250);

        assert!(ensure_paid_amount_unchanged(true, stored, Some(Decimal::new(25000, 2))).is_ok());

        match ensure_paid_amount_unchanged(true, stored, Some(Decimal::ZERO)) {
            Err(AppError::Conflict { resource, .. }) => assert_eq!(resource, "amount_paid"),
            other => panic!("unexpected result: {:?}", other),
        }
        assert!(matches!(
            ensure_paid_amount_unchanged(true, stored, None),
            Err(AppError::Conflict { .. })
        ));
    }
}
