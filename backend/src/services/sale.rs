//! Sale service: validation, profit distribution and persistence

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::{
    compute_sale_economics, CreateSaleInput, DepositInput, Distribution, PaginatedResponse,
    Pagination, PaymentStatus, Sale, SaleDerived,
};

use crate::error::{AppError, AppResult};

/// Sale service backed by PostgreSQL
#[derive(Clone)]
pub struct SaleService {
    db: PgPool,
}

/// Optional filters for listing sales
#[derive(Debug, Default, Deserialize)]
pub struct SaleFilter {
    pub client_id: Option<Uuid>,
    pub payment_status: Option<PaymentStatus>,
}

const SALE_COLUMNS: &str = "id, client_id, product_name, quantity, sale_unit_price, \
     purchase_unit_price, freight_per_unit, amount_paid, total_sale_value, total_cost, \
     total_freight, gross_profit, remaining_balance, payment_status, payment_fraction, \
     cost_bucket, freight_bucket, profit_bucket, bank_id, currency, sale_date, notes, \
     created_at, updated_at";

#[derive(Debug, FromRow)]
struct SaleRow {
    id: Uuid,
    client_id: Uuid,
    product_name: String,
    quantity: i64,
    sale_unit_price: Decimal,
    purchase_unit_price: Decimal,
    freight_per_unit: Decimal,
    amount_paid: Decimal,
    total_sale_value: Decimal,
    total_cost: Decimal,
    total_freight: Decimal,
    gross_profit: Decimal,
    remaining_balance: Decimal,
    payment_status: String,
    payment_fraction: Decimal,
    cost_bucket: Decimal,
    freight_bucket: Decimal,
    profit_bucket: Decimal,
    bank_id: Option<Uuid>,
    currency: String,
    sale_date: NaiveDate,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<SaleRow> for Sale {
    type Error = AppError;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        Ok(Sale {
            id: row.id,
            client_id: row.client_id,
            product_name: row.product_name,
            quantity: row.quantity,
            sale_unit_price: row.sale_unit_price,
            purchase_unit_price: row.purchase_unit_price,
            freight_per_unit: row.freight_per_unit,
            amount_paid: row.amount_paid,
            economics: SaleDerived {
                total_sale_value: row.total_sale_value,
                total_cost: row.total_cost,
                total_freight: row.total_freight,
                gross_profit: row.gross_profit,
                remaining_balance: row.remaining_balance,
                payment_status: row.payment_status.parse()?,
                payment_fraction: row.payment_fraction,
                distribution: Distribution {
                    cost_bucket: row.cost_bucket,
                    freight_bucket: row.freight_bucket,
                    profit_bucket: row.profit_bucket,
                },
            },
            bank_id: row.bank_id,
            currency: row.currency,
            sale_date: row.sale_date,
            notes: row.notes,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

impl SaleService {
    /// Create a new SaleService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Validate, compute and store a new sale
    pub async fn create(&self, input: CreateSaleInput, currency: &str) -> AppResult<Sale> {
        input.validate()?;

        let client_exists =
            sqlx::query_scalar::<_, bool>("SELECT EXISTS(SELECT 1 FROM clients WHERE id = $1)")
                .bind(input.client_id)
                .fetch_one(&self.db)
                .await?;

        if !client_exists {
            return Err(AppError::NotFound("Client".to_string()));
        }

        let derived = input.economics();
        let sale_date = input.sale_date.unwrap_or_else(|| Utc::now().date_naive());

        let row = sqlx::query_as::<_, SaleRow>(&format!(
            r#"
            INSERT INTO sales (
                client_id, product_name, quantity, sale_unit_price, purchase_unit_price,
                freight_per_unit, amount_paid, total_sale_value, total_cost, total_freight,
                gross_profit, remaining_balance, payment_status, payment_fraction,
                cost_bucket, freight_bucket, profit_bucket, bank_id, currency, sale_date, notes
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17,
                    $18, $19, $20, $21)
            RETURNING {SALE_COLUMNS}
            "#
        ))
        .bind(input.client_id)
        .bind(&input.product_name)
        .bind(input.quantity)
        .bind(input.sale_unit_price)
        .bind(input.purchase_unit_price.unwrap_or_default())
        .bind(input.freight_per_unit.unwrap_or_default())
        .bind(input.amount_paid.unwrap_or_default())
        .bind(derived.total_sale_value)
        .bind(derived.total_cost)
        .bind(derived.total_freight)
        .bind(derived.gross_profit)
        .bind(derived.remaining_balance)
        .bind(derived.payment_status.as_str())
        .bind(derived.payment_fraction)
        .bind(derived.distribution.cost_bucket)
        .bind(derived.distribution.freight_bucket)
        .bind(derived.distribution.profit_bucket)
        .bind(input.bank_id)
        .bind(currency)
        .bind(sale_date)
        .bind(&input.notes)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(
            sale_id = %row.id,
            total = %derived.total_sale_value,
            profit = %derived.gross_profit,
            status = %derived.payment_status,
            "Sale registered"
        );

        row.try_into()
    }

    /// Get a sale by ID
    pub async fn get(&self, sale_id: Uuid) -> AppResult<Sale> {
        let row = sqlx::query_as::<_, SaleRow>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = $1"
        ))
        .bind(sale_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        row.try_into()
    }

    /// List sales, newest first
    pub async fn list(
        &self,
        filter: &SaleFilter,
        pagination: &Pagination,
    ) -> AppResult<PaginatedResponse<Sale>> {
        let status = filter.payment_status.map(|s| s.as_str());

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM sales
            WHERE ($1::uuid IS NULL OR client_id = $1)
              AND ($2::text IS NULL OR payment_status = $2)
            "#,
        )
        .bind(filter.client_id)
        .bind(status)
        .fetch_one(&self.db)
        .await?;

        let rows = sqlx::query_as::<_, SaleRow>(&format!(
            r#"
            SELECT {SALE_COLUMNS} FROM sales
            WHERE ($1::uuid IS NULL OR client_id = $1)
              AND ($2::text IS NULL OR payment_status = $2)
            ORDER BY sale_date DESC, created_at DESC
            LIMIT $3 OFFSET $4
            "#
        ))
        .bind(filter.client_id)
        .bind(status)
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let sales = rows
            .into_iter()
            .map(Sale::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(PaginatedResponse::new(sales, pagination, total.max(0) as u64))
    }

    /// Apply a deposit (abono) to the sale and redistribute collected money
    pub async fn record_deposit(&self, sale_id: Uuid, deposit: DepositInput) -> AppResult<Sale> {
        deposit.validate()?;

        let mut tx = self.db.begin().await?;

        let current = sqlx::query_as::<_, SaleRow>(&format!(
            "SELECT {SALE_COLUMNS} FROM sales WHERE id = $1 FOR UPDATE"
        ))
        .bind(sale_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| AppError::NotFound("Sale".to_string()))?;

        let current = Sale::try_from(current)?;
        let amount_paid = deposit
            .apply_to(Some(current.amount_paid), current.economics.total_sale_value)
            .map_err(|msg| AppError::Overpayment(msg.to_string()))?;

        let mut economics_input = current.economics_input();
        economics_input.amount_paid = Some(amount_paid);
        let derived = compute_sale_economics(&economics_input);

        let row = sqlx::query_as::<_, SaleRow>(&format!(
            r#"
            UPDATE sales SET
                amount_paid = $2, remaining_balance = $3, payment_status = $4,
                payment_fraction = $5, cost_bucket = $6, freight_bucket = $7,
                profit_bucket = $8, updated_at = now()
            WHERE id = $1
            RETURNING {SALE_COLUMNS}
            "#
        ))
        .bind(sale_id)
        .bind(amount_paid)
        .bind(derived.remaining_balance)
        .bind(derived.payment_status.as_str())
        .bind(derived.payment_fraction)
        .bind(derived.distribution.cost_bucket)
        .bind(derived.distribution.freight_bucket)
        .bind(derived.distribution.profit_bucket)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO deposits (sale_id, amount, bank_id, notes) VALUES ($1, $2, $3, $4)")
            .bind(sale_id)
            .bind(deposit.amount)
            .bind(deposit.bank_id.or(current.bank_id))
            .bind(&deposit.notes)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!(
            sale_id = %sale_id,
            amount = %deposit.amount,
            status = %derived.payment_status,
            "Deposit applied to sale"
        );

        row.try_into()
    }
}
