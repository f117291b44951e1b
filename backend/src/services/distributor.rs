//! Distributor (distribuidor) service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::{CreateDistributorInput, Distributor, PaginatedResponse, Pagination};

use crate::error::{AppError, AppResult};

/// Distributor service backed by PostgreSQL
#[derive(Clone)]
pub struct DistributorService {
    db: PgPool,
}

const DISTRIBUTOR_SELECT: &str = r#"
    SELECT d.id, d.name, d.contact_name, d.email, d.phone, d.address,
           COALESCE((
               SELECT SUM(o.remaining_balance) FROM purchase_orders o
               WHERE o.distributor_id = d.id AND o.remaining_balance > 0
           ), 0) AS outstanding_debt,
           d.created_at, d.updated_at
    FROM distributors d
"#;

#[derive(Debug, FromRow)]
struct DistributorRow {
    id: Uuid,
    name: String,
    contact_name: Option<String>,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    outstanding_debt: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<DistributorRow> for Distributor {
    fn from(row: DistributorRow) -> Self {
        Distributor {
            id: row.id,
            name: row.name,
            contact_name: row.contact_name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            outstanding_debt: row.outstanding_debt,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl DistributorService {
    /// Create a new DistributorService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a distributor
    pub async fn create(&self, input: CreateDistributorInput) -> AppResult<Distributor> {
        input.validate()?;

        let distributor_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO distributors (name, contact_name, email, phone, address)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.contact_name)
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(distributor_id = %distributor_id, "Distributor registered");

        self.get(distributor_id).await
    }

    /// Get a distributor with the debt still owed to it
    pub async fn get(&self, distributor_id: Uuid) -> AppResult<Distributor> {
        let row = sqlx::query_as::<_, DistributorRow>(&format!(
            "{DISTRIBUTOR_SELECT} WHERE d.id = $1"
        ))
        .bind(distributor_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Distributor".to_string()))?;

        Ok(row.into())
    }

    /// List distributors alphabetically
    pub async fn list(&self, pagination: &Pagination) -> AppResult<PaginatedResponse<Distributor>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM distributors")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, DistributorRow>(&format!(
            "{DISTRIBUTOR_SELECT} ORDER BY d.name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let distributors = rows.into_iter().map(Distributor::from).collect();
        Ok(PaginatedResponse::new(distributors, pagination, total.max(0) as u64))
    }
}
