//! Client (cliente) service

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;
use validator::Validate;

use shared::{Client, CreateClientInput, PaginatedResponse, Pagination};

use crate::error::{AppError, AppResult};

/// Client service backed by PostgreSQL
#[derive(Clone)]
pub struct ClientService {
    db: PgPool,
}

// Outstanding balance is the sum of what each client still owes on sales
const CLIENT_SELECT: &str = r#"
    SELECT c.id, c.name, c.email, c.phone, c.address,
           COALESCE((
               SELECT SUM(s.remaining_balance) FROM sales s
               WHERE s.client_id = c.id AND s.remaining_balance > 0
           ), 0) AS outstanding_balance,
           c.created_at, c.updated_at
    FROM clients c
"#;

#[derive(Debug, FromRow)]
struct ClientRow {
    id: Uuid,
    name: String,
    email: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    outstanding_balance: Decimal,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Client {
            id: row.id,
            name: row.name,
            email: row.email,
            phone: row.phone,
            address: row.address,
            outstanding_balance: row.outstanding_balance,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

impl ClientService {
    /// Create a new ClientService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// Register a client
    pub async fn create(&self, input: CreateClientInput) -> AppResult<Client> {
        input.validate()?;

        let client_id: Uuid = sqlx::query_scalar(
            r#"
            INSERT INTO clients (name, email, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id
            "#,
        )
        .bind(input.name.trim())
        .bind(&input.email)
        .bind(&input.phone)
        .bind(&input.address)
        .fetch_one(&self.db)
        .await?;

        tracing::info!(client_id = %client_id, "Client registered");

        self.get(client_id).await
    }

    /// Get a client with its outstanding balance
    pub async fn get(&self, client_id: Uuid) -> AppResult<Client> {
        let row = sqlx::query_as::<_, ClientRow>(&format!("{CLIENT_SELECT} WHERE c.id = $1"))
            .bind(client_id)
            .fetch_optional(&self.db)
            .await?
            .ok_or_else(|| AppError::NotFound("Client".to_string()))?;

        Ok(row.into())
    }

    /// List clients alphabetically
    pub async fn list(&self, pagination: &Pagination) -> AppResult<PaginatedResponse<Client>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM clients")
            .fetch_one(&self.db)
            .await?;

        let rows = sqlx::query_as::<_, ClientRow>(&format!(
            "{CLIENT_SELECT} ORDER BY c.name ASC LIMIT $1 OFFSET $2"
        ))
        .bind(pagination.limit())
        .bind(pagination.offset())
        .fetch_all(&self.db)
        .await?;

        let clients = rows.into_iter().map(Client::from).collect();
        Ok(PaginatedResponse::new(clients, pagination, total.max(0) as u64))
    }
}
