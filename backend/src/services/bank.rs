//! Read-only access to bank and vault balances

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use shared::{AccountKind, Bank, CapitalSummary};

use crate::error::{AppError, AppResult};

/// Bank service backed by PostgreSQL
#[derive(Clone)]
pub struct BankService {
    db: PgPool,
}

#[derive(Debug, FromRow)]
struct BankRow {
    id: Uuid,
    name: String,
    kind: String,
    balance: Decimal,
    currency: String,
    updated_at: DateTime<Utc>,
}

impl TryFrom<BankRow> for Bank {
    type Error = AppError;

    fn try_from(row: BankRow) -> Result<Self, Self::Error> {
        let kind = AccountKind::parse(&row.kind).ok_or_else(|| {
            AppError::CorruptRecord(format!("unknown account kind: {}", row.kind))
        })?;

        Ok(Bank {
            id: row.id,
            name: row.name,
            kind,
            balance: row.balance,
            currency: row.currency,
            updated_at: row.updated_at,
        })
    }
}

impl BankService {
    /// Create a new BankService instance
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// All accounts with bank, vault and total capital
    pub async fn summary(&self) -> AppResult<CapitalSummary> {
        let rows = sqlx::query_as::<_, BankRow>(
            "SELECT id, name, kind, balance, currency, updated_at FROM banks ORDER BY kind, name",
        )
        .fetch_all(&self.db)
        .await?;

        let accounts = rows
            .into_iter()
            .map(Bank::try_from)
            .collect::<AppResult<Vec<_>>>()?;

        Ok(CapitalSummary::from_accounts(accounts))
    }

    /// Get a single account
    pub async fn get(&self, bank_id: Uuid) -> AppResult<Bank> {
        sqlx::query_as::<_, BankRow>(
            "SELECT id, name, kind, balance, currency, updated_at FROM banks WHERE id = $1",
        )
        .bind(bank_id)
        .fetch_optional(&self.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Bank account".to_string()))?
        .try_into()
    }
}
