//! Bank and vault (banco/bóveda) balance models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Where money is held
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AccountKind {
    #[serde(rename = "banco")]
    Bank,
    /// Cash kept on premises
    #[serde(rename = "boveda")]
    Vault,
}

impl AccountKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccountKind::Bank => "banco",
            AccountKind::Vault => "boveda",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "banco" => Some(AccountKind::Bank),
            "boveda" => Some(AccountKind::Vault),
            _ => None,
        }
    }
}

/// Current balance of a bank account or vault
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    pub id: Uuid,
    pub name: String,
    pub kind: AccountKind,
    pub balance: Decimal,
    pub currency: String,
    pub updated_at: DateTime<Utc>,
}

/// Balances with the capital available across all accounts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapitalSummary {
    pub accounts: Vec<Bank>,
    pub total_capital: Decimal,
    pub bank_total: Decimal,
    pub vault_total: Decimal,
}

impl CapitalSummary {
    pub fn from_accounts(accounts: Vec<Bank>) -> Self {
        let (bank_total, vault_total) =
            accounts
                .iter()
                .fold((Decimal::ZERO, Decimal::ZERO), |(banks, vaults), account| {
                    match account.kind {
                        AccountKind::Bank => (banks.saturating_add(account.balance), vaults),
                        AccountKind::Vault => (banks, vaults.saturating_add(account.balance)),
                    }
                });

        Self {
            accounts,
            total_capital: bank_total.saturating_add(vault_total),
            bank_total,
            vault_total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(kind: AccountKind, balance: i64) -> Bank {
        Bank {
            id: Uuid::new_v4(),
            name: "Cuenta".to_string(),
            kind,
            balance: Decimal::from(balance),
            currency: "MXN".to_string(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_capital_summary_totals() {
        let summary = CapitalSummary::from_accounts(vec![
            account(AccountKind::Bank, 1500),
            account(AccountKind::Vault, 250),
            account(AccountKind::Bank, -100),
        ]);

        assert_eq!(summary.bank_total, Decimal::from(1400));
        assert_eq!(summary.vault_total, Decimal::from(250));
        assert_eq!(summary.total_capital, Decimal::from(1650));
        assert_eq!(summary.accounts.len(), 3);
    }

    #[test]
    fn test_large_balances_saturate() {
        let mut accounts = vec![account(AccountKind::Bank, 0), account(AccountKind::Vault, 0)];
        accounts[0].balance = Decimal::MAX;
        accounts[1].balance = Decimal::MAX;
        accounts.push(account(AccountKind::Bank, 1));

        let summary = CapitalSummary::from_accounts(accounts);
        assert_eq!(summary.bank_total, Decimal::MAX);
        assert_eq!(summary.vault_total, Decimal::MAX);
        assert_eq!(summary.total_capital, Decimal::MAX);
    }

    #[test]
    fn test_empty_summary() {
        let summary = CapitalSummary::from_accounts(Vec::new());
        assert_eq!(summary.total_capital, Decimal::ZERO);
    }

    #[test]
    fn test_account_kind_labels() {
        assert_eq!(AccountKind::parse("boveda"), Some(AccountKind::Vault));
        assert_eq!(AccountKind::parse(AccountKind::Bank.as_str()), Some(AccountKind::Bank));
        assert_eq!(AccountKind::parse("caja"), None);
    }
}
