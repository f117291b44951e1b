//! Money movements: expenses (gastos), deposits (abonos) and transfers

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::numeric::coerce;
use crate::validation::{
    distinct_accounts, positive_amount, validate_payment_within_total, PAYMENT_EXCEEDS_TOTAL,
};

/// Expense categories offered by the expense form
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ExpenseCategory {
    Operating,
    Payroll,
    Freight,
    Services,
    Taxes,
    Other,
}

/// An expense paid out of an account
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ExpenseInput {
    #[validate(length(min = 3, max = 200, message = "Concept must be between 3 and 200 characters"))]
    pub concept: String,
    #[validate(custom = "positive_amount")]
    pub amount: Decimal,
    pub category: ExpenseCategory,
    pub bank_id: Uuid,
    pub expense_date: Option<NaiveDate>,
}

/// A payment toward the balance of an order or sale
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct DepositInput {
    #[validate(custom = "positive_amount")]
    pub amount: Decimal,
    pub bank_id: Option<Uuid>,
    #[validate(length(max = 500, message = "Notes cannot exceed 500 characters"))]
    pub notes: Option<String>,
}

impl DepositInput {
    /// New paid amount once this deposit is applied
    ///
    /// Refuses deposits that would pay more than `total_due`. A sum too
    /// large for `Decimal` is refused the same way.
    pub fn apply_to(&self, amount_paid: Option<Decimal>, total_due: Decimal) -> Result<Decimal, &'static str> {
        let paid = coerce(amount_paid)
            .checked_add(self.amount)
            .ok_or(PAYMENT_EXCEEDS_TOTAL)?;
        validate_payment_within_total(paid, total_due)?;
        Ok(paid)
    }
}

/// Money moved between two accounts
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_transfer_accounts", skip_on_field_errors = false))]
pub struct TransferInput {
    pub origin_bank_id: Uuid,
    pub destination_bank_id: Uuid,
    #[validate(custom = "positive_amount")]
    pub amount: Decimal,
    #[validate(length(max = 200, message = "Concept cannot exceed 200 characters"))]
    pub concept: Option<String>,
}

fn validate_transfer_accounts(input: &TransferInput) -> Result<(), ValidationError> {
    distinct_accounts(&input.origin_bank_id, &input.destination_bank_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expense_needs_positive_amount() {
        let expense = ExpenseInput {
            concept: "Renta bodega".to_string(),
            amount: Decimal::ZERO,
            category: ExpenseCategory::Operating,
            bank_id: Uuid::new_v4(),
            expense_date: None,
        };
        let errors = expense.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn test_deposit_accumulates() {
        let deposit = DepositInput {
            amount: Decimal::from(100),
            bank_id: None,
            notes: None,
        };
        assert_eq!(
            deposit.apply_to(Some(Decimal::from(150)), Decimal::from(500)),
            Ok(Decimal::from(250))
        );
        assert_eq!(deposit.apply_to(None, Decimal::from(100)), Ok(Decimal::from(100)));
    }

    #[test]
    fn test_deposit_cannot_overpay() {
        let deposit = DepositInput {
            amount: Decimal::from(100),
            bank_id: None,
            notes: None,
        };
        assert!(deposit.apply_to(Some(Decimal::from(450)), Decimal::from(500)).is_err());
    }

    #[test]
    fn test_deposit_sum_beyond_decimal_range_is_overpayment() {
        let deposit = DepositInput {
            amount: Decimal::MAX,
            bank_id: None,
            notes: None,
        };
        assert_eq!(
            deposit.apply_to(Some(Decimal::MAX - Decimal::ONE), Decimal::MAX),
            Err("Amount paid cannot exceed the total")
        );
    }

    #[test]
    fn test_transfer_between_same_account_rejected() {
        let account = Uuid::new_v4();
        let transfer = TransferInput {
            origin_bank_id: account,
            destination_bank_id: account,
            amount: Decimal::from(1000),
            concept: None,
        };
        assert!(transfer.validate().unwrap_err().errors().contains_key("__all__"));
    }

    #[test]
    fn test_transfer_valid() {
        let transfer = TransferInput {
            origin_bank_id: Uuid::new_v4(),
            destination_bank_id: Uuid::new_v4(),
            amount: Decimal::from(1000),
            concept: Some("Depósito a bóveda".to_string()),
        };
        assert!(transfer.validate().is_ok());
    }

    #[test]
    fn test_expense_category_wire_format() {
        assert_eq!(serde_json::to_string(&ExpenseCategory::Payroll).unwrap(), "\"payroll\"");
    }
}
