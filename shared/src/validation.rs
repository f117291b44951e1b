//! Validation utilities for CHRONOS forms
//!
//! Two flavours live here: plain checks returning `Result<(), &'static str>`
//! and adapters returning `validator::ValidationError` so the same rules can
//! be attached to input structs with `#[validate(custom = "...")]`.

use std::borrow::Cow;

use rust_decimal::Decimal;
use validator::ValidationError;

pub(crate) const PAYMENT_EXCEEDS_TOTAL: &str = "Amount paid cannot exceed the total";

// ============================================================================
// Money and Quantity Validations
// ============================================================================

/// Validate an amount is zero or more
pub fn validate_non_negative(amount: Decimal) -> Result<(), &'static str> {
    if amount < Decimal::ZERO {
        return Err("Amount cannot be negative");
    }
    Ok(())
}

/// Validate an amount is strictly positive
pub fn validate_positive(amount: Decimal) -> Result<(), &'static str> {
    if amount <= Decimal::ZERO {
        return Err("Amount must be greater than zero");
    }
    Ok(())
}

/// Validate the sale price exceeds the purchase price
///
/// Only enforced once both prices are filled in (positive).
pub fn validate_price_spread(purchase: Decimal, sale: Decimal) -> Result<(), &'static str> {
    if purchase > Decimal::ZERO && sale > Decimal::ZERO && sale <= purchase {
        return Err("Sale price must be greater than purchase price");
    }
    Ok(())
}

/// Validate a payment does not exceed what is owed
pub fn validate_payment_within_total(paid: Decimal, total: Decimal) -> Result<(), &'static str> {
    if paid > total {
        return Err(PAYMENT_EXCEEDS_TOTAL);
    }
    Ok(())
}

/// Validate a transfer moves money between two different accounts
pub fn validate_distinct_accounts<T: PartialEq>(origin: &T, destination: &T) -> Result<(), &'static str> {
    if origin == destination {
        return Err("Origin and destination accounts must be different");
    }
    Ok(())
}

// ============================================================================
// Contact Validations
// ============================================================================

/// Validate a phone number (10 digits once separators are removed)
/// Accepts: 5512345678, 55-1234-5678, (55) 1234 5678, +52 55 1234 5678
pub fn validate_phone(phone: &str) -> Result<(), &'static str> {
    if phone
        .chars()
        .any(|c| !(c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')' | '+' | '.')))
    {
        return Err("Phone number contains invalid characters");
    }

    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();
    match digits.len() {
        10 => Ok(()),
        // Country code 52 in front
        12 if digits.starts_with("52") => Ok(()),
        _ => Err("Phone number must have 10 digits"),
    }
}

// ============================================================================
// validator Adapters
// ============================================================================

fn to_field_error(code: &'static str, result: Result<(), &'static str>) -> Result<(), ValidationError> {
    result.map_err(|message| {
        let mut err = ValidationError::new(code);
        err.message = Some(Cow::Borrowed(message));
        err
    })
}

pub fn non_negative_amount(amount: &Decimal) -> Result<(), ValidationError> {
    to_field_error("non_negative", validate_non_negative(*amount))
}

pub fn positive_amount(amount: &Decimal) -> Result<(), ValidationError> {
    to_field_error("positive", validate_positive(*amount))
}

pub fn phone_number(phone: &str) -> Result<(), ValidationError> {
    to_field_error("phone", validate_phone(phone))
}

pub(crate) fn price_spread(purchase: Decimal, sale: Decimal) -> Result<(), ValidationError> {
    to_field_error("price_spread", validate_price_spread(purchase, sale))
}

pub(crate) fn payment_within_total(paid: Decimal, total: Decimal) -> Result<(), ValidationError> {
    to_field_error("overpayment", validate_payment_within_total(paid, total))
}

pub(crate) fn distinct_accounts<T: PartialEq>(origin: &T, destination: &T) -> Result<(), ValidationError> {
    to_field_error("same_account", validate_distinct_accounts(origin, destination))
}
