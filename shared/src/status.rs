//! Stock and payment status classification
//!
//! Statuses travel over the wire with the product's Spanish labels
//! (`disponible`, `parcial`, ...), which is also what `Display` prints.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Badge tone used by the UI when rendering a status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Success,
    Warning,
    Danger,
}

/// Error returned when a status label is not recognised
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind} status: {label}")]
pub struct ParseStatusError {
    pub kind: &'static str,
    pub label: String,
}

/// Stock level of a product relative to its minimum threshold
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum StockStatus {
    #[serde(rename = "disponible")]
    Available,
    #[serde(rename = "bajo")]
    Low,
    #[serde(rename = "agotado")]
    Depleted,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Available => "disponible",
            StockStatus::Low => "bajo",
            StockStatus::Depleted => "agotado",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            StockStatus::Available => Tone::Success,
            StockStatus::Low => Tone::Warning,
            StockStatus::Depleted => Tone::Danger,
        }
    }
}

impl std::fmt::Display for StockStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "disponible" => Ok(StockStatus::Available),
            "bajo" => Ok(StockStatus::Low),
            "agotado" => Ok(StockStatus::Depleted),
            other => Err(ParseStatusError {
                kind: "stock",
                label: other.to_string(),
            }),
        }
    }
}

/// Payment progress of an order or sale
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum PaymentStatus {
    #[serde(rename = "completo")]
    Complete,
    #[serde(rename = "parcial")]
    Partial,
    #[serde(rename = "pendiente")]
    Pending,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Complete => "completo",
            PaymentStatus::Partial => "parcial",
            PaymentStatus::Pending => "pendiente",
        }
    }

    pub fn tone(&self) -> Tone {
        match self {
            PaymentStatus::Complete => Tone::Success,
            PaymentStatus::Partial => Tone::Warning,
            PaymentStatus::Pending => Tone::Danger,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentStatus {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completo" => Ok(PaymentStatus::Complete),
            "parcial" => Ok(PaymentStatus::Partial),
            "pendiente" => Ok(PaymentStatus::Pending),
            other => Err(ParseStatusError {
                kind: "payment",
                label: other.to_string(),
            }),
        }
    }
}

/// Classify stock against its minimum threshold
///
/// An empty shelf is always `Depleted`, even when no minimum is configured.
/// A minimum of zero disables the `Low` band.
pub fn classify_stock(quantity: i64, minimum: i64) -> StockStatus {
    if quantity == 0 {
        StockStatus::Depleted
    } else if minimum > 0 && quantity <= minimum {
        StockStatus::Low
    } else {
        StockStatus::Available
    }
}

/// Classify how much of `total_due` has been paid
///
/// `Complete` is checked first, so a zero total is always complete.
pub fn classify_payment(amount_paid: Decimal, total_due: Decimal) -> PaymentStatus {
    if amount_paid >= total_due {
        PaymentStatus::Complete
    } else if amount_paid > Decimal::ZERO {
        PaymentStatus::Partial
    } else {
        PaymentStatus::Pending
    }
}
