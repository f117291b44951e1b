//! Client (cliente) models

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::validation::phone_number;

/// A customer that buys from the business
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Client {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Sum of unpaid sale balances
    pub outstanding_balance: Decimal,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for registering a client
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClientInput {
    #[validate(length(min = 2, max = 100, message = "Name must be between 2 and 100 characters"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,
    #[validate(custom = "phone_number")]
    pub phone: Option<String>,
    #[validate(length(max = 250, message = "Address cannot exceed 250 characters"))]
    pub address: Option<String>,
}
