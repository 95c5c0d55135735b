//! User domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::Result;

/// Domain model representing a ledger user and their cash balance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub balance: Decimal,
    pub created_at: NaiveDateTime,
}

/// Input model for creating a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    #[serde(default)]
    pub balance: Decimal,
}

impl NewUser {
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Self {
            name: name.into(),
            balance,
        }
    }

    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(
                ValidationError::InvalidInput("User name cannot be empty".to_string()).into(),
            );
        }
        if self.balance < Decimal::ZERO {
            return Err(ValidationError::InvalidInput(
                "Opening balance cannot be negative".to_string(),
            )
            .into());
        }
        Ok(())
    }
}
