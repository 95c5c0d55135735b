//! Transaction domain models.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::errors::{Error, ValidationError};

/// Kind of balance movement a transaction records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Fund,
    Withdraw,
    Buy,
    Sell,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Fund => "fund",
            TransactionType::Withdraw => "withdraw",
            TransactionType::Buy => "buy",
            TransactionType::Sell => "sell",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fund" => Ok(TransactionType::Fund),
            "withdraw" => Ok(TransactionType::Withdraw),
            "buy" => Ok(TransactionType::Buy),
            "sell" => Ok(TransactionType::Sell),
            other => Err(ValidationError::InvalidInput(format!(
                "unknown transaction type: {}",
                other
            ))
            .into()),
        }
    }
}

/// A recorded ledger movement. Never updated once written.
///
/// `amount` is the cash that moved for fund/withdraw/buy and the principal
/// sold for sell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i32,
    pub user_id: i32,
    pub timestamp: NaiveDateTime,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub term: Option<String>,
    pub amount: Decimal,
    pub yield_at_transaction: Option<Decimal>,
    pub balance_after: Decimal,
    pub holding_id: Option<i32>,
}

/// Input model for a transaction; the store assigns id and timestamp.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub user_id: i32,
    pub transaction_type: TransactionType,
    pub term: Option<String>,
    pub amount: Decimal,
    pub yield_at_transaction: Option<Decimal>,
    pub balance_after: Decimal,
    pub holding_id: Option<i32>,
}

impl NewTransaction {
    /// A fund or withdraw record.
    pub fn cash(
        user_id: i32,
        transaction_type: TransactionType,
        amount: Decimal,
        balance_after: Decimal,
    ) -> Self {
        Self {
            user_id,
            transaction_type,
            term: None,
            amount,
            yield_at_transaction: None,
            balance_after,
            holding_id: None,
        }
    }
}
