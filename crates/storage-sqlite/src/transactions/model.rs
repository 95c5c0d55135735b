//! Database models for transactions.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decimal_to_text, parse_decimal, parse_optional_decimal};
use treasury_core::transactions::{NewTransaction, Transaction};

/// Database model for transactions
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct TransactionDB {
    pub id: i32,
    pub user_id: i32,
    pub timestamp: NaiveDateTime,
    pub transaction_type: String,
    pub term: Option<String>,
    pub amount: String,
    pub yield_at_transaction: Option<String>,
    pub balance_after: String,
    pub holding_id: Option<i32>,
}

/// Database model for recording a transaction
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::transactions)]
pub struct NewTransactionDB {
    pub user_id: i32,
    pub timestamp: NaiveDateTime,
    pub transaction_type: String,
    pub term: Option<String>,
    pub amount: String,
    pub yield_at_transaction: Option<String>,
    pub balance_after: String,
    pub holding_id: Option<i32>,
}

impl NewTransactionDB {
    pub fn from_domain(domain: NewTransaction, timestamp: NaiveDateTime) -> Self {
        Self {
            user_id: domain.user_id,
            timestamp,
            transaction_type: domain.transaction_type.as_str().to_string(),
            term: domain.term,
            amount: decimal_to_text(domain.amount),
            yield_at_transaction: domain.yield_at_transaction.map(decimal_to_text),
            balance_after: decimal_to_text(domain.balance_after),
            holding_id: domain.holding_id,
        }
    }
}

impl TryFrom<TransactionDB> for Transaction {
    type Error = treasury_core::Error;

    fn try_from(db: TransactionDB) -> Result<Self, Self::Error> {
        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            timestamp: db.timestamp,
            transaction_type: db.transaction_type.parse()?,
            amount: parse_decimal(&db.amount, "amount")?,
            yield_at_transaction: parse_optional_decimal(
                db.yield_at_transaction.as_deref(),
                "yield_at_transaction",
            )?,
            balance_after: parse_decimal(&db.balance_after, "balance_after")?,
            holding_id: db.holding_id,
            term: db.term,
        })
    }
}
