use diesel::dsl::max;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{NewTransactionDB, TransactionDB};
use crate::db::get_connection;
use crate::errors::{IntoCore, StorageError};
use crate::schema::transactions;
use treasury_core::transactions::{NewTransaction, Transaction, TransactionRepositoryTrait};
use treasury_core::utils::time_utils::{ledger_now, next_ledger_timestamp};
use treasury_core::Result;

pub struct TransactionRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl TransactionRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        TransactionRepository { pool }
    }
}

/// Append a transaction, stamping it after the user's latest one.
pub(crate) fn insert_transaction(
    conn: &mut SqliteConnection,
    new_transaction: NewTransaction,
) -> Result<Transaction> {
    let previous = transactions::table
        .filter(transactions::user_id.eq(new_transaction.user_id))
        .select(max(transactions::timestamp))
        .first::<Option<chrono::NaiveDateTime>>(conn)
        .map_err(StorageError::from)?;
    let timestamp = next_ledger_timestamp(ledger_now(), previous);

    let row = NewTransactionDB::from_domain(new_transaction, timestamp);
    let created = diesel::insert_into(transactions::table)
        .values(&row)
        .returning(TransactionDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Transaction::try_from(created)
}

impl TransactionRepositoryTrait for TransactionRepository {
    fn list_by_user(&self, user_id: i32) -> Result<Vec<Transaction>> {
        let mut conn = get_connection(&self.pool)?;
        transactions::table
            .filter(transactions::user_id.eq(user_id))
            .order((transactions::timestamp.desc(), transactions::id.desc()))
            .select(TransactionDB::as_select())
            .load::<TransactionDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Transaction::try_from)
            .collect()
    }
}
