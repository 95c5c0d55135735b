use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use rust_decimal::Decimal;

use crate::db::WriteHandle;
use crate::errors::StorageError;
use crate::holdings::{find_holding, insert_holding, update_remaining_amount};
use crate::schema::users;
use crate::transactions::insert_transaction;
use crate::users::find_user;
use crate::utils::decimal_to_text;
use treasury_core::holdings::Holding;
use treasury_core::ledger::{
    credit, debit, ensure_withdrawable, LedgerEntry, LedgerError, LedgerRepositoryTrait,
    PurchaseOrder, PurchaseReceipt, SaleOrder, SaleReceipt,
};
use treasury_core::transactions::{NewTransaction, TransactionType};
use treasury_core::users::User;
use treasury_core::utils::time_utils::ledger_now;
use treasury_core::Result;

/// Ledger writes, each run as one writer job.
///
/// A job executes inside `BEGIN IMMEDIATE`, so the user and holding rows it
/// reads cannot change until it commits. Every job re-runs the same checks
/// the service ran before mutating anything.
pub struct LedgerRepository {
    writer: WriteHandle,
}

impl LedgerRepository {
    pub fn new(writer: WriteHandle) -> Self {
        LedgerRepository { writer }
    }
}

fn load_user(conn: &mut SqliteConnection, user_id: i32) -> Result<User> {
    find_user(conn, user_id)?
        .ok_or_else(|| LedgerError::NotFound(format!("user {} not found", user_id)).into())
}

fn load_holding(conn: &mut SqliteConnection, holding_id: i32) -> Result<Holding> {
    find_holding(conn, holding_id)?
        .ok_or_else(|| LedgerError::NotFound(format!("holding {} not found", holding_id)).into())
}

fn set_balance(conn: &mut SqliteConnection, user: User, balance: Decimal) -> Result<User> {
    diesel::update(users::table.find(user.id))
        .set(users::balance.eq(decimal_to_text(balance)))
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(User { balance, ..user })
}

#[async_trait]
impl LedgerRepositoryTrait for LedgerRepository {
    async fn deposit(&self, user_id: i32, amount: Decimal) -> Result<LedgerEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<LedgerEntry> {
                let user = load_user(conn, user_id)?;
                let balance = credit(user.balance, amount)?;
                let user = set_balance(conn, user, balance)?;
                let transaction = insert_transaction(
                    conn,
                    NewTransaction::cash(user_id, TransactionType::Fund, amount, balance),
                )?;
                debug!("Deposited {} for user {}", amount, user_id);
                Ok(LedgerEntry { user, transaction })
            })
            .await
    }

    async fn withdraw(&self, user_id: i32, amount: Decimal) -> Result<LedgerEntry> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<LedgerEntry> {
                let user = load_user(conn, user_id)?;
                ensure_withdrawable(&user, amount)?;
                let balance = debit(user.balance, amount)?;
                let user = set_balance(conn, user, balance)?;
                let transaction = insert_transaction(
                    conn,
                    NewTransaction::cash(user_id, TransactionType::Withdraw, amount, balance),
                )?;
                debug!("Withdrew {} for user {}", amount, user_id);
                Ok(LedgerEntry { user, transaction })
            })
            .await
    }

    async fn purchase(&self, order: PurchaseOrder) -> Result<PurchaseReceipt> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PurchaseReceipt> {
                let user = load_user(conn, order.user_id)?;
                order.ensure_affordable(&user)?;

                let balance = debit(user.balance, order.purchase_price)?;
                let user = set_balance(conn, user, balance)?;
                let holding = insert_holding(conn, order.to_new_holding(ledger_now()))?;
                let transaction =
                    insert_transaction(conn, order.to_new_transaction(holding.id, balance))?;

                debug!(
                    "Recorded holding {} ({} {}) for user {}",
                    holding.id, order.face_value, order.term, order.user_id
                );
                Ok(PurchaseReceipt {
                    user,
                    holding,
                    transaction,
                    face_value: order.face_value,
                    purchase_price: order.purchase_price,
                    discount: order.discount(),
                })
            })
            .await
    }

    async fn sell(&self, order: SaleOrder) -> Result<SaleReceipt> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<SaleReceipt> {
                let holding = load_holding(conn, order.holding_id)?;
                let proceeds = order.quote(&holding)?;
                let user = load_user(conn, order.user_id)?;

                let remaining = debit(holding.remaining_amount, order.amount)?;
                let balance = credit(user.balance, proceeds)?;
                let holding = update_remaining_amount(conn, holding.id, remaining)?;
                let user = set_balance(conn, user, balance)?;
                let transaction =
                    insert_transaction(conn, order.to_new_transaction(&holding, balance))?;

                debug!(
                    "Sold {} of holding {} for user {} (proceeds {})",
                    order.amount, holding.id, order.user_id, proceeds
                );
                Ok(SaleReceipt {
                    user,
                    holding,
                    transaction,
                    proceeds,
                })
            })
            .await
    }
}
