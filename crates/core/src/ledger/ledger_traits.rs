//! Ledger repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::ledger_model::{LedgerEntry, PurchaseOrder, PurchaseReceipt, SaleOrder, SaleReceipt};
use crate::errors::Result;
use crate::holdings::Holding;
use crate::transactions::Transaction;
use crate::users::User;

/// Atomic ledger writes.
///
/// Each method is one all-or-nothing unit. Implementations must re-read the
/// user (and, for sales, the holding) under an exclusive lock and re-run the
/// shared checks before mutating anything; any failure discards every write
/// of the unit.
#[async_trait]
pub trait LedgerRepositoryTrait: Send + Sync {
    /// Credits `amount` and records a `fund` transaction.
    async fn deposit(&self, user_id: i32, amount: Decimal) -> Result<LedgerEntry>;

    /// Debits `amount` and records a `withdraw` transaction.
    async fn withdraw(&self, user_id: i32, amount: Decimal) -> Result<LedgerEntry>;

    /// Inserts the holding, debits the purchase price and records a `buy`.
    async fn purchase(&self, order: PurchaseOrder) -> Result<PurchaseReceipt>;

    /// Reduces the holding, credits the proceeds and records a `sell`.
    async fn sell(&self, order: SaleOrder) -> Result<SaleReceipt>;
}

/// Trait defining the contract for Ledger service operations.
#[async_trait]
pub trait LedgerServiceTrait: Send + Sync {
    /// Adds cash to a user's balance.
    async fn fund(&self, user_id: i32, amount: Decimal) -> Result<User>;

    /// Removes cash from a user's balance.
    async fn withdraw(&self, user_id: i32, amount: Decimal) -> Result<User>;

    /// Buys `face_value` of `term` at `current_yield` percent.
    async fn buy_treasury(
        &self,
        user_id: i32,
        term: &str,
        face_value: Decimal,
        current_yield: Decimal,
    ) -> Result<PurchaseReceipt>;

    /// Sells `amount` of principal out of a holding.
    async fn sell_treasury(&self, user_id: i32, holding_id: i32, amount: Decimal)
        -> Result<SaleReceipt>;

    /// A user's transactions, newest first.
    fn list_transactions(&self, user_id: i32) -> Result<Vec<Transaction>>;

    /// A user's holdings, newest purchase first, including sold-out ones.
    fn list_holdings(&self, user_id: i32) -> Result<Vec<Holding>>;
}
