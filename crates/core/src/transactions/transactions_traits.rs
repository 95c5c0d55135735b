//! Transaction repository trait.

use super::transactions_model::Transaction;
use crate::errors::Result;

/// Read access to the transaction log. Writes happen through the ledger
/// repository, inside the same unit as the balance change they record.
pub trait TransactionRepositoryTrait: Send + Sync {
    /// Lists a user's transactions, newest first.
    fn list_by_user(&self, user_id: i32) -> Result<Vec<Transaction>>;
}
