//! Holding repository trait.

use super::holdings_model::Holding;
use crate::errors::Result;

/// Read access to holdings. Writes happen through the ledger repository.
pub trait HoldingRepositoryTrait: Send + Sync {
    /// Retrieves a holding by ID, or `None` if no such holding exists.
    fn find_by_id(&self, holding_id: i32) -> Result<Option<Holding>>;

    /// Lists a user's holdings, most recent purchase first.
    fn list_by_user(&self, user_id: i32) -> Result<Vec<Holding>>;
}
