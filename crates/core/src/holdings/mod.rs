//! Holdings module - treasury positions owned by users.

mod holdings_model;
mod holdings_traits;

pub use holdings_model::{Holding, HoldingLot, NewHolding};
pub use holdings_traits::HoldingRepositoryTrait;
