//! SQLite storage implementation for holdings.

mod model;
mod repository;

pub use model::{HoldingDB, NewHoldingDB};
pub use repository::HoldingRepository;
pub(crate) use repository::{find_holding, insert_holding, update_remaining_amount};
