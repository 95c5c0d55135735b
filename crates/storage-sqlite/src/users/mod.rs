//! SQLite storage implementation for users.

mod model;
mod repository;

pub use model::{NewUserDB, UserDB};
pub use repository::UserRepository;
pub(crate) use repository::find_user;
