//! User repository and service traits.

use async_trait::async_trait;

use super::users_model::{NewUser, User};
use crate::errors::Result;

/// Trait defining the contract for User repository operations.
///
/// Balances are only ever changed through the ledger repository; this trait
/// covers reads and seeding.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Creates a new user.
    async fn create(&self, new_user: NewUser) -> Result<User>;

    /// Deletes a user and everything they own. Intended for test harnesses.
    ///
    /// Returns the number of deleted user records.
    async fn delete(&self, user_id: i32) -> Result<usize>;

    /// Retrieves a user by ID, or `None` if no such user exists.
    fn find_by_id(&self, user_id: i32) -> Result<Option<User>>;

    /// Lists all users ordered by ID.
    fn list(&self) -> Result<Vec<User>>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Creates a user after validating the input.
    async fn create_user(&self, new_user: NewUser) -> Result<User>;

    /// Retrieves a user by ID; fails with `NotFound` when absent.
    fn get_user(&self, user_id: i32) -> Result<User>;

    /// Lists all users.
    fn list_users(&self) -> Result<Vec<User>>;
}
