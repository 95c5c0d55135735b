use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, User};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;
use crate::ledger::LedgerError;

/// Service for reading and seeding users.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    async fn create_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        debug!("Creating user '{}'", new_user.name);
        self.repository.create(new_user).await
    }

    fn get_user(&self, user_id: i32) -> Result<User> {
        self.repository
            .find_by_id(user_id)?
            .ok_or_else(|| LedgerError::NotFound(format!("user {} not found", user_id)).into())
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.repository.list()
    }
}
