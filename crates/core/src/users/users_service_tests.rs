use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::*;
use crate::errors::{Error, Result, ValidationError};
use crate::ledger::LedgerError;

#[derive(Default)]
struct MockUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepositoryTrait for MockUserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        let mut users = self.users.lock().unwrap();
        let user = User {
            id: users.len() as i32 + 1,
            name: new_user.name,
            balance: new_user.balance,
            created_at: NaiveDate::from_ymd_opt(2025, 1, 2)
                .unwrap()
                .and_hms_opt(9, 30, 0)
                .unwrap(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn delete(&self, user_id: i32) -> Result<usize> {
        let mut users = self.users.lock().unwrap();
        let before = users.len();
        users.retain(|u| u.id != user_id);
        Ok(before - users.len())
    }

    fn find_by_id(&self, user_id: i32) -> Result<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == user_id)
            .cloned())
    }

    fn list(&self) -> Result<Vec<User>> {
        Ok(self.users.lock().unwrap().clone())
    }
}

fn service() -> UserService {
    UserService::new(Arc::new(MockUserRepository::default()))
}

#[tokio::test]
async fn test_create_and_get_user() {
    let service = service();
    let created = service
        .create_user(NewUser::new("Alice", dec!(500000)))
        .await
        .unwrap();

    let fetched = service.get_user(created.id).unwrap();
    assert_eq!(fetched.name, "Alice");
    assert_eq!(fetched.balance, dec!(500000));
    assert_eq!(service.list_users().unwrap().len(), 1);
}

#[tokio::test]
async fn test_create_user_rejects_blank_name() {
    let result = service().create_user(NewUser::new("  ", Decimal::ZERO)).await;
    assert!(matches!(
        result,
        Err(Error::Validation(ValidationError::InvalidInput(_)))
    ));
}

#[tokio::test]
async fn test_create_user_rejects_negative_balance() {
    let result = service().create_user(NewUser::new("Bob", dec!(-1))).await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[test]
fn test_get_missing_user_is_not_found() {
    let result = service().get_user(42);
    assert!(matches!(
        result,
        Err(Error::Ledger(LedgerError::NotFound(_)))
    ));
}
