use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use std::sync::Arc;

use super::model::{NewUserDB, UserDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::{holdings, transactions, users};
use treasury_core::users::{NewUser, User, UserRepositoryTrait};
use treasury_core::utils::time_utils::ledger_now;
use treasury_core::Result;

pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

/// Load one user on `conn`, or `None`.
pub(crate) fn find_user(conn: &mut SqliteConnection, user_id: i32) -> Result<Option<User>> {
    users::table
        .find(user_id)
        .select(UserDB::as_select())
        .first::<UserDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(User::try_from)
        .transpose()
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    async fn create(&self, new_user: NewUser) -> Result<User> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<User> {
                let row = NewUserDB::from_domain(new_user, ledger_now());
                let created = diesel::insert_into(users::table)
                    .values(&row)
                    .returning(UserDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                User::try_from(created)
            })
            .await
    }

    async fn delete(&self, user_id: i32) -> Result<usize> {
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                diesel::delete(transactions::table.filter(transactions::user_id.eq(user_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                diesel::delete(holdings::table.filter(holdings::user_id.eq(user_id)))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(diesel::delete(users::table.find(user_id))
                    .execute(conn)
                    .map_err(StorageError::from)?)
            })
            .await
    }

    fn find_by_id(&self, user_id: i32) -> Result<Option<User>> {
        let mut conn = get_connection(&self.pool)?;
        find_user(&mut conn, user_id)
    }

    fn list(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;
        users::table
            .order(users::id.asc())
            .select(UserDB::as_select())
            .load::<UserDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(User::try_from)
            .collect()
    }
}
