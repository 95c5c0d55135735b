use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;

use super::model::{HoldingDB, NewHoldingDB};
use crate::db::get_connection;
use crate::errors::{IntoCore, StorageError};
use crate::schema::holdings;
use crate::utils::decimal_to_text;
use treasury_core::holdings::{Holding, HoldingRepositoryTrait, NewHolding};
use treasury_core::Result;

pub struct HoldingRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
}

impl HoldingRepository {
    pub fn new(pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>) -> Self {
        HoldingRepository { pool }
    }
}

pub(crate) fn find_holding(conn: &mut SqliteConnection, holding_id: i32) -> Result<Option<Holding>> {
    holdings::table
        .find(holding_id)
        .select(HoldingDB::as_select())
        .first::<HoldingDB>(conn)
        .optional()
        .map_err(StorageError::from)?
        .map(Holding::try_from)
        .transpose()
}

pub(crate) fn insert_holding(conn: &mut SqliteConnection, new_holding: NewHolding) -> Result<Holding> {
    let row = NewHoldingDB::from(new_holding);
    let created = diesel::insert_into(holdings::table)
        .values(&row)
        .returning(HoldingDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Holding::try_from(created)
}

pub(crate) fn update_remaining_amount(
    conn: &mut SqliteConnection,
    holding_id: i32,
    remaining: Decimal,
) -> Result<Holding> {
    let updated = diesel::update(holdings::table.find(holding_id))
        .set(holdings::remaining_amount.eq(decimal_to_text(remaining)))
        .returning(HoldingDB::as_returning())
        .get_result(conn)
        .map_err(StorageError::from)?;
    Holding::try_from(updated)
}

impl HoldingRepositoryTrait for HoldingRepository {
    fn find_by_id(&self, holding_id: i32) -> Result<Option<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        find_holding(&mut conn, holding_id)
    }

    fn list_by_user(&self, user_id: i32) -> Result<Vec<Holding>> {
        let mut conn = get_connection(&self.pool)?;
        holdings::table
            .filter(holdings::user_id.eq(user_id))
            .order((holdings::purchase_date.desc(), holdings::id.desc()))
            .select(HoldingDB::as_select())
            .load::<HoldingDB>(&mut conn)
            .into_core()?
            .into_iter()
            .map(Holding::try_from)
            .collect()
    }
}
