//! Database models for users.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decimal_to_text, parse_decimal};
use treasury_core::users::{NewUser, User};

/// Database model for users
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct UserDB {
    pub id: i32,
    pub name: String,
    pub balance: String,
    pub created_at: NaiveDateTime,
}

/// Database model for creating a new user
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::users)]
pub struct NewUserDB {
    pub name: String,
    pub balance: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<UserDB> for User {
    type Error = treasury_core::Error;

    fn try_from(db: UserDB) -> Result<Self, Self::Error> {
        Ok(Self {
            balance: parse_decimal(&db.balance, "balance")?,
            id: db.id,
            name: db.name,
            created_at: db.created_at,
        })
    }
}

impl NewUserDB {
    pub fn from_domain(new_user: NewUser, created_at: NaiveDateTime) -> Self {
        Self {
            name: new_user.name,
            balance: decimal_to_text(new_user.balance),
            created_at,
        }
    }
}
