//! Database models for holdings.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::utils::{decimal_to_text, parse_decimal, parse_optional_decimal};
use treasury_core::holdings::{Holding, HoldingLot, NewHolding};
use treasury_core::ledger::LedgerError;
use treasury_core::pricing::SecurityType;

/// Database model for holdings
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct HoldingDB {
    pub id: i32,
    pub user_id: i32,
    pub term: String,
    pub amount: String,
    pub yield_at_purchase: String,
    pub purchase_date: NaiveDateTime,
    pub remaining_amount: String,
    pub face_value: Option<String>,
    pub purchase_price: Option<String>,
    pub security_type: Option<String>,
}

/// Database model for recording a purchase
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = crate::schema::holdings)]
pub struct NewHoldingDB {
    pub user_id: i32,
    pub term: String,
    pub amount: String,
    pub yield_at_purchase: String,
    pub purchase_date: NaiveDateTime,
    pub remaining_amount: String,
    pub face_value: Option<String>,
    pub purchase_price: Option<String>,
    pub security_type: Option<String>,
}

impl From<NewHolding> for NewHoldingDB {
    fn from(domain: NewHolding) -> Self {
        let face_value = decimal_to_text(domain.face_value);
        Self {
            user_id: domain.user_id,
            term: domain.term.to_string(),
            // `amount` mirrors face value so pre-face-value readers see the position size.
            amount: face_value.clone(),
            yield_at_purchase: decimal_to_text(domain.yield_at_purchase),
            purchase_date: domain.purchase_date,
            remaining_amount: face_value.clone(),
            face_value: Some(face_value),
            purchase_price: Some(decimal_to_text(domain.purchase_price)),
            security_type: Some(domain.security_type.as_str().to_string()),
        }
    }
}

impl TryFrom<HoldingDB> for Holding {
    type Error = treasury_core::Error;

    fn try_from(db: HoldingDB) -> Result<Self, Self::Error> {
        let amount = parse_decimal(&db.amount, "amount")?;
        let face_value = parse_optional_decimal(db.face_value.as_deref(), "face_value")?;
        let purchase_price =
            parse_optional_decimal(db.purchase_price.as_deref(), "purchase_price")?;

        let lot = match (face_value, purchase_price) {
            (None, None) => HoldingLot::Legacy { amount },
            (face_value, purchase_price) => HoldingLot::Current {
                face_value: face_value.unwrap_or(amount),
                purchase_price: purchase_price.unwrap_or(amount),
            },
        };

        let security_type = db
            .security_type
            .as_deref()
            .map(|s| {
                s.parse::<SecurityType>().map_err(|e| {
                    LedgerError::DataIntegrity(format!(
                        "holding {} has an unknown security type: {}",
                        db.id, e
                    ))
                })
            })
            .transpose()?;

        Ok(Self {
            id: db.id,
            user_id: db.user_id,
            yield_at_purchase: parse_decimal(&db.yield_at_purchase, "yield_at_purchase")?,
            purchase_date: db.purchase_date,
            remaining_amount: parse_decimal(&db.remaining_amount, "remaining_amount")?,
            security_type,
            lot,
            term: db.term,
        })
    }
}
