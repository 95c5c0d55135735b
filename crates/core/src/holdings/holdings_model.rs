//! Holding domain models.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::ledger::LedgerError;
use crate::pricing::{SecurityType, Term};

/// Face value and cost of a holding.
///
/// Rows written before face value and purchase price were tracked only carry
/// a single `amount`, which stands in for both.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HoldingLot {
    Current {
        face_value: Decimal,
        purchase_price: Decimal,
    },
    Legacy {
        amount: Decimal,
    },
}

impl HoldingLot {
    pub fn face_value(&self) -> Decimal {
        match *self {
            HoldingLot::Current { face_value, .. } => face_value,
            HoldingLot::Legacy { amount } => amount,
        }
    }

    pub fn purchase_price(&self) -> Decimal {
        match *self {
            HoldingLot::Current { purchase_price, .. } => purchase_price,
            HoldingLot::Legacy { amount } => amount,
        }
    }

    pub fn is_legacy(&self) -> bool {
        matches!(self, HoldingLot::Legacy { .. })
    }
}

/// A position in one treasury security.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Holding {
    pub id: i32,
    pub user_id: i32,
    pub term: String,
    pub yield_at_purchase: Decimal,
    pub purchase_date: NaiveDateTime,
    pub remaining_amount: Decimal,
    pub security_type: Option<SecurityType>,
    #[serde(flatten)]
    pub lot: HoldingLot,
}

impl Holding {
    pub fn face_value(&self) -> Decimal {
        self.lot.face_value()
    }

    pub fn purchase_price(&self) -> Decimal {
        self.lot.purchase_price()
    }

    /// Still has principal left to sell.
    pub fn is_active(&self) -> bool {
        self.remaining_amount > Decimal::ZERO
    }

    /// Stored security type, else the one implied by the term.
    ///
    /// Never defaults: a legacy row with neither a stored type nor a valid
    /// term is reported as a data integrity problem.
    pub fn resolve_security_type(&self) -> Result<SecurityType, LedgerError> {
        if let Some(kind) = self.security_type {
            return Ok(kind);
        }
        self.term
            .parse::<Term>()
            .map(|t| t.security_type())
            .map_err(|e| {
                LedgerError::DataIntegrity(format!(
                    "cannot determine security type for holding {} (term: {}): {}",
                    self.id, self.term, e
                ))
            })
    }
}

/// Input model for recording a purchase.
#[derive(Debug, Clone, PartialEq)]
pub struct NewHolding {
    pub user_id: i32,
    pub term: Term,
    pub security_type: SecurityType,
    pub face_value: Decimal,
    pub purchase_price: Decimal,
    pub yield_at_purchase: Decimal,
    pub purchase_date: NaiveDateTime,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;

    fn holding(term: &str, security_type: Option<SecurityType>, lot: HoldingLot) -> Holding {
        Holding {
            id: 7,
            user_id: 1,
            term: term.to_string(),
            yield_at_purchase: dec!(4.5),
            purchase_date: NaiveDate::from_ymd_opt(2024, 6, 3)
                .unwrap()
                .and_hms_opt(14, 0, 0)
                .unwrap(),
            remaining_amount: lot.face_value(),
            security_type,
            lot,
        }
    }

    #[test]
    fn test_legacy_amount_stands_in_for_face_and_price() {
        let h = holding("2Y", None, HoldingLot::Legacy { amount: dec!(5000) });
        assert_eq!(h.face_value(), dec!(5000));
        assert_eq!(h.purchase_price(), dec!(5000));
        assert!(h.lot.is_legacy());
    }

    #[test]
    fn test_current_lot_keeps_both_values() {
        let h = holding(
            "6M",
            Some(SecurityType::Bill),
            HoldingLot::Current {
                face_value: dec!(100000),
                purchase_price: dec!(97750),
            },
        );
        assert_eq!(h.face_value(), dec!(100000));
        assert_eq!(h.purchase_price(), dec!(97750));
    }

    #[test]
    fn test_stored_security_type_wins() {
        // Stored type is authoritative even if the term implies another.
        let h = holding("6M", Some(SecurityType::Note), HoldingLot::Legacy { amount: dec!(1) });
        assert_eq!(h.resolve_security_type().unwrap(), SecurityType::Note);
    }

    #[test]
    fn test_security_type_inferred_from_term() {
        let h = holding("30Y", None, HoldingLot::Legacy { amount: dec!(1) });
        assert_eq!(h.resolve_security_type().unwrap(), SecurityType::Bond);
    }

    #[test]
    fn test_unknown_term_without_type_is_data_integrity_error() {
        let h = holding("7Y", None, HoldingLot::Legacy { amount: dec!(1) });
        assert!(matches!(
            h.resolve_security_type(),
            Err(LedgerError::DataIntegrity(_))
        ));
    }

    #[test]
    fn test_is_active() {
        let mut h = holding("1Y", None, HoldingLot::Legacy { amount: dec!(10) });
        assert!(h.is_active());
        h.remaining_amount = Decimal::ZERO;
        assert!(!h.is_active());
    }

    #[test]
    fn test_serializes_lot_fields_flat() {
        let h = holding(
            "6M",
            Some(SecurityType::Bill),
            HoldingLot::Current {
                face_value: dec!(100000),
                purchase_price: dec!(97750),
            },
        );
        let json = serde_json::to_value(&h).unwrap();
        assert_eq!(json["face_value"], serde_json::json!(100000.0));
        assert_eq!(json["purchase_price"], serde_json::json!(97750.0));
        assert_eq!(json["security_type"], serde_json::json!("bill"));
        assert!(json.get("amount").is_none());
    }
}
