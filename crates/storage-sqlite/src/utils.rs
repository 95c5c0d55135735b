//! Conversions between stored TEXT columns and domain values.

use rust_decimal::Decimal;
use std::str::FromStr;
use treasury_core::ledger::LedgerError;
use treasury_core::Result;

/// Parse a decimal column. A malformed value is a data integrity problem, never zero.
pub fn parse_decimal(value: &str, field: &str) -> Result<Decimal> {
    Decimal::from_str(value).map_err(|e| {
        log::error!("Stored {} '{}' is not a decimal: {}", field, value, e);
        LedgerError::DataIntegrity(format!("invalid stored {}: '{}'", field, value)).into()
    })
}

pub fn parse_optional_decimal(value: Option<&str>, field: &str) -> Result<Option<Decimal>> {
    value.map(|v| parse_decimal(v, field)).transpose()
}

/// Canonical TEXT form of a monetary amount or rate.
pub fn decimal_to_text(value: Decimal) -> String {
    value.normalize().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use treasury_core::Error;

    #[test]
    fn test_parse_decimal() {
        assert_eq!(parse_decimal("402250.00", "balance").unwrap(), dec!(402250));
        assert_eq!(parse_decimal("-0.5", "balance").unwrap(), dec!(-0.5));
    }

    #[test]
    fn test_parse_decimal_rejects_garbage() {
        let err = parse_decimal("12abc", "balance").unwrap_err();
        assert!(matches!(err, Error::Ledger(LedgerError::DataIntegrity(_))));
    }

    #[test]
    fn test_optional_decimal() {
        assert_eq!(parse_optional_decimal(None, "face_value").unwrap(), None);
        assert_eq!(
            parse_optional_decimal(Some("9775.00"), "face_value").unwrap(),
            Some(dec!(9775))
        );
    }

    #[test]
    fn test_decimal_to_text_drops_trailing_zeros() {
        assert_eq!(decimal_to_text(dec!(402250.00)), "402250");
        assert_eq!(decimal_to_text(dec!(9775.50)), "9775.5");
        assert_eq!(decimal_to_text(dec!(0.00)), "0");
    }
}
