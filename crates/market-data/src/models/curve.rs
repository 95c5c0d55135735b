use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Par yields for the tenors the ledger trades, in percent.
///
/// A tenor the feed did not publish for that day is `None`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CurveRates {
    pub one_month: Option<Decimal>,
    pub three_month: Option<Decimal>,
    pub six_month: Option<Decimal>,
    pub one_year: Option<Decimal>,
    pub two_year: Option<Decimal>,
    pub five_year: Option<Decimal>,
    pub ten_year: Option<Decimal>,
    pub thirty_year: Option<Decimal>,
}

/// One `<entry>` of the Treasury feed.
///
/// The raw date is kept as published (`2025-01-02T00:00:00`); use
/// [`YieldCurveEntry::date`] to get the calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldCurveEntry {
    pub raw_date: String,
    pub rates: CurveRates,
}

impl YieldCurveEntry {
    pub fn new(raw_date: impl Into<String>, rates: CurveRates) -> Self {
        Self {
            raw_date: raw_date.into(),
            rates,
        }
    }

    /// Calendar date of the entry, or `None` when the published value is not
    /// a `YYYY-MM-DD` prefixed timestamp.
    pub fn date(&self) -> Option<NaiveDate> {
        let day = self.raw_date.get(..10)?;
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_date_truncates_timestamp() {
        let entry = YieldCurveEntry::new("2025-01-02T00:00:00", CurveRates::default());
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2025, 1, 2));
    }

    #[test]
    fn test_date_accepts_plain_day() {
        let entry = YieldCurveEntry::new("2024-12-31", CurveRates::default());
        assert_eq!(entry.date(), NaiveDate::from_ymd_opt(2024, 12, 31));
    }

    #[test]
    fn test_date_rejects_garbage() {
        assert_eq!(YieldCurveEntry::new("", CurveRates::default()).date(), None);
        assert_eq!(
            YieldCurveEntry::new("not-a-date", CurveRates::default()).date(),
            None
        );
        assert_eq!(
            YieldCurveEntry::new("2024-13-01T00:00:00", CurveRates::default()).date(),
            None
        );
    }
}
