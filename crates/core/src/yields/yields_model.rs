//! Yield curve domain models.

use std::fmt;
use std::str::FromStr;

use chrono::{Days, Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use treasury_market_data::{CurveRates, YieldCurveEntry};

use super::yields_errors::YieldError;
use crate::pricing::Term;

/// Terms plotted on the historical chart.
pub const HISTORICAL_TERMS: [Term; 3] = [Term::TenYear, Term::FiveYear, Term::TwoYear];

/// Look-back window for historical yields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "1W")]
    OneWeek,
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonth,
    #[serde(rename = "6M")]
    SixMonth,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "5Y")]
    FiveYear,
    #[serde(rename = "10Y")]
    TenYear,
    #[serde(rename = "30Y")]
    ThirtyYear,
}

/// Point density applied to a historical series.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sampling {
    /// Every trading day.
    Daily,
    /// Latest trading day of each ISO week.
    Weekly,
    /// Latest trading day of each calendar month.
    Monthly,
}

impl Period {
    pub const ALL: [Period; 8] = [
        Period::OneWeek,
        Period::OneMonth,
        Period::ThreeMonth,
        Period::SixMonth,
        Period::OneYear,
        Period::FiveYear,
        Period::TenYear,
        Period::ThirtyYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Period::OneWeek => "1W",
            Period::OneMonth => "1M",
            Period::ThreeMonth => "3M",
            Period::SixMonth => "6M",
            Period::OneYear => "1Y",
            Period::FiveYear => "5Y",
            Period::TenYear => "10Y",
            Period::ThirtyYear => "30Y",
        }
    }

    /// First day of the window ending on `end`.
    ///
    /// Month and year offsets are calendar offsets; a day that does not exist
    /// in the target month clamps to that month's last day.
    pub fn start_date(&self, end: NaiveDate) -> NaiveDate {
        let start = match self {
            Period::OneWeek => end.checked_sub_days(Days::new(7)),
            Period::OneMonth => end.checked_sub_months(Months::new(1)),
            Period::ThreeMonth => end.checked_sub_months(Months::new(3)),
            Period::SixMonth => end.checked_sub_months(Months::new(6)),
            Period::OneYear => end.checked_sub_months(Months::new(12)),
            Period::FiveYear => end.checked_sub_months(Months::new(5 * 12)),
            Period::TenYear => end.checked_sub_months(Months::new(10 * 12)),
            Period::ThirtyYear => end.checked_sub_months(Months::new(30 * 12)),
        };
        start.unwrap_or(NaiveDate::MIN)
    }

    pub fn sampling(&self) -> Sampling {
        match self {
            Period::ThirtyYear => Sampling::Monthly,
            Period::TenYear | Period::FiveYear => Sampling::Weekly,
            _ => Sampling::Daily,
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Period {
    type Err = YieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Period::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| YieldError::InvalidPeriod(s.to_string()))
    }
}

fn rate_for(rates: &CurveRates, term: Term) -> Option<Decimal> {
    match term {
        Term::OneMonth => rates.one_month,
        Term::ThreeMonth => rates.three_month,
        Term::SixMonth => rates.six_month,
        Term::OneYear => rates.one_year,
        Term::TwoYear => rates.two_year,
        Term::FiveYear => rates.five_year,
        Term::TenYear => rates.ten_year,
        Term::ThirtyYear => rates.thirty_year,
    }
}

/// Rate for one term. `None` when the feed did not publish it that day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    pub term: Term,
    pub rate: Option<Decimal>,
}

/// The curve for a single trading day, shortest term first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldSnapshot {
    pub date: NaiveDate,
    pub yields: Vec<YieldPoint>,
}

impl YieldSnapshot {
    pub fn from_entry(date: NaiveDate, entry: &YieldCurveEntry) -> Self {
        let yields = Term::ALL
            .into_iter()
            .map(|term| YieldPoint {
                term,
                rate: rate_for(&entry.rates, term),
            })
            .collect();
        Self { date, yields }
    }

    pub fn rate(&self, term: Term) -> Option<Decimal> {
        self.yields
            .iter()
            .find(|p| p.term == term)
            .and_then(|p| p.rate)
    }
}

/// One chart point: the 10Y, 5Y and 2Y yields on `date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalYieldPoint {
    pub date: NaiveDate,
    #[serde(rename = "10Y")]
    pub ten_year: Option<Decimal>,
    #[serde(rename = "5Y")]
    pub five_year: Option<Decimal>,
    #[serde(rename = "2Y")]
    pub two_year: Option<Decimal>,
}

impl HistoricalYieldPoint {
    pub fn from_entry(date: NaiveDate, entry: &YieldCurveEntry) -> Self {
        Self {
            date,
            ten_year: entry.rates.ten_year,
            five_year: entry.rates.five_year,
            two_year: entry.rates.two_year,
        }
    }
}

/// Historical yields for one period, oldest point first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalYieldSeries {
    pub period: Period,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub terms: Vec<Term>,
    pub data: Vec<HistoricalYieldPoint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_period_parse() {
        for p in Period::ALL {
            assert_eq!(p.as_str().parse::<Period>().unwrap(), p);
        }
        assert_eq!(
            "2W".parse::<Period>(),
            Err(YieldError::InvalidPeriod("2W".to_string()))
        );
    }

    #[test]
    fn test_start_dates() {
        let end = date(2025, 3, 15);
        assert_eq!(Period::OneWeek.start_date(end), date(2025, 3, 8));
        assert_eq!(Period::OneMonth.start_date(end), date(2025, 2, 15));
        assert_eq!(Period::ThreeMonth.start_date(end), date(2024, 12, 15));
        assert_eq!(Period::SixMonth.start_date(end), date(2024, 9, 15));
        assert_eq!(Period::OneYear.start_date(end), date(2024, 3, 15));
        assert_eq!(Period::FiveYear.start_date(end), date(2020, 3, 15));
        assert_eq!(Period::TenYear.start_date(end), date(2015, 3, 15));
        assert_eq!(Period::ThirtyYear.start_date(end), date(1995, 3, 15));
    }

    #[test]
    fn test_start_date_clamps_to_month_end() {
        assert_eq!(
            Period::OneMonth.start_date(date(2025, 3, 31)),
            date(2025, 2, 28)
        );
        assert_eq!(
            Period::OneYear.start_date(date(2024, 2, 29)),
            date(2023, 2, 28)
        );
    }

    #[test]
    fn test_sampling_rules() {
        assert_eq!(Period::ThirtyYear.sampling(), Sampling::Monthly);
        assert_eq!(Period::TenYear.sampling(), Sampling::Weekly);
        assert_eq!(Period::FiveYear.sampling(), Sampling::Weekly);
        for p in [
            Period::OneWeek,
            Period::OneMonth,
            Period::ThreeMonth,
            Period::SixMonth,
            Period::OneYear,
        ] {
            assert_eq!(p.sampling(), Sampling::Daily);
        }
    }

    #[test]
    fn test_snapshot_from_entry_keeps_term_order_and_gaps() {
        let entry = YieldCurveEntry::new(
            "2025-01-02T00:00:00",
            CurveRates {
                one_month: Some(dec!(4.45)),
                ten_year: Some(dec!(4.57)),
                ..CurveRates::default()
            },
        );
        let snapshot = YieldSnapshot::from_entry(date(2025, 1, 2), &entry);

        let terms: Vec<Term> = snapshot.yields.iter().map(|p| p.term).collect();
        assert_eq!(terms, Term::ALL.to_vec());
        assert_eq!(snapshot.rate(Term::OneMonth), Some(dec!(4.45)));
        assert_eq!(snapshot.rate(Term::TenYear), Some(dec!(4.57)));
        assert_eq!(snapshot.rate(Term::TwoYear), None);
    }

    #[test]
    fn test_series_serializes_chart_keys() {
        let series = HistoricalYieldSeries {
            period: Period::ThreeMonth,
            start_date: date(2024, 10, 2),
            end_date: date(2025, 1, 2),
            terms: HISTORICAL_TERMS.to_vec(),
            data: vec![HistoricalYieldPoint {
                date: date(2025, 1, 2),
                ten_year: Some(dec!(4.57)),
                five_year: Some(dec!(4.38)),
                two_year: None,
            }],
        };
        let json = serde_json::to_value(&series).unwrap();
        assert_eq!(json["period"], "3M");
        assert_eq!(json["startDate"], "2024-10-02");
        assert_eq!(json["terms"], serde_json::json!(["10Y", "5Y", "2Y"]));
        assert_eq!(json["data"][0]["date"], "2025-01-02");
        assert_eq!(json["data"][0]["10Y"], serde_json::json!(4.57));
        assert!(json["data"][0]["2Y"].is_null());
    }
}
