//! Term and security type definitions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::pricing_errors::PricingError;

/// Maturity buckets the ledger trades.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Term {
    #[serde(rename = "1M")]
    OneMonth,
    #[serde(rename = "3M")]
    ThreeMonth,
    #[serde(rename = "6M")]
    SixMonth,
    #[serde(rename = "1Y")]
    OneYear,
    #[serde(rename = "2Y")]
    TwoYear,
    #[serde(rename = "5Y")]
    FiveYear,
    #[serde(rename = "10Y")]
    TenYear,
    #[serde(rename = "30Y")]
    ThirtyYear,
}

impl Term {
    /// Every term, shortest first.
    pub const ALL: [Term; 8] = [
        Term::OneMonth,
        Term::ThreeMonth,
        Term::SixMonth,
        Term::OneYear,
        Term::TwoYear,
        Term::FiveYear,
        Term::TenYear,
        Term::ThirtyYear,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Term::OneMonth => "1M",
            Term::ThreeMonth => "3M",
            Term::SixMonth => "6M",
            Term::OneYear => "1Y",
            Term::TwoYear => "2Y",
            Term::FiveYear => "5Y",
            Term::TenYear => "10Y",
            Term::ThirtyYear => "30Y",
        }
    }

    /// Nominal length of the term in days.
    pub fn duration_days(&self) -> i64 {
        match self {
            Term::OneMonth => 30,
            Term::ThreeMonth => 90,
            Term::SixMonth => 180,
            Term::OneYear => 365,
            Term::TwoYear => 730,
            Term::FiveYear => 1825,
            Term::TenYear => 3650,
            Term::ThirtyYear => 10950,
        }
    }

    /// Bills mature within a year, notes in 2 to 10 years, bonds in 30.
    pub fn security_type(&self) -> SecurityType {
        match self {
            Term::OneMonth | Term::ThreeMonth | Term::SixMonth | Term::OneYear => {
                SecurityType::Bill
            }
            Term::TwoYear | Term::FiveYear | Term::TenYear => SecurityType::Note,
            Term::ThirtyYear => SecurityType::Bond,
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Term {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Term::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| PricingError::InvalidTerm(s.to_string()))
    }
}

/// Kind of Treasury security.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SecurityType {
    Bill,
    Note,
    Bond,
}

impl SecurityType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecurityType::Bill => "bill",
            SecurityType::Note => "note",
            SecurityType::Bond => "bond",
        }
    }

    /// Human-readable name used in error messages.
    pub fn display_name(&self) -> &'static str {
        match self {
            SecurityType::Bill => "Treasury Bill",
            SecurityType::Note => "Treasury Note",
            SecurityType::Bond => "Treasury Bond",
        }
    }
}

impl fmt::Display for SecurityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SecurityType {
    type Err = PricingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bill" => Ok(SecurityType::Bill),
            "note" => Ok(SecurityType::Note),
            "bond" => Ok(SecurityType::Bond),
            other => Err(PricingError::InvalidSecurityType(format!(
                "unknown security type: {}",
                other
            ))),
        }
    }
}
