//! Yield curve models
//!
//! - `curve` - One trading day of the daily par yield curve

mod curve;

pub use curve::{CurveRates, YieldCurveEntry};
