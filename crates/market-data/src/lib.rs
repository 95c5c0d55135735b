//! Treasury Market Data Crate
//!
//! This crate fetches the U.S. Treasury daily par yield curve and turns the
//! published XML feed into plain Rust values.
//!
//! # Overview
//!
//! ```text
//! +---------------------+     +----------------------+
//! |  treasury-core      | --> |  YieldCurveProvider  |  (trait, mockable)
//! |  (yield service)    |     +----------------------+
//! +---------------------+                |
//!                                        v
//!                             +----------------------+
//!                             |  TreasuryProvider    |  (reqwest + quick-xml)
//!                             +----------------------+
//!                                        |
//!                                        v
//!                             +----------------------+
//!                             |  YieldCurveEntry     |  (one row per trading day)
//!                             +----------------------+
//! ```
//!
//! # Core Types
//!
//! - [`YieldCurveEntry`] - One trading day of par yields, rates in percent
//! - [`CurveRates`] - The eight published tenors of an entry
//! - [`YieldCurveProvider`] - Source of yearly yield curve documents
//! - [`TreasuryProvider`] - Provider backed by home.treasury.gov

pub mod errors;
pub mod models;
pub mod provider;

pub use errors::MarketDataError;
pub use models::{CurveRates, YieldCurveEntry};
pub use provider::treasury::TreasuryProvider;
pub use provider::YieldCurveProvider;
