//! Yield curve provider abstraction and implementations.
//!
//! The core services only see [`YieldCurveProvider`]; the Treasury feed is one
//! implementation and tests substitute their own.

mod traits;

pub mod treasury;

pub use traits::YieldCurveProvider;
