//! Yields module - cached access to the Treasury daily par yield curve.

mod sampling;
mod yields_cache;
mod yields_errors;
mod yields_model;
mod yields_service;
mod yields_traits;


pub use sampling::downsample;
pub use yields_cache::YieldCache;
pub use yields_errors::YieldError;
pub use yields_model::{
    HistoricalYieldPoint, HistoricalYieldSeries, Period, Sampling, YieldPoint, YieldSnapshot,
    HISTORICAL_TERMS,
};
pub use yields_service::{CacheWarmup, YieldService};
pub use yields_traits::YieldServiceTrait;
