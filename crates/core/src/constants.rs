use std::time::Duration;

/// Decimal places for every monetary amount the ledger stores.
pub const MONEY_SCALE: u32 = 2;

/// Day-count basis for bill discount pricing.
pub const BILL_DAY_COUNT_BASIS: i64 = 360;

/// Day-count basis for simple-interest accrual.
pub const ACCRUAL_DAY_COUNT_BASIS: i64 = 365;

/// How long a latest-yields snapshot is served without refetching.
pub const LATEST_YIELDS_TTL: Duration = Duration::from_secs(60 * 60);

/// Fetch timeout when a request only needs one calendar year.
pub const SINGLE_YEAR_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetch timeout when a request spans several calendar years.
pub const MULTI_YEAR_FETCH_TIMEOUT: Duration = Duration::from_secs(30);
