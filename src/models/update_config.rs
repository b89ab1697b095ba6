use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_CURRENCY_PRICES_FILE, DEFAULT_LEDGER_FILE, DEFAULT_LOOKBACK_DAYS,
    DEFAULT_STOCK_PRICES_FILE, FETCH_DELAY_MS,
};
use crate::utils::env_path;

/// File locations and pacing for one update run
///
/// Defaults come from `LEDGER_PATH`, `STOCK_PRICES_PATH` and
/// `CURRENCY_PRICES_PATH` environment variables when set; CLI flags override
/// both. The two output paths may only coincide for ledgers without currency
/// directives, since each file keeps its own format.
#[derive(Debug, Clone)]
pub struct UpdateConfig {
    /// Ledger declaring the commodities to update
    pub ledger_path: PathBuf,

    /// Destination for stock price records (`dd/MM/yyyy` dates)
    pub stock_prices_path: PathBuf,

    /// Destination for currency conversion records (`yyyy-MM-dd` dates)
    pub currency_prices_path: PathBuf,

    /// Fetch window for entities with no existing history
    pub lookback_days: i64,

    /// Cooperative pause after every provider call
    pub fetch_delay: Duration,
}

impl Default for UpdateConfig {
    fn default() -> Self {
        Self {
            ledger_path: env_path("LEDGER_PATH", DEFAULT_LEDGER_FILE),
            stock_prices_path: env_path("STOCK_PRICES_PATH", DEFAULT_STOCK_PRICES_FILE),
            currency_prices_path: env_path("CURRENCY_PRICES_PATH", DEFAULT_CURRENCY_PRICES_FILE),
            lookback_days: DEFAULT_LOOKBACK_DAYS,
            fetch_delay: Duration::from_millis(FETCH_DELAY_MS),
        }
    }
}
