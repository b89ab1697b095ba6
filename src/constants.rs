//! Wire-Format and Pacing Constants
//!
//! The price history files are plain-text ledger price directives:
//!
//! ```text
//! P <date> <symbol> <price> <currency>
//! ```
//!
//! Two file variants exist and both are preserved exactly as written by
//! earlier versions of this tool:
//! - stock history: `dd/MM/yyyy` dates, entity addressed by the bare symbol
//! - currency history: `yyyy-MM-dd` dates, entity addressed as `TARGET-BASE`
//!
//! Prices are persisted with a comma decimal separator and two fraction
//! digits. That formatting is part of the file contract, not an internal
//! representation.

/// First field of every price history line
pub const RECORD_MARKER: &str = "P";

/// Minimum whitespace-delimited fields for a line to count as a price record
pub const RECORD_MIN_FIELDS: usize = 4;

/// Date pattern used by the stock price history file
pub const STOCK_DATE_FORMAT: &str = "%d/%m/%Y";

/// Date pattern used by the currency price history file
pub const CURRENCY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Quote currency recorded for plain stock tickers
pub const STOCK_QUOTE_CURRENCY: &str = "USD";

/// Days of history fetched for an entity with no existing records
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

/// Pause between provider calls, in milliseconds
pub const FETCH_DELAY_MS: u64 = 1000;

/// Default ledger file declaring the commodities to update
pub const DEFAULT_LEDGER_FILE: &str = "meta.ledger";

/// Default destination for stock price records
pub const DEFAULT_STOCK_PRICES_FILE: &str = "market.prices.ledger.txt";

/// Default destination for currency conversion records
pub const DEFAULT_CURRENCY_PRICES_FILE: &str = "currency.prices.ledger.txt";

/// Yahoo chart API endpoint used by the default quote provider
pub const YAHOO_CHART_BASE_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
