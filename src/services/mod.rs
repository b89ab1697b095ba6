pub mod fetch_planner;
pub mod ledger_parser;
pub mod price_store;
pub mod price_sync;
pub mod quote_provider;

pub use fetch_planner::plan_start;
pub use ledger_parser::parse_ledger;
pub use price_store::PriceStore;
pub use price_sync::{PriceSync, SyncStats};
pub use quote_provider::{Quote, QuoteProvider, YahooChartClient};
