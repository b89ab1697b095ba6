use std::path::PathBuf;
use std::time::Duration;

use crate::error::Error;
use crate::models::UpdateConfig;
use crate::services::price_sync::PriceSync;
use crate::services::quote_provider::YahooChartClient;

pub fn run(
    ledger: Option<PathBuf>,
    stock_prices: Option<PathBuf>,
    currency_prices: Option<PathBuf>,
    lookback_days: Option<i64>,
    delay_ms: Option<u64>,
) {
    let mut config = UpdateConfig::default();
    if let Some(path) = ledger {
        config.ledger_path = path;
    }
    if let Some(path) = stock_prices {
        config.stock_prices_path = path;
    }
    if let Some(path) = currency_prices {
        config.currency_prices_path = path;
    }
    if let Some(days) = lookback_days {
        config.lookback_days = days;
    }
    if let Some(ms) = delay_ms {
        config.fetch_delay = Duration::from_millis(ms);
    }

    match run_update(config) {
        Ok(()) => {
            println!("\n✅ Price update completed");
        }
        Err(e) => {
            eprintln!("\n❌ Price update failed: {}", e);
            std::process::exit(1);
        }
    }
}

fn run_update(config: UpdateConfig) -> Result<(), Error> {
    // Create Tokio runtime
    let runtime = tokio::runtime::Runtime::new()
        .map_err(|e| Error::Other(format!("Failed to create runtime: {}", e)))?;

    runtime.block_on(async {
        let provider = YahooChartClient::new()?;
        let mut sync = PriceSync::new(config, &provider);
        sync.run().await
    })
}
