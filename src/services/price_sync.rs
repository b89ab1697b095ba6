//! Price Reconciliation Driver
//!
//! Orchestrates one update run: parse the ledger, plan a fetch window per
//! entity, fetch quotes sequentially, merge into the per-file stores and
//! rewrite the destination files. Provider calls are awaited one at a time
//! with a fixed pause in between so third-party rate limits are respected.
//! A failing entity is logged and skipped; its existing records are
//! rewritten unchanged.

use chrono::{NaiveDate, Utc};
use std::fs;
use std::time::Instant;
use tokio::time::sleep;
use tracing::{info, warn};

use crate::constants::STOCK_QUOTE_CURRENCY;
use crate::error::{Error, Result};
use crate::models::{PriceFileFormat, PriceRecord, UpdateConfig};
use crate::services::fetch_planner::plan_start;
use crate::services::ledger_parser::parse_ledger;
use crate::services::price_store::PriceStore;
use crate::services::quote_provider::{Quote, QuoteProvider};

/// Outcome counters for one run
#[derive(Debug, Default, Clone)]
pub struct SyncStats {
    pub fetched: usize,
    pub failed: usize,
    pub records_merged: usize,
}

/// One-shot reconciliation of the price history files
pub struct PriceSync<'a> {
    config: UpdateConfig,
    provider: &'a dyn QuoteProvider,
    stats: SyncStats,
}

impl<'a> PriceSync<'a> {
    pub fn new(config: UpdateConfig, provider: &'a dyn QuoteProvider) -> Self {
        Self {
            config,
            provider,
            stats: SyncStats::default(),
        }
    }

    pub fn stats(&self) -> &SyncStats {
        &self.stats
    }

    /// Run the full reconciliation. Fatal only on a missing ledger or an
    /// unwritable destination; per-entity fetch failures are logged and the
    /// loop continues.
    pub async fn run(&mut self) -> Result<()> {
        let start_time = Instant::now();

        let ledger_text = fs::read_to_string(&self.config.ledger_path).map_err(|e| {
            Error::NotFound(format!(
                "Cannot read ledger {}: {}",
                self.config.ledger_path.display(),
                e
            ))
        })?;

        let directives = parse_ledger(&ledger_text);
        if directives.is_empty() {
            println!(
                "⚠️  No commodities found in {}",
                self.config.ledger_path.display()
            );
            return Ok(());
        }

        // A shared output file only works for ledgers without currency
        // directives; each file keeps its own date format and addressing.
        let shared_output = self.config.currency_prices_path == self.config.stock_prices_path;
        if shared_output && !directives.currencies.is_empty() {
            return Err(Error::Config(format!(
                "Currency directives need their own output file, but {} is configured for both stock and currency prices",
                self.config.stock_prices_path.display()
            )));
        }

        println!(
            "🚀 Updating {} entities ({} tickers, {} currency pairs)",
            directives.entity_count(),
            directives.tickers.len(),
            directives.entity_count() - directives.tickers.len(),
        );

        let today = Utc::now().date_naive();

        let mut stock_store =
            PriceStore::load_file(PriceFileFormat::Stock, &self.config.stock_prices_path)?;
        let mut currency_store = if shared_output {
            PriceStore::new(PriceFileFormat::Currency)
        } else {
            PriceStore::load_file(PriceFileFormat::Currency, &self.config.currency_prices_path)?
        };

        for ticker in &directives.tickers {
            self.sync_entity(&mut stock_store, ticker, ticker, STOCK_QUOTE_CURRENCY, today)
                .await;
            sleep(self.config.fetch_delay).await;
        }

        for (base, codes) in &directives.currencies {
            for code in codes {
                // the record carries the target symbol, quoted in the base
                self.sync_entity(&mut currency_store, &code.remote_code, &code.target, base, today)
                    .await;
                sleep(self.config.fetch_delay).await;
            }
        }

        stock_store.save(&self.config.stock_prices_path)?;
        info!(
            "Rewrote {} ({} records)",
            self.config.stock_prices_path.display(),
            stock_store.record_count(),
        );

        if !shared_output {
            currency_store.save(&self.config.currency_prices_path)?;
            info!(
                "Rewrote {} ({} records)",
                self.config.currency_prices_path.display(),
                currency_store.record_count(),
            );
        }

        self.print_summary(start_time.elapsed().as_secs_f64());
        Ok(())
    }

    /// Fetch and merge one entity. Never fails: provider errors are counted
    /// and logged so one bad symbol cannot abort the run.
    async fn sync_entity(
        &mut self,
        store: &mut PriceStore,
        remote_symbol: &str,
        record_symbol: &str,
        currency: &str,
        today: NaiveDate,
    ) {
        let entity_key = store.format().entity_key(record_symbol, currency);
        let start = plan_start(store, &entity_key, self.config.lookback_days, today);

        println!("📥 Fetching {} (from {})...", remote_symbol, start);

        match self.provider.fetch_prices(remote_symbol, start).await {
            Ok(quotes) => {
                let records = quotes_to_records(record_symbol, currency, quotes);
                info!(
                    "Merging {} records for {} (from {})",
                    records.len(),
                    entity_key,
                    start
                );
                self.stats.fetched += 1;
                self.stats.records_merged += records.len();
                store.merge(&entity_key, records);
            }
            Err(e) => {
                warn!("Fetch failed for {}: {}", entity_key, e);
                eprintln!("⚠️  Fetch failed for {}: {}", remote_symbol, e);
                self.stats.failed += 1;
            }
        }
    }

    fn print_summary(&self, elapsed_secs: f64) {
        println!("\n📊 Update summary ({:.1}s)", elapsed_secs);
        println!("   Entities fetched: {}", self.stats.fetched);
        println!("   Entities failed:  {}", self.stats.failed);
        println!("   Records merged:   {}", self.stats.records_merged);
    }
}

fn quotes_to_records(symbol: &str, currency: &str, quotes: Vec<Quote>) -> Vec<PriceRecord> {
    quotes
        .into_iter()
        .map(|quote| PriceRecord::new(quote.date, symbol, quote.close, currency))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_quotes_to_records() {
        let quotes = vec![Quote {
            date: NaiveDate::from_ymd_opt(2024, 1, 10).unwrap(),
            close: dec!(0.2012),
        }];

        let records = quotes_to_records("USD", "BRL", quotes);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol, "USD");
        assert_eq!(records[0].currency, "BRL");
        assert_eq!(records[0].price, dec!(0.2012));
        assert_eq!(
            records[0].entity_key(PriceFileFormat::Currency),
            "USD-BRL"
        );
    }
}
