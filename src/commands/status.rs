use std::path::Path;

use crate::error::Error;
use crate::models::{PriceFileFormat, UpdateConfig};
use crate::services::price_store::PriceStore;
use crate::utils::format_wire_price;

pub fn run() {
    println!("📊 Price history status\n");

    match show_status() {
        Ok(()) => {}
        Err(e) => {
            eprintln!("❌ Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn show_status() -> Result<(), Error> {
    let config = UpdateConfig::default();

    show_store("Stocks", PriceFileFormat::Stock, &config.stock_prices_path)?;
    println!();
    show_store(
        "Currencies",
        PriceFileFormat::Currency,
        &config.currency_prices_path,
    )?;

    Ok(())
}

fn show_store(label: &str, format: PriceFileFormat, path: &Path) -> Result<(), Error> {
    let store = PriceStore::load_file(format, path)?;

    println!("🔹 {} ({})", label, path.display());

    if store.is_empty() {
        println!("   No price history yet. Run 'pull' first.");
        return Ok(());
    }

    for entity in store.entities() {
        let Some(records) = store.records(entity) else {
            continue;
        };

        let first = records.iter().map(|r| r.date).min();
        let last = records.iter().map(|r| r.date).max();
        let latest = records.iter().max_by_key(|r| r.date);

        if let (Some(first), Some(last), Some(latest)) = (first, last, latest) {
            println!(
                "   {:<12} {:>5} records  ({} → {})  latest {} {}",
                entity,
                records.len(),
                format.format_date(first),
                format.format_date(last),
                format_wire_price(latest.price),
                latest.currency,
            );
        }
    }

    println!(
        "   {} entities, {} records total",
        store.entity_count(),
        store.record_count()
    );

    Ok(())
}
