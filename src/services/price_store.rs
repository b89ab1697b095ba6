//! Per-Entity Price History Store
//!
//! In-memory image of one price history file: entity key -> record list.
//! Merging is a pure append; duplicate dates are resolved at serialization
//! time, keeping the most recently appended record so freshly fetched data
//! supersedes stale entries. The file is always rewritten whole so the
//! sorted/deduplicated/grouped invariants hold in the persisted artifact.

use chrono::NaiveDate;
use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::error::Result;
use crate::models::{PriceFileFormat, PriceRecord};

#[derive(Debug)]
pub struct PriceStore {
    format: PriceFileFormat,
    records: BTreeMap<String, Vec<PriceRecord>>,
}

impl PriceStore {
    pub fn new(format: PriceFileFormat) -> Self {
        Self {
            format,
            records: BTreeMap::new(),
        }
    }

    /// Hydrate a store from existing file text, grouping records by entity
    /// key in file order. Lines that are not valid price records are skipped.
    pub fn load(format: PriceFileFormat, text: &str) -> Self {
        let mut store = Self::new(format);

        for line in text.lines() {
            if line.trim().is_empty() {
                continue;
            }
            match PriceRecord::parse_line(format, line) {
                Some(record) => {
                    let key = record.entity_key(format);
                    store.records.entry(key).or_default().push(record);
                }
                None => debug!("Skipping unparseable price line: {}", line),
            }
        }

        store
    }

    /// Load from a file path; a missing file yields an empty store
    pub fn load_file(format: PriceFileFormat, path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::new(format));
        }
        let text = fs::read_to_string(path)?;
        Ok(Self::load(format, &text))
    }

    pub fn format(&self) -> PriceFileFormat {
        self.format
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn entity_count(&self) -> usize {
        self.records.len()
    }

    pub fn record_count(&self) -> usize {
        self.records.values().map(Vec::len).sum()
    }

    /// Entity keys in ascending order
    pub fn entities(&self) -> impl Iterator<Item = &str> {
        self.records.keys().map(String::as_str)
    }

    /// Records for one entity, in append order (not necessarily sorted)
    pub fn records(&self, entity_key: &str) -> Option<&[PriceRecord]> {
        self.records.get(entity_key).map(Vec::as_slice)
    }

    /// Latest known date for an entity, if any
    pub fn last_date(&self, entity_key: &str) -> Option<NaiveDate> {
        self.records
            .get(entity_key)?
            .iter()
            .map(|record| record.date)
            .max()
    }

    /// Append freshly fetched records for one entity. No deduplication
    /// happens here; `serialize` resolves duplicate dates in favor of the
    /// latest append.
    pub fn merge(&mut self, entity_key: &str, new_records: Vec<PriceRecord>) {
        if new_records.is_empty() {
            return;
        }
        self.records
            .entry(entity_key.to_string())
            .or_default()
            .extend(new_records);
    }

    /// Canonical file text: entities in ascending key order, each group
    /// deduplicated by date (last append wins), sorted ascending by date,
    /// and followed by one blank separator line.
    pub fn serialize(&self) -> String {
        let mut out = String::new();

        for records in self.records.values() {
            if records.is_empty() {
                continue;
            }

            // Reverse scan keeps the last occurrence of each date
            let mut seen: HashSet<NaiveDate> = HashSet::new();
            let mut group: Vec<&PriceRecord> = records
                .iter()
                .rev()
                .filter(|record| seen.insert(record.date))
                .collect();
            group.sort_by_key(|record| record.date);

            for record in group {
                out.push_str(&record.to_line(self.format));
                out.push('\n');
            }
            out.push('\n');
        }

        out
    }

    /// Rewrite the destination file. The text is staged in a sibling temp
    /// file and renamed into place so a crash cannot leave a truncated file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let staging = path.with_extension("tmp");
        fs::write(&staging, self.serialize())?;
        fs::rename(&staging, path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn record(d: NaiveDate, symbol: &str, price: rust_decimal::Decimal) -> PriceRecord {
        PriceRecord::new(d, symbol, price, "USD")
    }

    #[test]
    fn test_load_groups_by_entity_and_skips_garbage() {
        let text = "P 10/01/2024 AAPL 187,50 USD\nnot a record\n\nP 11/01/2024 AAPL 188,00 USD\nP 10/01/2024 MSFT 390,10 USD\n";
        let store = PriceStore::load(PriceFileFormat::Stock, text);

        assert_eq!(store.entity_count(), 2);
        assert_eq!(store.records("AAPL").unwrap().len(), 2);
        assert_eq!(store.records("MSFT").unwrap().len(), 1);
        assert_eq!(store.last_date("AAPL"), Some(date(2024, 1, 11)));
        assert_eq!(store.last_date("GOOG"), None);
    }

    #[test]
    fn test_currency_store_addresses_by_target_base() {
        let text = "P 2024-01-10 USD 0,20 BRL\nP 2024-01-10 EUR 0,18 BRL\n";
        let store = PriceStore::load(PriceFileFormat::Currency, text);

        let keys: Vec<&str> = store.entities().collect();
        assert_eq!(keys, vec!["EUR-BRL", "USD-BRL"]);
    }

    #[test]
    fn test_serialize_groups_sorted_entities_with_blank_separators() {
        let mut store = PriceStore::new(PriceFileFormat::Stock);
        store.merge(
            "MSFT",
            vec![
                record(date(2024, 1, 10), "MSFT", dec!(390.10)),
                record(date(2024, 1, 11), "MSFT", dec!(391.00)),
            ],
        );
        store.merge(
            "AAPL",
            vec![
                record(date(2024, 1, 11), "AAPL", dec!(188.00)),
                record(date(2024, 1, 10), "AAPL", dec!(187.50)),
            ],
        );

        let expected = "\
P 10/01/2024 AAPL 187,50 USD
P 11/01/2024 AAPL 188,00 USD

P 10/01/2024 MSFT 390,10 USD
P 11/01/2024 MSFT 391,00 USD

";
        assert_eq!(store.serialize(), expected);
    }

    #[test]
    fn test_duplicate_dates_keep_most_recent_merge() {
        let mut store = PriceStore::new(PriceFileFormat::Stock);
        store.merge("AAPL", vec![record(date(2024, 1, 10), "AAPL", dec!(187.50))]);
        // refetch of the same date with a corrected price
        store.merge("AAPL", vec![record(date(2024, 1, 10), "AAPL", dec!(188.25))]);

        assert_eq!(store.serialize(), "P 10/01/2024 AAPL 188,25 USD\n\n");
    }

    #[test]
    fn test_serialize_is_stable_under_reload() {
        let mut store = PriceStore::new(PriceFileFormat::Stock);
        store.merge(
            "AAPL",
            vec![
                record(date(2024, 1, 12), "AAPL", dec!(189.90)),
                record(date(2024, 1, 10), "AAPL", dec!(187.50)),
                record(date(2024, 1, 12), "AAPL", dec!(190.00)),
            ],
        );

        let first = store.serialize();
        let reloaded = PriceStore::load(PriceFileFormat::Stock, &first);
        assert_eq!(reloaded.serialize(), first);
    }

    #[test]
    fn test_merge_empty_is_a_noop() {
        let mut store = PriceStore::new(PriceFileFormat::Stock);
        store.merge("AAPL", vec![]);
        assert!(store.is_empty());
        assert_eq!(store.serialize(), "");
    }

    #[test]
    fn test_save_and_reload_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prices.ledger.txt");

        let mut store = PriceStore::new(PriceFileFormat::Stock);
        store.merge("AAPL", vec![record(date(2024, 1, 10), "AAPL", dec!(187.50))]);
        store.save(&path).unwrap();

        let reloaded = PriceStore::load_file(PriceFileFormat::Stock, &path).unwrap();
        assert_eq!(reloaded.serialize(), store.serialize());

        // staging file must not linger
        assert!(!dir.path().join("prices.ledger.tmp").exists());
    }

    #[test]
    fn test_load_file_missing_yields_empty_store() {
        let dir = tempfile::tempdir().unwrap();
        let store =
            PriceStore::load_file(PriceFileFormat::Stock, &dir.path().join("absent.txt")).unwrap();
        assert!(store.is_empty());
    }
}
