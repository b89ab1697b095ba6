//! Incremental Fetch Window Planning
//!
//! Each run only fetches what is missing: the day after the entity's last
//! recorded date, or a fixed lookback window for entities with no history.
//! As long as the store is persisted between runs the planned start never
//! moves backwards.

use chrono::{Duration, NaiveDate};

use crate::services::price_store::PriceStore;

/// First date the next fetch should cover for an entity
pub fn plan_start(
    store: &PriceStore,
    entity_key: &str,
    lookback_days: i64,
    today: NaiveDate,
) -> NaiveDate {
    match store.last_date(entity_key) {
        Some(last) => last + Duration::days(1),
        None => today - Duration::days(lookback_days),
    }
}
