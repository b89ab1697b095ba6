use rust_decimal::{Decimal, RoundingStrategy};
use std::path::PathBuf;

/// Read a file path from an environment variable, falling back to a default
pub fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(default))
}

/// Format a price for the history file: two fraction digits, comma
/// separator. Midpoints round away from zero, matching the files written by
/// earlier versions of this tool.
pub fn format_wire_price(price: Decimal) -> String {
    let rounded = price.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.2}", rounded).replace('.', ",")
}

/// Parse a wire price back into a decimal. Accepts both comma and dot
/// separators since hand-edited files show up with either.
pub fn parse_wire_price(raw: &str) -> Option<Decimal> {
    raw.replace(',', ".").parse::<Decimal>().ok()
}
