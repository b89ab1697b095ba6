//! Ledger Commodity Directive Scanner
//!
//! Extracts `commodity` directives from a plain-text ledger. A directive
//! opens with `commodity SYM` and owns every immediately following line
//! indented by at least two spaces:
//!
//! ```text
//! commodity AAPL
//!   note: equities
//! commodity BRL
//!   type: currency
//!   codes: [USD:BRLUSD=X, EUR:BRLEUR=X]
//! ```
//!
//! A commodity is currency-typed only when both the `type: currency` marker
//! and at least one valid `codes:` pair are present. Currency-typed
//! commodities without codes are dropped entirely; everything else becomes a
//! plain ticker. Malformed input is skipped, never fatal.

use tracing::debug;

use crate::models::{CurrencyCode, LedgerDirectives};

/// Scan the full ledger text for commodity directives
pub fn parse_ledger(text: &str) -> LedgerDirectives {
    let lines: Vec<&str> = text.lines().collect();
    let mut directives = LedgerDirectives::default();

    let mut cursor = 0;
    while cursor < lines.len() {
        let trimmed = lines[cursor].trim();
        let mut tokens = trimmed.split_whitespace();

        if tokens.next() != Some("commodity") {
            cursor += 1;
            continue;
        }
        let symbol = tokens.next();

        // Consume the indented sub-attribute block regardless of whether the
        // directive itself is usable, so its lines are never re-scanned as
        // top-level directives.
        let mut is_currency = false;
        let mut codes: Vec<CurrencyCode> = Vec::new();
        let mut next = cursor + 1;
        while next < lines.len() && lines[next].starts_with("  ") {
            if let Some((key, value)) = lines[next].trim().split_once(':') {
                match key.trim().to_ascii_lowercase().as_str() {
                    "type" => {
                        if value.trim().eq_ignore_ascii_case("currency") {
                            is_currency = true;
                        }
                    }
                    "codes" => codes = parse_code_list(value),
                    _ => {}
                }
            }
            next += 1;
        }
        cursor = next;

        let Some(symbol) = symbol else {
            debug!("Ignoring commodity directive without a symbol");
            continue;
        };

        if is_currency {
            if codes.is_empty() {
                debug!("Dropping currency commodity {} with no usable codes", symbol);
            } else {
                directives.currencies.insert(symbol.to_string(), codes);
            }
        } else {
            directives.tickers.insert(symbol.to_string());
        }
    }

    directives
}

/// Parse a `codes:` value: `[TARGET:REMOTE_CODE, ...]` with optional brackets
fn parse_code_list(raw: &str) -> Vec<CurrencyCode> {
    let inner = raw.trim().trim_start_matches('[').trim_end_matches(']');

    inner
        .split(',')
        .filter_map(|pair| {
            let (target, code) = pair.split_once(':')?;
            let target = target.trim();
            let code = code.trim();
            if target.is_empty() || code.is_empty() {
                return None;
            }
            Some(CurrencyCode::new(target, code))
        })
        .collect()
}
