use std::collections::{BTreeMap, BTreeSet};

/// One `TARGET:REMOTE_CODE` pair from a commodity's `codes:` attribute
///
/// The remote code is the symbol sent to the quote provider (e.g.
/// `BRLUSD=X`), the target is the currency the quote converts into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyCode {
    pub target: String,
    pub remote_code: String,
}

impl CurrencyCode {
    pub fn new(target: impl Into<String>, remote_code: impl Into<String>) -> Self {
        Self {
            target: target.into(),
            remote_code: remote_code.into(),
        }
    }
}

/// Typed result of scanning a ledger for `commodity` directives
///
/// Ordered collections so every run walks entities in the same order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LedgerDirectives {
    /// Bare symbols fetched directly against the quote provider
    pub tickers: BTreeSet<String>,

    /// Base currency -> conversion targets with their remote codes
    pub currencies: BTreeMap<String, Vec<CurrencyCode>>,
}

impl LedgerDirectives {
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty() && self.currencies.is_empty()
    }

    /// Total number of entities a run will fetch
    pub fn entity_count(&self) -> usize {
        self.tickers.len() + self.currencies.values().map(Vec::len).sum::<usize>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entity_count() {
        let mut directives = LedgerDirectives::default();
        assert!(directives.is_empty());
        assert_eq!(directives.entity_count(), 0);

        directives.tickers.insert("AAPL".to_string());
        directives.currencies.insert(
            "BRL".to_string(),
            vec![
                CurrencyCode::new("USD", "BRLUSD=X"),
                CurrencyCode::new("EUR", "BRLEUR=X"),
            ],
        );

        assert!(!directives.is_empty());
        assert_eq!(directives.entity_count(), 3);
    }
}
