use chrono::NaiveDate;
use rust_decimal::Decimal;

use crate::constants::{
    CURRENCY_DATE_FORMAT, RECORD_MARKER, RECORD_MIN_FIELDS, STOCK_DATE_FORMAT,
};
use crate::utils::{format_wire_price, parse_wire_price};

/// Addressing scheme and date style of a price history file
///
/// The two variants match the two files earlier versions of this tool wrote
/// and must keep round-tripping their formats byte for byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PriceFileFormat {
    /// `P 15/01/2024 AAPL 187,50 USD` — entity key is the bare symbol
    Stock,
    /// `P 2024-01-15 USD 0,20 BRL` — entity key is `TARGET-BASE`, where the
    /// base currency sits in the quote-currency field
    Currency,
}

impl PriceFileFormat {
    pub fn date_format(&self) -> &'static str {
        match self {
            PriceFileFormat::Stock => STOCK_DATE_FORMAT,
            PriceFileFormat::Currency => CURRENCY_DATE_FORMAT,
        }
    }

    pub fn parse_date(&self, raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, self.date_format()).ok()
    }

    pub fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.date_format()).to_string()
    }

    /// Key a record is grouped under in its store
    pub fn entity_key(&self, symbol: &str, currency: &str) -> String {
        match self {
            PriceFileFormat::Stock => symbol.to_string(),
            PriceFileFormat::Currency => format!("{}-{}", symbol, currency),
        }
    }
}

/// One price line of a history file
///
/// `price` is exact internally; the comma-formatted two-digit string only
/// exists on the wire.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceRecord {
    pub date: NaiveDate,

    /// Third field on the wire: bare ticker, or conversion target currency
    pub symbol: String,

    pub price: Decimal,

    /// Fifth field on the wire: quote currency (conversion base for
    /// currency records)
    pub currency: String,
}

impl PriceRecord {
    pub fn new(
        date: NaiveDate,
        symbol: impl Into<String>,
        price: Decimal,
        currency: impl Into<String>,
    ) -> Self {
        Self {
            date,
            symbol: symbol.into(),
            price,
            currency: currency.into(),
        }
    }

    /// Key this record is grouped under in a store of the given format
    pub fn entity_key(&self, format: PriceFileFormat) -> String {
        format.entity_key(&self.symbol, &self.currency)
    }

    /// Parse one history line. Returns `None` for anything that is not a
    /// well-formed price record; callers skip such lines instead of failing.
    pub fn parse_line(format: PriceFileFormat, line: &str) -> Option<Self> {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < RECORD_MIN_FIELDS || parts[0] != RECORD_MARKER {
            return None;
        }

        let date = format.parse_date(parts[1])?;
        let price = parse_wire_price(parts[3])?;
        let currency = parts.get(4).copied().unwrap_or_default();

        Some(Self::new(date, parts[2], price, currency))
    }

    /// Serialize back to the wire format of the given file variant
    pub fn to_line(&self, format: PriceFileFormat) -> String {
        format!(
            "{} {} {} {} {}",
            RECORD_MARKER,
            format.format_date(self.date),
            self.symbol,
            format_wire_price(self.price),
            self.currency,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_stock_line_round_trip() {
        let line = "P 15/01/2024 AAPL 187,50 USD";
        let record = PriceRecord::parse_line(PriceFileFormat::Stock, line).unwrap();

        assert_eq!(record.date, date(2024, 1, 15));
        assert_eq!(record.symbol, "AAPL");
        assert_eq!(record.price, dec!(187.50));
        assert_eq!(record.currency, "USD");
        assert_eq!(record.entity_key(PriceFileFormat::Stock), "AAPL");
        assert_eq!(record.to_line(PriceFileFormat::Stock), line);
    }

    #[test]
    fn test_currency_line_round_trip() {
        let line = "P 2024-01-15 USD 0,20 BRL";
        let record = PriceRecord::parse_line(PriceFileFormat::Currency, line).unwrap();

        assert_eq!(record.date, date(2024, 1, 15));
        assert_eq!(record.symbol, "USD");
        assert_eq!(record.currency, "BRL");
        assert_eq!(record.entity_key(PriceFileFormat::Currency), "USD-BRL");
        assert_eq!(record.to_line(PriceFileFormat::Currency), line);
    }

    #[test]
    fn test_malformed_lines_are_rejected() {
        for line in [
            "",
            "; comment",
            "P 15/01/2024 AAPL",                 // too few fields
            "X 15/01/2024 AAPL 187,50 USD",      // wrong marker
            "P 2024-01-15 AAPL 187,50 USD",      // wrong date style for stock file
            "P 15/01/2024 AAPL abc USD",         // unparseable price
        ] {
            assert!(
                PriceRecord::parse_line(PriceFileFormat::Stock, line).is_none(),
                "line should be rejected: {:?}",
                line
            );
        }
    }

    #[test]
    fn test_price_is_rounded_on_the_wire_only() {
        let record = PriceRecord::new(date(2024, 1, 15), "AAPL", dec!(187.505), "USD");
        assert_eq!(record.to_line(PriceFileFormat::Stock), "P 15/01/2024 AAPL 187,51 USD");
        // internal value keeps full precision
        assert_eq!(record.price, dec!(187.505));
    }
}
