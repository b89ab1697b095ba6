mod commodity;
mod price_record;
mod update_config;

pub use commodity::{CurrencyCode, LedgerDirectives};
pub use price_record::{PriceFileFormat, PriceRecord};
pub use update_config::UpdateConfig;
