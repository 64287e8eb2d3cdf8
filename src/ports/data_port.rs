//! Price data access port trait.

use crate::domain::error::QuantsimError;
use crate::domain::price_series::PriceSeries;

pub trait PriceSource {
    /// Fetches at most `limit` of the most recent closes for `symbol`,
    /// oldest first. `None` returns everything available.
    fn fetch(
        &self,
        symbol: &str,
        interval: &str,
        limit: Option<usize>,
    ) -> Result<PriceSeries, QuantsimError>;

    fn list_symbols(&self, interval: &str) -> Result<Vec<String>, QuantsimError>;
}
