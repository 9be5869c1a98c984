use std::cell::Cell;

use tracing::debug;

use crate::error::Result;
use crate::rates::{RateSource, RawRates};

/// Rate source that always answers with the same rates, no network.
#[derive(Debug, Clone, Default)]
pub struct StaticRates {
    rates: RawRates,
    fetch_count: Cell<usize>,
}

impl StaticRates {
    pub fn new(rates: RawRates) -> Self {
        Self {
            rates,
            fetch_count: Cell::new(0),
        }
    }

    /// How many times `fetch` was called.
    pub fn fetch_count(&self) -> usize {
        self.fetch_count.get()
    }
}

impl RateSource for StaticRates {
    async fn fetch(&self, base_currency: &str) -> Result<RawRates> {
        self.fetch_count.set(self.fetch_count.get() + 1);
        debug!("Static {} rates {:?}", base_currency, self.rates);
        Ok(self.rates.clone())
    }
}
