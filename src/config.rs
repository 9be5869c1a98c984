use std::time::Duration;

use crate::allocation::Allocation;
use crate::amount::{Currency, USD};
use crate::rates::coinbase::{self, Coinbase};
use crate::error::Result;

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone, Debug)]
pub struct Config {
    /// Base url of the exchange rate API.
    pub endpoint: String,
    pub currency: Currency,
    pub request_timeout: Duration,
    pub allocation: Allocation,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: coinbase::ENDPOINT.to_string(),
            currency: USD,
            request_timeout: REQUEST_TIMEOUT,
            allocation: Allocation::default(),
        }
    }
}

impl Config {
    pub fn rate_source(&self) -> Result<Coinbase> {
        Coinbase::new(&self.endpoint, self.request_timeout)
    }
}
