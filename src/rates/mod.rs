use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer};

use crate::asset::Asset;
use crate::error::{Error, Result};

pub mod coinbase;
pub mod fixed;

/// Rates for the tracked assets exactly as the feed returned them.
/// An empty string means the feed had no rate for that asset.
#[derive(Deserialize, Clone, Debug, Default, Eq, PartialEq)]
pub struct RawRates {
    #[serde(rename = "BTC", default, deserialize_with = "null_as_default")]
    pub btc: String,
    #[serde(rename = "ETH", default, deserialize_with = "null_as_default")]
    pub eth: String,
}

/// Reads `null` the same way as an absent key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

impl RawRates {
    pub fn new(btc: &str, eth: &str) -> Self {
        Self {
            btc: btc.to_string(),
            eth: eth.to_string(),
        }
    }

    pub fn get(&self, asset: Asset) -> &str {
        match asset {
            Asset::Btc => &self.btc,
            Asset::Eth => &self.eth,
        }
    }
}

/// Units of each asset per 1 unit of base currency.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ExchangeRates {
    pub btc: Decimal,
    pub eth: Decimal,
}

impl ExchangeRates {
    pub fn get(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Btc => self.btc,
            Asset::Eth => self.eth,
        }
    }
}

impl TryFrom<&RawRates> for ExchangeRates {
    type Error = Error;

    fn try_from(raw: &RawRates) -> Result<Self> {
        // every rate must be present before any of them is parsed
        for asset in Asset::ALL {
            if raw.get(asset).trim().is_empty() {
                return Err(Error::RateUnavailable { asset });
            }
        }

        let parse = |asset: Asset| {
            let value = raw.get(asset).trim();
            Decimal::from_str(value).map_err(|source| Error::InvalidRate {
                asset,
                value: value.to_string(),
                source,
            })
        };

        Ok(Self {
            btc: parse(Asset::Btc)?,
            eth: parse(Asset::Eth)?,
        })
    }
}

impl TryFrom<RawRates> for ExchangeRates {
    type Error = Error;

    fn try_from(raw: RawRates) -> Result<Self> {
        Self::try_from(&raw)
    }
}

/// Where current exchange rates come from.
pub trait RateSource {
    async fn fetch(&self, base_currency: &str) -> Result<RawRates>;
}
