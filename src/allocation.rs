use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use tracing::debug;

use crate::amount::SpendingAmount;
use crate::asset::Asset;
use crate::error::{Error, Result};
use crate::holdings::Holdings;
use crate::rates::ExchangeRates;

pub const BTC_PERCENTAGE: u32 = 70;
pub const ETH_PERCENTAGE: u32 = 30;

const _: () = assert!(BTC_PERCENTAGE + ETH_PERCENTAGE == 100);

const ONE_HUNDRED: Decimal = dec!(100);

/// Currency amount set aside for each asset. Always sums to the spending
/// amount it was split from.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SubAmounts {
    pub btc: Decimal,
    pub eth: Decimal,
}

/// Percentage of the spending money that goes to each asset.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Allocation {
    btc_percentage: u32,
    eth_percentage: u32,
}

impl Default for Allocation {
    fn default() -> Self {
        Self {
            btc_percentage: BTC_PERCENTAGE,
            eth_percentage: ETH_PERCENTAGE,
        }
    }
}

impl Allocation {
    pub fn new(btc_percentage: u32, eth_percentage: u32) -> Result<Self> {
        let total = btc_percentage.saturating_add(eth_percentage);
        if total != 100 {
            return Err(Error::InvalidSplit(total));
        }
        Ok(Self {
            btc_percentage,
            eth_percentage,
        })
    }

    pub fn percentage(&self, asset: Asset) -> u32 {
        match asset {
            Asset::Btc => self.btc_percentage,
            Asset::Eth => self.eth_percentage,
        }
    }

    /// Splits `spending` into per-asset amounts rounded half-up to the
    /// currency's minor unit. ETH takes whatever BTC leaves, so no cent is
    /// lost or created by rounding.
    pub fn allocate(&self, spending: SpendingAmount) -> Result<SubAmounts> {
        let value = spending.value();
        let minor_units = spending.currency().minor_units;

        let btc = value
            .checked_mul(Decimal::from(self.btc_percentage))
            .and_then(|v| v.checked_div(ONE_HUNDRED))
            .ok_or(Error::Overflow { asset: Asset::Btc })?
            .round_dp_with_strategy(minor_units, RoundingStrategy::MidpointAwayFromZero);
        let eth = value
            .checked_sub(btc)
            .ok_or(Error::Overflow { asset: Asset::Eth })?;

        debug!("Allocated {} : BTC {} / ETH {}", spending, btc, eth);

        Ok(SubAmounts { btc, eth })
    }

    /// Quantity of each asset `spending` buys at `rates`. Quantities are
    /// not rounded, they are not currency.
    pub fn compute_holdings(
        &self,
        spending: SpendingAmount,
        rates: &ExchangeRates,
    ) -> Result<Holdings> {
        let sub_amounts = self.allocate(spending)?;

        let convert = |asset: Asset, amount: Decimal| {
            amount
                .checked_mul(rates.get(asset))
                .map(|quantity| quantity.normalize())
                .ok_or(Error::Overflow { asset })
        };

        Ok(Holdings {
            btc: convert(Asset::Btc, sub_amounts.btc)?,
            eth: convert(Asset::Eth, sub_amounts.eth)?,
        })
    }
}
