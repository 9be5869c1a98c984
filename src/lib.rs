use tracing::info;

use allocation::Allocation;
use amount::{Currency, SpendingAmount};
use holdings::Holdings;
use rates::{ExchangeRates, RateSource};

pub mod allocation;
pub mod amount;
pub mod asset;
pub mod config;
pub mod error;
pub mod holdings;
pub mod rates;

pub use error::{Error, ErrorKind, Result};

/// Parses `input`, fetches current rates and computes the holdings it buys.
///
/// The amount is validated before any request goes out, and a missing or
/// malformed rate aborts before anything is computed.
pub async fn convert<S: RateSource>(
    source: &S,
    allocation: &Allocation,
    currency: Currency,
    input: &str,
) -> Result<Holdings> {
    let spending = SpendingAmount::parse(input, currency)?;
    info!("Spending {}", spending);

    let raw = source.fetch(currency.code).await?;
    let rates = ExchangeRates::try_from(&raw)?;
    info!("Rates per {} : BTC {} / ETH {}", currency.code, rates.btc, rates.eth);

    allocation.compute_holdings(spending, &rates)
}
