use std::fmt::Display;

use colored::Colorize;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::asset::Asset;

/// Quantity of each asset bought with its share of the spending money.
#[derive(Serialize, Clone, Copy, Debug, Eq, PartialEq)]
pub struct Holdings {
    #[serde(rename = "BTCHoldings", with = "rust_decimal::serde::str")]
    pub btc: Decimal,
    #[serde(rename = "ETHHoldings", with = "rust_decimal::serde::str")]
    pub eth: Decimal,
}

impl Holdings {
    pub fn get(&self, asset: Asset) -> Decimal {
        match asset {
            Asset::Btc => self.btc,
            Asset::Eth => self.eth,
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::ser::to_string(self)
    }
}

impl Display for Holdings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s: Vec<String> = Asset::ALL
            .iter()
            .map(|asset| format!("{}: {}", asset, self.get(*asset).to_string().purple()))
            .collect();
        write!(f, "{}", s.join(" / "))
    }
}
