use std::fmt::Display;

use rust_decimal::Decimal;

use crate::error::{Error, Result};

/// The currency spending money is denominated in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Currency {
    pub code: &'static str,
    /// Decimal digits of the smallest subdivision (2 for cents).
    pub minor_units: u32,
}

pub const USD: Currency = Currency {
    code: "USD",
    minor_units: 2,
};

/// A non-negative amount of base currency with at most `minor_units`
/// decimal digits.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpendingAmount {
    value: Decimal,
    currency: Currency,
}

impl SpendingAmount {
    pub fn new(value: Decimal, currency: Currency) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidAmount {
            input: value.to_string(),
            reason,
        };

        if value.is_sign_negative() && !value.is_zero() {
            return Err(invalid("amount must not be negative".to_string()));
        }

        // 100.50 is a valid amount, 100.005 is not
        if value.normalize().scale() > currency.minor_units {
            return Err(invalid(format!(
                "{} supports at most {} decimal places",
                currency.code, currency.minor_units
            )));
        }

        Ok(Self { value, currency })
    }

    pub fn parse(input: &str, currency: Currency) -> Result<Self> {
        let invalid = |reason: String| Error::InvalidAmount {
            input: input.to_string(),
            reason,
        };

        // the decimal parser skips digit separators
        if input.contains('_') {
            return Err(invalid("digit separators are not allowed".to_string()));
        }

        // from_str would round away digits past 28 instead of failing
        let value = Decimal::from_str_exact(input.trim()).map_err(|e| invalid(e.to_string()))?;
        Self::new(value, currency).map_err(|err| match err {
            Error::InvalidAmount { reason, .. } => Error::InvalidAmount {
                input: input.to_string(),
                reason,
            },
            other => other,
        })
    }

    pub fn value(&self) -> Decimal {
        self.value
    }

    pub fn currency(&self) -> Currency {
        self.currency
    }
}

impl Display for SpendingAmount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.value, self.currency.code)
    }
}
