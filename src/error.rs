use std::fmt::Display;

use crate::asset::Asset;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid spending amount {input:?}: {reason}")]
    InvalidAmount { input: String, reason: String },

    #[error("allocation split sums to {0}%, expected 100%")]
    InvalidSplit(u32),

    #[error("invalid rate endpoint {endpoint:?}: {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },

    #[error("exchange rate request failed")]
    Request(#[from] reqwest::Error),

    #[error("exchange rate response could not be decoded")]
    Decode(#[from] serde_json::Error),

    #[error("{asset} rate not found in exchange rate response")]
    RateUnavailable { asset: Asset },

    #[error("{asset} rate {value:?} is not a valid decimal")]
    InvalidRate {
        asset: Asset,
        value: String,
        #[source]
        source: rust_decimal::Error,
    },

    #[error("{asset} holdings overflow the decimal range")]
    Overflow { asset: Asset },
}

/// Which check failed. Every kind aborts the run.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    InputValidation,
    Transport,
    DataAvailability,
    RateParse,
    Arithmetic,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::InvalidAmount { .. } | Error::InvalidSplit(_) | Error::InvalidEndpoint { .. } => {
                ErrorKind::InputValidation
            }
            Error::Request(_) | Error::Decode(_) => ErrorKind::Transport,
            Error::RateUnavailable { .. } => ErrorKind::DataAvailability,
            Error::InvalidRate { .. } => ErrorKind::RateParse,
            Error::Overflow { .. } => ErrorKind::Arithmetic,
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ErrorKind::InputValidation => "input",
            ErrorKind::Transport => "transport",
            ErrorKind::DataAvailability => "data",
            ErrorKind::RateParse => "rate",
            ErrorKind::Arithmetic => "arithmetic",
        };
        write!(f, "{}", s)
    }
}
