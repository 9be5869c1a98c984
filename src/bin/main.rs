use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use crypto_split::config::Config;
use crypto_split::holdings::Holdings;
use crypto_split::Error;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Splits a cash amount 70/30 into BTC and ETH at current Coinbase rates
/// and prints the resulting holdings as JSON.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
    /// Amount of money to spend, e.g. 100.73
    amount: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // stdout is reserved for the result
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            format!(
                "{}=info,crypto_split=info",
                env!("CARGO_CRATE_NAME")
            )
            .into()
        }))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    match run(args).await {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}

/// One line naming the failed check and the full cause chain.
fn diagnostic(err: &anyhow::Error) -> String {
    let kind = err
        .downcast_ref::<Error>()
        .map(|e| e.kind().to_string())
        .unwrap_or_else(|| String::from("internal"));
    format!("{}: {:#}", format!("error[{}]", kind).red(), err)
}

async fn run(args: Args) -> Result<String> {
    let config = Config::default();
    let source = config
        .rate_source()
        .context("Failed to set up the exchange rate client")?;

    let holdings: Holdings = crypto_split::convert(
        &source,
        &config.allocation,
        config.currency,
        &args.amount,
    )
    .await
    .with_context(|| format!("Could not convert {} {}", args.amount, config.currency.code))?;

    info!("{}", holdings);

    let json = holdings
        .to_json()
        .context("Failed to serialize holdings")?;
    Ok(json)
}
