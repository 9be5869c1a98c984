use std::time::Duration;

use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::rates::{null_as_default, RateSource, RawRates};

pub const ENDPOINT: &str = "https://api.coinbase.com";

// {"data":{"currency":"USD","rates":{"BTC":"0.0000154","ETH":"0.000293",...}}}
// The currency echo and every untracked code are ignored.
#[derive(Deserialize, Debug)]
struct ExchangeRatesResponse {
    data: ExchangeRatesData,
}

#[derive(Deserialize, Debug)]
struct ExchangeRatesData {
    #[serde(default, deserialize_with = "null_as_default")]
    rates: RawRates,
}

#[derive(Debug, Clone)]
pub struct Coinbase {
    client: Client,
    exchange_rates_url: Url,
}

impl Coinbase {
    /// `endpoint` is the API base url, e.g. [`ENDPOINT`] or a test server.
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self> {
        let url = format!("{}/v2/exchange-rates", endpoint.trim_end_matches('/'));
        let exchange_rates_url = Url::parse(url.as_str()).map_err(|e| Error::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })?;
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            exchange_rates_url,
        })
    }
}

impl RateSource for Coinbase {
    async fn fetch(&self, base_currency: &str) -> Result<RawRates> {
        let mut url = self.exchange_rates_url.clone();
        url.query_pairs_mut().append_pair("currency", base_currency);

        info!("Fetching exchange rates {}", url);

        let r = self.client.get(url).send().await?.error_for_status()?;
        let body = r.text().await?;

        debug!("Exchange rates : {} bytes", body.len());

        let r: ExchangeRatesResponse = serde_json::de::from_str(body.as_str())?;

        Ok(r.data.rates)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{RawQuery, State},
        http::{StatusCode, Uri},
        Router,
    };
    use rust_decimal_macros::dec;

    use super::*;
    use crate::error::ErrorKind;
    use crate::rates::ExchangeRates;

    const SAMPLE: &str = r#"{"data":{"currency":"USD","rates":{
        "AED":"3.6725","AFN":"70.5","ALL":"93.02","BCH":"0.00267","BTC":"0.000015409648952",
        "DOGE":"6.21","ETH":"0.0002930428692413","EUR":"0.92","LTC":"0.0119","SOL":"0.0067",
        "USDC":"1","XRP":"1.68"}}}"#;

    #[derive(Default)]
    struct Seen {
        path: Option<String>,
        query: Option<String>,
    }

    /// Serves `body` with `status` on every path and records the last request.
    async fn stub_server(status: StatusCode, body: &'static str) -> (String, Arc<Mutex<Seen>>) {
        let seen = Arc::new(Mutex::new(Seen::default()));

        let app = Router::new()
            .fallback(
                move |State(seen): State<Arc<Mutex<Seen>>>, uri: Uri, RawQuery(query): RawQuery| async move {
                    let mut seen = seen.lock().unwrap();
                    seen.path = Some(uri.path().to_string());
                    seen.query = query;
                    (status, body)
                },
            )
            .with_state(seen.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        tokio::task::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{}", address), seen)
    }

    #[tokio::test]
    async fn test_fetch_rates() {
        let (endpoint, seen) = stub_server(StatusCode::OK, SAMPLE).await;
        let coinbase = Coinbase::new(&endpoint, Duration::from_secs(5)).unwrap();

        let raw = coinbase.fetch("USD").await.unwrap();
        assert_eq!(raw, RawRates::new("0.000015409648952", "0.0002930428692413"));

        {
            let seen = seen.lock().unwrap();
            assert_eq!(seen.path.as_deref(), Some("/v2/exchange-rates"));
            assert_eq!(seen.query.as_deref(), Some("currency=USD"));
        }

        let rates = ExchangeRates::try_from(raw).unwrap();
        assert_eq!(rates.btc, dec!(0.000015409648952));
    }

    #[tokio::test]
    async fn test_trailing_slash_endpoint() {
        let (endpoint, seen) =
            stub_server(StatusCode::OK, r#"{"data":{"rates":{"BTC":"1","ETH":"0.5"}}}"#).await;
        let coinbase = Coinbase::new(&format!("{endpoint}/"), Duration::from_secs(5)).unwrap();

        let raw = coinbase.fetch("USD").await.unwrap();
        assert_eq!(raw, RawRates::new("1", "0.5"));
        assert_eq!(
            seen.lock().unwrap().path.as_deref(),
            Some("/v2/exchange-rates")
        );
    }

    #[tokio::test]
    async fn test_missing_asset_is_not_transport_error() {
        let (endpoint, _) =
            stub_server(StatusCode::OK, r#"{"data":{"rates":{"BTC":"1","EUR":"0.9"}}}"#).await;
        let coinbase = Coinbase::new(&endpoint, Duration::from_secs(5)).unwrap();

        let raw = coinbase.fetch("USD").await.unwrap();
        assert_eq!(raw.eth, "");
        let err = ExchangeRates::try_from(raw).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DataAvailability);
    }

    #[tokio::test]
    async fn test_null_rate_is_not_transport_error() {
        for body in [
            r#"{"data":{"rates":{"BTC":"1","ETH":null}}}"#,
            r#"{"data":{"currency":"USD","rates":null}}"#,
        ] {
            let (endpoint, _) = stub_server(StatusCode::OK, body).await;
            let coinbase = Coinbase::new(&endpoint, Duration::from_secs(5)).unwrap();

            let raw = coinbase.fetch("USD").await.unwrap();
            let err = ExchangeRates::try_from(raw).unwrap_err();
            assert_eq!(err.kind(), ErrorKind::DataAvailability, "{body}");
        }
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let (endpoint, _) = stub_server(StatusCode::SERVICE_UNAVAILABLE, "try later").await;
        let coinbase = Coinbase::new(&endpoint, Duration::from_secs(5)).unwrap();

        let err = coinbase.fetch("USD").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
    }

    #[tokio::test]
    async fn test_undecodable_body() {
        let (endpoint, _) = stub_server(StatusCode::OK, "<html>not json</html>").await;
        let coinbase = Coinbase::new(&endpoint, Duration::from_secs(5)).unwrap();

        let err = coinbase.fetch("USD").await.unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Transport);
        assert!(matches!(err, Error::Decode(_)));
    }

    #[test]
    fn test_invalid_endpoint() {
        let err = Coinbase::new("not a url", Duration::from_secs(5)).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InputValidation);
    }

    #[tokio::test]
    async fn test_connection_refused() {
        // bind then drop to get a port nobody listens on
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = listener.local_addr().unwrap();
        drop(listener);

        let coinbase = Coinbase::new(&format!("http://{address}"), Duration::from_secs(5)).unwrap();
        let err = coinbase.fetch("USD").await.unwrap_err();
        assert!(matches!(err, Error::Request(_)));
    }
}
