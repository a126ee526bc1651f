use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::SourceError;
use crate::indicators::{CryptoPriceProvider, CryptoPrices};
use crate::providers::util;

pub const DEFAULT_BASE_URL: &str = "https://api.coingecko.com";

/// Crypto price source: the simple-price endpoint keyed by asset id, then by
/// currency code.
pub struct CoinGeckoProvider {
    base_url: String,
    client: Client,
}

impl CoinGeckoProvider {
    pub fn new(base_url: &str, client: Client) -> Self {
        CoinGeckoProvider {
            base_url: base_url.to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SimplePriceResponse {
    bitcoin: Option<AssetPrices>,
    tether: Option<AssetPrices>,
}

#[derive(Debug, Deserialize)]
struct AssetPrices {
    usd: Option<f64>,
    ars: Option<f64>,
}

#[async_trait]
impl CryptoPriceProvider for CoinGeckoProvider {
    #[instrument(name = "CryptoPriceFetch", skip(self))]
    async fn fetch_prices(&self) -> Result<CryptoPrices, SourceError> {
        let url = format!(
            "{}/api/v3/simple/price?ids=bitcoin,tether&vs_currencies=usd,ars",
            self.base_url
        );
        let data: SimplePriceResponse = util::get_json(&self.client, &url).await?;
        Ok(CryptoPrices {
            btc_usd: data.bitcoin.and_then(|asset| asset.usd),
            usdt_ars: data.tether.and_then(|asset| asset.ars),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_server(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v3/simple/price"))
            .and(query_param("ids", "bitcoin,tether"))
            .and(query_param("vs_currencies", "usd,ars"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn provider(server: &MockServer) -> CoinGeckoProvider {
        let client = util::build_client(Duration::from_secs(5)).unwrap();
        CoinGeckoProvider::new(&server.uri(), client)
    }

    #[tokio::test]
    async fn extracts_btc_usd_and_usdt_ars() {
        let body = r#"{"bitcoin":{"usd":64250.0,"ars":62000000.0},"tether":{"usd":1.0,"ars":1180.5}}"#;
        let server = mock_server(body).await;

        let prices = provider(&server).fetch_prices().await.unwrap();
        assert_eq!(prices.btc_usd, Some(64250.0));
        assert_eq!(prices.usdt_ars, Some(1180.5));
    }

    #[tokio::test]
    async fn each_asset_is_independently_optional() {
        let body = r#"{"bitcoin":{"usd":64250.0}}"#;
        let server = mock_server(body).await;

        let prices = provider(&server).fetch_prices().await.unwrap();
        assert_eq!(prices.btc_usd, Some(64250.0));
        assert_eq!(prices.usdt_ars, None);
    }
}
