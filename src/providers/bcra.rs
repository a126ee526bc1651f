use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::SourceError;
use crate::indicators::{PolicyRateProvider, RateRecord};
use crate::providers::util;

pub const DEFAULT_BASE_URL: &str = "https://api.bcra.gob.ar";

/// Series id for the monetary policy rate in the central bank's statistics
/// API.
const POLICY_RATE_SERIES: u32 = 275;

const POLICY_RATE_LABEL: &str = "Tasa de política monetaria";

/// Policy-rate source: a time series of which only the last value is used.
pub struct BcraProvider {
    base_url: String,
    client: Client,
}

impl BcraProvider {
    pub fn new(base_url: &str, client: Client) -> Self {
        BcraProvider {
            base_url: base_url.to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct SeriesResponse {
    results: Vec<SeriesPoint>,
}

#[derive(Debug, Deserialize)]
struct SeriesPoint {
    valor: Option<f64>,
}

#[async_trait]
impl PolicyRateProvider for BcraProvider {
    #[instrument(name = "PolicyRateFetch", skip(self))]
    async fn fetch_policy_rate(&self) -> Result<RateRecord, SourceError> {
        let url = format!(
            "{}/estadisticas/v2.0/DatosVariable/{POLICY_RATE_SERIES}",
            self.base_url
        );
        let data: SeriesResponse = util::get_json(&self.client, &url).await?;

        let rate = data
            .results
            .last()
            .and_then(|point| point.valor)
            .ok_or_else(|| SourceError::FieldMissing("results[-1].valor".to_string()))?;

        Ok(RateRecord::new(POLICY_RATE_LABEL, rate))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mock_server(body: &str) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/estadisticas/v2.0/DatosVariable/275"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn provider(server: &MockServer) -> BcraProvider {
        let client = util::build_client(Duration::from_secs(5)).unwrap();
        BcraProvider::new(&server.uri(), client)
    }

    #[tokio::test]
    async fn takes_the_last_series_value() {
        let body = r#"{"results":[
            {"fecha":"2025-08-20","valor":41.0},
            {"fecha":"2025-08-21","valor":40.0}
        ]}"#;
        let server = mock_server(body).await;

        let record = provider(&server).fetch_policy_rate().await.unwrap();
        assert_eq!(record.annual_rate_pct, 40.0);
        assert_eq!(record.label, "Tasa de política monetaria");
    }

    #[tokio::test]
    async fn empty_series_is_a_missing_field() {
        let server = mock_server(r#"{"results":[]}"#).await;
        let result = provider(&server).fetch_policy_rate().await;
        assert!(matches!(result, Err(SourceError::FieldMissing(_))));
    }

    #[tokio::test]
    async fn non_numeric_last_value_is_a_missing_field() {
        let server = mock_server(r#"{"results":[{"fecha":"2025-08-21","valor":null}]}"#).await;
        let result = provider(&server).fetch_policy_rate().await;
        assert!(matches!(result, Err(SourceError::FieldMissing(_))));
    }
}
