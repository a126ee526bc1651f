use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::SourceError;
use crate::indicators::{RateRecord, RateTableProvider};
use crate::providers::util;

/// User-configurable TNA table: a JSON array of labelled rates fetched from a
/// feed URL supplied in the configuration. Used for both the fixed-deposit
/// and the e-wallet tables.
pub struct RateFeedProvider {
    url: String,
    client: Client,
}

impl RateFeedProvider {
    pub fn new(url: &str, client: Client) -> Self {
        RateFeedProvider {
            url: url.to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RateRow {
    #[serde(alias = "entidad", alias = "billetera")]
    label: String,
    tna: f64,
}

#[async_trait]
impl RateTableProvider for RateFeedProvider {
    #[instrument(name = "RateTableFetch", skip(self), fields(url = %self.url))]
    async fn fetch_rates(&self) -> Result<Vec<RateRecord>, SourceError> {
        let rows: Vec<RateRow> = util::get_json(&self.client, &self.url).await?;
        if rows.is_empty() {
            return Err(SourceError::FieldMissing("empty rate table".to_string()));
        }
        Ok(rows
            .into_iter()
            .map(|row| RateRecord::new(row.label, row.tna))
            .collect())
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
            .and(path("/tasas.json"))
            .respond_with(ResponseTemplate::new(200).set_body_string(body))
            .mount(&server)
            .await;
        server
    }

    fn provider(server: &MockServer) -> RateFeedProvider {
        let client = util::build_client(Duration::from_secs(5)).unwrap();
        RateFeedProvider::new(&format!("{}/tasas.json", server.uri()), client)
    }

    #[tokio::test]
    async fn parses_labelled_rates() {
        let body = r#"[
            {"entidad":"Banco Nación","tna":41.5},
            {"label":"Banco Galicia","tna":42.0}
        ]"#;
        let server = mock_server(body).await;

        let rates = provider(&server).fetch_rates().await.unwrap();
        assert_eq!(rates.len(), 2);
        assert_eq!(rates[0], RateRecord::new("Banco Nación", 41.5));
        assert_eq!(rates[1].annual_rate_pct, 42.0);
    }

    #[tokio::test]
    async fn an_empty_table_is_a_missing_field() {
        let server = mock_server("[]").await;
        let result = provider(&server).fetch_rates().await;
        assert!(matches!(result, Err(SourceError::FieldMissing(_))));
    }
}
