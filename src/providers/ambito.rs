use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::instrument;

use crate::error::SourceError;
use crate::indicators::{CountryRisk, CountryRiskProvider};
use crate::providers::util;

pub const DEFAULT_BASE_URL: &str = "https://mercados.ambito.com";

/// Country-risk source: an array of `[date, value, ...]` tuples, newest last.
/// The feed may lead with a header row; only the last tuple is read.
pub struct AmbitoProvider {
    base_url: String,
    client: Client,
}

impl AmbitoProvider {
    pub fn new(base_url: &str, client: Client) -> Self {
        AmbitoProvider {
            base_url: base_url.to_string(),
            client,
        }
    }
}

/// Values arrive either as numbers or as strings with a comma decimal
/// separator ("1312,50").
fn parse_tuple_value(raw: &Value) -> Option<f64> {
    match raw {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.replace(',', ".").parse().ok(),
        _ => None,
    }
}

#[async_trait]
impl CountryRiskProvider for AmbitoProvider {
    #[instrument(name = "CountryRiskFetch", skip(self))]
    async fn fetch_country_risk(&self) -> Result<CountryRisk, SourceError> {
        let url = format!("{}/riesgo-pais/variacion", self.base_url);
        let rows: Vec<Vec<Value>> = util::get_json(&self.client, &url).await?;

        let value = rows
            .last()
            .and_then(|row| row.get(1))
            .and_then(parse_tuple_value)
            .ok_or_else(|| SourceError::FieldMissing("last row value".to_string()))?;

        Ok(CountryRisk {
            basis_points: value.trunc() as i64,
        })
    }
}
