use async_trait::async_trait;
use reqwest::Client;
use tracing::instrument;

use crate::error::SourceError;
use crate::fx::{FxBoard, FxEntry, FxRateProvider};
use crate::providers::util;

pub const DEFAULT_BASE_URL: &str = "https://dolarapi.com";

/// FX quote source: `GET {base}/v1/dolares` returns an array of quote
/// entries, one per mechanism.
pub struct DolarApiProvider {
    base_url: String,
    client: Client,
}

impl DolarApiProvider {
    pub fn new(base_url: &str, client: Client) -> Self {
        DolarApiProvider {
            base_url: base_url.to_string(),
            client,
        }
    }
}

#[async_trait]
impl FxRateProvider for DolarApiProvider {
    #[instrument(name = "FxBoardFetch", skip(self))]
    async fn fetch_board(&self) -> Result<FxBoard, SourceError> {
        let url = format!("{}/v1/dolares", self.base_url);
        let entries: Vec<FxEntry> = util::get_json(&self.client, &url).await?;
        Ok(FxBoard::from_entries(&entries))
    }
}
