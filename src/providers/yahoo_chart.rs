use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::instrument;

use crate::error::SourceError;
use crate::indicators::{EquityIndexProvider, IndexPoint};
use crate::providers::util;

pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_SYMBOL: &str = "^MERV";

/// One trading month, approximated in sessions.
const MONTH_SESSIONS: usize = 22;

/// Equity-index source: a daily OHLC chart endpoint. The last close is the
/// level; daily and monthly changes are derived from the close series.
pub struct YahooChartProvider {
    base_url: String,
    symbol: String,
    client: Client,
}

impl YahooChartProvider {
    pub fn new(base_url: &str, symbol: &str, client: Client) -> Self {
        YahooChartProvider {
            base_url: base_url.to_string(),
            symbol: symbol.to_string(),
            client,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Vec<ChartItem>,
}

#[derive(Debug, Deserialize)]
struct ChartItem {
    meta: Option<ChartMeta>,
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(alias = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<Quote>,
}

#[derive(Debug, Deserialize)]
struct Quote {
    close: Option<Vec<Option<f64>>>,
}

fn change_pct(current: f64, base: f64) -> Option<f64> {
    if base > 0.0 {
        Some((current / base - 1.0) * 100.0)
    } else {
        None
    }
}

/// Derives the index point from the non-null closes. Monthly change compares
/// against the close 22 sessions before the last one, or the first session
/// when the series is shorter.
fn extract_from_closes(closes: &[f64]) -> Option<IndexPoint> {
    let last = *closes.last()?;
    let daily = if closes.len() >= 2 {
        change_pct(last, closes[closes.len() - 2])
    } else {
        None
    };
    let monthly = if closes.len() >= 2 {
        let base_index = (closes.len() - 1).saturating_sub(MONTH_SESSIONS);
        change_pct(last, closes[base_index])
    } else {
        None
    };
    Some(IndexPoint {
        value: last,
        daily_change_pct: daily,
        monthly_change_pct: monthly,
    })
}

#[async_trait]
impl EquityIndexProvider for YahooChartProvider {
    #[instrument(name = "EquityIndexFetch", skip(self), fields(symbol = %self.symbol))]
    async fn fetch_index(&self) -> Result<IndexPoint, SourceError> {
        let url = format!(
            "{}/v8/finance/chart/{}?interval=1d&range=3mo",
            self.base_url, self.symbol
        );
        let data: ChartResponse = util::get_json(&self.client, &url).await?;

        let item = data
            .chart
            .result
            .first()
            .ok_or_else(|| SourceError::FieldMissing("chart.result".to_string()))?;

        let closes: Vec<f64> = item
            .indicators
            .as_ref()
            .and_then(|inds| inds.quote.first())
            .and_then(|q| q.close.as_ref())
            .map(|series| series.iter().flatten().copied().collect())
            .unwrap_or_default();

        if let Some(point) = extract_from_closes(&closes) {
            return Ok(point);
        }

        // Meta-only responses carry a spot price and no history.
        match item.meta.as_ref().and_then(|m| m.regular_market_price) {
            Some(value) => Ok(IndexPoint {
                value,
                daily_change_pct: None,
                monthly_change_pct: None,
            }),
            None => Err(SourceError::FieldMissing(
                "indicators.quote[0].close".to_string(),
            )),
        }
    }
}
