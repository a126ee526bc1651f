//! Normalized records for the non-FX metric groups, plus their provider traits.

use async_trait::async_trait;

use crate::error::SourceError;

/// Crypto reference prices. Fields are independently optional; the upstream
/// may quote one asset and not the other.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CryptoPrices {
    pub btc_usd: Option<f64>,
    pub usdt_ars: Option<f64>,
}

/// A labelled nominal annual rate (TNA). Used for deposit rows, wallet rows
/// and the policy rate.
#[derive(Debug, Clone, PartialEq)]
pub struct RateRecord {
    pub label: String,
    pub annual_rate_pct: f64,
}

impl RateRecord {
    pub fn new(label: impl Into<String>, annual_rate_pct: f64) -> Self {
        Self {
            label: label.into(),
            annual_rate_pct,
        }
    }
}

/// Equity index level with derived changes. The monthly change approximates
/// one trading month as 22 sessions.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexPoint {
    pub value: f64,
    pub daily_change_pct: Option<f64>,
    pub monthly_change_pct: Option<f64>,
}

/// Sovereign credit spread in basis points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CountryRisk {
    pub basis_points: i64,
}

#[async_trait]
pub trait CryptoPriceProvider: Send + Sync {
    async fn fetch_prices(&self) -> Result<CryptoPrices, SourceError>;
}

#[async_trait]
pub trait PolicyRateProvider: Send + Sync {
    async fn fetch_policy_rate(&self) -> Result<RateRecord, SourceError>;
}

#[async_trait]
pub trait CountryRiskProvider: Send + Sync {
    async fn fetch_country_risk(&self) -> Result<CountryRisk, SourceError>;
}

#[async_trait]
pub trait EquityIndexProvider: Send + Sync {
    async fn fetch_index(&self) -> Result<IndexPoint, SourceError>;
}

#[async_trait]
pub trait RateTableProvider: Send + Sync {
    async fn fetch_rates(&self) -> Result<Vec<RateRecord>, SourceError>;
}
