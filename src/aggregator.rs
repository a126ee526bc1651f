//! Refresh orchestration: one cached query per metric group, a concurrent
//! snapshot across all of them, and the derived metrics computed once every
//! extraction has settled.

use chrono::TimeDelta;
use std::sync::Arc;
use tracing::warn;

use crate::cache::{Clock, TtlCache};
use crate::error::SourceError;
use crate::fx::{FxBoard, FxKind, FxRateProvider};
use crate::indicators::{
    CountryRisk, CountryRiskProvider, CryptoPriceProvider, CryptoPrices, EquityIndexProvider,
    IndexPoint, PolicyRateProvider, RateRecord, RateTableProvider,
};
use crate::metrics;

/// The upstream providers, bundled so the aggregator owns one handle per
/// source. The two rate-table feeds are optional; without a configured feed
/// the built-in table is used.
pub struct Sources {
    pub fx: Arc<dyn FxRateProvider>,
    pub crypto: Arc<dyn CryptoPriceProvider>,
    pub policy_rate: Arc<dyn PolicyRateProvider>,
    pub country_risk: Arc<dyn CountryRiskProvider>,
    pub equity: Arc<dyn EquityIndexProvider>,
    pub deposit_rates: Option<Arc<dyn RateTableProvider>>,
    pub wallet_rates: Option<Arc<dyn RateTableProvider>>,
}

/// A metric group's outcome in a snapshot. The error keeps only the display
/// text so snapshots stay cheap to clone.
pub type FieldResult<T> = Result<T, String>;

/// Pairwise gap between two mechanisms' sell prices.
#[derive(Debug, Clone, Copy)]
pub struct FxGap {
    pub reference: FxKind,
    pub other: FxKind,
    pub gap_pct: Option<f64>,
}

/// The gap pairs reported on the board.
pub const GAP_PAIRS: [(FxKind, FxKind); 3] = [
    (FxKind::Official, FxKind::Mep),
    (FxKind::Official, FxKind::Ccl),
    (FxKind::Mep, FxKind::Ccl),
];

/// Immutable result of one refresh cycle. Sources are independent: any field
/// may be unavailable while the rest carry data.
#[derive(Debug, Clone)]
pub struct MarketSnapshot {
    pub fx: FieldResult<FxBoard>,
    pub gaps: Vec<FxGap>,
    pub crypto: FieldResult<CryptoPrices>,
    pub policy_rate: FieldResult<RateRecord>,
    pub country_risk: FieldResult<CountryRisk>,
    pub equity: FieldResult<IndexPoint>,
    /// Equity index level divided by the CCL sell rate.
    pub equity_usd: Option<f64>,
    pub deposit_rates: Vec<RateRecord>,
    pub wallet_rates: Vec<RateRecord>,
}

/// Fallback deposit TNA table used when no feed URL is configured.
pub fn builtin_deposit_rates() -> Vec<RateRecord> {
    vec![
        RateRecord::new("BCRA (referencia)", 40.0),
        RateRecord::new("Banco Nación", 41.5),
        RateRecord::new("Banco Galicia", 42.0),
        RateRecord::new("Banco Macro", 42.5),
        RateRecord::new("Santander", 43.0),
    ]
}

/// Fallback e-wallet TNA table used when no feed URL is configured.
pub fn builtin_wallet_rates() -> Vec<RateRecord> {
    vec![
        RateRecord::new("Mercado Pago", 35.0),
        RateRecord::new("Ualá", 33.0),
        RateRecord::new("Naranja X", 32.0),
    ]
}

pub struct Aggregator {
    sources: Sources,
    ttl: TimeDelta,
    fx_cache: TtlCache<&'static str, FxBoard>,
    crypto_cache: TtlCache<&'static str, CryptoPrices>,
    policy_cache: TtlCache<&'static str, RateRecord>,
    risk_cache: TtlCache<&'static str, CountryRisk>,
    index_cache: TtlCache<&'static str, IndexPoint>,
    table_cache: TtlCache<&'static str, Vec<RateRecord>>,
}

impl Aggregator {
    pub fn new(sources: Sources, ttl: TimeDelta, clock: Arc<dyn Clock>) -> Self {
        Aggregator {
            sources,
            ttl,
            fx_cache: TtlCache::new(Arc::clone(&clock)),
            crypto_cache: TtlCache::new(Arc::clone(&clock)),
            policy_cache: TtlCache::new(Arc::clone(&clock)),
            risk_cache: TtlCache::new(Arc::clone(&clock)),
            index_cache: TtlCache::new(Arc::clone(&clock)),
            table_cache: TtlCache::new(clock),
        }
    }

    pub async fn fx_board(&self) -> Result<FxBoard, SourceError> {
        let provider = Arc::clone(&self.sources.fx);
        self.fx_cache
            .get_or_refresh("fx", self.ttl, move || async move {
                provider.fetch_board().await
            })
            .await
    }

    pub async fn crypto(&self) -> Result<CryptoPrices, SourceError> {
        let provider = Arc::clone(&self.sources.crypto);
        self.crypto_cache
            .get_or_refresh("crypto", self.ttl, move || async move {
                provider.fetch_prices().await
            })
            .await
    }

    pub async fn policy_rate(&self) -> Result<RateRecord, SourceError> {
        let provider = Arc::clone(&self.sources.policy_rate);
        self.policy_cache
            .get_or_refresh("policy_rate", self.ttl, move || async move {
                provider.fetch_policy_rate().await
            })
            .await
    }

    pub async fn country_risk(&self) -> Result<CountryRisk, SourceError> {
        let provider = Arc::clone(&self.sources.country_risk);
        self.risk_cache
            .get_or_refresh("country_risk", self.ttl, move || async move {
                provider.fetch_country_risk().await
            })
            .await
    }

    pub async fn equity_index(&self) -> Result<IndexPoint, SourceError> {
        let provider = Arc::clone(&self.sources.equity);
        self.index_cache
            .get_or_refresh("equity_index", self.ttl, move || async move {
                provider.fetch_index().await
            })
            .await
    }

    pub async fn deposit_rates(&self) -> Vec<RateRecord> {
        self.table_rates(
            "deposit_rates",
            self.sources.deposit_rates.as_ref(),
            builtin_deposit_rates,
        )
        .await
    }

    pub async fn wallet_rates(&self) -> Vec<RateRecord> {
        self.table_rates(
            "wallet_rates",
            self.sources.wallet_rates.as_ref(),
            builtin_wallet_rates,
        )
        .await
    }

    async fn table_rates(
        &self,
        key: &'static str,
        feed: Option<&Arc<dyn RateTableProvider>>,
        builtin: fn() -> Vec<RateRecord>,
    ) -> Vec<RateRecord> {
        let Some(feed) = feed else {
            return builtin();
        };
        let feed = Arc::clone(feed);
        match self
            .table_cache
            .get_or_refresh(key, self.ttl, move || async move {
                feed.fetch_rates().await
            })
            .await
        {
            Ok(rates) => rates,
            Err(err) => {
                warn!(error = %err, table = key, "Rate feed failed, using built-in table");
                builtin()
            }
        }
    }

    /// Fetches every metric group concurrently and joins before deriving the
    /// cross-source metrics. One failing source never blocks the others; the
    /// total latency is bounded by the slowest single source.
    pub async fn snapshot(&self) -> MarketSnapshot {
        let (fx, crypto, policy_rate, country_risk, equity, deposit_rates, wallet_rates) = tokio::join!(
            self.fx_board(),
            self.crypto(),
            self.policy_rate(),
            self.country_risk(),
            self.equity_index(),
            self.deposit_rates(),
            self.wallet_rates(),
        );

        let fx: FieldResult<FxBoard> = fx.map_err(|e| e.to_string());
        let equity: FieldResult<IndexPoint> = equity.map_err(|e| e.to_string());

        let gaps = GAP_PAIRS
            .iter()
            .map(|&(reference, other)| FxGap {
                reference,
                other,
                gap_pct: fx
                    .as_ref()
                    .ok()
                    .and_then(|board| metrics::gap_pct(board.quote(reference), board.quote(other))),
            })
            .collect();

        let equity_usd = match (&equity, &fx) {
            (Ok(point), Ok(board)) => metrics::index_in_usd(point.value, board.ccl.sell),
            _ => None,
        };

        MarketSnapshot {
            fx,
            gaps,
            crypto: crypto.map_err(|e| e.to_string()),
            policy_rate: policy_rate.map_err(|e| e.to_string()),
            country_risk: country_risk.map_err(|e| e.to_string()),
            equity,
            equity_usd,
            deposit_rates,
            wallet_rates,
        }
    }

    /// Drops every cache entry and recomputes a full snapshot. TTL expiry
    /// otherwise drives refetching lazily on read.
    pub async fn refresh(&self) -> MarketSnapshot {
        tokio::join!(
            self.fx_cache.invalidate_all(),
            self.crypto_cache.invalidate_all(),
            self.policy_cache.invalidate_all(),
            self.risk_cache.invalidate_all(),
            self.index_cache.invalidate_all(),
            self.table_cache.invalidate_all(),
        );
        self.snapshot().await
    }
}
