pub mod aggregator;
pub mod cache;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod format;
pub mod fx;
pub mod indicators;
pub mod log;
pub mod metrics;
pub mod providers;
pub mod ui;

use anyhow::Result;
use chrono::TimeDelta;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

use crate::aggregator::{Aggregator, Sources};
use crate::cache::SystemClock;
use crate::config::AppConfig;
use crate::indicators::RateTableProvider;
use crate::providers::{
    AmbitoProvider, BcraProvider, CoinGeckoProvider, DolarApiProvider, RateFeedProvider,
    YahooChartProvider,
};

#[derive(Debug, Clone)]
pub enum AppCommand {
    Dashboard { watch_seconds: Option<u64> },
    Fx,
    Crypto,
    Rates,
    Indicators,
}

/// Builds the aggregator from the configuration: one shared HTTP client with
/// the configured timeout, one provider per source, per-source TTL caches on
/// the system clock.
pub fn build_aggregator(config: &AppConfig) -> Result<Aggregator> {
    let client = providers::util::build_client(Duration::from_secs(config.timeout_seconds))?;

    let rate_feed = |url: &str| {
        Arc::new(RateFeedProvider::new(url, client.clone())) as Arc<dyn RateTableProvider>
    };
    let sources = Sources {
        fx: Arc::new(DolarApiProvider::new(
            config.dolarapi_base_url(),
            client.clone(),
        )),
        crypto: Arc::new(CoinGeckoProvider::new(
            config.coingecko_base_url(),
            client.clone(),
        )),
        policy_rate: Arc::new(BcraProvider::new(config.bcra_base_url(), client.clone())),
        country_risk: Arc::new(AmbitoProvider::new(config.ambito_base_url(), client.clone())),
        equity: Arc::new(YahooChartProvider::new(
            config.yahoo_base_url(),
            &config.equity_symbol,
            client.clone(),
        )),
        deposit_rates: config.tables.deposit_rates_url.as_deref().map(rate_feed),
        wallet_rates: config.tables.wallet_rates_url.as_deref().map(rate_feed),
    };

    let ttl = TimeDelta::seconds(config.ttl_seconds as i64);
    Ok(Aggregator::new(sources, ttl, Arc::new(SystemClock)))
}

pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("pulso starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let aggregator = build_aggregator(&config)?;

    match command {
        AppCommand::Dashboard {
            watch_seconds: Some(seconds),
        } => loop {
            let snapshot = aggregator.refresh().await;
            println!("{}", dashboard::render_dashboard(&snapshot));
            ui::print_separator();
            tokio::time::sleep(Duration::from_secs(seconds)).await;
        },
        command => {
            let pb = ui::new_spinner("Consultando fuentes...");
            let snapshot = aggregator.snapshot().await;
            pb.finish_and_clear();

            let output = match command {
                AppCommand::Dashboard { .. } => dashboard::render_dashboard(&snapshot),
                AppCommand::Fx => dashboard::render_fx(&snapshot),
                AppCommand::Crypto => dashboard::render_crypto(&snapshot),
                AppCommand::Rates => dashboard::render_rates(&snapshot),
                AppCommand::Indicators => dashboard::render_indicators(&snapshot),
            };
            println!("{output}");
            Ok(())
        }
    }
}
