pub mod ambito;
pub mod bcra;
pub mod coingecko;
pub mod dolarapi;
pub mod rate_feed;
pub mod util;
pub mod yahoo_chart;

pub use ambito::AmbitoProvider;
pub use bcra::BcraProvider;
pub use coingecko::CoinGeckoProvider;
pub use dolarapi::DolarApiProvider;
pub use rate_feed::RateFeedProvider;
pub use yahoo_chart::YahooChartProvider;
