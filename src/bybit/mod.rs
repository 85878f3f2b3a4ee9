pub mod rest;
pub mod types;

pub use rest::BybitClient;

/// Bybit v5 market-data resource paths.
pub const TICKERS_PATH: &str = "/v5/market/tickers";
pub const KLINE_PATH: &str = "/v5/market/kline";
pub const OPEN_INTEREST_PATH: &str = "/v5/market/open-interest";
pub const RECENT_TRADE_PATH: &str = "/v5/market/recent-trade";
pub const FUNDING_PATH: &str = "/v5/market/funding/history";
