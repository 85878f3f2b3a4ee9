use chrono::{DateTime, Utc};
use serde::Serialize;

/// One normalized row of the 24h ticker listing.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TickerSnapshot {
    pub symbol: String,
    pub last_price: f64,
    /// Signed fraction, e.g. 0.05 for +5%.
    pub pct24h: f64,
    pub high_price24h: f64,
    pub low_price24h: f64,
    pub volume24h: f64,
    pub turnover24h: f64,
    pub captured_at: DateTime<Utc>,
}

/// Latest funding record for one symbol; `rate` is None when the
/// lookup failed or the history was empty.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRate {
    pub symbol: String,
    pub rate: Option<f64>,
    pub fetched_at: DateTime<Utc>,
}
