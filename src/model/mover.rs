use chrono::{DateTime, Utc};
use serde::Serialize;

use super::ticker::TickerSnapshot;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Gainers,
    Losers,
}

impl Direction {
    /// Parse the `dir` query parameter; anything unrecognized falls back
    /// to gainers, matching the default.
    pub fn from_query(s: Option<&str>) -> Self {
        match s {
            Some("losers") => Direction::Losers,
            _ => Direction::Gainers,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Gainers => "gainers",
            Direction::Losers => "losers",
        }
    }
}

/// One row of the aggregated movers list: ticker snapshot plus optional
/// funding and indicator enrichment. Enrichment fields stay None when
/// the per-symbol fetch failed or history was insufficient.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MoverEntry {
    #[serde(flatten)]
    pub snapshot: TickerSnapshot,
    pub funding_rate: Option<f64>,
    pub atr_pct: Option<f64>,
    pub oi_shock_pct: Option<f64>,
    pub delta_pct: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedList {
    pub direction: &'static str,
    pub generated_at: DateTime<Utc>,
    pub list: Vec<MoverEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SetupTag {
    Long,
    Short,
}

/// One classified trend setup from the EMA/RSI scan.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetupEntry {
    pub symbol: String,
    pub last_price: f64,
    pub tag: SetupTag,
    pub rsi: f64,
}

/// One row of the anomaly ranking; `score` only orders symbols relative
/// to each other.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyEntry {
    pub symbol: String,
    pub last_price: f64,
    pub pct24h: f64,
    pub turnover24h: f64,
    pub funding_rate: Option<f64>,
    pub score: f64,
}
