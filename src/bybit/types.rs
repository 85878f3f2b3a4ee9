use serde::Deserialize;
use serde_json::Value;

use crate::model::{KlineBar, OpenInterestPoint};

/// Bybit v5 response envelope. `retCode == 0` with a non-null `result`
/// is the only success shape; everything else is a failed attempt.
#[derive(Debug, Deserialize)]
pub struct Envelope {
    #[serde(rename = "retCode")]
    pub ret_code: i64,
    #[serde(rename = "retMsg", default)]
    pub ret_msg: String,
    #[serde(default)]
    pub result: Option<Value>,
}

/// Coerce a string-or-number JSON value to f64. Bybit mixes both
/// encodings across resource versions.
pub fn value_to_f64(v: &Value) -> Option<f64> {
    match v {
        Value::String(s) => s.parse::<f64>().ok(),
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

#[derive(Debug, Deserialize)]
pub struct TickersResult {
    #[serde(default)]
    pub list: Vec<RawTicker>,
}

/// One raw ticker row. Numeric fields stay strings here; the snapshot
/// provider decides what is coercible and what disqualifies the row.
#[derive(Debug, Deserialize)]
pub struct RawTicker {
    pub symbol: String,
    #[serde(rename = "lastPrice", default)]
    pub last_price: String,
    #[serde(rename = "price24hPcnt", default)]
    pub price24h_pcnt: Option<String>,
    #[serde(rename = "highPrice24h", default)]
    pub high_price24h: String,
    #[serde(rename = "lowPrice24h", default)]
    pub low_price24h: String,
    #[serde(rename = "volume24h", default)]
    pub volume24h: String,
    #[serde(rename = "turnover24h", default)]
    pub turnover24h: String,
    /// Absent on the tickers resource; instruments expose it.
    #[serde(default)]
    pub status: Option<String>,
}

impl RawTicker {
    pub fn is_tradable(&self) -> bool {
        match self.status.as_deref() {
            Some(status) => status == "Trading",
            None => true,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct FundingHistoryResult {
    #[serde(default)]
    pub list: Vec<RawFundingRecord>,
}

#[derive(Debug, Deserialize)]
pub struct RawFundingRecord {
    pub symbol: String,
    #[serde(rename = "fundingRate", default)]
    pub funding_rate: String,
}

/// Kline rows arrive as string arrays: [startTime, open, high, low,
/// close, volume, turnover], newest-first.
#[derive(Debug, Deserialize)]
pub struct KlineResult {
    #[serde(default)]
    pub list: Vec<Vec<String>>,
}

impl KlineResult {
    /// Parse rows into bars, dropping any malformed row. Order is left
    /// as delivered; indicator code sorts chronologically itself.
    pub fn bars(&self) -> Vec<KlineBar> {
        self.list
            .iter()
            .filter_map(|row| {
                if row.len() < 5 {
                    return None;
                }
                Some(KlineBar {
                    open_time: row[0].parse().ok()?,
                    open: row[1].parse().ok()?,
                    high: row[2].parse().ok()?,
                    low: row[3].parse().ok()?,
                    close: row[4].parse().ok()?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenInterestResult {
    #[serde(default)]
    pub list: Vec<RawOpenInterest>,
}

#[derive(Debug, Deserialize)]
pub struct RawOpenInterest {
    #[serde(rename = "openInterest", default)]
    pub open_interest: Value,
    #[serde(default)]
    pub timestamp: String,
}

impl OpenInterestResult {
    /// Points in upstream (newest-first) order; malformed rows dropped.
    pub fn points(&self) -> Vec<OpenInterestPoint> {
        self.list
            .iter()
            .filter_map(|row| {
                Some(OpenInterestPoint {
                    timestamp: row.timestamp.parse().unwrap_or(0),
                    value: value_to_f64(&row.open_interest)?,
                })
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
pub struct RecentTradesResult {
    #[serde(default)]
    pub list: Vec<RawTrade>,
}

/// One raw trade. Side and size field names and encodings differ across
/// upstream variants, so both are kept loose here and normalized later.
#[derive(Debug, Deserialize)]
pub struct RawTrade {
    #[serde(default, alias = "m", alias = "S")]
    pub side: Option<Value>,
    #[serde(default, alias = "execQty", alias = "q")]
    pub size: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn envelope_parses_null_result() {
        let env: Envelope =
            serde_json::from_str(r#"{"retCode":10001,"retMsg":"param error"}"#).unwrap();
        assert_eq!(env.ret_code, 10001);
        assert!(env.result.is_none());
    }

    #[test]
    fn value_to_f64_accepts_both_encodings() {
        assert_eq!(value_to_f64(&json!("1.5")), Some(1.5));
        assert_eq!(value_to_f64(&json!(2)), Some(2.0));
        assert_eq!(value_to_f64(&json!(null)), None);
        assert_eq!(value_to_f64(&json!("abc")), None);
    }

    #[test]
    fn kline_rows_drop_malformed() {
        let res: KlineResult = serde_json::from_value(json!({
            "list": [
                ["1700003600000", "2.0", "2.2", "1.9", "2.1", "100", "210"],
                ["1700000000000", "1.0", "1.2", "0.9", "x", "100", "110"],
                ["1700000000000"]
            ]
        }))
        .unwrap();
        let bars = res.bars();
        assert_eq!(bars.len(), 1);
        assert!((bars[0].close - 2.1).abs() < f64::EPSILON);
    }

    #[test]
    fn ticker_without_status_is_tradable() {
        let raw: RawTicker = serde_json::from_value(json!({
            "symbol": "BTCUSDT",
            "lastPrice": "60000",
            "price24hPcnt": "0.01"
        }))
        .unwrap();
        assert!(raw.is_tradable());

        let raw: RawTicker = serde_json::from_value(json!({
            "symbol": "OLDUSDT",
            "status": "Delivering"
        }))
        .unwrap();
        assert!(!raw.is_tradable());
    }

    #[test]
    fn trade_side_aliases_deserialize() {
        let t: RawTrade = serde_json::from_value(json!({"side": "Buy", "size": "3"})).unwrap();
        assert_eq!(t.side, Some(json!("Buy")));
        let t: RawTrade = serde_json::from_value(json!({"m": true, "q": 2.0})).unwrap();
        assert_eq!(t.side, Some(json!(true)));
        assert_eq!(t.size, Some(json!(2.0)));
    }
}
