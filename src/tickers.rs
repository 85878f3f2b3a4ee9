use chrono::Utc;

use crate::bybit::types::TickersResult;
use crate::bybit::{BybitClient, TICKERS_PATH};
use crate::error::AppError;
use crate::model::TickerSnapshot;

/// Fetch the full linear ticker listing and normalize it. Rows missing
/// a usable price or 24h change, or not in tradable status, are dropped.
pub async fn fetch_snapshots(
    client: &BybitClient,
    category: &str,
) -> Result<Vec<TickerSnapshot>, AppError> {
    let result: TickersResult = client.fetch(TICKERS_PATH, &[("category", category)]).await?;
    let captured_at = Utc::now();

    let mut snapshots = Vec::with_capacity(result.list.len());
    for raw in &result.list {
        if !raw.is_tradable() {
            continue;
        }
        let Some(last_price) = parse_positive(&raw.last_price) else {
            continue;
        };
        let Some(pct24h) = raw.price24h_pcnt.as_deref().and_then(parse_f64) else {
            continue;
        };
        snapshots.push(TickerSnapshot {
            symbol: raw.symbol.clone(),
            last_price,
            pct24h,
            high_price24h: parse_f64(&raw.high_price24h).unwrap_or(0.0),
            low_price24h: parse_f64(&raw.low_price24h).unwrap_or(0.0),
            volume24h: parse_f64(&raw.volume24h).unwrap_or(0.0),
            turnover24h: parse_f64(&raw.turnover24h).unwrap_or(0.0),
            captured_at,
        });
    }
    tracing::debug!(
        total = result.list.len(),
        kept = snapshots.len(),
        "ticker listing normalized"
    );
    Ok(snapshots)
}

fn parse_f64(s: &str) -> Option<f64> {
    s.parse::<f64>().ok()
}

fn parse_positive(s: &str) -> Option<f64> {
    parse_f64(s).filter(|v| *v > 0.0)
}
