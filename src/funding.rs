use chrono::Utc;

use crate::bybit::types::FundingHistoryResult;
use crate::bybit::{BybitClient, FUNDING_PATH};
use crate::fetch_pool;
use crate::model::FundingRate;

/// Look up the most recent funding rate for every ranked symbol with a
/// bounded worker pool. Any per-symbol failure degrades that symbol's
/// rate to None; the batch itself always completes with one record per
/// input symbol, input order preserved.
pub async fn enrich(
    client: &BybitClient,
    category: &str,
    symbols: &[String],
    concurrency: usize,
) -> Vec<FundingRate> {
    fetch_pool::map_bounded(symbols, concurrency, |symbol| async move {
        let rate = latest_rate(client, category, &symbol).await;
        FundingRate {
            symbol,
            rate,
            fetched_at: Utc::now(),
        }
    })
    .await
}

async fn latest_rate(client: &BybitClient, category: &str, symbol: &str) -> Option<f64> {
    let result: Result<FundingHistoryResult, _> = client
        .fetch(
            FUNDING_PATH,
            &[("category", category), ("symbol", symbol), ("limit", "1")],
        )
        .await;
    match result {
        Ok(history) => history
            .list
            .first()
            .and_then(|record| record.funding_rate.parse::<f64>().ok()),
        Err(err) => {
            tracing::debug!(symbol, %err, "funding lookup degraded to null");
            None
        }
    }
}
