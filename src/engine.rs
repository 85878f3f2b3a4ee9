use std::cmp::Ordering;

use chrono::Utc;

use crate::bybit::types::{KlineResult, OpenInterestResult, RecentTradesResult};
use crate::bybit::{BybitClient, KLINE_PATH, OPEN_INTEREST_PATH, RECENT_TRADE_PATH};
use crate::config::{Config, IndicatorConfig, MoversConfig};
use crate::error::AppError;
use crate::fetch_pool;
use crate::indicator::{
    anomaly_score, atr, classify, flow_delta, normalize_side, oi_shock, AnomalyWeights,
    SetupParams,
};
use crate::model::{
    AnomalyEntry, Direction, MoverEntry, RankedList, SetupEntry, SetupTag, TickerSnapshot,
    TradePrint,
};
use crate::rank::rank;
use crate::{funding, tickers};

/// Per-symbol indicator enrichment; each field degrades independently.
#[derive(Debug, Clone, Copy, Default)]
struct SymbolMetrics {
    atr_pct: Option<f64>,
    oi_shock_pct: Option<f64>,
    delta_pct: Option<f64>,
}

/// Aggregation pipeline: ticker snapshot, ranking, bounded funding and
/// indicator enrichment, merge. Only the primary ticker fetch can fail
/// a whole request; everything per-symbol degrades to None.
pub struct MoversEngine {
    client: BybitClient,
    category: String,
    movers: MoversConfig,
    indicators: IndicatorConfig,
    weights: AnomalyWeights,
}

impl MoversEngine {
    pub fn new(config: &Config) -> Result<Self, AppError> {
        Ok(Self {
            client: BybitClient::new(&config.bybit.mirrors, config.bybit.request_timeout_ms)?,
            category: config.bybit.category.clone(),
            movers: config.movers.clone(),
            indicators: config.indicators.clone(),
            weights: AnomalyWeights::from(&config.anomaly),
        })
    }

    /// Top gainers or losers by 24h change, enriched with funding and
    /// ATR / OI-shock / order-flow metrics.
    pub async fn top_movers(&self, direction: Direction) -> Result<RankedList, AppError> {
        let snapshots = tickers::fetch_snapshots(&self.client, &self.category).await?;
        let ranked = rank(snapshots, direction, self.movers.limit);
        let symbols: Vec<String> = ranked.iter().map(|s| s.symbol.clone()).collect();

        let (funding_rates, metrics) = tokio::join!(
            funding::enrich(
                &self.client,
                &self.category,
                &symbols,
                self.movers.funding_concurrency,
            ),
            self.symbol_metrics(&symbols),
        );

        let list = ranked
            .into_iter()
            .zip(funding_rates)
            .zip(metrics)
            .map(|((snapshot, funding), m)| MoverEntry {
                snapshot,
                funding_rate: funding.rate,
                atr_pct: m.atr_pct,
                oi_shock_pct: m.oi_shock_pct,
                delta_pct: m.delta_pct,
            })
            .collect();

        Ok(RankedList {
            direction: direction.as_str(),
            generated_at: Utc::now(),
            list,
        })
    }

    /// EMA/RSI trend setups over the most liquid instruments. Symbols
    /// without a classification (or with short history) are omitted.
    pub async fn setup_scan(&self) -> Result<Vec<SetupEntry>, AppError> {
        let mut snapshots = tickers::fetch_snapshots(&self.client, &self.category).await?;
        sort_by_turnover(&mut snapshots);
        snapshots.truncate(self.movers.scan_window);
        let symbols: Vec<String> = snapshots.iter().map(|s| s.symbol.clone()).collect();

        let params = SetupParams::from(&self.indicators);
        let params = &params;
        let rows = fetch_pool::map_bounded(
            &symbols,
            self.movers.indicator_concurrency,
            |symbol| async move {
                let closes = self.fetch_closes(&symbol).await?;
                let (tag, rsi) = classify(&closes, params)?;
                Some(SetupEntry {
                    symbol,
                    last_price: *closes.last()?,
                    tag,
                    rsi,
                })
            },
        )
        .await;

        let mut setups: Vec<SetupEntry> = rows.into_iter().flatten().collect();
        // Longs first, then by RSI distance from neutral.
        setups.sort_by(|a, b| {
            if a.tag != b.tag {
                return if a.tag == SetupTag::Long {
                    Ordering::Less
                } else {
                    Ordering::Greater
                };
            }
            let da = (a.rsi - 50.0).abs();
            let db = (b.rsi - 50.0).abs();
            db.partial_cmp(&da).unwrap_or(Ordering::Equal)
        });
        Ok(setups)
    }

    /// Rank the universe by composite unusualness. Funding enrichment
    /// is restricted to the top preliminary window to bound upstream
    /// load.
    pub async fn anomaly_scan(&self) -> Result<Vec<AnomalyEntry>, AppError> {
        let snapshots = tickers::fetch_snapshots(&self.client, &self.category).await?;

        let mut prelim: Vec<TickerSnapshot> = snapshots;
        prelim.sort_by(|a, b| {
            let sa = anomaly_score(a.pct24h * 100.0, a.turnover24h, None, &self.weights);
            let sb = anomaly_score(b.pct24h * 100.0, b.turnover24h, None, &self.weights);
            sb.partial_cmp(&sa).unwrap_or(Ordering::Equal)
        });
        prelim.truncate(self.movers.scan_window);

        let symbols: Vec<String> = prelim.iter().map(|s| s.symbol.clone()).collect();
        let funding_rates = funding::enrich(
            &self.client,
            &self.category,
            &symbols,
            self.movers.funding_concurrency,
        )
        .await;

        let mut entries: Vec<AnomalyEntry> = prelim
            .into_iter()
            .zip(funding_rates)
            .map(|(snapshot, funding)| {
                let pct = snapshot.pct24h * 100.0;
                let score =
                    anomaly_score(pct, snapshot.turnover24h, funding.rate, &self.weights);
                AnomalyEntry {
                    symbol: snapshot.symbol,
                    last_price: snapshot.last_price,
                    pct24h: snapshot.pct24h,
                    turnover24h: snapshot.turnover24h,
                    funding_rate: funding.rate,
                    score,
                }
            })
            .collect();
        entries.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
        Ok(entries)
    }

    async fn symbol_metrics(&self, symbols: &[String]) -> Vec<SymbolMetrics> {
        fetch_pool::map_bounded(
            symbols,
            self.movers.indicator_concurrency,
            |symbol| async move {
                let (atr_pct, oi_shock_pct, delta_pct) = tokio::join!(
                    self.fetch_atr_pct(&symbol),
                    self.fetch_oi_shock_pct(&symbol),
                    self.fetch_delta_pct(&symbol),
                );
                SymbolMetrics {
                    atr_pct,
                    oi_shock_pct,
                    delta_pct,
                }
            },
        )
        .await
    }

    async fn fetch_atr_pct(&self, symbol: &str) -> Option<f64> {
        let limit = (self.indicators.atr_period + 1).max(50).to_string();
        let result: Result<KlineResult, _> = self
            .client
            .fetch(
                KLINE_PATH,
                &[
                    ("category", self.category.as_str()),
                    ("symbol", symbol),
                    ("interval", self.indicators.atr_interval.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await;
        match result {
            Ok(klines) => {
                atr(&klines.bars(), self.indicators.atr_period).map(|a| a.atr_pct)
            }
            Err(err) => {
                tracing::debug!(symbol, %err, "kline fetch degraded, no ATR");
                None
            }
        }
    }

    async fn fetch_oi_shock_pct(&self, symbol: &str) -> Option<f64> {
        let limit = (self.indicators.oi_baseline_points + 1).to_string();
        let result: Result<OpenInterestResult, _> = self
            .client
            .fetch(
                OPEN_INTEREST_PATH,
                &[
                    ("category", self.category.as_str()),
                    ("symbol", symbol),
                    ("intervalTime", self.indicators.oi_interval.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await;
        match result {
            Ok(series) => oi_shock(&series.points(), self.indicators.oi_baseline_points),
            Err(err) => {
                tracing::debug!(symbol, %err, "open-interest fetch degraded, no OI shock");
                None
            }
        }
    }

    async fn fetch_delta_pct(&self, symbol: &str) -> Option<f64> {
        let limit = self.indicators.trade_window.to_string();
        let result: Result<RecentTradesResult, _> = self
            .client
            .fetch(
                RECENT_TRADE_PATH,
                &[
                    ("category", self.category.as_str()),
                    ("symbol", symbol),
                    ("limit", limit.as_str()),
                ],
            )
            .await;
        match result {
            Ok(trades) => {
                let prints: Vec<TradePrint> = trades
                    .list
                    .iter()
                    .filter_map(|raw| {
                        let side = normalize_side(raw.side.as_ref()?)?;
                        let size = raw
                            .size
                            .as_ref()
                            .and_then(crate::bybit::types::value_to_f64)
                            .unwrap_or(0.0);
                        Some(TradePrint { side, size })
                    })
                    .collect();
                Some(flow_delta(&prints).delta_pct)
            }
            Err(err) => {
                tracing::debug!(symbol, %err, "recent-trade fetch degraded, no delta");
                None
            }
        }
    }

    async fn fetch_closes(&self, symbol: &str) -> Option<Vec<f64>> {
        let limit = self.indicators.ema_slow.to_string();
        let result: Result<KlineResult, _> = self
            .client
            .fetch(
                KLINE_PATH,
                &[
                    ("category", self.category.as_str()),
                    ("symbol", symbol),
                    ("interval", self.indicators.setup_interval.as_str()),
                    ("limit", limit.as_str()),
                ],
            )
            .await;
        match result {
            Ok(klines) => {
                let mut bars = klines.bars();
                bars.sort_by_key(|b| b.open_time);
                Some(bars.iter().map(|b| b.close).collect())
            }
            Err(err) => {
                tracing::debug!(symbol, %err, "kline fetch degraded, symbol skipped");
                None
            }
        }
    }
}

fn sort_by_turnover(snapshots: &mut [TickerSnapshot]) {
    snapshots.sort_by(|a, b| {
        b.turnover24h
            .partial_cmp(&a.turnover24h)
            .unwrap_or(Ordering::Equal)
    });
}
