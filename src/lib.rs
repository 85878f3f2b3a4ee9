//! Bybit linear-futures top-movers aggregation service.
//!
//! - `bybit`: multi-mirror REST client and wire types
//! - `tickers`: instrument snapshot provider
//! - `rank`: pure sort/filter/truncate by 24h change
//! - `funding`: bounded per-symbol funding enrichment
//! - `indicator`: ATR, OI shock, order-flow delta, EMA/RSI setups,
//!   composite anomaly score
//! - `engine`: aggregation pipeline
//! - `cache`: TTL memoization of whole results
//! - `api`: HTTP surface and response envelope

pub mod api;
pub mod bybit;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod fetch_pool;
pub mod funding;
pub mod indicator;
pub mod model;
pub mod rank;
pub mod tickers;
