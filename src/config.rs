use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub bybit: BybitConfig,
    pub movers: MoversConfig,
    pub indicators: IndicatorConfig,
    pub anomaly: AnomalyConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BybitConfig {
    /// Mirror hosts tried in priority order; failover is sequential.
    pub mirrors: Vec<String>,
    pub category: String,
    pub request_timeout_ms: u64,
}

impl Default for BybitConfig {
    fn default() -> Self {
        Self {
            mirrors: vec![
                "https://api.bybit.com".to_string(),
                "https://api.bytick.com".to_string(),
            ],
            category: "linear".to_string(),
            request_timeout_ms: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MoversConfig {
    pub limit: usize,
    pub funding_concurrency: usize,
    pub indicator_concurrency: usize,
    pub cache_ttl_secs: u64,
    /// Universe size for the setup/anomaly scans (top by turnover).
    pub scan_window: usize,
}

impl Default for MoversConfig {
    fn default() -> Self {
        Self {
            limit: 50,
            funding_concurrency: 6,
            indicator_concurrency: 6,
            cache_ttl_secs: 60,
            scan_window: 60,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    pub atr_period: usize,
    /// Bybit kline interval code for ATR bars ("60" = 1h).
    pub atr_interval: String,
    pub oi_baseline_points: usize,
    pub oi_interval: String,
    pub trade_window: usize,
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub rsi_long: f64,
    pub rsi_short: f64,
    pub setup_interval: String,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            atr_period: 14,
            atr_interval: "60".to_string(),
            oi_baseline_points: 24,
            oi_interval: "1h".to_string(),
            trade_window: 1000,
            ema_fast: 50,
            ema_slow: 200,
            rsi_period: 14,
            rsi_long: 55.0,
            rsi_short: 45.0,
            setup_interval: "15".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub change_weight: f64,
    pub turnover_weight: f64,
    pub funding_weight: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            change_weight: 1.2,
            turnover_weight: 1.0,
            funding_weight: 300.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load from config/default.toml when present, otherwise built-in defaults.
    pub fn load() -> Result<Self> {
        let config_path = Path::new("config/default.toml");
        let config = if config_path.exists() {
            let config_str = std::fs::read_to_string(config_path)
                .with_context(|| format!("failed to read {}", config_path.display()))?;
            toml::from_str(&config_str).context("failed to parse config/default.toml")?
        } else {
            tracing::warn!("config/default.toml not found, using built-in defaults");
            Config::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.bybit.mirrors.is_empty() {
            bail!("bybit.mirrors must list at least one host");
        }
        if self.bybit.request_timeout_ms == 0 {
            bail!("bybit.request_timeout_ms must be > 0");
        }
        if self.movers.limit == 0 {
            bail!("movers.limit must be > 0");
        }
        if self.movers.funding_concurrency == 0 || self.movers.indicator_concurrency == 0 {
            bail!("movers concurrency settings must be > 0");
        }
        if self.movers.scan_window == 0 {
            bail!("movers.scan_window must be > 0");
        }
        if self.indicators.atr_period == 0
            || self.indicators.ema_fast == 0
            || self.indicators.ema_slow == 0
            || self.indicators.rsi_period == 0
        {
            bail!("indicator periods must be > 0");
        }
        if self.indicators.ema_fast >= self.indicators.ema_slow {
            bail!("indicators.ema_fast must be shorter than indicators.ema_slow");
        }
        Ok(())
    }
}
