use crate::config::IndicatorConfig;
use crate::model::SetupTag;

use super::trend::{ema_last, rsi_last};

/// Thresholds for the EMA/RSI trend classifier. These are empirically
/// chosen constants, kept overridable through configuration.
#[derive(Debug, Clone)]
pub struct SetupParams {
    pub ema_fast: usize,
    pub ema_slow: usize,
    pub rsi_period: usize,
    pub rsi_long: f64,
    pub rsi_short: f64,
}

impl Default for SetupParams {
    fn default() -> Self {
        Self {
            ema_fast: 50,
            ema_slow: 200,
            rsi_period: 14,
            rsi_long: 55.0,
            rsi_short: 45.0,
        }
    }
}

impl From<&IndicatorConfig> for SetupParams {
    fn from(cfg: &IndicatorConfig) -> Self {
        Self {
            ema_fast: cfg.ema_fast,
            ema_slow: cfg.ema_slow,
            rsi_period: cfg.rsi_period,
            rsi_long: cfg.rsi_long,
            rsi_short: cfg.rsi_short,
        }
    }
}

/// Classify a close series as a Long or Short trend setup.
///
/// Long: close > fast EMA > slow EMA and RSI above the long gate.
/// Short: close < fast EMA < slow EMA and RSI below the short gate.
/// Anything else, or a series shorter than the slow EMA period, is no
/// setup and the symbol is skipped rather than defaulted.
pub fn classify(closes: &[f64], params: &SetupParams) -> Option<(SetupTag, f64)> {
    if closes.len() < params.ema_slow {
        return None;
    }
    let last = *closes.last()?;
    let fast = ema_last(closes, params.ema_fast)?;
    let slow = ema_last(closes, params.ema_slow)?;
    let rsi = rsi_last(closes, params.rsi_period)?;

    if last > fast && fast > slow && rsi > params.rsi_long {
        Some((SetupTag::Long, rsi))
    } else if last < fast && fast < slow && rsi < params.rsi_short {
        Some((SetupTag::Short, rsi))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_series_is_skipped() {
        let closes: Vec<f64> = (0..199).map(|i| i as f64 + 1.0).collect();
        assert!(classify(&closes, &SetupParams::default()).is_none());
    }

    #[test]
    fn strictly_increasing_series_is_long() {
        let closes: Vec<f64> = (0..250).map(|i| 100.0 + i as f64).collect();
        let (tag, rsi) = classify(&closes, &SetupParams::default()).unwrap();
        assert_eq!(tag, SetupTag::Long);
        assert!(rsi > 55.0);
    }

    #[test]
    fn strictly_decreasing_series_is_short() {
        let closes: Vec<f64> = (0..250).map(|i| 1_000.0 - i as f64).collect();
        let (tag, rsi) = classify(&closes, &SetupParams::default()).unwrap();
        assert_eq!(tag, SetupTag::Short);
        assert!(rsi < 45.0);
    }

    #[test]
    fn flat_series_is_no_setup() {
        let closes = vec![100.0; 250];
        assert!(classify(&closes, &SetupParams::default()).is_none());
    }
}
