use crate::config::AnomalyConfig;

/// Named weights for the composite anomaly score. Empirically chosen,
/// overridable via configuration; the score only ranks symbols against
/// each other.
#[derive(Debug, Clone, Copy)]
pub struct AnomalyWeights {
    pub change: f64,
    pub turnover: f64,
    pub funding: f64,
}

impl Default for AnomalyWeights {
    fn default() -> Self {
        Self {
            change: 1.2,
            turnover: 1.0,
            funding: 300.0,
        }
    }
}

impl From<&AnomalyConfig> for AnomalyWeights {
    fn from(cfg: &AnomalyConfig) -> Self {
        Self {
            change: cfg.change_weight,
            turnover: cfg.turnover_weight,
            funding: cfg.funding_weight,
        }
    }
}

/// Composite unusualness score: weighted |24h change in percentage
/// points| plus log-scaled turnover plus |funding rate|. A missing
/// funding rate contributes nothing.
pub fn anomaly_score(
    pct24h: f64,
    turnover24h: f64,
    funding_rate: Option<f64>,
    weights: &AnomalyWeights,
) -> f64 {
    weights.change * pct24h.abs()
        + weights.turnover * (turnover24h.max(0.0) + 1.0).log10()
        + weights.funding * funding_rate.unwrap_or(0.0).abs()
}
