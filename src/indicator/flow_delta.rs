use serde_json::Value;

use crate::model::{TradePrint, TradeSide};

/// Normalize the aggressor-side encoding of a raw trade. The upstream
/// mixes textual ("Buy"/"Sell"), single-letter ("b"/"s") and
/// boolean-like ("true"/"false", JSON bool) encodings across resource
/// variants. Unrecognized encodings yield None and the trade is
/// excluded from both sums.
pub fn normalize_side(raw: &Value) -> Option<TradeSide> {
    match raw {
        Value::Bool(true) => Some(TradeSide::Buy),
        Value::Bool(false) => Some(TradeSide::Sell),
        Value::String(s) => {
            let s = s.trim().to_ascii_lowercase();
            if s.starts_with("buy") || s == "b" || s == "true" {
                Some(TradeSide::Buy)
            } else if s.starts_with("sell") || s == "s" || s == "false" {
                Some(TradeSide::Sell)
            } else {
                None
            }
        }
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FlowDelta {
    pub buy_volume: f64,
    pub sell_volume: f64,
    /// (buy - sell) / (buy + sell) * 100; 0 when the window traded
    /// nothing.
    pub delta_pct: f64,
}

/// Net order-flow imbalance over a trade window.
pub fn flow_delta(trades: &[TradePrint]) -> FlowDelta {
    let mut buy_volume = 0.0;
    let mut sell_volume = 0.0;
    for trade in trades {
        match trade.side {
            TradeSide::Buy => buy_volume += trade.size,
            TradeSide::Sell => sell_volume += trade.size,
        }
    }
    let total = buy_volume + sell_volume;
    let delta_pct = if total > 0.0 {
        (buy_volume - sell_volume) / total * 100.0
    } else {
        0.0
    };
    FlowDelta {
        buy_volume,
        sell_volume,
        delta_pct,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn print(side: TradeSide, size: f64) -> TradePrint {
        TradePrint { side, size }
    }

    #[test]
    fn all_buy_is_plus_100() {
        let trades = vec![print(TradeSide::Buy, 1.0), print(TradeSide::Buy, 2.5)];
        let d = flow_delta(&trades);
        assert!((d.delta_pct - 100.0).abs() < 1e-12);
        assert!((d.buy_volume - 3.5).abs() < 1e-12);
    }

    #[test]
    fn all_sell_is_minus_100() {
        let trades = vec![print(TradeSide::Sell, 4.0)];
        assert!((flow_delta(&trades).delta_pct + 100.0).abs() < 1e-12);
    }

    #[test]
    fn empty_window_is_zero() {
        assert_eq!(flow_delta(&[]).delta_pct, 0.0);
    }

    #[test]
    fn balanced_flow_is_zero() {
        let trades = vec![print(TradeSide::Buy, 3.0), print(TradeSide::Sell, 3.0)];
        assert_eq!(flow_delta(&trades).delta_pct, 0.0);
    }

    #[test]
    fn side_table_accepts_observed_encodings() {
        assert_eq!(normalize_side(&json!("Buy")), Some(TradeSide::Buy));
        assert_eq!(normalize_side(&json!("SELL")), Some(TradeSide::Sell));
        assert_eq!(normalize_side(&json!("b")), Some(TradeSide::Buy));
        assert_eq!(normalize_side(&json!("s")), Some(TradeSide::Sell));
        assert_eq!(normalize_side(&json!("true")), Some(TradeSide::Buy));
        assert_eq!(normalize_side(&json!("false")), Some(TradeSide::Sell));
        assert_eq!(normalize_side(&json!(true)), Some(TradeSide::Buy));
        assert_eq!(normalize_side(&json!(false)), Some(TradeSide::Sell));
    }

    #[test]
    fn side_table_fails_closed() {
        assert_eq!(normalize_side(&json!("maker")), None);
        assert_eq!(normalize_side(&json!("")), None);
        assert_eq!(normalize_side(&json!(1)), None);
        assert_eq!(normalize_side(&json!(null)), None);
    }
}
