use crate::model::KlineBar;

#[derive(Debug, Clone, Copy)]
pub struct Atr {
    pub atr: f64,
    /// ATR as a percentage of the latest close.
    pub atr_pct: f64,
}

/// Average True Range over the most recent `period` bars, as a simple
/// average of true ranges. Bars are reordered chronologically first;
/// the upstream delivers them newest-first.
///
/// Returns None when fewer than `period + 1` bars are available or the
/// latest close is not a positive price.
pub fn atr(bars: &[KlineBar], period: usize) -> Option<Atr> {
    assert!(period > 0, "ATR period must be > 0");
    let mut bars = bars.to_vec();
    bars.sort_by_key(|b| b.open_time);
    if bars.len() < period + 1 {
        return None;
    }

    let mut true_ranges = Vec::with_capacity(bars.len() - 1);
    for i in 1..bars.len() {
        let prev_close = bars[i - 1].close;
        let high = bars[i].high;
        let low = bars[i].low;
        let tr = (high - low)
            .max((high - prev_close).abs())
            .max((low - prev_close).abs());
        true_ranges.push(tr);
    }

    let recent = &true_ranges[true_ranges.len() - period..];
    let atr = recent.iter().sum::<f64>() / period as f64;
    let last_close = bars[bars.len() - 1].close;
    if last_close <= 0.0 {
        return None;
    }
    Some(Atr {
        atr,
        atr_pct: atr / last_close * 100.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bar(open_time: u64, high: f64, low: f64, close: f64) -> KlineBar {
        KlineBar {
            open_time,
            open: close,
            high,
            low,
            close,
        }
    }

    #[test]
    fn needs_period_plus_one_bars() {
        let bars: Vec<KlineBar> = (0..14).map(|i| bar(i, 11.0, 9.0, 10.0)).collect();
        assert!(atr(&bars, 14).is_none());
        let bars: Vec<KlineBar> = (0..15).map(|i| bar(i, 11.0, 9.0, 10.0)).collect();
        assert!(atr(&bars, 14).is_some());
    }

    #[test]
    fn flat_series_yields_exactly_zero() {
        let bars: Vec<KlineBar> = (0..20).map(|i| bar(i, 10.0, 10.0, 10.0)).collect();
        let result = atr(&bars, 14).unwrap();
        assert_eq!(result.atr, 0.0);
        assert_eq!(result.atr_pct, 0.0);
    }

    #[test]
    fn gap_uses_previous_close() {
        // Second bar gaps up: high-low = 1, but |high - prevClose| = 6.
        let bars = vec![bar(0, 10.5, 9.5, 10.0), bar(1, 16.0, 15.0, 15.5)];
        let result = atr(&bars, 1).unwrap();
        assert!((result.atr - 6.0).abs() < 1e-12);
        assert!((result.atr_pct - 6.0 / 15.5 * 100.0).abs() < 1e-12);
    }

    #[test]
    fn newest_first_input_is_reordered() {
        let chronological = vec![
            bar(0, 10.5, 9.5, 10.0),
            bar(1, 11.0, 10.0, 10.5),
            bar(2, 12.0, 10.5, 11.5),
        ];
        let mut reversed = chronological.clone();
        reversed.reverse();
        let a = atr(&chronological, 2).unwrap();
        let b = atr(&reversed, 2).unwrap();
        assert!((a.atr - b.atr).abs() < 1e-12);
    }

    #[test]
    fn averages_only_recent_period() {
        // Three TRs: 2, 2, 8; period 2 averages the last two -> 5.
        let bars = vec![
            bar(0, 11.0, 9.0, 10.0),
            bar(1, 11.0, 9.0, 10.0),
            bar(2, 11.0, 9.0, 10.0),
            bar(3, 14.0, 6.0, 10.0),
        ];
        let result = atr(&bars, 2).unwrap();
        assert!((result.atr - 5.0).abs() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "ATR period must be > 0")]
    fn zero_period_panics() {
        atr(&[], 0);
    }
}
