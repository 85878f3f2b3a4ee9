/// Final value of an SMA-seeded exponential moving average over a batch
/// series. The first EMA value is the SMA of the first `period` inputs.
/// Returns None for series shorter than `period`.
pub fn ema_last(values: &[f64], period: usize) -> Option<f64> {
    assert!(period > 0, "EMA period must be > 0");
    if values.len() < period {
        return None;
    }
    let seed = values[..period].iter().sum::<f64>() / period as f64;
    let multiplier = 2.0 / (period as f64 + 1.0);
    let mut ema = seed;
    for value in &values[period..] {
        ema = (value - ema) * multiplier + ema;
    }
    Some(ema)
}

/// Final Wilder-smoothed RSI over a close series. Gains and losses are
/// smoothed with factor (period-1)/period from the start of the series.
/// Returns None for series shorter than `period + 1`; 100 when the
/// series never lost.
pub fn rsi_last(closes: &[f64], period: usize) -> Option<f64> {
    assert!(period > 0, "RSI period must be > 0");
    if closes.len() < period + 1 {
        return None;
    }
    let p = period as f64;
    let mut avg_gain = 0.0;
    let mut avg_loss = 0.0;
    for i in 1..closes.len() {
        let change = closes[i] - closes[i - 1];
        avg_gain = (avg_gain * (p - 1.0) + change.max(0.0)) / p;
        avg_loss = (avg_loss * (p - 1.0) + (-change).max(0.0)) / p;
    }
    if avg_loss == 0.0 {
        return Some(100.0);
    }
    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}
