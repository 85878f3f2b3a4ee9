use crate::model::OpenInterestPoint;

/// Open-interest shock: the newest value against the average of the
/// following `baseline_points` older samples, as a percentage.
///
/// Points must be in upstream order, newest first. Returns None for
/// fewer than 2 points or a zero baseline.
pub fn oi_shock(points: &[OpenInterestPoint], baseline_points: usize) -> Option<f64> {
    if points.len() < 2 {
        return None;
    }
    let current = points[0].value;
    let window_end = (1 + baseline_points).min(points.len());
    let baseline = &points[1..window_end];
    let avg = baseline.iter().map(|p| p.value).sum::<f64>() / baseline.len() as f64;
    if avg == 0.0 {
        return None;
    }
    Some((current - avg) / avg * 100.0)
}
