//! Price indicators drawn alongside the close series.

/// Window of the moving average overlaid on the chart.
pub const DEFAULT_MA_WINDOW: usize = 50;

/// Simple moving average aligned index-for-index with `closes`.
///
/// Entry `i` is the mean of `closes[i + 1 - window..=i]`. The first
/// `window - 1` entries have insufficient history and are `None`, so a series
/// shorter than `window` yields no values at all. A zero window yields only
/// `None`.
pub fn moving_average(closes: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; closes.len()];
    }

    let mut result = Vec::with_capacity(closes.len());
    for i in 0..closes.len() {
        if i + 1 < window {
            result.push(None);
        } else {
            let sum: f64 = closes[i + 1 - window..=i].iter().sum();
            result.push(Some(sum / window as f64));
        }
    }

    result
}
