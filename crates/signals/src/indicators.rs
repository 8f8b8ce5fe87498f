//! Technical indicators over candle and close series.
//!
//! All functions are pure and total: thin or empty input yields a documented
//! neutral value instead of an error.

use newsblend_core::Candle;

/// RSI reported when there is not enough history to compute one.
pub const NEUTRAL_RSI: f64 = 50.0;

// ============================================
// RSI
// ============================================

/// Relative Strength Index of the last close, with Wilder smoothing.
///
/// Seeds the average gain and loss with the plain mean of the first `period`
/// changes, then smooths every later change with
/// `avg = (avg * (period - 1) + value) / period`.
///
/// Returns:
/// - 50.0 when `closes.len() < period + 1` (or `period == 0`)
/// - 100.0 when the final average loss is exactly zero
///
/// # Example
/// ```
/// use newsblend_signals::indicators::rsi;
///
/// let rising: Vec<f64> = (1..=20).map(f64::from).collect();
/// assert_eq!(rsi(&rising, 14), 100.0);
/// assert_eq!(rsi(&rising[..10], 14), 50.0);
/// ```
#[must_use]
pub fn rsi(closes: &[f64], period: usize) -> f64 {
    if period == 0 || closes.len() < period + 1 {
        return NEUTRAL_RSI;
    }

    let (gains, losses): (Vec<f64>, Vec<f64>) = closes
        .windows(2)
        .map(|w| {
            let change = w[1] - w[0];
            if change > 0.0 {
                (change, 0.0)
            } else {
                (0.0, -change)
            }
        })
        .unzip();

    let period_f = period as f64;
    let mut avg_gain = gains[..period].iter().sum::<f64>() / period_f;
    let mut avg_loss = losses[..period].iter().sum::<f64>() / period_f;

    for (gain, loss) in gains.iter().zip(&losses).skip(period) {
        avg_gain = (avg_gain * (period_f - 1.0) + gain) / period_f;
        avg_loss = (avg_loss * (period_f - 1.0) + loss) / period_f;
    }

    if avg_loss == 0.0 {
        return 100.0;
    }

    let rs = avg_gain / avg_loss;
    100.0 - (100.0 / (1.0 + rs))
}

// ============================================
// Moving Average
// ============================================

/// Mean of the last `period` values.
///
/// With fewer than `period` values this is not an average: it returns the
/// last value unchanged, or 0.0 for an empty slice.
#[must_use]
pub fn simple_moving_average(values: &[f64], period: usize) -> f64 {
    if period == 0 || values.len() < period {
        return values.last().copied().unwrap_or(0.0);
    }
    values[values.len() - period..].iter().sum::<f64>() / period as f64
}

// ============================================
// Rolling Highs
// ============================================

/// Highest `high` over the last `lookback` candles, or over all of them when
/// fewer exist or `lookback` is 0. Empty input yields 0.0.
#[must_use]
pub fn highest_high(candles: &[Candle], lookback: usize) -> f64 {
    let start = match lookback {
        0 => 0,
        n => candles.len().saturating_sub(n),
    };
    candles[start..]
        .iter()
        .map(|c| c.high)
        .reduce(f64::max)
        .unwrap_or(0.0)
}

/// Highest close over the last `window` closes and the fractional drop of the
/// last close from it.
///
/// Returns `(recent_high, drop)`. The drop is 0.0 when the recent high is not
/// positive or the series is empty.
#[must_use]
pub fn drop_from_high(closes: &[f64], window: usize) -> (f64, f64) {
    let Some(&last) = closes.last() else {
        return (0.0, 0.0);
    };
    let start = closes.len().saturating_sub(window.max(1));
    let recent_high = closes[start..].iter().copied().fold(f64::MIN, f64::max);

    let drop = if recent_high > 0.0 {
        (recent_high - last) / recent_high
    } else {
        0.0
    };
    (recent_high, drop)
}
