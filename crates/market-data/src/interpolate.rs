//! Price lookup over a sorted candle slice. `interpolate_price` gives a
//! continuous price for the animated clock; `close_at` gives the
//! nearest recorded close for trend comparisons.

use sim_core::Candle;

/// Index of the bracketing candle for `timestamp`: the greatest index
/// whose timestamp is <= `timestamp`, clamped to the series ends.
pub fn nearest_candle_index(timestamp: i64, candles: &[Candle]) -> usize {
    if candles.is_empty() {
        return 0;
    }
    if timestamp <= candles[0].timestamp {
        return 0;
    }
    let last = candles.len() - 1;
    if timestamp >= candles[last].timestamp {
        return last;
    }
    // partition_point: first index with timestamp > target
    candles.partition_point(|c| c.timestamp <= timestamp) - 1
}

/// Continuous price at `timestamp` via close-to-close linear
/// interpolation between the bracketing candles.
///
/// Empty series -> 0. Timestamps at or before the first candle return
/// its close; at or after the last candle, the last close. Distinct,
/// strictly increasing timestamps guarantee the divisor is nonzero.
pub fn interpolate_price(timestamp: f64, candles: &[Candle]) -> f64 {
    if candles.is_empty() {
        return 0.0;
    }
    let first = &candles[0];
    if timestamp <= first.timestamp as f64 {
        return first.close;
    }
    let last = &candles[candles.len() - 1];
    if timestamp >= last.timestamp as f64 {
        return last.close;
    }

    let idx = nearest_candle_index(timestamp.floor() as i64, candles);
    let prev = &candles[idx];
    let next = &candles[idx + 1];

    let span = (next.timestamp - prev.timestamp) as f64;
    let ratio = (timestamp - prev.timestamp as f64) / span;
    prev.close + (next.close - prev.close) * ratio
}

/// Close of the candle nearest `timestamp`, without interpolation.
/// Empty series -> 0.
pub fn close_at(timestamp: f64, candles: &[Candle]) -> f64 {
    if candles.is_empty() {
        return 0.0;
    }
    candles[nearest_candle_index(timestamp.floor() as i64, candles)].close
}
