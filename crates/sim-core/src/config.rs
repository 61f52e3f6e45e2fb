use serde::{Deserialize, Serialize};

/// Simulation constants and tunables. Defaults reproduce the shipped
/// game: ETH candles from Aug 2017, $1,000 starting cash, one wall
/// second = one simulated hour.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimConfig {
    /// Asset symbol attached to every position
    pub asset: String,
    /// Simulated start time, Unix seconds UTC
    pub start_time: i64,
    /// Calendar years to request from the data source
    pub years: Vec<i32>,
    /// Starting cash balance
    pub initial_balance: f64,
    /// Simulated seconds per wall second at multiplier 1
    pub base_speed: f64,
    /// Largest wall delta a single tick may consume, in seconds.
    /// Bounds the jump from frame hiccups or tab suspension.
    pub max_frame_delta: f64,
    /// Total equity required before leverage above 1x is allowed.
    /// The unlock latches: once reached it never re-locks.
    pub leverage_unlock_threshold: f64,
    /// Wall seconds an active news toast stays up before auto-dismissal
    pub news_display_secs: f64,
    /// No news is triggered within this many simulated seconds of the start
    pub news_warmup_secs: f64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            asset: "ETH".to_string(),
            // Aug 21, 2017 00:00 UTC
            start_time: 1_503_248_400,
            years: (2017..=2025).collect(),
            initial_balance: 1000.0,
            // 1 real second = 1 game hour
            base_speed: 3600.0,
            max_frame_delta: 0.1,
            leverage_unlock_threshold: 0.0,
            news_display_secs: 5.0,
            news_warmup_secs: 7.0 * 24.0 * 3600.0,
        }
    }
}

pub const MIN_LEVERAGE: u32 = 1;
pub const MAX_LEVERAGE: u32 = 10;

/// Speed button options exposed to the presentation layer
pub const SPEED_MULTIPLIERS: &[f64] = &[1.0, 2.0, 5.0, 100.0];
