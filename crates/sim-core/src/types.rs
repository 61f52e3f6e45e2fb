use serde::{Deserialize, Serialize};

/// One OHLC price sample. Timestamps are Unix seconds UTC, strictly
/// increasing across a loaded series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

/// Position direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Long,
    Short,
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Direction::Long => write!(f, "long"),
            Direction::Short => write!(f, "short"),
        }
    }
}

/// An open leveraged position. Immutable after creation; P&L and
/// liquidation status are always derived from the current price,
/// never stored on the position itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Zero-padded creation-order id ("0001", "0002", ...). Never reused
    /// within a session.
    pub id: String,
    pub asset: String,
    pub direction: Direction,
    /// 1 to 10
    pub leverage: u32,
    pub entry_price: f64,
    /// Simulated timestamp at open
    pub entry_time: f64,
    /// Dollar cash committed, deducted from balance at open
    pub size: f64,
    /// size * leverage
    pub notional_value: f64,
    /// None at 1x (no liquidation possible). Fixed at entry.
    pub liquidation_price: Option<f64>,
}

/// Headline sentiment classification for the weekly news trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Bullish,
    Bearish,
    Generic,
}

impl Sentiment {
    /// Classify a trailing percent change (e.g. +7.2 for +7.2%).
    pub fn from_percent_change(percent_change: f64) -> Self {
        if percent_change < -5.0 {
            Sentiment::Bearish
        } else if percent_change > 5.0 {
            Sentiment::Bullish
        } else {
            Sentiment::Generic
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Sentiment::Bullish => "bullish",
            Sentiment::Bearish => "bearish",
            Sentiment::Generic => "generic",
        }
    }
}

/// A news event emitted on a weekly boundary crossing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewsEvent {
    pub headline: String,
    /// Simulated time of emission
    pub timestamp: f64,
    pub sentiment: Sentiment,
}

/// Terminal session outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameOverReason {
    /// Total equity reached zero with no open positions left
    Bankrupt,
    /// Simulated time reached the end of the data series
    Completed,
}

impl std::fmt::Display for GameOverReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameOverReason::Bankrupt => write!(f, "bankrupt"),
            GameOverReason::Completed => write!(f, "completed"),
        }
    }
}

/// Session lifecycle. `Ready` covers both paused and running; the
/// running flag is reported separately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionPhase {
    /// Market data is loading; all operations except reset are rejected
    Loading,
    /// Data loaded; the simulation can run
    Ready,
    /// Terminal; state is frozen until an explicit reset
    GameOver(GameOverReason),
    /// Data load failed entirely; reset retries from Loading
    Error(String),
}

/// Derived P&L for a single position at a given price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PnL {
    pub dollar_pnl: f64,
    pub percent_pnl: f64,
}

/// Read-only state snapshot exposed at the presentation boundary.
/// Everything here is recomputed on demand; there is no other way to
/// observe or mutate engine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub sim_time: f64,
    pub running: bool,
    pub balance: f64,
    pub positions: Vec<Position>,
    pub total_equity: f64,
    pub current_price: f64,
    pub active_news: Option<NewsEvent>,
    pub phase: SessionPhase,
    /// Flattened from `phase` for terminal-state consumers
    pub game_over_reason: Option<GameOverReason>,
}
