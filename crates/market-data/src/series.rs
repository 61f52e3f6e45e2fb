//! Assembly of the full candle series from per-year blobs.

use futures_util::future::join_all;
use sim_core::{Candle, SimError, SimResult};
use tracing::{info, warn};

use crate::interpolate;
use crate::source::MarketDataSource;

/// The immutable, time-ordered candle series spanning the whole
/// simulated range.
#[derive(Debug, Clone, Default)]
pub struct MarketSeries {
    candles: Vec<Candle>,
}

impl MarketSeries {
    pub fn from_candles(mut candles: Vec<Candle>) -> Self {
        candles.sort_by_key(|c| c.timestamp);
        Self { candles }
    }

    /// Load every requested year concurrently and concatenate the
    /// results in timestamp order. A year that fails to load is skipped
    /// with a warning; only a fully empty result is an error.
    pub async fn load(source: &dyn MarketDataSource, years: &[i32]) -> SimResult<Self> {
        let fetches = years.iter().map(|&year| source.fetch_year(year));
        let results = join_all(fetches).await;

        let mut candles = Vec::new();
        for (year, result) in years.iter().zip(results) {
            match result {
                Ok(mut year_candles) => candles.append(&mut year_candles),
                Err(e) => warn!("skipping year {year}: {e}"),
            }
        }

        if candles.is_empty() {
            return Err(SimError::DataLoad(
                "no market data loaded from any year".to_string(),
            ));
        }

        let series = Self::from_candles(candles);
        info!(
            candles = series.len(),
            start = series.candles.first().map(|c| c.timestamp),
            end = series.end_time(),
            "market series loaded"
        );
        Ok(series)
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    /// Timestamp of the final candle; the simulation completes here.
    pub fn end_time(&self) -> Option<i64> {
        self.candles.last().map(|c| c.timestamp)
    }

    /// Continuous interpolated price at a simulated timestamp.
    pub fn price_at(&self, timestamp: f64) -> f64 {
        interpolate::interpolate_price(timestamp, &self.candles)
    }

    /// Nearest recorded close, no interpolation.
    pub fn close_at(&self, timestamp: f64) -> f64 {
        interpolate::close_at(timestamp, &self.candles)
    }
}
