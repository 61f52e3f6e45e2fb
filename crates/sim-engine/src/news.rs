//! The news desk: fired on weekly boundary crossings, it samples the
//! trailing week's price trend, classifies sentiment, and emits a
//! headline from the matching pool. Selection goes through a seedable
//! RNG so tests can pin the choice.

use market_data::{HeadlineBank, MarketSeries};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_core::calendar::week_ago;
use sim_core::{NewsEvent, Sentiment};
use tracing::{debug, info};

pub struct NewsDesk {
    bank: HeadlineBank,
    rng: StdRng,
    history: Vec<NewsEvent>,
    active: Option<NewsEvent>,
    /// Wall-clock countdown until the active event auto-dismisses
    display_remaining: f64,
    display_secs: f64,
    /// No events before this simulated time (first-week suppression)
    warmup_until: f64,
}

impl NewsDesk {
    pub fn new(bank: HeadlineBank, warmup_until: f64, display_secs: f64) -> Self {
        Self::with_rng(bank, warmup_until, display_secs, StdRng::from_entropy())
    }

    pub fn with_rng(bank: HeadlineBank, warmup_until: f64, display_secs: f64, rng: StdRng) -> Self {
        Self {
            bank,
            rng,
            history: Vec::new(),
            active: None,
            display_remaining: 0.0,
            display_secs,
            warmup_until,
        }
    }

    pub fn active(&self) -> Option<&NewsEvent> {
        self.active.as_ref()
    }

    pub fn history(&self) -> &[NewsEvent] {
        &self.history
    }

    /// Handle a detected weekly boundary crossing. Returns the emitted
    /// event, or None when suppressed (warmup, or no lookback data).
    pub fn on_weekly_boundary(
        &mut self,
        sim_time: f64,
        current_price: f64,
        series: &MarketSeries,
    ) -> Option<&NewsEvent> {
        if sim_time < self.warmup_until {
            debug!("news suppressed during warmup week");
            return None;
        }

        let price_week_ago = series.close_at(week_ago(sim_time));
        if price_week_ago == 0.0 {
            debug!("news suppressed: no lookback data");
            return None;
        }

        let percent_change = (current_price - price_week_ago) / price_week_ago * 100.0;
        let sentiment = Sentiment::from_percent_change(percent_change);

        let pool = self.bank.pool(sentiment);
        let headline = pool[self.rng.gen_range(0..pool.len())].clone();
        info!(
            sentiment = sentiment.name(),
            percent_change, %headline, "news event"
        );

        let event = NewsEvent {
            headline,
            timestamp: sim_time,
            sentiment,
        };
        self.history.push(event.clone());
        // A new event replaces whatever was showing and restarts the timer
        self.active = Some(event);
        self.display_remaining = self.display_secs;
        self.active.as_ref()
    }

    /// Count down the auto-dismiss timer by a wall-clock delta. Wall
    /// time only reaches the desk through tick deltas, so a paused
    /// session holds its toast until resume or an explicit dismiss.
    pub fn tick_display(&mut self, wall_delta_secs: f64) {
        if self.active.is_none() {
            return;
        }
        self.display_remaining -= wall_delta_secs.max(0.0);
        if self.display_remaining <= 0.0 {
            self.dismiss();
        }
    }

    pub fn dismiss(&mut self) {
        self.active = None;
        self.display_remaining = 0.0;
    }
}
