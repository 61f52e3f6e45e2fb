//! The session controller: owns every piece of mutable simulation
//! state and exposes the only operations that touch it. One external
//! driver calls `tick` once per frame; nothing here is shared or
//! locked.

use std::sync::Arc;

use market_data::{HeadlineBank, HeadlineSource, MarketDataSource, MarketSeries};
use rand::rngs::StdRng;
use rand::SeedableRng;
use sim_core::calendar::crossed_weekly_boundary;
use sim_core::{Direction, GameOverReason, Position, SimConfig, SimError, SimResult, Snapshot};
use tracing::info;

use crate::clock::SimClock;
use crate::ledger::PositionLedger;
use crate::news::NewsDesk;

pub use sim_core::SessionPhase;

pub struct SessionController {
    config: SimConfig,
    market: Arc<dyn MarketDataSource>,
    headlines: Arc<dyn HeadlineSource>,
    news_seed: Option<u64>,

    phase: SessionPhase,
    clock: SimClock,
    ledger: PositionLedger,
    series: MarketSeries,
    news: NewsDesk,
    current_price: f64,
}

impl SessionController {
    pub fn new(
        config: SimConfig,
        market: Arc<dyn MarketDataSource>,
        headlines: Arc<dyn HeadlineSource>,
    ) -> Self {
        let clock = SimClock::new(config.start_time, config.base_speed, config.max_frame_delta);
        let ledger = PositionLedger::new(
            &config.asset,
            config.initial_balance,
            config.leverage_unlock_threshold,
        );
        let news = NewsDesk::new(
            HeadlineBank::from_pools(Default::default()),
            config.start_time as f64 + config.news_warmup_secs,
            config.news_display_secs,
        );
        Self {
            config,
            market,
            headlines,
            news_seed: None,
            phase: SessionPhase::Loading,
            clock,
            ledger,
            series: MarketSeries::default(),
            news,
            current_price: 0.0,
        }
    }

    /// Fix the headline RNG seed for deterministic runs.
    pub fn with_news_seed(mut self, seed: u64) -> Self {
        self.news_seed = Some(seed);
        self
    }

    pub fn phase(&self) -> &SessionPhase {
        &self.phase
    }

    pub fn is_running(&self) -> bool {
        matches!(self.phase, SessionPhase::Ready) && self.clock.is_running()
    }

    /// Load market data and headline pools. Partial year failures are
    /// tolerated inside the series loader; only a totally empty result
    /// surfaces here and parks the session in `Error`.
    pub async fn initialize(&mut self) -> SimResult<()> {
        self.phase = SessionPhase::Loading;

        let series = match MarketSeries::load(self.market.as_ref(), &self.config.years).await {
            Ok(series) => series,
            Err(e) => {
                self.phase = SessionPhase::Error(e.to_string());
                return Err(e);
            }
        };

        // Headline problems never block the session
        let bank = HeadlineBank::load(self.headlines.as_ref()).await;
        let rng = match self.news_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.news = NewsDesk::with_rng(
            bank,
            self.config.start_time as f64 + self.config.news_warmup_secs,
            self.config.news_display_secs,
            rng,
        );

        self.current_price = series.price_at(self.config.start_time as f64);
        self.series = series;
        self.phase = SessionPhase::Ready;
        info!(start_price = self.current_price, "session ready");
        Ok(())
    }

    /// Discard all session state and reload from the sources. Valid
    /// from any phase, including `Error` and `GameOver`.
    pub async fn reset(&mut self) -> SimResult<()> {
        self.clock = SimClock::new(
            self.config.start_time,
            self.config.base_speed,
            self.config.max_frame_delta,
        );
        self.ledger = PositionLedger::new(
            &self.config.asset,
            self.config.initial_balance,
            self.config.leverage_unlock_threshold,
        );
        self.current_price = 0.0;
        info!("session reset");
        self.initialize().await
    }

    /// Resume the clock. No-op outside `Ready`.
    pub fn start(&mut self) {
        if matches!(self.phase, SessionPhase::Ready) {
            self.clock.start();
        }
    }

    /// Pause the clock. No-op outside `Ready`.
    pub fn pause(&mut self) {
        if matches!(self.phase, SessionPhase::Ready) {
            self.clock.pause();
        }
    }

    pub fn set_speed(&mut self, multiplier: f64) {
        self.clock.set_multiplier(multiplier);
    }

    pub fn speed_multiplier(&self) -> f64 {
        self.clock.speed_multiplier()
    }

    pub fn dismiss_news(&mut self) {
        self.news.dismiss();
    }

    /// One frame of simulation. No-op unless running. Order matters:
    /// liquidations settle before equity or any terminal check so both
    /// see post-liquidation reality.
    pub fn tick(&mut self, wall_delta_secs: f64) {
        if !self.is_running() {
            return;
        }

        let (prev_time, sim_time) = self.clock.advance(wall_delta_secs);
        self.current_price = self.series.price_at(sim_time);

        self.ledger.settle_liquidations(self.current_price);
        let equity = self.ledger.mark_to_market(self.current_price);
        self.ledger.refresh_leverage_unlock(self.current_price);

        // Count down the old toast before a new boundary can replace it,
        // so a fresh event keeps its full display window
        self.news.tick_display(wall_delta_secs);
        if crossed_weekly_boundary(prev_time, sim_time) {
            self.news
                .on_weekly_boundary(sim_time, self.current_price, &self.series);
        }

        // Terminal checks, bankruptcy first
        if equity <= 0.0 && self.ledger.positions().is_empty() {
            self.clock.pause();
            self.phase = SessionPhase::GameOver(GameOverReason::Bankrupt);
            info!(equity, "game over: bankrupt");
            return;
        }
        if let Some(end) = self.series.end_time() {
            if sim_time >= end as f64 {
                self.clock.clamp_to(end as f64);
                self.clock.pause();
                self.phase = SessionPhase::GameOver(GameOverReason::Completed);
                info!("game over: completed");
            }
        }
    }

    /// Open a leveraged position at the current interpolated price.
    pub fn open_position(
        &mut self,
        direction: Direction,
        percentage: f64,
        leverage: u32,
    ) -> SimResult<Position> {
        self.require_ready()?;
        // The unlock may have been earned at exactly this price
        self.ledger.refresh_leverage_unlock(self.current_price);
        self.ledger.open(
            direction,
            percentage,
            leverage,
            self.current_price,
            self.clock.sim_time(),
        )
    }

    /// Close a position by id at the current interpolated price.
    pub fn close_position(&mut self, id: &str) -> SimResult<Position> {
        self.require_ready()?;
        self.ledger.close(id, self.current_price)
    }

    /// Read-only state for presentation layers. Everything derived is
    /// recomputed here; nothing is cached between calls.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            sim_time: self.clock.sim_time(),
            running: self.is_running(),
            balance: self.ledger.balance(),
            positions: self.ledger.positions().to_vec(),
            total_equity: self.ledger.mark_to_market(self.current_price),
            current_price: self.current_price,
            active_news: self.news.active().cloned(),
            phase: self.phase.clone(),
            game_over_reason: match self.phase {
                SessionPhase::GameOver(reason) => Some(reason),
                _ => None,
            },
        }
    }

    /// Append-only news history for the session.
    pub fn news_history(&self) -> &[sim_core::NewsEvent] {
        self.news.history()
    }

    fn require_ready(&self) -> SimResult<()> {
        match &self.phase {
            SessionPhase::Ready => Ok(()),
            other => Err(SimError::NotReady(format!("{other:?}"))),
        }
    }
}
