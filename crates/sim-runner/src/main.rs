//! sim-runner: headless driver for the replay engine.
//!
//! Feeds the session controller fixed 16ms frames as fast as possible
//! until the run ends, logging news events and equity along the way.
//!
//! Usage:
//!   DATA_BASE_URL=https://example.com cargo run -p sim-runner
//!   cargo run -p sim-runner          # synthetic random-walk data

use std::sync::Arc;

use anyhow::Result;
use chrono::{TimeZone, Utc};
use market_data::{HeadlineSource, HttpSource, InMemorySource, MarketDataSource};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sim_core::calendar::format_sim_time;
use sim_core::{Candle, Direction, SimConfig};
use sim_engine::{SessionController, SessionPhase};
use tracing::info;
use tracing_subscriber::EnvFilter;

const FRAME_SECS: f64 = 0.016;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = SimConfig::default();

    let (market, headlines): (Arc<dyn MarketDataSource>, Arc<dyn HeadlineSource>) =
        match std::env::var("DATA_BASE_URL") {
            Ok(url) => {
                info!(%url, "using HTTP data source");
                let source = Arc::new(HttpSource::new(url));
                (source.clone(), source)
            }
            Err(_) => {
                info!("DATA_BASE_URL not set, generating synthetic data");
                let source = Arc::new(synthetic_source(&config));
                (source.clone(), source)
            }
        };

    let mut session = SessionController::new(config, market, headlines);
    session.initialize().await?;
    session.start();
    session.set_speed(100.0);

    // A simple buy-and-hold rider so the run exercises the ledger
    let position = session.open_position(Direction::Long, 50.0, 1)?;
    info!(id = %position.id, entry = position.entry_price, "opened demo position");

    let mut frames: u64 = 0;
    let mut reported_news = 0;
    while matches!(session.phase(), SessionPhase::Ready) {
        session.tick(FRAME_SECS);
        frames += 1;

        let history = session.news_history();
        if history.len() > reported_news {
            for event in &history[reported_news..] {
                info!(
                    sentiment = event.sentiment.name(),
                    at = %format_sim_time(event.timestamp),
                    "{}",
                    event.headline
                );
            }
            reported_news = history.len();
        }

        if frames % 10_000 == 0 {
            let snap = session.snapshot();
            info!(
                sim_time = %format_sim_time(snap.sim_time),
                price = snap.current_price,
                equity = snap.total_equity,
                speed = session.speed_multiplier(),
                "progress"
            );
        }
    }

    let snap = session.snapshot();
    info!(
        reason = ?snap.game_over_reason,
        final_equity = snap.total_equity,
        balance = snap.balance,
        open_positions = snap.positions.len(),
        news_events = session.news_history().len(),
        frames,
        "run finished"
    );
    Ok(())
}

/// Hourly random-walk candles for each configured year, so the runner
/// works without a data host.
fn synthetic_source(config: &SimConfig) -> InMemorySource {
    let mut rng = StdRng::seed_from_u64(2017);
    let mut source = InMemorySource::new();
    let mut price = 300.0;

    for &year in &config.years {
        let start = Utc
            .with_ymd_and_hms(year, 1, 1, 0, 0, 0)
            .single()
            .map(|d| d.timestamp())
            .unwrap_or_default();
        let end = Utc
            .with_ymd_and_hms(year + 1, 1, 1, 0, 0, 0)
            .single()
            .map(|d| d.timestamp())
            .unwrap_or_default();

        let mut candles = Vec::new();
        let mut t = start;
        while t < end {
            let drift: f64 = rng.gen_range(-0.01..0.0102);
            let open = price;
            price = (price * (1.0 + drift)).max(1.0);
            candles.push(Candle {
                timestamp: t,
                open,
                high: open.max(price) * 1.002,
                low: open.min(price) * 0.998,
                close: price,
            });
            t += 3600;
        }
        source = source.with_year(year, candles);
    }
    source
}
