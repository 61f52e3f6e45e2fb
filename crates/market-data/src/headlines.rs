//! Headline pools keyed by sentiment, resolved once at session
//! initialization so a news trigger never waits on the network.

use std::collections::HashMap;

use futures_util::future::join_all;
use sim_core::Sentiment;
use tracing::warn;

use crate::source::HeadlineSource;

/// Substituted for any pool that fails to fetch.
pub const FALLBACK_HEADLINE: &str = "Market continues its trend...";

const ALL_SENTIMENTS: [Sentiment; 3] = [Sentiment::Bullish, Sentiment::Bearish, Sentiment::Generic];

/// All three headline pools. Every sentiment always has at least one
/// entry: a failed or empty fetch is replaced by the fallback string.
#[derive(Debug, Clone)]
pub struct HeadlineBank {
    pools: HashMap<Sentiment, Vec<String>>,
}

impl HeadlineBank {
    /// Fetch all pools concurrently. Never fails: headline problems are
    /// cosmetic and must not block the session.
    pub async fn load(source: &dyn HeadlineSource) -> Self {
        let fetches = ALL_SENTIMENTS.iter().map(|&s| source.fetch_pool(s));
        let results = join_all(fetches).await;

        let mut pools = HashMap::new();
        for (sentiment, result) in ALL_SENTIMENTS.into_iter().zip(results) {
            let pool = match result {
                Ok(pool) if !pool.is_empty() => pool,
                Ok(_) => {
                    warn!("empty {} headline pool, using fallback", sentiment.name());
                    vec![FALLBACK_HEADLINE.to_string()]
                }
                Err(e) => {
                    warn!("{e}, using fallback");
                    vec![FALLBACK_HEADLINE.to_string()]
                }
            };
            pools.insert(sentiment, pool);
        }
        Self { pools }
    }

    /// Build a bank directly from in-memory pools (tests, offline runs).
    pub fn from_pools(pools: HashMap<Sentiment, Vec<String>>) -> Self {
        let mut bank = Self { pools };
        for sentiment in ALL_SENTIMENTS {
            let pool = bank.pools.entry(sentiment).or_default();
            if pool.is_empty() {
                pool.push(FALLBACK_HEADLINE.to_string());
            }
        }
        bank
    }

    pub fn pool(&self, sentiment: Sentiment) -> &[String] {
        // Construction guarantees every sentiment is present and non-empty
        &self.pools[&sentiment]
    }
}
