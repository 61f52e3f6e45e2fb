//! Data-source traits and implementations. The engine only depends on
//! fetch-by-year for candles and fetch-by-sentiment for headline pools;
//! where the bytes come from is an implementation detail.

use std::collections::HashMap;

use async_trait::async_trait;
use reqwest::Client;
use sim_core::{Candle, Sentiment, SimError, SimResult};

/// Raw wire format for one candle: [timestamp, open, high, low, close]
type RawCandle = (i64, f64, f64, f64, f64);

#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Fetch all candles for one calendar year. A failure here is
    /// recoverable at the series level (the year is skipped).
    async fn fetch_year(&self, year: i32) -> SimResult<Vec<Candle>>;
}

#[async_trait]
pub trait HeadlineSource: Send + Sync {
    /// Fetch the headline pool for one sentiment.
    async fn fetch_pool(&self, sentiment: Sentiment) -> SimResult<Vec<String>>;
}

/// HTTP-backed source serving the static JSON layout of the original
/// data set: `{base}/price/<asset>/output/<year>.json` for candles and
/// `{base}/news/<Pool>Headlines.json` for headline pools.
pub struct HttpSource {
    client: Client,
    base_url: String,
    asset_path: String,
}

impl HttpSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            asset_path: "eth".to_string(),
        }
    }

    pub fn with_asset_path(mut self, asset_path: impl Into<String>) -> Self {
        self.asset_path = asset_path.into();
        self
    }

    fn pool_file(sentiment: Sentiment) -> &'static str {
        match sentiment {
            Sentiment::Bullish => "BullishHeadlines.json",
            Sentiment::Bearish => "BearishHeadlines.json",
            Sentiment::Generic => "GenericHeadlines.json",
        }
    }
}

#[async_trait]
impl MarketDataSource for HttpSource {
    async fn fetch_year(&self, year: i32) -> SimResult<Vec<Candle>> {
        let url = format!(
            "{}/price/{}/output/{}.json",
            self.base_url, self.asset_path, year
        );
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SimError::DataLoad(format!("{year}: {e}")))?;

        if !response.status().is_success() {
            return Err(SimError::DataLoad(format!(
                "{year}: HTTP {}",
                response.status()
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| SimError::DataLoad(format!("{year}: {e}")))?;
        decode_year_blob(&body).map_err(|e| SimError::DataLoad(format!("{year}: {e}")))
    }
}

/// Decode a year blob: a JSON array of [timestamp, open, high, low, close]
/// tuples.
fn decode_year_blob(bytes: &[u8]) -> Result<Vec<Candle>, serde_json::Error> {
    let raw: Vec<RawCandle> = serde_json::from_slice(bytes)?;
    Ok(raw
        .into_iter()
        .map(|(timestamp, open, high, low, close)| Candle {
            timestamp,
            open,
            high,
            low,
            close,
        })
        .collect())
}

#[async_trait]
impl HeadlineSource for HttpSource {
    async fn fetch_pool(&self, sentiment: Sentiment) -> SimResult<Vec<String>> {
        let url = format!("{}/news/{}", self.base_url, Self::pool_file(sentiment));
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| SimError::HeadlineFetch(format!("{}: {e}", sentiment.name())))?;

        if !response.status().is_success() {
            return Err(SimError::HeadlineFetch(format!(
                "{}: HTTP {}",
                sentiment.name(),
                response.status()
            )));
        }

        response
            .json()
            .await
            .map_err(|e| SimError::HeadlineFetch(format!("{}: {e}", sentiment.name())))
    }
}

/// In-memory source for tests and offline runs. Years or pools that
/// were never inserted fail to fetch, which exercises the skip and
/// fallback paths.
#[derive(Default)]
pub struct InMemorySource {
    years: HashMap<i32, Vec<Candle>>,
    pools: HashMap<Sentiment, Vec<String>>,
}

impl InMemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_year(mut self, year: i32, candles: Vec<Candle>) -> Self {
        self.years.insert(year, candles);
        self
    }

    pub fn with_pool(mut self, sentiment: Sentiment, headlines: Vec<String>) -> Self {
        self.pools.insert(sentiment, headlines);
        self
    }
}

#[async_trait]
impl MarketDataSource for InMemorySource {
    async fn fetch_year(&self, year: i32) -> SimResult<Vec<Candle>> {
        self.years
            .get(&year)
            .cloned()
            .ok_or_else(|| SimError::DataLoad(format!("{year}: no data")))
    }
}

#[async_trait]
impl HeadlineSource for InMemorySource {
    async fn fetch_pool(&self, sentiment: Sentiment) -> SimResult<Vec<String>> {
        self.pools
            .get(&sentiment)
            .cloned()
            .ok_or_else(|| SimError::HeadlineFetch(format!("{}: no pool", sentiment.name())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn year_blob_decodes_tuple_rows_into_candles() {
        let body = br#"[[1704067200, 100.0, 105.0, 99.0, 104.0], [1704070800, 104.0, 106.0, 103.0, 105.5]]"#;
        let candles = decode_year_blob(body).unwrap();
        assert_eq!(candles.len(), 2);
        assert_eq!(candles[0].timestamp, 1_704_067_200);
        assert_eq!(candles[0].high, 105.0);
        assert_eq!(candles[1].close, 105.5);
    }

    #[test]
    fn malformed_year_blob_is_an_error() {
        assert!(decode_year_blob(b"{\"not\": \"an array\"}").is_err());
        assert!(decode_year_blob(b"[[1704067200, 100.0]]").is_err());
    }
}
