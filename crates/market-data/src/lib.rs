pub mod headlines;
pub mod interpolate;
pub mod series;
pub mod source;

pub use headlines::{HeadlineBank, FALLBACK_HEADLINE};
pub use interpolate::{close_at, interpolate_price, nearest_candle_index};
pub use series::MarketSeries;
pub use source::{HeadlineSource, HttpSource, InMemorySource, MarketDataSource};
