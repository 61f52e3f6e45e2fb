pub mod calendar;
pub mod config;
pub mod error;
pub mod liquidation;
pub mod pnl;
pub mod types;

pub use config::*;
pub use error::*;
pub use types::*;
