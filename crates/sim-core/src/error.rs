use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Data load failed: {0}")]
    DataLoad(String),

    #[error("Headline fetch failed: {0}")]
    HeadlineFetch(String),

    #[error("Insufficient balance: {0}")]
    InsufficientBalance(f64),

    #[error("Invalid position size: {0}")]
    InvalidSize(f64),

    #[error("Invalid leverage: {0} (must be 1-10)")]
    InvalidLeverage(u32),

    #[error("Leverage locked: total equity {equity} below unlock threshold {threshold}")]
    LeverageLocked { equity: f64, threshold: f64 },

    #[error("Position not found: {0}")]
    PositionNotFound(String),

    #[error("Session not ready: {0}")]
    NotReady(String),
}

pub type SimResult<T> = Result<T, SimError>;
