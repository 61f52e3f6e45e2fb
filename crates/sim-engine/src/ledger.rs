//! The position ledger: open positions, free cash, and the rules for
//! opening, closing, and force-closing them. Equity and P&L are always
//! recomputed from `(balance, positions, price)`; the ledger caches
//! nothing derivable.

use sim_core::liquidation::{is_liquidated, liquidation_price};
use sim_core::pnl::{position_pnl, total_equity};
use sim_core::{Direction, Position, SimError, SimResult, MAX_LEVERAGE, MIN_LEVERAGE};
use tracing::{info, warn};

pub struct PositionLedger {
    asset: String,
    balance: f64,
    /// Insertion order; liquidation sweeps follow it but no external
    /// meaning is attached.
    positions: Vec<Position>,
    /// Monotonic, never reused within a session
    position_counter: u64,
    leverage_unlock_threshold: f64,
    /// Latched once equity reaches the threshold
    leverage_unlocked: bool,
}

impl PositionLedger {
    pub fn new(asset: impl Into<String>, initial_balance: f64, unlock_threshold: f64) -> Self {
        Self {
            asset: asset.into(),
            balance: initial_balance,
            positions: Vec::new(),
            position_counter: 0,
            leverage_unlock_threshold: unlock_threshold,
            leverage_unlocked: initial_balance >= unlock_threshold,
        }
    }

    pub fn balance(&self) -> f64 {
        self.balance
    }

    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    pub fn leverage_unlocked(&self) -> bool {
        self.leverage_unlocked
    }

    /// Total equity at the given price. Pure recomputation.
    pub fn mark_to_market(&self, current_price: f64) -> f64 {
        total_equity(self.balance, &self.positions, current_price)
    }

    /// Latch the leverage unlock if equity has reached the threshold.
    /// Once set it survives later drawdowns.
    pub fn refresh_leverage_unlock(&mut self, current_price: f64) {
        if !self.leverage_unlocked
            && self.mark_to_market(current_price) >= self.leverage_unlock_threshold
        {
            self.leverage_unlocked = true;
            info!("leverage unlocked");
        }
    }

    /// Open a position committing `percentage` of free cash at
    /// `leverage`. The committed size is deducted from the balance
    /// immediately; it comes back (plus or minus P&L) only on close.
    pub fn open(
        &mut self,
        direction: Direction,
        percentage: f64,
        leverage: u32,
        current_price: f64,
        sim_time: f64,
    ) -> SimResult<Position> {
        if self.balance <= 0.0 {
            return Err(SimError::InsufficientBalance(self.balance));
        }
        if !(MIN_LEVERAGE..=MAX_LEVERAGE).contains(&leverage) {
            return Err(SimError::InvalidLeverage(leverage));
        }
        if leverage > 1 && !self.leverage_unlocked {
            return Err(SimError::LeverageLocked {
                equity: self.mark_to_market(current_price),
                threshold: self.leverage_unlock_threshold,
            });
        }

        if !(percentage > 0.0 && percentage <= 100.0) {
            return Err(SimError::InvalidSize(percentage));
        }
        let size = self.balance * percentage / 100.0;
        if size <= 0.0 {
            return Err(SimError::InvalidSize(size));
        }

        self.position_counter += 1;
        let position = Position {
            id: format!("{:04}", self.position_counter),
            asset: self.asset.clone(),
            direction,
            leverage,
            entry_price: current_price,
            entry_time: sim_time,
            size,
            notional_value: size * leverage as f64,
            liquidation_price: liquidation_price(current_price, direction, leverage),
        };

        self.balance -= size;
        info!(
            id = %position.id,
            %direction,
            leverage,
            size,
            entry = current_price,
            "position opened"
        );
        self.positions.push(position.clone());
        Ok(position)
    }

    /// Close a position at the current price, crediting the committed
    /// size plus realized P&L back to the balance.
    pub fn close(&mut self, id: &str, current_price: f64) -> SimResult<Position> {
        let idx = self
            .positions
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| SimError::PositionNotFound(id.to_string()))?;

        let position = self.positions.remove(idx);
        let pnl = position_pnl(&position, current_price);
        self.balance += position.size + pnl.dollar_pnl;
        info!(
            id = %position.id,
            exit = current_price,
            dollar_pnl = pnl.dollar_pnl,
            percent_pnl = pnl.percent_pnl,
            "position closed"
        );
        Ok(position)
    }

    /// Remove every position whose liquidation price has been crossed.
    /// The committed size is forfeited: it left the balance at open and
    /// is never credited back. Returns the liquidated positions.
    pub fn settle_liquidations(&mut self, current_price: f64) -> Vec<Position> {
        let mut liquidated = Vec::new();
        self.positions.retain(|p| {
            if is_liquidated(p, current_price) {
                warn!(id = %p.id, price = current_price, "position liquidated");
                liquidated.push(p.clone());
                false
            } else {
                true
            }
        });
        liquidated
    }
}
