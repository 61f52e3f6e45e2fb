//! Liquidation price math. The price is fixed at entry and never
//! recomputed as the market moves.

use crate::types::{Direction, Position};

/// Liquidation price for a new position, or None at 1x where the
/// committed cash can never be fully consumed by an adverse move.
///
/// Long: entry * (1 - 1/leverage). Short: entry * (1 + 1/leverage).
pub fn liquidation_price(entry_price: f64, direction: Direction, leverage: u32) -> Option<f64> {
    if leverage == 1 {
        return None;
    }
    let offset = 1.0 / leverage as f64;
    match direction {
        Direction::Long => Some(entry_price * (1.0 - offset)),
        Direction::Short => Some(entry_price * (1.0 + offset)),
    }
}

/// Whether the current price has crossed the position's liquidation
/// price against the holder.
pub fn is_liquidated(position: &Position, current_price: f64) -> bool {
    let Some(liq) = position.liquidation_price else {
        return false;
    };
    match position.direction {
        Direction::Long => current_price <= liq,
        Direction::Short => current_price >= liq,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position(direction: Direction, leverage: u32, entry: f64) -> Position {
        Position {
            id: "0001".to_string(),
            asset: "ETH".to_string(),
            direction,
            leverage,
            entry_price: entry,
            entry_time: 0.0,
            size: 100.0,
            notional_value: 100.0 * leverage as f64,
            liquidation_price: liquidation_price(entry, direction, leverage),
        }
    }

    #[test]
    fn one_x_has_no_liquidation_price() {
        assert_eq!(liquidation_price(100.0, Direction::Long, 1), None);
        assert_eq!(liquidation_price(100.0, Direction::Short, 1), None);
        assert!(!is_liquidated(&position(Direction::Long, 1, 100.0), 0.01));
    }

    #[test]
    fn five_x_long_liquidates_at_80_percent() {
        let p = position(Direction::Long, 5, 100.0);
        assert_eq!(p.liquidation_price, Some(80.0));
        assert!(!is_liquidated(&p, 80.01));
        assert!(is_liquidated(&p, 80.0)); // touch counts
        assert!(is_liquidated(&p, 50.0));
    }

    #[test]
    fn short_liquidates_above_entry() {
        let p = position(Direction::Short, 4, 100.0);
        assert_eq!(p.liquidation_price, Some(125.0));
        assert!(!is_liquidated(&p, 124.99));
        assert!(is_liquidated(&p, 125.0));
        assert!(is_liquidated(&p, 200.0));
    }
}
