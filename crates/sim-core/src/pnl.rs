//! Pure P&L math. Always derived from `(position, current_price)`;
//! nothing here is cached or stored.

use crate::types::{Direction, PnL, Position};

/// P&L for a single position at the given price.
///
/// dollar = size * leverage * percent_change, where percent_change is
/// (price - entry) / entry for longs and its negation for shorts.
pub fn position_pnl(position: &Position, current_price: f64) -> PnL {
    let price_change = match position.direction {
        Direction::Long => current_price - position.entry_price,
        Direction::Short => position.entry_price - current_price,
    };
    let percent_change = price_change / position.entry_price;
    let dollar_pnl = position.size * position.leverage as f64 * percent_change;
    let percent_pnl = dollar_pnl / position.size * 100.0;

    PnL {
        dollar_pnl,
        percent_pnl,
    }
}

/// Total equity: free cash plus unrealized P&L across all open positions.
pub fn total_equity(balance: f64, positions: &[Position], current_price: f64) -> f64 {
    let unrealized: f64 = positions
        .iter()
        .map(|p| position_pnl(p, current_price).dollar_pnl)
        .sum();
    balance + unrealized
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::liquidation::liquidation_price;

    fn position(direction: Direction, leverage: u32, entry: f64, size: f64) -> Position {
        Position {
            id: "0001".to_string(),
            asset: "ETH".to_string(),
            direction,
            leverage,
            entry_price: entry,
            entry_time: 0.0,
            size,
            notional_value: size * leverage as f64,
            liquidation_price: liquidation_price(entry, direction, leverage),
        }
    }

    #[test]
    fn long_gain_scales_with_leverage() {
        // +20% move on $500 at 1x -> $100; at 5x -> $500
        let p1 = position(Direction::Long, 1, 100.0, 500.0);
        let p5 = position(Direction::Long, 5, 100.0, 500.0);

        assert!((position_pnl(&p1, 120.0).dollar_pnl - 100.0).abs() < 1e-9);
        assert!((position_pnl(&p5, 120.0).dollar_pnl - 500.0).abs() < 1e-9);
        assert!((position_pnl(&p5, 120.0).percent_pnl - 100.0).abs() < 1e-9);
    }

    #[test]
    fn short_profits_when_price_falls() {
        let p = position(Direction::Short, 2, 200.0, 100.0);
        let pnl = position_pnl(&p, 180.0);
        // -10% move, 2x short -> +20% on size
        assert!((pnl.dollar_pnl - 20.0).abs() < 1e-9);
        assert!((pnl.percent_pnl - 20.0).abs() < 1e-9);
    }

    #[test]
    fn pnl_is_zero_at_entry_price() {
        for leverage in [1, 3, 10] {
            let p = position(Direction::Long, leverage, 100.0, 250.0);
            assert_eq!(position_pnl(&p, 100.0).dollar_pnl, 0.0);
        }
    }

    #[test]
    fn equity_sums_balance_and_unrealized() {
        let positions = vec![
            position(Direction::Long, 1, 100.0, 500.0),
            position(Direction::Short, 1, 100.0, 200.0),
        ];
        // At 110: long +50, short -20
        let equity = total_equity(300.0, &positions, 110.0);
        assert!((equity - 330.0).abs() < 1e-9);
    }

    #[test]
    fn equity_of_empty_portfolio_is_balance() {
        assert_eq!(total_equity(1000.0, &[], 123.45), 1000.0);
    }
}
