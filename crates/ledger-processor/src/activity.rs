use chrono::{DateTime, NaiveDate, Utc};
use dna_core::{TradeAction, TradeRecord};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Counts and time span of a ledger
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TradeStats {
    pub total_trades: usize,
    pub buy_trades: usize,
    pub sell_trades: usize,
    pub unique_tokens: usize,
    pub first_trade: Option<DateTime<Utc>>,
    pub last_trade: Option<DateTime<Utc>>,
    /// Distinct UTC calendar days with at least one trade
    pub trading_days: usize,
}

impl TradeStats {
    /// Trades per active day, 0 for an empty ledger.
    pub fn trade_frequency(&self) -> f64 {
        if self.trading_days == 0 {
            return 0.0;
        }
        self.total_trades as f64 / self.trading_days as f64
    }
}

pub fn trade_stats(ledger: &[TradeRecord]) -> TradeStats {
    let tokens: HashSet<&str> = ledger.iter().map(|t| t.token_id.as_str()).collect();
    let days: HashSet<NaiveDate> = ledger.iter().map(|t| t.timestamp.date_naive()).collect();

    TradeStats {
        total_trades: ledger.len(),
        buy_trades: ledger.iter().filter(|t| t.action == TradeAction::Buy).count(),
        sell_trades: ledger.iter().filter(|t| t.action == TradeAction::Sell).count(),
        unique_tokens: tokens.len(),
        first_trade: ledger.iter().map(|t| t.timestamp).min(),
        last_trade: ledger.iter().map(|t| t.timestamp).max(),
        trading_days: days.len(),
    }
}

/// Mean `amount_usd` per trade, 0 for an empty ledger.
pub fn average_trade_value_usd(ledger: &[TradeRecord]) -> f64 {
    if ledger.is_empty() {
        return 0.0;
    }
    let total: Decimal = ledger.iter().map(|t| t.amount_usd).sum();
    total.to_f64().unwrap_or(0.0) / ledger.len() as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn trade(day: u32, hour: u32, token: &str, action: TradeAction) -> TradeRecord {
        let ts = Utc.with_ymd_and_hms(2024, 7, day, hour, 0, 0).unwrap();
        TradeRecord::new(ts, token, action, dec!(100), dec!(2.5))
    }

    #[test]
    fn test_trade_stats() {
        let ledger = vec![
            trade(1, 9, "WIF", TradeAction::Buy),
            trade(1, 15, "BONK", TradeAction::Buy),
            trade(1, 20, "WIF", TradeAction::Sell),
            trade(4, 10, "BONK", TradeAction::Sell),
        ];
        let stats = trade_stats(&ledger);
        assert_eq!(stats.total_trades, 4);
        assert_eq!(stats.buy_trades, 2);
        assert_eq!(stats.sell_trades, 2);
        assert_eq!(stats.unique_tokens, 2);
        assert_eq!(stats.trading_days, 2);
        assert_eq!(stats.trade_frequency(), 2.0);
        assert_eq!(stats.first_trade, Some(ledger[0].timestamp));
        assert_eq!(stats.last_trade, Some(ledger[3].timestamp));
    }

    #[test]
    fn test_empty_ledger() {
        let stats = trade_stats(&[]);
        assert_eq!(stats, TradeStats::default());
        assert_eq!(stats.trade_frequency(), 0.0);
        assert_eq!(average_trade_value_usd(&[]), 0.0);
    }

    #[test]
    fn test_average_trade_value() {
        let ledger = vec![
            trade(1, 9, "WIF", TradeAction::Buy),
            TradeRecord::new(
                Utc.with_ymd_and_hms(2024, 7, 2, 0, 0, 0).unwrap(),
                "WIF",
                TradeAction::Sell,
                dec!(100),
                dec!(7.5),
            ),
        ];
        assert!((average_trade_value_usd(&ledger) - 500.0).abs() < 1e-9);
    }
}
