//! Trade Ledger Processing
//!
//! Turns a raw swap ledger into the statistics the analytics components
//! consume: FIFO realized PnL and hold times, activity counts, profit
//! concentration and a daily return series.

pub mod activity;
pub mod concentration;
pub mod fifo;
pub mod returns;

pub use activity::{average_trade_value_usd, trade_stats, TradeStats};
pub use concentration::{token_concentration, TokenConcentration};
pub use fifo::{
    average_hold_hours, hold_times, positions, realized_pnl_fifo, with_fifo_pnl, HoldRecord,
    Position, RealizedPnl,
};
pub use returns::{daily_returns, estimate_initial_capital, MIN_INITIAL_CAPITAL};
