//! Time-Decay Analysis
//!
//! Splits a trade ledger into trailing windows and flags wallets whose
//! recent performance has fallen behind their history.

pub mod analyzer;
pub mod interpretation;

pub use analyzer::{DecayMetrics, TimeDecayAnalyzer, TimeWindow, TimeWindowResult, WindowStats};
pub use interpretation::{
    interpret_time_decay, ActivityTrend, AlertLevel, DecayInterpretation, DecaySummary,
    WinRateTrend,
};
