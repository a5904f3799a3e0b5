//! Risk-adjusted performance metrics for a single daily return series.

pub mod calculator;
pub mod interpretation;

pub use calculator::{RiskMetrics, RiskMetricsCalculator, PROFIT_FACTOR_CAP};
pub use interpretation::{interpret_risk_metrics, RatingBand, RiskInterpretation, RiskProfile};
