use dna_core::{metric_map, stats, EngineConfig, ReturnSeries};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Profit factor reported when there are winning periods but no losing ones.
pub const PROFIT_FACTOR_CAP: f64 = 99.99;

/// Drawdowns smaller than this leave the Calmar ratio at 0.
const MIN_CALMAR_DRAWDOWN: f64 = 1e-4;

/// Deviations below this are treated as zero volatility.
const MIN_DEVIATION: f64 = 1e-12;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RiskMetrics {
    pub sharpe_ratio: f64,
    pub sortino_ratio: f64,
    /// Deepest peak-to-trough decline of the wealth curve, always <= 0
    pub max_drawdown: f64,
    pub calmar_ratio: f64,
    pub annual_return: f64,
    pub annual_volatility: f64,
    /// Fraction of periods with a positive return
    pub win_rate: f64,
    /// mean(winning return) / |mean(losing return)|; PROFIT_FACTOR_CAP when
    /// there are wins but no losses
    pub profit_factor: f64,
    /// Mean period return
    pub expected_value: f64,
    pub max_win_streak: u32,
    pub max_loss_streak: u32,
    /// Finite periods the metrics were computed from
    pub observations: usize,
}

impl RiskMetrics {
    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        metric_map(self)
    }
}

pub struct RiskMetricsCalculator;

impl RiskMetricsCalculator {
    /// Metrics for a return series. Non-finite entries are dropped first;
    /// fewer than two remaining periods yields all zeros.
    pub fn compute(series: &ReturnSeries, config: &EngineConfig) -> RiskMetrics {
        let returns = series.finite_values();
        let dropped = series.len() - returns.len();
        if dropped > 0 {
            tracing::warn!("dropped {} non-finite returns before risk calculation", dropped);
        }
        Self::compute_returns(&returns, config)
    }

    /// Metrics for plain period returns (assumed finite).
    pub fn compute_returns(returns: &[f64], config: &EngineConfig) -> RiskMetrics {
        if returns.len() < 2 {
            tracing::debug!("risk metrics skipped: {} observations", returns.len());
            return RiskMetrics::default();
        }

        let periods = config.periods_per_year as f64;
        let rf_period = config.period_risk_free_rate();
        let n = returns.len();

        let total_return = stats::compound_return(returns);
        let annual_return = annualize(total_return, periods, n);
        let annual_volatility = stats::std_dev(returns) * periods.sqrt();

        let excess: Vec<f64> = returns.iter().map(|r| r - rf_period).collect();
        let annual_excess = stats::mean(&excess) * periods;

        let sharpe_ratio = if annual_volatility > MIN_DEVIATION {
            annual_excess / annual_volatility
        } else {
            0.0
        };

        let downside: Vec<f64> = returns.iter().copied().filter(|r| *r < rf_period).collect();
        let downside_volatility = stats::std_dev(&downside) * periods.sqrt();
        let sortino_ratio = if !downside.is_empty() && downside_volatility > MIN_DEVIATION {
            annual_excess / downside_volatility
        } else {
            0.0
        };

        let max_drawdown = max_drawdown(returns);
        let calmar_ratio = if max_drawdown.abs() > MIN_CALMAR_DRAWDOWN {
            annual_return / max_drawdown.abs()
        } else {
            0.0
        };

        let (max_win_streak, max_loss_streak) = streaks(returns);

        RiskMetrics {
            sharpe_ratio,
            sortino_ratio,
            max_drawdown,
            calmar_ratio,
            annual_return,
            annual_volatility,
            win_rate: returns.iter().filter(|r| **r > 0.0).count() as f64 / n as f64,
            profit_factor: profit_factor(returns),
            expected_value: stats::mean(returns),
            max_win_streak,
            max_loss_streak,
            observations: n,
        }
    }
}

/// (1 + total)^(periods / n) - 1; a wiped-out account annualizes to -100%.
fn annualize(total_return: f64, periods: f64, n: usize) -> f64 {
    let growth = 1.0 + total_return;
    if growth <= 0.0 {
        return -1.0;
    }
    growth.powf(periods / n as f64) - 1.0
}

/// Minimum of wealth / running_max - 1, with the running max seeded by the
/// first period's wealth.
fn max_drawdown(returns: &[f64]) -> f64 {
    let curve = stats::wealth_curve(returns);
    let mut peak = match curve.first() {
        Some(first) => *first,
        None => return 0.0,
    };
    let mut max_dd = 0.0_f64;

    for &wealth in &curve {
        if wealth > peak {
            peak = wealth;
        }
        let dd = if peak > 0.0 { wealth / peak - 1.0 } else { -1.0 };
        if dd < max_dd {
            max_dd = dd;
        }
    }
    max_dd
}

/// Mean-based profit factor: average win over average loss magnitude.
fn profit_factor(returns: &[f64]) -> f64 {
    let wins: Vec<f64> = returns.iter().copied().filter(|r| *r > 0.0).collect();
    let losses: Vec<f64> = returns.iter().copied().filter(|r| *r < 0.0).collect();

    match (wins.is_empty(), losses.is_empty()) {
        (true, _) => 0.0,
        (false, true) => PROFIT_FACTOR_CAP,
        (false, false) => stats::mean(&wins) / stats::mean(&losses).abs(),
    }
}

/// Longest runs of positive and negative periods; zero returns end both.
fn streaks(returns: &[f64]) -> (u32, u32) {
    let mut max_win = 0u32;
    let mut max_loss = 0u32;
    let mut current_win = 0u32;
    let mut current_loss = 0u32;

    for &r in returns {
        if r > 0.0 {
            current_win += 1;
            current_loss = 0;
            max_win = max_win.max(current_win);
        } else if r < 0.0 {
            current_loss += 1;
            current_win = 0;
            max_loss = max_loss.max(current_loss);
        } else {
            current_win = 0;
            current_loss = 0;
        }
    }

    (max_win, max_loss)
}
