use chrono::NaiveDate;
use dna_core::{metric_map, stats, EngineConfig, ReturnSeries};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Below this total return magnitude the percentage split is reported as 0.
pub const MIN_ATTRIBUTABLE_RETURN: f64 = 1e-4;

/// Benchmark excess-return variance at or below this is rounding noise on a
/// flat benchmark and leaves beta at 0.
pub const MIN_BENCHMARK_VARIANCE: f64 = 1e-20;

/// Skill vs. market split of a wallet's return over the aligned window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttributionResult {
    /// CAPM slope against the benchmark
    pub beta: f64,
    /// Annualized CAPM intercept
    pub alpha: f64,
    /// total_return - beta_contribution
    pub alpha_contribution: f64,
    /// beta * benchmark_return
    pub beta_contribution: f64,
    /// Compounded wallet return over the aligned window
    pub total_return: f64,
    /// Compounded benchmark return over the aligned window
    pub benchmark_return: f64,
    pub alpha_pct: f64,
    pub beta_pct: f64,
    /// Number of dates present in both series
    pub observations: usize,
}

impl AttributionResult {
    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        metric_map(self)
    }
}

/// Wallet and benchmark returns restricted to their shared dates
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AlignedReturns {
    pub dates: Vec<NaiveDate>,
    pub wallet: Vec<f64>,
    pub benchmark: Vec<f64>,
}

impl AlignedReturns {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }
}

/// Inner-join two series on date. Dates missing (or non-finite) on either
/// side are dropped.
pub fn align_returns(wallet: &ReturnSeries, benchmark: &ReturnSeries) -> AlignedReturns {
    let mut aligned = AlignedReturns::default();
    let (w, b) = (wallet.points(), benchmark.points());
    let (mut i, mut j) = (0, 0);

    while i < w.len() && j < b.len() {
        match w[i].date.cmp(&b[j].date) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                if w[i].value.is_finite() && b[j].value.is_finite() {
                    aligned.dates.push(w[i].date);
                    aligned.wallet.push(w[i].value);
                    aligned.benchmark.push(b[j].value);
                }
                i += 1;
                j += 1;
            }
        }
    }

    aligned
}

pub struct AttributionCalculator;

impl AttributionCalculator {
    /// CAPM attribution of `wallet` against `benchmark`.
    ///
    /// Empty input or fewer than two shared dates yields a zero-filled result.
    pub fn compute(
        wallet: &ReturnSeries,
        benchmark: &ReturnSeries,
        config: &EngineConfig,
    ) -> AttributionResult {
        if wallet.is_empty() || benchmark.is_empty() {
            tracing::debug!("attribution skipped: empty wallet or benchmark series");
            return AttributionResult::default();
        }

        let aligned = align_returns(wallet, benchmark);
        if aligned.len() < 2 {
            tracing::debug!(
                "attribution skipped: {} aligned observations",
                aligned.len()
            );
            return AttributionResult::default();
        }

        Self::compute_aligned(&aligned, config)
    }

    /// Attribution over already-aligned returns (at least two observations).
    pub fn compute_aligned(aligned: &AlignedReturns, config: &EngineConfig) -> AttributionResult {
        let (beta, alpha) = capm_beta_alpha(
            &aligned.wallet,
            &aligned.benchmark,
            config.period_risk_free_rate(),
            config.periods_per_year as f64,
        );

        let total_return = stats::compound_return(&aligned.wallet);
        let benchmark_return = stats::compound_return(&aligned.benchmark);

        let beta_contribution = beta * benchmark_return;
        let alpha_contribution = total_return - beta_contribution;

        let (alpha_pct, beta_pct) = if total_return.abs() > MIN_ATTRIBUTABLE_RETURN {
            (
                alpha_contribution / total_return * 100.0,
                beta_contribution / total_return * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        tracing::debug!(
            observations = aligned.len(),
            beta,
            alpha,
            total_return,
            "attribution computed"
        );

        AttributionResult {
            beta,
            alpha,
            alpha_contribution,
            beta_contribution,
            total_return,
            benchmark_return,
            alpha_pct,
            beta_pct,
            observations: aligned.len(),
        }
    }
}

/// (beta, annualized alpha) from excess returns over `rf_period`.
fn capm_beta_alpha(wallet: &[f64], benchmark: &[f64], rf_period: f64, periods: f64) -> (f64, f64) {
    let wallet_excess: Vec<f64> = wallet.iter().map(|r| r - rf_period).collect();
    let bench_excess: Vec<f64> = benchmark.iter().map(|r| r - rf_period).collect();

    let bench_var = stats::variance(&bench_excess);
    let beta = if bench_var > MIN_BENCHMARK_VARIANCE {
        stats::covariance(&wallet_excess, &bench_excess) / bench_var
    } else {
        0.0
    };

    let alpha = (stats::mean(&wallet_excess) - beta * stats::mean(&bench_excess)) * periods;
    (beta, alpha)
}
