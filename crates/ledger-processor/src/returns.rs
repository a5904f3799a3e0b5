use chrono::NaiveDate;
use dna_core::{ReturnPoint, ReturnSeries, TradeRecord};
use rust_decimal::prelude::*;
use std::collections::BTreeMap;

/// Floor for the estimated starting capital, in USD.
pub const MIN_INITIAL_CAPITAL: f64 = 1000.0;

/// Starting capital guess: half the traded volume, at least `MIN_INITIAL_CAPITAL`.
pub fn estimate_initial_capital(ledger: &[TradeRecord]) -> f64 {
    let volume: Decimal = ledger.iter().map(|t| t.amount_usd).sum();
    (volume.to_f64().unwrap_or(0.0) * 0.5).max(MIN_INITIAL_CAPITAL)
}

/// Daily returns of a capital account that starts at `initial_capital` and
/// accrues each day's realized PnL.
///
/// Days between the first and last trade with no PnL count as flat days.
/// The first day is measured against the initial capital. A day whose
/// opening capital is not positive has no defined return and is skipped.
pub fn daily_returns(ledger: &[TradeRecord], initial_capital: f64) -> ReturnSeries {
    if ledger.is_empty() {
        return ReturnSeries::default();
    }
    if initial_capital.is_nan() || initial_capital <= 0.0 {
        tracing::warn!(initial_capital, "daily returns need positive starting capital");
        return ReturnSeries::default();
    }

    let mut daily_pnl: BTreeMap<NaiveDate, Decimal> = BTreeMap::new();
    for trade in ledger {
        *daily_pnl.entry(trade.timestamp.date_naive()).or_default() += trade.realized_pnl;
    }

    let (first, last) = match (daily_pnl.keys().next(), daily_pnl.keys().next_back()) {
        (Some(first), Some(last)) => (*first, *last),
        _ => return ReturnSeries::default(),
    };

    let mut points = Vec::new();
    let mut capital = initial_capital;
    for day in first.iter_days().take_while(|d| *d <= last) {
        let pnl = daily_pnl
            .get(&day)
            .and_then(|p| p.to_f64())
            .unwrap_or(0.0);
        let next = capital + pnl;
        if capital > 0.0 {
            points.push(ReturnPoint::new(day, next / capital - 1.0));
        }
        capital = next;
    }

    ReturnSeries::from_points_lossy(points)
}
