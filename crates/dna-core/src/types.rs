use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use crate::error::DnaError;

/// One calendar day of a return series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ReturnPoint {
    pub date: NaiveDate,
    /// Fractional return (0.01 = +1%)
    pub value: f64,
}

impl ReturnPoint {
    pub fn new(date: NaiveDate, value: f64) -> Self {
        Self { date, value }
    }
}

/// Daily return series, sorted by date with at most one point per day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<ReturnPoint>", into = "Vec<ReturnPoint>")]
pub struct ReturnSeries {
    points: Vec<ReturnPoint>,
}

impl ReturnSeries {
    /// Build a series, sorting by date. Duplicate dates are rejected.
    pub fn new(mut points: Vec<ReturnPoint>) -> Result<Self, DnaError> {
        points.sort_by_key(|p| p.date);
        if let Some(dup) = points.windows(2).find(|w| w[0].date == w[1].date) {
            return Err(DnaError::InvalidInput(format!(
                "duplicate return for {}",
                dup[0].date
            )));
        }
        Ok(Self { points })
    }

    /// Build a series, keeping the last value seen for a repeated date.
    pub fn from_points_lossy(points: impl IntoIterator<Item = ReturnPoint>) -> Self {
        let mut by_date = BTreeMap::new();
        for p in points {
            by_date.insert(p.date, p.value);
        }
        Self {
            points: by_date
                .into_iter()
                .map(|(date, value)| ReturnPoint { date, value })
                .collect(),
        }
    }

    /// Simple daily returns from a dated price history (pct-change).
    ///
    /// The first price only seeds the chain; a zero previous price yields
    /// no point for that day. A repeated date keeps its last price.
    pub fn from_prices(prices: &[(NaiveDate, f64)]) -> Self {
        let sorted: Vec<(NaiveDate, f64)> = prices
            .iter()
            .copied()
            .collect::<BTreeMap<_, _>>()
            .into_iter()
            .collect();

        let points = sorted
            .windows(2)
            .filter_map(|w| {
                let (_, prev) = w[0];
                let (date, price) = w[1];
                if prev != 0.0 {
                    Some(ReturnPoint::new(date, (price - prev) / prev))
                } else {
                    None
                }
            })
            .collect();
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[ReturnPoint] {
        &self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReturnPoint> {
        self.points.iter()
    }

    pub fn values(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.value).collect()
    }

    /// Values with NaN / infinite entries removed.
    pub fn finite_values(&self) -> Vec<f64> {
        self.points
            .iter()
            .map(|p| p.value)
            .filter(|v| v.is_finite())
            .collect()
    }

    pub fn get(&self, date: NaiveDate) -> Option<f64> {
        self.points
            .binary_search_by_key(&date, |p| p.date)
            .ok()
            .map(|i| self.points[i].value)
    }

    pub fn first_date(&self) -> Option<NaiveDate> {
        self.points.first().map(|p| p.date)
    }

    pub fn last_date(&self) -> Option<NaiveDate> {
        self.points.last().map(|p| p.date)
    }
}

impl TryFrom<Vec<ReturnPoint>> for ReturnSeries {
    type Error = DnaError;

    fn try_from(points: Vec<ReturnPoint>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<ReturnSeries> for Vec<ReturnPoint> {
    fn from(series: ReturnSeries) -> Self {
        series.points
    }
}

/// Side of a ledger entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeAction {
    Buy,
    Sell,
}

impl TradeAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            TradeAction::Buy => "buy",
            TradeAction::Sell => "sell",
        }
    }
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TradeAction {
    type Err = DnaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "buy" => Ok(TradeAction::Buy),
            "sell" => Ok(TradeAction::Sell),
            other => Err(DnaError::InvalidInput(format!("unknown trade action '{}'", other))),
        }
    }
}

/// A single on-chain swap as delivered by the data-fetching collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeRecord {
    pub timestamp: DateTime<Utc>,
    pub token_id: String,
    pub token_symbol: String,
    pub action: TradeAction,
    pub amount: Decimal,
    pub price: Decimal,
    pub amount_usd: Decimal,
    #[serde(default)]
    pub realized_pnl: Decimal,
    #[serde(default)]
    pub tx_id: String,
}

impl TradeRecord {
    /// New record with `amount_usd = amount * price` and no realized PnL.
    pub fn new(
        timestamp: DateTime<Utc>,
        token_symbol: &str,
        action: TradeAction,
        amount: Decimal,
        price: Decimal,
    ) -> Self {
        Self {
            timestamp,
            token_id: token_symbol.to_string(),
            token_symbol: token_symbol.to_string(),
            action,
            amount,
            price,
            amount_usd: amount * price,
            realized_pnl: Decimal::ZERO,
            tx_id: String::new(),
        }
    }

    pub fn with_realized_pnl(mut self, pnl: Decimal) -> Self {
        self.realized_pnl = pnl;
        self
    }

    pub fn with_token_id(mut self, token_id: &str) -> Self {
        self.token_id = token_id.to_string();
        self
    }

    pub fn with_tx_id(mut self, tx_id: &str) -> Self {
        self.tx_id = tx_id.to_string();
        self
    }

    pub fn pnl_f64(&self) -> f64 {
        self.realized_pnl.to_f64().unwrap_or(0.0)
    }

    pub fn amount_usd_f64(&self) -> f64 {
        self.amount_usd.to_f64().unwrap_or(0.0)
    }
}

/// Flatten a result struct into a metric-name -> value mapping.
pub fn metric_map<T: Serialize>(value: &T) -> BTreeMap<String, serde_json::Value> {
    match serde_json::to_value(value) {
        Ok(serde_json::Value::Object(fields)) => fields.into_iter().collect(),
        _ => BTreeMap::new(),
    }
}
