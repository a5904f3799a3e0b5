use chrono::{DateTime, Utc};
use dna_core::{TradeAction, TradeRecord};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};

/// Realized PnL of one sell, matched FIFO against earlier buys
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RealizedPnl {
    pub timestamp: DateTime<Utc>,
    pub token_id: String,
    pub token_symbol: String,
    pub realized_pnl: Decimal,
    /// Part of the sell with no open lot to match (realizes nothing)
    pub unmatched_amount: Decimal,
    pub tx_id: String,
}

/// How long one slice of a lot was held before being sold
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HoldRecord {
    pub token_id: String,
    pub token_symbol: String,
    pub hold_hours: f64,
    pub amount: Decimal,
}

/// Net holdings of one token over the ledger
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub token_id: String,
    pub token_symbol: String,
    pub total_bought: Decimal,
    pub total_sold: Decimal,
    pub current_position: Decimal,
    pub avg_buy_price: Decimal,
    pub cost_basis: Decimal,
}

#[derive(Debug, Clone)]
struct Lot {
    remaining: Decimal,
    price: Decimal,
    opened_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
struct LotSlice {
    amount: Decimal,
    price: Decimal,
    opened_at: DateTime<Utc>,
}

/// One sell and the lot slices it closed
struct SellMatch {
    /// Index of the sell in the input ledger
    index: usize,
    slices: Vec<LotSlice>,
    unmatched: Decimal,
}

impl SellMatch {
    fn realized_pnl(&self, sell: &TradeRecord) -> Decimal {
        self.slices
            .iter()
            .map(|s| s.amount * (sell.price - s.price))
            .sum()
    }
}

/// Ledger indices in timestamp order; ties keep ledger order.
fn chronological(ledger: &[TradeRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..ledger.len()).collect();
    order.sort_by_key(|&i| ledger[i].timestamp);
    order
}

/// Walk the ledger in time order, closing the oldest open lots of each
/// token first.
fn match_sells(ledger: &[TradeRecord]) -> Vec<SellMatch> {
    let mut open_lots: HashMap<&str, VecDeque<Lot>> = HashMap::new();
    let mut matches = Vec::new();

    for index in chronological(ledger) {
        let trade = &ledger[index];
        let lots = open_lots.entry(trade.token_id.as_str()).or_default();

        match trade.action {
            TradeAction::Buy => lots.push_back(Lot {
                remaining: trade.amount,
                price: trade.price,
                opened_at: trade.timestamp,
            }),
            TradeAction::Sell => {
                let mut remaining = trade.amount;
                let mut slices = Vec::new();

                while remaining > Decimal::ZERO {
                    let Some(lot) = lots.front_mut() else {
                        break;
                    };
                    let take = lot.remaining.min(remaining);
                    slices.push(LotSlice {
                        amount: take,
                        price: lot.price,
                        opened_at: lot.opened_at,
                    });
                    lot.remaining -= take;
                    remaining -= take;
                    if lot.remaining <= Decimal::ZERO {
                        lots.pop_front();
                    }
                }

                if remaining > Decimal::ZERO {
                    tracing::debug!(
                        token = %trade.token_symbol,
                        unmatched = %remaining,
                        "sell exceeds open lots"
                    );
                }

                matches.push(SellMatch {
                    index,
                    slices,
                    unmatched: remaining.max(Decimal::ZERO),
                });
            }
        }
    }

    matches
}

/// One record per sell, in time order.
pub fn realized_pnl_fifo(ledger: &[TradeRecord]) -> Vec<RealizedPnl> {
    match_sells(ledger)
        .into_iter()
        .map(|m| {
            let sell = &ledger[m.index];
            RealizedPnl {
                timestamp: sell.timestamp,
                token_id: sell.token_id.clone(),
                token_symbol: sell.token_symbol.clone(),
                realized_pnl: m.realized_pnl(sell),
                unmatched_amount: m.unmatched,
                tx_id: sell.tx_id.clone(),
            }
        })
        .collect()
}

/// Copy of the ledger with `realized_pnl` recomputed: FIFO PnL on sells,
/// zero on buys. Ledger order is kept.
pub fn with_fifo_pnl(ledger: &[TradeRecord]) -> Vec<TradeRecord> {
    let mut out: Vec<TradeRecord> = ledger
        .iter()
        .cloned()
        .map(|t| t.with_realized_pnl(Decimal::ZERO))
        .collect();

    for m in match_sells(ledger) {
        out[m.index].realized_pnl = m.realized_pnl(&ledger[m.index]);
    }
    out
}

/// One record per lot slice consumed by a sell.
pub fn hold_times(ledger: &[TradeRecord]) -> Vec<HoldRecord> {
    match_sells(ledger)
        .into_iter()
        .flat_map(|m| {
            let sell = &ledger[m.index];
            m.slices.into_iter().map(move |slice| HoldRecord {
                token_id: sell.token_id.clone(),
                token_symbol: sell.token_symbol.clone(),
                hold_hours: (sell.timestamp - slice.opened_at).num_seconds() as f64 / 3600.0,
                amount: slice.amount,
            })
        })
        .collect()
}

/// Unweighted mean hold time across lot slices, 0 when nothing was sold.
pub fn average_hold_hours(ledger: &[TradeRecord]) -> f64 {
    let holds = hold_times(ledger);
    if holds.is_empty() {
        return 0.0;
    }
    holds.iter().map(|h| h.hold_hours).sum::<f64>() / holds.len() as f64
}

/// Per-token totals in the order tokens first appear.
pub fn positions(ledger: &[TradeRecord]) -> Vec<Position> {
    let mut order: Vec<&str> = Vec::new();
    let mut by_token: HashMap<&str, (Position, Decimal)> = HashMap::new();

    for index in chronological(ledger) {
        let trade = &ledger[index];
        let (position, bought_usd) = by_token.entry(trade.token_id.as_str()).or_insert_with(|| {
            order.push(trade.token_id.as_str());
            (
                Position {
                    token_id: trade.token_id.clone(),
                    token_symbol: trade.token_symbol.clone(),
                    total_bought: Decimal::ZERO,
                    total_sold: Decimal::ZERO,
                    current_position: Decimal::ZERO,
                    avg_buy_price: Decimal::ZERO,
                    cost_basis: Decimal::ZERO,
                },
                Decimal::ZERO,
            )
        });

        match trade.action {
            TradeAction::Buy => {
                position.total_bought += trade.amount;
                *bought_usd += trade.amount_usd;
            }
            TradeAction::Sell => position.total_sold += trade.amount,
        }
    }

    order
        .into_iter()
        .filter_map(|token| by_token.remove(token))
        .map(|(mut position, bought_usd)| {
            position.current_position = position.total_bought - position.total_sold;
            position.avg_buy_price = bought_usd
                .checked_div(position.total_bought)
                .unwrap_or(Decimal::ZERO);
            position.cost_basis = position.total_bought * position.avg_buy_price;
            position
        })
        .collect()
}
