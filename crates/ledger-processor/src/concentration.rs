use dna_core::{stats, TradeRecord};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// How much of a wallet's profit hangs on a single trade or token
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TokenConcentration {
    /// Largest single realized PnL / sum of positive realized PnL
    pub top_trade_contribution: f64,
    /// Largest profitable token's PnL / sum of profitable tokens' PnL
    pub top_token_contribution: f64,
    /// Herfindahl index over profitable tokens' shares
    pub hhi_index: f64,
    pub profitable_tokens_count: usize,
}

pub fn token_concentration(ledger: &[TradeRecord]) -> TokenConcentration {
    if ledger.is_empty() {
        return TokenConcentration::default();
    }

    let positive_total: Decimal = ledger
        .iter()
        .map(|t| t.realized_pnl)
        .filter(|p| *p > Decimal::ZERO)
        .sum();

    let top_trade_contribution = match ledger.iter().map(|t| t.realized_pnl).max() {
        Some(best) if positive_total > Decimal::ZERO => {
            (best / positive_total).to_f64().unwrap_or(0.0)
        }
        _ => 0.0,
    };

    let mut by_token: HashMap<&str, Decimal> = HashMap::new();
    for trade in ledger {
        *by_token.entry(trade.token_id.as_str()).or_default() += trade.realized_pnl;
    }

    let winners: Vec<Decimal> = by_token.into_values().filter(|p| *p > Decimal::ZERO).collect();
    let winners_total: Decimal = winners.iter().copied().sum();
    if winners.is_empty() || winners_total <= Decimal::ZERO {
        return TokenConcentration {
            top_trade_contribution,
            ..Default::default()
        };
    }

    let shares: Vec<f64> = winners
        .iter()
        .map(|p| (*p / winners_total).to_f64().unwrap_or(0.0))
        .collect();
    let top_token_contribution = shares.iter().copied().fold(0.0, f64::max);

    TokenConcentration {
        top_trade_contribution,
        top_token_contribution,
        hhi_index: stats::herfindahl_index(&shares),
        profitable_tokens_count: winners.len(),
    }
}
