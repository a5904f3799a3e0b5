use alpha_beta::{interpret_attribution, AttributionCalculator, AttributionInterpretation, AttributionResult};
use behavior_tags::{categorize_tags, classify, tag_summary, BehaviorTag, TagCategories, TagInputs};
use chrono::{DateTime, Utc};
use dna_core::{EngineConfig, Locale, ReturnSeries, TradeRecord};
use ledger_processor::{TokenConcentration, TradeStats};
use risk_metrics::{interpret_risk_metrics, RiskInterpretation, RiskMetrics, RiskMetricsCalculator};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use time_decay::{interpret_time_decay, DecayInterpretation, TimeDecayAnalyzer, TimeWindowResult};

use crate::input::WalletInput;

/// Ledger statistics fed to the classifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub stats: TradeStats,
    pub trade_frequency: f64,
    pub average_hold_hours: f64,
    pub concentration: TokenConcentration,
    pub average_trade_value_usd: f64,
    pub total_realized_pnl: f64,
    /// Starting capital behind ledger-derived returns, if they were derived
    pub initial_capital: Option<f64>,
}

impl LedgerSummary {
    pub fn from_ledger(ledger: &[TradeRecord]) -> Self {
        let stats = ledger_processor::trade_stats(ledger);
        let total: Decimal = ledger.iter().map(|t| t.realized_pnl).sum();

        Self {
            trade_frequency: stats.trade_frequency(),
            stats,
            average_hold_hours: ledger_processor::average_hold_hours(ledger),
            concentration: ledger_processor::token_concentration(ledger),
            average_trade_value_usd: ledger_processor::average_trade_value_usd(ledger),
            total_realized_pnl: total.to_f64().unwrap_or(0.0),
            initial_capital: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DnaReport {
    pub wallet_address: String,
    pub generated_at: DateTime<Utc>,
    pub locale: Locale,
    pub attribution: AttributionResult,
    pub attribution_interpretation: AttributionInterpretation,
    pub risk: RiskMetrics,
    pub risk_interpretation: RiskInterpretation,
    pub time_decay: TimeWindowResult,
    pub decay_interpretation: DecayInterpretation,
    pub ledger: LedgerSummary,
    pub tag_inputs: TagInputs,
    pub tags: Vec<BehaviorTag>,
    pub tag_summary: String,
    pub tag_categories: TagCategories,
}

/// Merge component outputs into the classifier's input.
pub fn build_tag_inputs(
    ledger: &LedgerSummary,
    attribution: &AttributionResult,
    risk: &RiskMetrics,
    decay: &TimeWindowResult,
    avg_minutes_before_pump: Option<f64>,
) -> TagInputs {
    TagInputs {
        avg_hold_hours: ledger.average_hold_hours,
        top_trade_contribution: ledger.concentration.top_trade_contribution,
        top_token_contribution: ledger.concentration.top_token_contribution,
        avg_minutes_before_pump,
        trade_frequency: ledger.trade_frequency,
        win_rate: risk.win_rate,
        profit_factor: risk.profit_factor,
        sharpe_ratio: risk.sharpe_ratio,
        max_drawdown: risk.max_drawdown,
        alpha_pct: attribution.alpha_pct,
        decay_alert: decay.decay_metrics.severe_decay_alert,
        recent_activity: decay.d30.trade_count > 0,
        total_trades: ledger.stats.total_trades,
        average_trade_value_usd: ledger.average_trade_value_usd,
    }
}

/// Full DNA report for one wallet as of `now`.
///
/// Never fails: every component degrades to its zero result on thin data.
pub fn analyze_wallet(input: &WalletInput, config: &EngineConfig, now: DateTime<Utc>) -> DnaReport {
    let locale = config.locale;
    tracing::info!(
        wallet = %input.wallet_address,
        trades = input.trades.len(),
        "analyzing wallet"
    );

    let trades: Cow<'_, [TradeRecord]> = if input.recompute_pnl {
        Cow::Owned(ledger_processor::with_fifo_pnl(&input.trades))
    } else {
        Cow::Borrowed(input.trades.as_slice())
    };

    let mut ledger = LedgerSummary::from_ledger(&trades);

    let wallet_returns = if input.wallet_returns.is_empty() {
        let capital = input
            .initial_capital
            .unwrap_or_else(|| ledger_processor::estimate_initial_capital(&trades));
        ledger.initial_capital = Some(capital);
        tracing::debug!(initial_capital = capital, "deriving wallet returns from ledger");
        ledger_processor::daily_returns(&trades, capital)
    } else {
        input.wallet_returns.clone()
    };
    let benchmark_returns: ReturnSeries = input.benchmark_series();

    let attribution = AttributionCalculator::compute(&wallet_returns, &benchmark_returns, config);
    let risk = RiskMetricsCalculator::compute(&wallet_returns, config);
    let time_decay = TimeDecayAnalyzer::analyze(&trades, now, config);

    let tag_inputs = build_tag_inputs(
        &ledger,
        &attribution,
        &risk,
        &time_decay,
        input.avg_minutes_before_pump,
    );
    let tags = classify(&tag_inputs, &config.tags, locale);

    tracing::info!(
        wallet = %input.wallet_address,
        alpha_pct = attribution.alpha_pct,
        sharpe = risk.sharpe_ratio,
        tags = tags.len(),
        "wallet analyzed"
    );

    DnaReport {
        wallet_address: input.wallet_address.clone(),
        generated_at: now,
        locale,
        attribution_interpretation: interpret_attribution(&attribution, locale),
        attribution,
        risk_interpretation: interpret_risk_metrics(&risk, locale),
        risk,
        decay_interpretation: interpret_time_decay(&time_decay, locale),
        time_decay,
        ledger,
        tag_inputs,
        tag_summary: tag_summary(&tags, locale),
        tag_categories: categorize_tags(&tags),
        tags,
    }
}
