use chrono::{DateTime, Duration, Utc};
use dna_core::{metric_map, EngineConfig, TradeRecord};
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Trailing windows a ledger is evaluated over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TimeWindow {
    #[serde(rename = "all_time")]
    AllTime,
    #[serde(rename = "90d")]
    Days90,
    #[serde(rename = "30d")]
    Days30,
    #[serde(rename = "7d")]
    Days7,
}

impl TimeWindow {
    pub const ALL: [TimeWindow; 4] = [
        TimeWindow::AllTime,
        TimeWindow::Days90,
        TimeWindow::Days30,
        TimeWindow::Days7,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            TimeWindow::AllTime => "all_time",
            TimeWindow::Days90 => "90d",
            TimeWindow::Days30 => "30d",
            TimeWindow::Days7 => "7d",
        }
    }

    /// Length of the window, `None` for all-time.
    pub fn lookback(&self) -> Option<Duration> {
        match self {
            TimeWindow::AllTime => None,
            TimeWindow::Days90 => Some(Duration::days(90)),
            TimeWindow::Days30 => Some(Duration::days(30)),
            TimeWindow::Days7 => Some(Duration::days(7)),
        }
    }

    /// Whether a trade at `timestamp` falls inside this window ending at `now`.
    pub fn contains(&self, timestamp: DateTime<Utc>, now: DateTime<Utc>) -> bool {
        match self.lookback() {
            None => true,
            Some(lookback) => timestamp >= now - lookback,
        }
    }
}

/// Realized performance over one window
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WindowStats {
    pub pnl: f64,
    pub win_rate: f64,
    pub trade_count: usize,
    pub avg_pnl_per_trade: f64,
}

impl WindowStats {
    pub fn from_trades<'a>(trades: impl IntoIterator<Item = &'a TradeRecord>) -> Self {
        let mut pnl = Decimal::ZERO;
        let mut wins = 0usize;
        let mut count = 0usize;

        for trade in trades {
            pnl += trade.realized_pnl;
            if trade.realized_pnl > Decimal::ZERO {
                wins += 1;
            }
            count += 1;
        }

        if count == 0 {
            return Self::default();
        }

        let pnl = pnl.to_f64().unwrap_or(0.0);
        Self {
            pnl,
            win_rate: wins as f64 / count as f64,
            trade_count: count,
            avg_pnl_per_trade: pnl / count as f64,
        }
    }
}

/// Recent-vs-history comparison derived from the window stats
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DecayMetrics {
    /// all_time.win_rate - 30d.win_rate (0 when there is no all-time win rate)
    pub win_rate_decay_30d: f64,
    pub win_rate_decay_7d: f64,
    pub severe_decay_alert: bool,
    pub recent_losing: bool,
    pub recent_30d_pnl: f64,
    /// 30d trade count relative to the all-time pace
    pub activity_ratio: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeWindowResult {
    pub all_time: WindowStats,
    #[serde(rename = "90d")]
    pub d90: WindowStats,
    #[serde(rename = "30d")]
    pub d30: WindowStats,
    #[serde(rename = "7d")]
    pub d7: WindowStats,
    pub decay_metrics: DecayMetrics,
}

impl TimeWindowResult {
    pub fn window(&self, window: TimeWindow) -> &WindowStats {
        match window {
            TimeWindow::AllTime => &self.all_time,
            TimeWindow::Days90 => &self.d90,
            TimeWindow::Days30 => &self.d30,
            TimeWindow::Days7 => &self.d7,
        }
    }

    pub fn to_map(&self) -> BTreeMap<String, serde_json::Value> {
        metric_map(self)
    }
}

pub struct TimeDecayAnalyzer;

impl TimeDecayAnalyzer {
    /// Window the ledger relative to `now`. Every window is filtered from
    /// the full ledger independently.
    pub fn analyze(trades: &[TradeRecord], now: DateTime<Utc>, config: &EngineConfig) -> TimeWindowResult {
        if trades.is_empty() {
            tracing::debug!("time decay skipped: empty ledger");
            return TimeWindowResult::default();
        }

        let stats_for = |window: TimeWindow| {
            WindowStats::from_trades(trades.iter().filter(|t| window.contains(t.timestamp, now)))
        };

        let all_time = stats_for(TimeWindow::AllTime);
        let d90 = stats_for(TimeWindow::Days90);
        let d30 = stats_for(TimeWindow::Days30);
        let d7 = stats_for(TimeWindow::Days7);
        let decay_metrics = Self::decay_metrics(&all_time, &d30, &d7, config);

        tracing::debug!(
            trades = all_time.trade_count,
            recent_trades = d30.trade_count,
            severe = decay_metrics.severe_decay_alert,
            "time decay computed"
        );

        TimeWindowResult {
            all_time,
            d90,
            d30,
            d7,
            decay_metrics,
        }
    }

    pub fn decay_metrics(
        all_time: &WindowStats,
        d30: &WindowStats,
        d7: &WindowStats,
        config: &EngineConfig,
    ) -> DecayMetrics {
        let has_history = all_time.win_rate > 0.0;

        let (win_rate_decay_30d, win_rate_decay_7d) = if has_history {
            (all_time.win_rate - d30.win_rate, all_time.win_rate - d7.win_rate)
        } else {
            (0.0, 0.0)
        };

        let severe_decay_alert =
            has_history && d30.win_rate < all_time.win_rate * config.decay.severe_decay_ratio;

        let activity_ratio = if all_time.trade_count > 0 {
            let expected_30d = all_time.trade_count as f64 * 30.0 / config.decay.days_per_year;
            d30.trade_count as f64 / expected_30d
        } else {
            0.0
        };

        DecayMetrics {
            win_rate_decay_30d,
            win_rate_decay_7d,
            severe_decay_alert,
            recent_losing: d30.pnl < 0.0,
            recent_30d_pnl: d30.pnl,
            activity_ratio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use dna_core::TradeAction;
    use rust_decimal_macros::dec;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 30, 12, 0, 0).unwrap()
    }

    fn trade(days_ago: i64, pnl: Decimal) -> TradeRecord {
        TradeRecord::new(
            now() - Duration::days(days_ago),
            "WIF",
            TradeAction::Sell,
            dec!(100),
            dec!(2),
        )
        .with_realized_pnl(pnl)
    }

    /// `wins` winners followed by losers, `count` trades in total, all `days_ago`.
    fn batch(days_ago: i64, count: usize, wins: usize) -> Vec<TradeRecord> {
        (0..count)
            .map(|i| trade(days_ago, if i < wins { dec!(50) } else { dec!(-20) }))
            .collect()
    }

    #[test]
    fn test_empty_ledger_is_zero_filled() {
        let result = TimeDecayAnalyzer::analyze(&[], now(), &EngineConfig::default());
        assert_eq!(result, TimeWindowResult::default());
        assert!(!result.decay_metrics.severe_decay_alert);
        assert_eq!(result.decay_metrics.activity_ratio, 0.0);
    }

    #[test]
    fn test_windows_filter_independently() {
        let trades = vec![
            trade(200, dec!(100)),
            trade(60, dec!(-40)),
            trade(20, dec!(30)),
            trade(3, dec!(-10)),
        ];
        let result = TimeDecayAnalyzer::analyze(&trades, now(), &EngineConfig::default());

        assert_eq!(result.all_time.trade_count, 4);
        assert_eq!(result.d90.trade_count, 3);
        assert_eq!(result.d30.trade_count, 2);
        assert_eq!(result.d7.trade_count, 1);

        assert!((result.all_time.pnl - 80.0).abs() < 1e-9);
        assert!((result.all_time.avg_pnl_per_trade - 20.0).abs() < 1e-9);
        assert!((result.d30.pnl - 20.0).abs() < 1e-9);
        assert_eq!(result.d30.win_rate, 0.5);
        assert_eq!(result.d7.win_rate, 0.0);
        assert!(result.window(TimeWindow::Days7).pnl < 0.0);
    }

    #[test]
    fn test_window_boundary_is_inclusive() {
        let trades = vec![trade(30, dec!(10))];
        let result = TimeDecayAnalyzer::analyze(&trades, now(), &EngineConfig::default());
        assert_eq!(result.d30.trade_count, 1);
        assert_eq!(result.d7.trade_count, 0);
    }

    #[test]
    fn test_severe_decay_alert() {
        // history: 9 of 10 win; last 30 days: 3 of 10 win
        // all-time 12/20 = 0.6, 30d 0.3 < 0.42
        let mut trades = batch(120, 10, 9);
        trades.extend(batch(10, 10, 3));
        let result = TimeDecayAnalyzer::analyze(&trades, now(), &EngineConfig::default());
        assert!((result.all_time.win_rate - 0.6).abs() < 1e-12);
        assert!((result.d30.win_rate - 0.3).abs() < 1e-12);
        assert!(result.decay_metrics.severe_decay_alert);
        assert!((result.decay_metrics.win_rate_decay_30d - 0.3).abs() < 1e-12);
    }

    #[test]
    fn test_mild_decay_is_not_severe() {
        // all-time 0.6, 30d 0.5 >= 0.42
        let mut trades = batch(120, 10, 7);
        trades.extend(batch(10, 10, 5));
        let result = TimeDecayAnalyzer::analyze(&trades, now(), &EngineConfig::default());
        assert!((result.all_time.win_rate - 0.6).abs() < 1e-12);
        assert!((result.d30.win_rate - 0.5).abs() < 1e-12);
        assert!(!result.decay_metrics.severe_decay_alert);
    }

    #[test]
    fn test_no_winning_history_disables_decay() {
        let trades = batch(5, 4, 0);
        let result = TimeDecayAnalyzer::analyze(&trades, now(), &EngineConfig::default());
        assert_eq!(result.decay_metrics.win_rate_decay_30d, 0.0);
        assert_eq!(result.decay_metrics.win_rate_decay_7d, 0.0);
        assert!(!result.decay_metrics.severe_decay_alert);
        assert!(result.decay_metrics.recent_losing);
        assert!((result.decay_metrics.recent_30d_pnl + 80.0).abs() < 1e-9);
    }

    #[test]
    fn test_activity_ratio() {
        // 73 trades all-time -> 6 expected per 30 days; 3 recent
        let mut trades = batch(200, 70, 35);
        trades.extend(batch(2, 3, 1));
        let result = TimeDecayAnalyzer::analyze(&trades, now(), &EngineConfig::default());
        let expected = 3.0 / (73.0 * 30.0 / 365.0);
        assert!((result.decay_metrics.activity_ratio - expected).abs() < 1e-12);
    }

    #[test]
    fn test_map_uses_window_keys() {
        let map = TimeWindowResult::default().to_map();
        for key in ["all_time", "90d", "30d", "7d", "decay_metrics"] {
            assert!(map.contains_key(key), "missing {}", key);
        }
        assert_eq!(TimeWindow::Days30.key(), "30d");
    }
}
