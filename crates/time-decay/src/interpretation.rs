use dna_core::{format_usd, Locale};
use serde::{Deserialize, Serialize};

use crate::analyzer::TimeWindowResult;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    High,
    Medium,
    Low,
}

impl AlertLevel {
    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            AlertLevel::High => locale.pick(
                "⚠️ Warning: recent performance has dropped significantly",
                "⚠️ 警告：该钱包近期表现显著下滑",
            ),
            AlertLevel::Medium => locale.pick(
                "⚠️ Caution: this wallet is losing money over the last 30 days",
                "⚠️ 注意：该钱包近 30 天处于亏损状态",
            ),
            AlertLevel::Low => locale.pick(
                "✅ Stable: recent performance matches history",
                "✅ 表现稳定：近期与历史表现一致",
            ),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WinRateTrend {
    SharpDecline,
    Decline,
    Improving,
    Stable,
}

impl WinRateTrend {
    pub fn from_decay(decay: f64) -> Self {
        match decay {
            d if d > 0.2 => WinRateTrend::SharpDecline,
            d if d > 0.1 => WinRateTrend::Decline,
            d if d < -0.1 => WinRateTrend::Improving,
            _ => WinRateTrend::Stable,
        }
    }

    /// Trend text carrying the decay magnitude as a whole percentage.
    pub fn text(&self, decay: f64, locale: Locale) -> String {
        let pct = (decay.abs() * 100.0).round();
        match (self, locale) {
            (WinRateTrend::SharpDecline, Locale::English) => {
                format!("Win rate dropped sharply by {:.0}%", pct)
            }
            (WinRateTrend::SharpDecline, Locale::Chinese) => format!("胜率大幅下降 {:.0}%", pct),
            (WinRateTrend::Decline, Locale::English) => format!("Win rate declined by {:.0}%", pct),
            (WinRateTrend::Decline, Locale::Chinese) => format!("胜率有所下降 {:.0}%", pct),
            (WinRateTrend::Improving, Locale::English) => format!("Win rate up {:.0}%", pct),
            (WinRateTrend::Improving, Locale::Chinese) => format!("胜率上升 {:.0}%", pct),
            (WinRateTrend::Stable, _) => locale.pick("Win rate stable", "胜率稳定").to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActivityTrend {
    Inactive,
    Slowing,
    Increasing,
    Normal,
}

impl ActivityTrend {
    pub fn from_ratio(ratio: f64) -> Self {
        match ratio {
            r if r < 0.3 => ActivityTrend::Inactive,
            r if r < 0.7 => ActivityTrend::Slowing,
            r if r > 1.5 => ActivityTrend::Increasing,
            _ => ActivityTrend::Normal,
        }
    }

    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            ActivityTrend::Inactive => locale.pick(
                "Trading frequency collapsed, wallet may be inactive",
                "交易频率大幅降低，可能已不活跃",
            ),
            ActivityTrend::Slowing => locale.pick("Trading frequency has slowed", "交易频率有所下降"),
            ActivityTrend::Increasing => locale.pick("Trading frequency is rising", "交易频率上升"),
            ActivityTrend::Normal => locale.pick("Trading frequency normal", "交易频率正常"),
        }
    }
}

/// All-time vs. 30-day PnL comparison
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DecaySummary {
    EarlyGainsRecentLosses,
    StillProfitable,
    NetLosing,
    InsufficientData,
}

impl DecaySummary {
    pub fn classify(all_time_pnl: f64, recent_pnl: f64) -> Self {
        if all_time_pnl > 0.0 && recent_pnl < 0.0 {
            DecaySummary::EarlyGainsRecentLosses
        } else if all_time_pnl > 0.0 && recent_pnl > 0.0 {
            DecaySummary::StillProfitable
        } else if all_time_pnl < 0.0 {
            DecaySummary::NetLosing
        } else {
            DecaySummary::InsufficientData
        }
    }

    pub fn text(&self, recent_pnl: f64, locale: Locale) -> String {
        let amount = format_usd(recent_pnl.abs());
        match (self, locale) {
            (DecaySummary::EarlyGainsRecentLosses, Locale::English) => format!(
                "Gains came mostly early; recent performance is weak. Lost ${} in the last 30 days",
                amount
            ),
            (DecaySummary::EarlyGainsRecentLosses, Locale::Chinese) => {
                format!("历史收益主要来自早期，近期表现不佳。近 30 天亏损 ${}", amount)
            }
            (DecaySummary::StillProfitable, Locale::English) => {
                format!("Still profitable. Made ${} in the last 30 days", amount)
            }
            (DecaySummary::StillProfitable, Locale::Chinese) => {
                format!("持续盈利中。近 30 天盈利 ${}", amount)
            }
            (DecaySummary::NetLosing, _) => locale
                .pick(
                    "Net losing history, not recommended for copy trading",
                    "历史总体亏损，不建议跟单",
                )
                .to_string(),
            (DecaySummary::InsufficientData, _) => locale
                .pick("Not enough data to judge", "数据不足，无法做出判断")
                .to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DecayInterpretation {
    pub alert_level: AlertLevel,
    pub main_alert: String,
    pub win_rate_trend: WinRateTrend,
    pub win_rate_trend_text: String,
    pub activity_trend: ActivityTrend,
    pub activity_text: String,
    pub summary: DecaySummary,
    pub summary_text: String,
}

pub fn interpret_time_decay(result: &TimeWindowResult, locale: Locale) -> DecayInterpretation {
    let decay = &result.decay_metrics;

    let alert_level = if decay.severe_decay_alert {
        AlertLevel::High
    } else if decay.recent_losing {
        AlertLevel::Medium
    } else {
        AlertLevel::Low
    };

    let win_rate_trend = WinRateTrend::from_decay(decay.win_rate_decay_30d);
    let activity_trend = ActivityTrend::from_ratio(decay.activity_ratio);
    let summary = DecaySummary::classify(result.all_time.pnl, result.d30.pnl);

    DecayInterpretation {
        alert_level,
        main_alert: alert_level.text(locale).to_string(),
        win_rate_trend,
        win_rate_trend_text: win_rate_trend.text(decay.win_rate_decay_30d, locale),
        activity_trend,
        activity_text: activity_trend.text(locale).to_string(),
        summary,
        summary_text: summary.text(result.d30.pnl, locale),
    }
}
