use dna_core::{format_usd, Locale, TagThresholds};
use serde::{Deserialize, Serialize};

use crate::catalog::{BehaviorTag, TagCategory, TagKind};

/// Merged metrics the rules are evaluated against
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagInputs {
    pub avg_hold_hours: f64,
    /// Largest single-trade share of positive PnL (0-1)
    pub top_trade_contribution: f64,
    /// Largest single-token share of positive PnL (0-1)
    pub top_token_contribution: f64,
    /// Average minutes between entry and a subsequent pump; `None` when unknown
    pub avg_minutes_before_pump: Option<f64>,
    /// Trades per active day
    pub trade_frequency: f64,
    pub win_rate: f64,
    pub profit_factor: f64,
    pub sharpe_ratio: f64,
    pub max_drawdown: f64,
    pub alpha_pct: f64,
    pub decay_alert: bool,
    /// At least one trade in the last 30 days
    pub recent_activity: bool,
    pub total_trades: usize,
    pub average_trade_value_usd: f64,
}

impl Default for TagInputs {
    fn default() -> Self {
        Self {
            avg_hold_hours: 0.0,
            top_trade_contribution: 0.0,
            top_token_contribution: 0.0,
            avg_minutes_before_pump: None,
            trade_frequency: 0.0,
            win_rate: 0.0,
            profit_factor: 0.0,
            sharpe_ratio: 0.0,
            max_drawdown: 0.0,
            alpha_pct: 0.0,
            decay_alert: false,
            recent_activity: true,
            total_trades: 0,
            average_trade_value_usd: 0.0,
        }
    }
}

/// Evaluate every rule in order. A tag appears at most once.
pub fn classify(inputs: &TagInputs, thresholds: &TagThresholds, locale: Locale) -> Vec<BehaviorTag> {
    let mut tags = Vec::new();
    let mut push = |kind: TagKind, description: String| {
        tags.push(BehaviorTag::new(kind, description, locale));
    };
    let zh = locale == Locale::Chinese;

    let hold = inputs.avg_hold_hours;
    if hold > thresholds.diamond_hands_min_hold_hours {
        let days = hold / 24.0;
        push(
            TagKind::DiamondHands,
            if zh {
                format!("平均持仓 {:.1} 天", days)
            } else {
                format!("Average hold {:.1} days", days)
            },
        );
    } else if hold > 0.0 && hold < thresholds.paper_hands_max_hold_hours {
        push(
            TagKind::PaperHands,
            if zh {
                format!("平均持仓仅 {:.1} 小时", hold)
            } else {
                format!("Average hold only {:.1} hours", hold)
            },
        );
    }

    if inputs.top_trade_contribution > thresholds.one_hit_wonder_contribution {
        let pct = inputs.top_trade_contribution * 100.0;
        push(
            TagKind::OneHitWonder,
            if zh {
                format!("单笔交易贡献 {:.0}% 收益", pct)
            } else {
                format!("A single trade made {:.0}% of profits", pct)
            },
        );
    }

    if inputs.top_token_contribution > thresholds.one_token_pony_contribution {
        let pct = inputs.top_token_contribution * 100.0;
        push(
            TagKind::OneTokenPony,
            if zh {
                format!("{:.0}% 收益来自单一币种", pct)
            } else {
                format!("{:.0}% of profits from one token", pct)
            },
        );
    }

    if let Some(minutes) = inputs.avg_minutes_before_pump {
        if minutes < thresholds.suspicious_minutes_before_pump {
            push(
                TagKind::Suspicious,
                if zh {
                    format!("平均在暴涨前 {:.0} 分钟买入", minutes)
                } else {
                    format!("Buys on average {:.0} minutes before a pump", minutes)
                },
            );
        }
    }

    let freq = inputs.trade_frequency;
    let win_rate = inputs.win_rate;
    let pf = inputs.profit_factor;

    // Between the gambler ceiling and the sniper floor neither tag fires.
    if freq > thresholds.high_frequency_trades_per_day
        && win_rate < thresholds.low_win_rate
        && pf < thresholds.gambler_max_profit_factor
    {
        push(
            TagKind::Gambler,
            if zh {
                format!("高频交易但亏损 (PF: {:.2})", pf)
            } else {
                format!("High frequency with losing odds (PF: {:.2})", pf)
            },
        );
    }

    if win_rate > thresholds.sniper_min_win_rate
        && freq < thresholds.sniper_max_frequency
        && pf > thresholds.sniper_min_profit_factor
    {
        push(
            TagKind::Sniper,
            if zh {
                format!("胜率 {:.0}%，盈亏比 {:.2}", win_rate * 100.0, pf)
            } else {
                format!("Win rate {:.0}%, profit factor {:.2}", win_rate * 100.0, pf)
            },
        );
    }

    let sharpe = inputs.sharpe_ratio;
    let drawdown = inputs.max_drawdown.abs();
    if sharpe > thresholds.conservative_min_sharpe && drawdown < thresholds.conservative_max_drawdown {
        push(
            TagKind::Conservative,
            if zh {
                format!("夏普 {:.2}，最大回撤仅 {:.0}%", sharpe, drawdown * 100.0)
            } else {
                format!("Sharpe {:.2}, max drawdown only {:.0}%", sharpe, drawdown * 100.0)
            },
        );
    }

    if inputs.alpha_pct > thresholds.smart_money_min_alpha_pct
        && win_rate > thresholds.smart_money_min_win_rate
        && sharpe > thresholds.smart_money_min_sharpe
    {
        push(
            TagKind::SmartMoney,
            if zh {
                format!("Alpha 占比 {:.0}%，综合表现优秀", inputs.alpha_pct)
            } else {
                format!("{:.0}% of returns from Alpha, strong all-round", inputs.alpha_pct)
            },
        );
    }

    if inputs.decay_alert {
        push(
            TagKind::Declining,
            locale
                .pick(
                    "Recent performance well below history",
                    "近期表现显著不如历史",
                )
                .to_string(),
        );
    }

    if !inputs.recent_activity && inputs.total_trades > 0 {
        push(
            TagKind::Dormant,
            locale.pick("No trades in the last 30 days", "近 30 天无交易").to_string(),
        );
    } else if freq > thresholds.active_trader_min_frequency {
        push(
            TagKind::ActiveTrader,
            if zh {
                format!("日均交易 {:.1} 笔", freq)
            } else {
                format!("{:.1} trades per day", freq)
            },
        );
    }

    if inputs.average_trade_value_usd > thresholds.whale_min_trade_usd {
        let value = format_usd(inputs.average_trade_value_usd);
        push(
            TagKind::Whale,
            if zh {
                format!("平均交易额 ${}", value)
            } else {
                format!("Average trade size ${}", value)
            },
        );
    }

    tracing::debug!(count = tags.len(), "behavior tags classified");
    tags
}

/// One-line summary: "[emoji name] [emoji name]".
pub fn tag_summary(tags: &[BehaviorTag], locale: Locale) -> String {
    if tags.is_empty() {
        return locale.pick("No distinctive traits", "暂无明显特征").to_string();
    }
    tags.iter().map(BehaviorTag::label).collect::<Vec<_>>().join(" ")
}

/// Tags grouped by category, each group in classification order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TagCategories {
    pub positive: Vec<BehaviorTag>,
    pub negative: Vec<BehaviorTag>,
    pub warning: Vec<BehaviorTag>,
    pub neutral: Vec<BehaviorTag>,
}

impl TagCategories {
    pub fn get(&self, category: TagCategory) -> &[BehaviorTag] {
        match category {
            TagCategory::Positive => &self.positive,
            TagCategory::Negative => &self.negative,
            TagCategory::Warning => &self.warning,
            TagCategory::Neutral => &self.neutral,
        }
    }
}

pub fn categorize_tags(tags: &[BehaviorTag]) -> TagCategories {
    let mut grouped = TagCategories::default();
    for tag in tags {
        let bucket = match tag.category {
            TagCategory::Positive => &mut grouped.positive,
            TagCategory::Negative => &mut grouped.negative,
            TagCategory::Warning => &mut grouped.warning,
            TagCategory::Neutral => &mut grouped.neutral,
        };
        bucket.push(tag.clone());
    }
    grouped
}
