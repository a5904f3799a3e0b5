//! Human-readable reading of an [`AttributionResult`].

use dna_core::Locale;
use serde::{Deserialize, Serialize};

use crate::attribution::AttributionResult;

/// Market-sensitivity band derived from beta
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BetaBand {
    HighLeverage,
    Aggressive,
    Moderate,
    Independent,
}

impl BetaBand {
    pub fn from_beta(beta: f64) -> Self {
        match beta {
            b if b > 1.5 => BetaBand::HighLeverage,
            b if b > 1.0 => BetaBand::Aggressive,
            b if b > 0.5 => BetaBand::Moderate,
            _ => BetaBand::Independent,
        }
    }

    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            BetaBand::HighLeverage => locale.pick(
                "High leverage: more volatile than the benchmark",
                "高杠杆型：比基准波动更大",
            ),
            BetaBand::Aggressive => locale.pick(
                "Aggressive: slightly above market volatility",
                "激进型：略高于市场波动",
            ),
            BetaBand::Moderate => locale.pick(
                "Moderate: moderately correlated with the market",
                "稳健型：与市场适度相关",
            ),
            BetaBand::Independent => locale.pick(
                "Independent: low correlation with the benchmark",
                "独立型：与基准相关性低",
            ),
        }
    }
}

/// Skill band derived from annualized alpha
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AlphaBand {
    Excellent,
    Good,
    Positive,
    Neutral,
    Negative,
}

impl AlphaBand {
    pub fn from_alpha(alpha: f64) -> Self {
        match alpha {
            a if a > 0.3 => AlphaBand::Excellent,
            a if a > 0.1 => AlphaBand::Good,
            a if a > 0.0 => AlphaBand::Positive,
            a if a > -0.1 => AlphaBand::Neutral,
            _ => AlphaBand::Negative,
        }
    }

    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            AlphaBand::Excellent => locale.pick(
                "Exceptional alpha: a genuine top-tier trader",
                "超强 Alpha：真正的顶级交易员",
            ),
            AlphaBand::Good => locale.pick(
                "Strong alpha: real excess-return ability",
                "优秀 Alpha：有真实的超额能力",
            ),
            AlphaBand::Positive => locale.pick(
                "Positive alpha: slight outperformance",
                "正向 Alpha：略有超额表现",
            ),
            AlphaBand::Neutral => locale.pick(
                "Near-zero alpha: mostly tracks the market",
                "接近零 Alpha：基本跟随市场",
            ),
            AlphaBand::Negative => locale.pick(
                "Negative alpha: underperforms the market",
                "负向 Alpha：跑输大盘",
            ),
        }
    }
}

/// Where the wallet's gains (or losses) came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttributionVerdict {
    TrueSkill,
    Skilled,
    LimitedSkill,
    Lucky,
    StrategyFailure,
    PoorExecution,
    MarketVictim,
}

impl AttributionVerdict {
    /// `total_return == 0` reads as the gain side.
    pub fn classify(alpha_pct: f64, total_return: f64) -> Self {
        if total_return >= 0.0 {
            match alpha_pct {
                p if p > 70.0 => AttributionVerdict::TrueSkill,
                p if p > 50.0 => AttributionVerdict::Skilled,
                p if p > 30.0 => AttributionVerdict::LimitedSkill,
                _ => AttributionVerdict::Lucky,
            }
        } else {
            match alpha_pct {
                p if p > 70.0 => AttributionVerdict::StrategyFailure,
                p if p > 30.0 => AttributionVerdict::PoorExecution,
                _ => AttributionVerdict::MarketVictim,
            }
        }
    }

    /// True when the outcome is dominated by the trader's own decisions,
    /// whether it is a gain or a loss.
    pub fn is_skill_based(&self) -> bool {
        matches!(
            self,
            AttributionVerdict::TrueSkill
                | AttributionVerdict::Skilled
                | AttributionVerdict::StrategyFailure
                | AttributionVerdict::PoorExecution
        )
    }

    pub fn narrative(&self, alpha_pct: f64, beta_pct: f64, locale: Locale) -> String {
        match (self, locale) {
            (AttributionVerdict::TrueSkill, Locale::English) => {
                format!("True Skill! {:.0}% of gains from Alpha", alpha_pct)
            }
            (AttributionVerdict::TrueSkill, Locale::Chinese) => {
                format!("真实力！{:.0}% 的收益来自 Alpha", alpha_pct)
            }
            (AttributionVerdict::Skilled, Locale::English) => {
                format!("Skilled: {:.0}% of gains from Alpha", alpha_pct)
            }
            (AttributionVerdict::Skilled, Locale::Chinese) => {
                format!("有实力，{:.0}% 的收益靠能力获得", alpha_pct)
            }
            (AttributionVerdict::LimitedSkill, Locale::English) => {
                format!("Limited Skill: {:.0}% of gains from Market", beta_pct)
            }
            (AttributionVerdict::LimitedSkill, Locale::Chinese) => {
                format!("能力有限，{:.0}% 的收益来自跟大盘", beta_pct)
            }
            (AttributionVerdict::Lucky, Locale::English) => {
                format!("Lucky! {:.0}% of gains from Market Beta", beta_pct)
            }
            (AttributionVerdict::Lucky, Locale::Chinese) => {
                format!("主要靠运气！{:.0}% 是 Beta 收益", beta_pct)
            }
            (AttributionVerdict::StrategyFailure, Locale::English) => {
                format!("Strategy Failure: {:.0}% of losses from decisions", alpha_pct)
            }
            (AttributionVerdict::StrategyFailure, Locale::Chinese) => {
                format!("决策失误！{:.0}% 的亏损源于交易策略", alpha_pct)
            }
            (AttributionVerdict::PoorExecution, Locale::English) => {
                "Poor Execution: mixed losses from strategy and market".to_string()
            }
            (AttributionVerdict::PoorExecution, Locale::Chinese) => {
                "执行不力：亏损源于策略与市场波动".to_string()
            }
            (AttributionVerdict::MarketVictim, Locale::English) => {
                format!("Market Victim: {:.0}% of losses from Market", beta_pct)
            }
            (AttributionVerdict::MarketVictim, Locale::Chinese) => {
                format!("大盘受害者：{:.0}% 的亏损来自系统性风险", beta_pct)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionInterpretation {
    pub beta_band: BetaBand,
    pub beta_text: String,
    pub alpha_band: AlphaBand,
    pub alpha_text: String,
    pub verdict: AttributionVerdict,
    pub attribution_text: String,
    pub is_skill_based: bool,
}

/// Total over every result the calculator can produce.
pub fn interpret_attribution(result: &AttributionResult, locale: Locale) -> AttributionInterpretation {
    let beta_band = BetaBand::from_beta(result.beta);
    let alpha_band = AlphaBand::from_alpha(result.alpha);
    let verdict = AttributionVerdict::classify(result.alpha_pct, result.total_return);

    AttributionInterpretation {
        beta_band,
        beta_text: beta_band.text(locale).to_string(),
        alpha_band,
        alpha_text: alpha_band.text(locale).to_string(),
        verdict,
        attribution_text: verdict.narrative(result.alpha_pct, result.beta_pct, locale),
        is_skill_based: verdict.is_skill_based(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(beta: f64, alpha: f64, alpha_pct: f64, total_return: f64) -> AttributionResult {
        AttributionResult {
            beta,
            alpha,
            alpha_pct,
            beta_pct: 100.0 - alpha_pct,
            total_return,
            ..Default::default()
        }
    }

    #[test]
    fn test_beta_bands() {
        assert_eq!(BetaBand::from_beta(1.8), BetaBand::HighLeverage);
        assert_eq!(BetaBand::from_beta(1.5), BetaBand::Aggressive);
        assert_eq!(BetaBand::from_beta(0.8), BetaBand::Moderate);
        assert_eq!(BetaBand::from_beta(0.5), BetaBand::Independent);
        assert_eq!(BetaBand::from_beta(-0.3), BetaBand::Independent);
    }

    #[test]
    fn test_alpha_bands() {
        assert_eq!(AlphaBand::from_alpha(0.45), AlphaBand::Excellent);
        assert_eq!(AlphaBand::from_alpha(0.2), AlphaBand::Good);
        assert_eq!(AlphaBand::from_alpha(0.05), AlphaBand::Positive);
        assert_eq!(AlphaBand::from_alpha(0.0), AlphaBand::Neutral);
        assert_eq!(AlphaBand::from_alpha(-0.1), AlphaBand::Negative);
    }

    #[test]
    fn test_gain_side_verdicts() {
        let interp = interpret_attribution(&result(0.4, 0.5, 85.0, 0.6), Locale::English);
        assert_eq!(interp.verdict, AttributionVerdict::TrueSkill);
        assert!(interp.is_skill_based);
        assert_eq!(interp.attribution_text, "True Skill! 85% of gains from Alpha");

        let interp = interpret_attribution(&result(1.2, 0.02, 20.0, 0.3), Locale::English);
        assert_eq!(interp.verdict, AttributionVerdict::Lucky);
        assert!(!interp.is_skill_based);
        assert!(interp.attribution_text.contains("80%"));

        let interp = interpret_attribution(&result(1.0, 0.0, 40.0, 0.1), Locale::English);
        assert_eq!(interp.verdict, AttributionVerdict::LimitedSkill);
        assert!(!interp.is_skill_based);
    }

    #[test]
    fn test_loss_side_verdicts() {
        let interp = interpret_attribution(&result(0.2, -0.4, 90.0, -0.25), Locale::English);
        assert_eq!(interp.verdict, AttributionVerdict::StrategyFailure);
        assert!(interp.is_skill_based);

        let interp = interpret_attribution(&result(0.9, -0.05, 50.0, -0.1), Locale::English);
        assert_eq!(interp.verdict, AttributionVerdict::PoorExecution);
        assert!(interp.is_skill_based);

        let interp = interpret_attribution(&result(1.4, 0.01, 10.0, -0.2), Locale::English);
        assert_eq!(interp.verdict, AttributionVerdict::MarketVictim);
        assert!(!interp.is_skill_based);
    }

    #[test]
    fn test_zero_result_is_total() {
        let interp = interpret_attribution(&AttributionResult::default(), Locale::Chinese);
        assert_eq!(interp.beta_band, BetaBand::Independent);
        assert_eq!(interp.alpha_band, AlphaBand::Neutral);
        assert_eq!(interp.verdict, AttributionVerdict::Lucky);
        assert!(interp.attribution_text.contains("Beta"));
    }
}
