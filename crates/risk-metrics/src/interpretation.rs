use dna_core::Locale;
use serde::{Deserialize, Serialize};

use crate::calculator::RiskMetrics;

/// Four-step rating shared by Sharpe, drawdown and profit factor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RatingBand {
    Excellent,
    Good,
    Average,
    Poor,
}

impl RatingBand {
    pub fn from_sharpe(sharpe: f64) -> Self {
        match sharpe {
            s if s > 2.0 => RatingBand::Excellent,
            s if s > 1.0 => RatingBand::Good,
            s if s > 0.5 => RatingBand::Average,
            _ => RatingBand::Poor,
        }
    }

    /// Rated on drawdown magnitude; smaller is better.
    pub fn from_drawdown(max_drawdown: f64) -> Self {
        match max_drawdown.abs() {
            d if d < 0.1 => RatingBand::Excellent,
            d if d < 0.2 => RatingBand::Good,
            d if d < 0.4 => RatingBand::Average,
            _ => RatingBand::Poor,
        }
    }

    pub fn from_profit_factor(profit_factor: f64) -> Self {
        match profit_factor {
            p if p > 2.0 => RatingBand::Excellent,
            p if p > 1.5 => RatingBand::Good,
            p if p > 1.0 => RatingBand::Average,
            _ => RatingBand::Poor,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RatingBand::Excellent => "excellent",
            RatingBand::Good => "good",
            RatingBand::Average => "average",
            RatingBand::Poor => "poor",
        }
    }

    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            RatingBand::Excellent => locale.pick("Excellent", "优秀"),
            RatingBand::Good => locale.pick("Good", "良好"),
            RatingBand::Average => locale.pick("Average", "一般"),
            RatingBand::Poor => locale.pick("Poor", "较差"),
        }
    }

    /// Drawdown wording describes the size of the drawdown itself.
    pub fn drawdown_text(&self, locale: Locale) -> &'static str {
        match self {
            RatingBand::Excellent => locale.pick("Very low", "极低"),
            RatingBand::Good => locale.pick("Low", "较低"),
            RatingBand::Average => locale.pick("Moderate", "中等"),
            RatingBand::Poor => locale.pick("High", "较高"),
        }
    }
}

/// Overall risk/return character of a wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RiskProfile {
    Steady,
    HighRiskHighReturn,
    HighRiskLowReturn,
    Balanced,
}

impl RiskProfile {
    pub fn classify(sharpe: f64, max_drawdown: f64) -> Self {
        let mdd = max_drawdown.abs();
        if sharpe > 1.5 && mdd < 0.2 {
            RiskProfile::Steady
        } else if sharpe > 1.0 && mdd > 0.4 {
            RiskProfile::HighRiskHighReturn
        } else if sharpe < 0.5 && mdd > 0.3 {
            RiskProfile::HighRiskLowReturn
        } else {
            RiskProfile::Balanced
        }
    }

    pub fn text(&self, locale: Locale) -> &'static str {
        match self {
            RiskProfile::Steady => locale.pick(
                "Steady earner: low risk, high return",
                "稳健收益型：低风险高回报",
            ),
            RiskProfile::HighRiskHighReturn => locale.pick(
                "High risk, high return: tolerates deep drawdowns",
                "高风险高收益型：愿意承担大回撤",
            ),
            RiskProfile::HighRiskLowReturn => locale.pick(
                "High risk, low return: risk and reward are mismatched",
                "高风险低收益型：风险收益不匹配",
            ),
            RiskProfile::Balanced => locale.pick(
                "Balanced: moderate risk and return",
                "均衡型：风险收益适中",
            ),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskInterpretation {
    pub sharpe_level: RatingBand,
    pub sharpe_text: String,
    pub drawdown_level: RatingBand,
    pub drawdown_text: String,
    pub profit_factor_level: RatingBand,
    pub profit_factor_text: String,
    pub risk_profile: RiskProfile,
    pub risk_profile_text: String,
}

pub fn interpret_risk_metrics(metrics: &RiskMetrics, locale: Locale) -> RiskInterpretation {
    let sharpe_level = RatingBand::from_sharpe(metrics.sharpe_ratio);
    let drawdown_level = RatingBand::from_drawdown(metrics.max_drawdown);
    let profit_factor_level = RatingBand::from_profit_factor(metrics.profit_factor);
    let risk_profile = RiskProfile::classify(metrics.sharpe_ratio, metrics.max_drawdown);

    RiskInterpretation {
        sharpe_level,
        sharpe_text: sharpe_level.text(locale).to_string(),
        drawdown_level,
        drawdown_text: drawdown_level.drawdown_text(locale).to_string(),
        profit_factor_level,
        profit_factor_text: profit_factor_level.text(locale).to_string(),
        risk_profile,
        risk_profile_text: risk_profile.text(locale).to_string(),
    }
}
