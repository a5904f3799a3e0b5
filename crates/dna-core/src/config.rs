use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

use crate::error::{DnaError, DnaResult};
use crate::locale::Locale;

/// Engine-wide parameters, passed explicitly into every calculator call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Annual risk-free rate (0.04 = 4%)
    pub risk_free_rate: f64,
    /// Return periods per year used for annualization
    pub periods_per_year: u32,
    pub decay: DecayConfig,
    pub tags: TagThresholds,
    pub locale: Locale,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            risk_free_rate: 0.04,
            periods_per_year: 252,
            decay: DecayConfig::default(),
            tags: TagThresholds::default(),
            locale: Locale::default(),
        }
    }
}

/// Time-decay window and alert settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecayConfig {
    /// Recent win rate below `all_time * ratio` raises the severe alert
    pub severe_decay_ratio: f64,
    /// Days per year used to scale the expected 30-day trade count
    pub days_per_year: f64,
}

impl Default for DecayConfig {
    fn default() -> Self {
        Self {
            severe_decay_ratio: 0.7,
            days_per_year: 365.0,
        }
    }
}

/// Thresholds for every behavior-tag rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TagThresholds {
    pub diamond_hands_min_hold_hours: f64,
    pub paper_hands_max_hold_hours: f64,
    pub one_hit_wonder_contribution: f64,
    pub one_token_pony_contribution: f64,
    pub suspicious_minutes_before_pump: f64,
    pub high_frequency_trades_per_day: f64,
    pub low_win_rate: f64,
    /// Gambler fires only below this profit factor
    pub gambler_max_profit_factor: f64,
    pub sniper_min_win_rate: f64,
    pub sniper_max_frequency: f64,
    pub sniper_min_profit_factor: f64,
    pub conservative_min_sharpe: f64,
    pub conservative_max_drawdown: f64,
    pub smart_money_min_alpha_pct: f64,
    pub smart_money_min_win_rate: f64,
    pub smart_money_min_sharpe: f64,
    pub active_trader_min_frequency: f64,
    pub whale_min_trade_usd: f64,
}

impl Default for TagThresholds {
    fn default() -> Self {
        Self {
            diamond_hands_min_hold_hours: 7.0 * 24.0,
            paper_hands_max_hold_hours: 24.0,
            one_hit_wonder_contribution: 0.5,
            one_token_pony_contribution: 0.8,
            suspicious_minutes_before_pump: 60.0,
            high_frequency_trades_per_day: 10.0,
            low_win_rate: 0.4,
            gambler_max_profit_factor: 1.0,
            sniper_min_win_rate: 0.7,
            sniper_max_frequency: 5.0,
            sniper_min_profit_factor: 1.5,
            conservative_min_sharpe: 2.0,
            conservative_max_drawdown: 0.2,
            smart_money_min_alpha_pct: 60.0,
            smart_money_min_win_rate: 0.6,
            smart_money_min_sharpe: 1.5,
            active_trader_min_frequency: 5.0,
            whale_min_trade_usd: 50_000.0,
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by `DNA_*` environment variables (and `.env`).
    pub fn from_env() -> DnaResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Defaults overridden by whatever `lookup` returns for each `DNA_*` key.
    pub fn from_lookup<F>(lookup: F) -> DnaResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let tag_defaults = &defaults.tags;

        let config = Self {
            risk_free_rate: parse_or(&lookup, "DNA_RISK_FREE_RATE", defaults.risk_free_rate)?,
            periods_per_year: parse_or(&lookup, "DNA_PERIODS_PER_YEAR", defaults.periods_per_year)?,
            decay: DecayConfig {
                severe_decay_ratio: parse_or(
                    &lookup,
                    "DNA_SEVERE_DECAY_RATIO",
                    defaults.decay.severe_decay_ratio,
                )?,
                ..defaults.decay.clone()
            },
            tags: TagThresholds {
                diamond_hands_min_hold_hours: parse_or(
                    &lookup,
                    "DNA_DIAMOND_HANDS_HOURS",
                    tag_defaults.diamond_hands_min_hold_hours,
                )?,
                paper_hands_max_hold_hours: parse_or(
                    &lookup,
                    "DNA_PAPER_HANDS_HOURS",
                    tag_defaults.paper_hands_max_hold_hours,
                )?,
                one_hit_wonder_contribution: parse_or(
                    &lookup,
                    "DNA_ONE_HIT_WONDER",
                    tag_defaults.one_hit_wonder_contribution,
                )?,
                suspicious_minutes_before_pump: parse_or(
                    &lookup,
                    "DNA_SUSPICIOUS_MINUTES",
                    tag_defaults.suspicious_minutes_before_pump,
                )?,
                high_frequency_trades_per_day: parse_or(
                    &lookup,
                    "DNA_HIGH_FREQUENCY",
                    tag_defaults.high_frequency_trades_per_day,
                )?,
                low_win_rate: parse_or(&lookup, "DNA_LOW_WIN_RATE", tag_defaults.low_win_rate)?,
                whale_min_trade_usd: parse_or(
                    &lookup,
                    "DNA_WHALE_TRADE_USD",
                    tag_defaults.whale_min_trade_usd,
                )?,
                ..tag_defaults.clone()
            },
            locale: parse_or(&lookup, "DNA_LOCALE", defaults.locale)?,
        };

        config.validate()?;
        tracing::debug!(
            risk_free_rate = config.risk_free_rate,
            periods_per_year = config.periods_per_year,
            locale = config.locale.code(),
            "engine configuration loaded"
        );
        Ok(config)
    }

    /// Reject values no calculator can work with.
    pub fn validate(&self) -> DnaResult<()> {
        if self.periods_per_year == 0 {
            return Err(DnaError::Config("periods_per_year must be positive".to_string()));
        }
        if !self.risk_free_rate.is_finite() {
            return Err(DnaError::Config("risk_free_rate must be finite".to_string()));
        }
        if self.decay.days_per_year <= 0.0 {
            return Err(DnaError::Config("days_per_year must be positive".to_string()));
        }
        Ok(())
    }

    /// Risk-free rate per return period
    pub fn period_risk_free_rate(&self) -> f64 {
        self.risk_free_rate / self.periods_per_year as f64
    }
}

fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> DnaResult<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| DnaError::Config(format!("{} = '{}': {}", key, raw, e))),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.risk_free_rate, 0.04);
        assert_eq!(config.periods_per_year, 252);
        assert_eq!(config.tags.diamond_hands_min_hold_hours, 168.0);
        assert_eq!(config.tags.whale_min_trade_usd, 50_000.0);
        assert!((config.period_risk_free_rate() - 0.04 / 252.0).abs() < 1e-15);
    }

    #[test]
    fn test_lookup_overrides() {
        let vars: HashMap<&str, &str> = [
            ("DNA_RISK_FREE_RATE", "0.05"),
            ("DNA_HIGH_FREQUENCY", "20"),
            ("DNA_LOCALE", "zh"),
        ]
        .into_iter()
        .collect();
        let config = EngineConfig::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(config.risk_free_rate, 0.05);
        assert_eq!(config.tags.high_frequency_trades_per_day, 20.0);
        assert_eq!(config.tags.low_win_rate, 0.4);
        assert_eq!(config.locale, Locale::Chinese);
    }

    #[test]
    fn test_lookup_rejects_garbage() {
        let err = EngineConfig::from_lookup(|k| {
            (k == "DNA_PERIODS_PER_YEAR").then(|| "lots".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, DnaError::Config(_)));

        let err = EngineConfig::from_lookup(|k| {
            (k == "DNA_PERIODS_PER_YEAR").then(|| "0".to_string())
        })
        .unwrap_err();
        assert!(matches!(err, DnaError::Config(_)));
    }
}
