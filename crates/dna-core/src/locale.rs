use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::DnaError;

/// Display language for interpretation text and tag names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    English,
    Chinese,
}

impl Locale {
    pub fn code(&self) -> &'static str {
        match self {
            Locale::English => "en",
            Locale::Chinese => "zh",
        }
    }

    /// Pick the string for this locale from an (english, chinese) pair.
    pub fn pick(&self, en: &'static str, zh: &'static str) -> &'static str {
        match self {
            Locale::English => en,
            Locale::Chinese => zh,
        }
    }
}

impl FromStr for Locale {
    type Err = DnaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" | "english" => Ok(Locale::English),
            "zh" | "zh-cn" | "chinese" => Ok(Locale::Chinese),
            other => Err(DnaError::Config(format!("unsupported locale '{}'", other))),
        }
    }
}

/// Whole dollars with thousands separators: 12345.6 -> "12,346".
pub fn format_usd(amount: f64) -> String {
    let digits = format!("{:.0}", amount);
    let (sign, digits) = match digits.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", digits.as_str()),
    };

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{}{}", sign, grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_locale() {
        assert_eq!("EN".parse::<Locale>().unwrap(), Locale::English);
        assert_eq!("zh-CN".parse::<Locale>().unwrap(), Locale::Chinese);
        assert!("fr".parse::<Locale>().is_err());
        assert_eq!(Locale::Chinese.pick("Whale", "巨鲸"), "巨鲸");
    }

    #[test]
    fn test_format_usd() {
        assert_eq!(format_usd(0.0), "0");
        assert_eq!(format_usd(999.6), "1,000");
        assert_eq!(format_usd(1234567.0), "1,234,567");
        assert_eq!(format_usd(-12345.0), "-12,345");
    }
}
