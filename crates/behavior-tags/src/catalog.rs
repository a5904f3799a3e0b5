use dna_core::Locale;
use serde::{Deserialize, Serialize};

/// How a tag reflects on the wallet
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagCategory {
    Positive,
    Negative,
    Warning,
    Neutral,
}

impl TagCategory {
    pub const ALL: [TagCategory; 4] = [
        TagCategory::Positive,
        TagCategory::Negative,
        TagCategory::Warning,
        TagCategory::Neutral,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TagCategory::Positive => "positive",
            TagCategory::Negative => "negative",
            TagCategory::Warning => "warning",
            TagCategory::Neutral => "neutral",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TagKind {
    DiamondHands,
    PaperHands,
    OneHitWonder,
    OneTokenPony,
    Suspicious,
    Gambler,
    Sniper,
    Conservative,
    SmartMoney,
    Declining,
    Dormant,
    ActiveTrader,
    Whale,
}

impl TagKind {
    pub fn emoji(&self) -> &'static str {
        match self {
            TagKind::DiamondHands => "💎",
            TagKind::PaperHands => "🧻",
            TagKind::OneHitWonder => "🚀",
            TagKind::OneTokenPony => "🦄",
            TagKind::Suspicious => "🐀",
            TagKind::Gambler => "🎰",
            TagKind::Sniper => "🎯",
            TagKind::Conservative => "🐢",
            TagKind::SmartMoney => "🧠",
            TagKind::Declining => "📉",
            TagKind::Dormant => "😴",
            TagKind::ActiveTrader => "⚡",
            TagKind::Whale => "🐋",
        }
    }

    /// Canonical English name; tag identity in tests and summaries.
    pub fn name(&self) -> &'static str {
        match self {
            TagKind::DiamondHands => "Diamond Hands",
            TagKind::PaperHands => "Paper Hands",
            TagKind::OneHitWonder => "One-Hit Wonder",
            TagKind::OneTokenPony => "One-Token Pony",
            TagKind::Suspicious => "Suspicious",
            TagKind::Gambler => "Gambler",
            TagKind::Sniper => "Sniper",
            TagKind::Conservative => "Conservative",
            TagKind::SmartMoney => "Smart Money",
            TagKind::Declining => "Declining",
            TagKind::Dormant => "Dormant",
            TagKind::ActiveTrader => "Active Trader",
            TagKind::Whale => "Whale",
        }
    }

    pub fn display_name(&self, locale: Locale) -> &'static str {
        let zh = match self {
            TagKind::DiamondHands => "钻石手",
            TagKind::PaperHands => "纸手",
            TagKind::OneHitWonder => "一战成名",
            TagKind::OneTokenPony => "单币战士",
            TagKind::Suspicious => "疑似内幕",
            TagKind::Gambler => "高频赌徒",
            TagKind::Sniper => "狙击手",
            TagKind::Conservative => "稳健派",
            TagKind::SmartMoney => "聪明钱",
            TagKind::Declining => "近期下滑",
            TagKind::Dormant => "休眠账户",
            TagKind::ActiveTrader => "活跃交易者",
            TagKind::Whale => "巨鲸",
        };
        locale.pick(self.name(), zh)
    }

    pub fn category(&self) -> TagCategory {
        match self {
            TagKind::DiamondHands
            | TagKind::Sniper
            | TagKind::Conservative
            | TagKind::SmartMoney => TagCategory::Positive,
            TagKind::PaperHands => TagCategory::Negative,
            TagKind::OneHitWonder
            | TagKind::OneTokenPony
            | TagKind::Suspicious
            | TagKind::Gambler
            | TagKind::Declining => TagCategory::Warning,
            TagKind::Dormant | TagKind::ActiveTrader | TagKind::Whale => TagCategory::Neutral,
        }
    }
}

/// A triggered tag with its metric-specific description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorTag {
    pub kind: TagKind,
    pub emoji: String,
    pub name: String,
    /// Name in the requested locale
    pub display_name: String,
    pub category: TagCategory,
    pub description: String,
}

impl BehaviorTag {
    pub fn new(kind: TagKind, description: String, locale: Locale) -> Self {
        Self {
            kind,
            emoji: kind.emoji().to_string(),
            name: kind.name().to_string(),
            display_name: kind.display_name(locale).to_string(),
            category: kind.category(),
            description,
        }
    }

    /// "[emoji name]" as shown in tag summaries
    pub fn label(&self) -> String {
        format!("[{} {}]", self.emoji, self.display_name)
    }
}
