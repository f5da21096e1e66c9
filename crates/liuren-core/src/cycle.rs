//! The six-state Xiao Liu Ren cycle and its static metadata.
//!
//! The order of [`SixRen::ORDER`] is fixed; every stage of the chain is an
//! index into it, taken modulo 6.

use serde::{Deserialize, Serialize};

use crate::error::{ReadingError, ReadingResult};

/// Number of states in the cycle.
pub const CYCLE_LEN: usize = 6;

/// One of the six divination states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SixRen {
    /// 大安, great peace.
    #[serde(rename = "Da An")]
    DaAn,
    /// 留连, delay.
    #[serde(rename = "Liu Lian")]
    LiuLian,
    /// 速喜, quick joy.
    #[serde(rename = "Su Xi")]
    SuXi,
    /// 赤口, red mouth.
    #[serde(rename = "Chi Kou")]
    ChiKou,
    /// 小吉, small luck.
    #[serde(rename = "Xiao Ji")]
    XiaoJi,
    /// 空亡, void.
    #[serde(rename = "Kong Wang")]
    KongWang,
}

/// Market direction hint, shared by the static table and interpreter output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    /// Prices expected to rise.
    Bullish,
    /// Prices expected to fall.
    Bearish,
    /// No clear direction.
    Neutral,
    /// Large swings either way.
    Volatile,
}

impl std::fmt::Display for Sentiment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bullish => write!(f, "Bullish"),
            Self::Bearish => write!(f, "Bearish"),
            Self::Neutral => write!(f, "Neutral"),
            Self::Volatile => write!(f, "Volatile"),
        }
    }
}

/// Display colour tag for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tint {
    /// Warm gold.
    Amber,
    /// Blue-grey.
    Slate,
    /// Bright red.
    Red,
    /// Deep rose.
    Rose,
    /// Green.
    Emerald,
    /// Plain grey.
    Gray,
}

/// Static descriptive record attached to each state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateDetails {
    /// Chinese name.
    pub glyph: &'static str,
    /// Short English meaning.
    pub meaning: &'static str,
    /// General description.
    pub description: &'static str,
    /// What the state suggests for stock prices.
    pub stock_implication: &'static str,
    /// Directional hint used by interpreters.
    pub lean: Sentiment,
    /// Display colour.
    pub tint: Tint,
}

/// Details table, indexed in cycle order.
const DETAILS: [StateDetails; CYCLE_LEN] = [
    StateDetails {
        glyph: "大安",
        meaning: "Great Peace",
        description: "Everything is stable and peaceful. Things go smoothly.",
        stock_implication: "Steady accumulation, slow rise, low volatility.",
        lean: Sentiment::Bullish,
        tint: Tint::Amber,
    },
    StateDetails {
        glyph: "留连",
        meaning: "Delay / Lingering",
        description: "Things are dragging on. Progress is slow or halted.",
        stock_implication: "Sideways movement, stagnation, trapped liquidity.",
        lean: Sentiment::Neutral,
        tint: Tint::Slate,
    },
    StateDetails {
        glyph: "速喜",
        meaning: "Quick Joy",
        description: "Good news arrives quickly. Success is immediate.",
        stock_implication: "Sharp rally, quick profits, positive news breakout.",
        lean: Sentiment::Bullish,
        tint: Tint::Red,
    },
    StateDetails {
        glyph: "赤口",
        meaning: "Red Mouth",
        description: "Disputes, arguments, and conflict.",
        stock_implication: "Panic selling, volatility, rumors, bearish sentiment.",
        lean: Sentiment::Volatile,
        tint: Tint::Rose,
    },
    StateDetails {
        glyph: "小吉",
        meaning: "Small Luck",
        description: "A small success. Good things are coming.",
        stock_implication: "Healthy correction, organic growth, buy the dip.",
        lean: Sentiment::Bullish,
        tint: Tint::Emerald,
    },
    StateDetails {
        glyph: "空亡",
        meaning: "Void / Emptiness",
        description: "Bad luck. Efforts are wasted. Empty results.",
        stock_implication: "Market crash, low volume, capitulation, bearish.",
        lean: Sentiment::Bearish,
        tint: Tint::Gray,
    },
];

impl SixRen {
    /// All states in cycle order.
    pub const ORDER: [Self; CYCLE_LEN] = [
        Self::DaAn,
        Self::LiuLian,
        Self::SuXi,
        Self::ChiKou,
        Self::XiaoJi,
        Self::KongWang,
    ];

    /// The state at `index`, wrapping modulo 6.
    pub fn from_index(index: usize) -> Self {
        Self::ORDER[index % CYCLE_LEN]
    }

    /// Zero-based position in the cycle.
    pub fn index(self) -> usize {
        match self {
            Self::DaAn => 0,
            Self::LiuLian => 1,
            Self::SuXi => 2,
            Self::ChiKou => 3,
            Self::XiaoJi => 4,
            Self::KongWang => 5,
        }
    }

    /// Romanised label, e.g. "Da An".
    pub fn label(self) -> &'static str {
        match self {
            Self::DaAn => "Da An",
            Self::LiuLian => "Liu Lian",
            Self::SuXi => "Su Xi",
            Self::ChiKou => "Chi Kou",
            Self::XiaoJi => "Xiao Ji",
            Self::KongWang => "Kong Wang",
        }
    }

    /// Static metadata for this state.
    pub fn details(self) -> &'static StateDetails {
        &DETAILS[self.index()]
    }

    /// Parse a state from its label or glyph, ignoring case, spaces,
    /// hyphens and underscores.
    pub fn parse(s: &str) -> ReadingResult<Self> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        Self::ORDER
            .into_iter()
            .find(|st| {
                st.label().replace(' ', "").to_lowercase() == key || st.details().glyph == key
            })
            .ok_or_else(|| ReadingError::UnknownState(s.to_string()))
    }
}

impl std::fmt::Display for SixRen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn order_matches_index() {
        for (i, st) in SixRen::ORDER.iter().enumerate() {
            assert_eq!(st.index(), i);
            assert_eq!(SixRen::from_index(i), *st);
        }
    }

    #[test]
    fn details_line_up_with_order() {
        assert_eq!(SixRen::DaAn.details().glyph, "大安");
        assert_eq!(SixRen::LiuLian.details().glyph, "留连");
        assert_eq!(SixRen::SuXi.details().glyph, "速喜");
        assert_eq!(SixRen::ChiKou.details().glyph, "赤口");
        assert_eq!(SixRen::XiaoJi.details().glyph, "小吉");
        assert_eq!(SixRen::KongWang.details().glyph, "空亡");
    }

    #[test]
    fn leans() {
        assert_eq!(SixRen::KongWang.details().lean, Sentiment::Bearish);
        assert_eq!(SixRen::ChiKou.details().lean, Sentiment::Volatile);
        assert_eq!(SixRen::LiuLian.details().lean, Sentiment::Neutral);
        assert_eq!(SixRen::SuXi.details().lean, Sentiment::Bullish);
    }

    #[test]
    fn parse_variants() {
        assert_eq!(SixRen::parse("Da An"), Ok(SixRen::DaAn));
        assert_eq!(SixRen::parse("kong-wang"), Ok(SixRen::KongWang));
        assert_eq!(SixRen::parse("XIAO_JI"), Ok(SixRen::XiaoJi));
        assert_eq!(SixRen::parse("liulian"), Ok(SixRen::LiuLian));
        assert_eq!(SixRen::parse("速喜"), Ok(SixRen::SuXi));
        assert_eq!(
            SixRen::parse("Da Xiong"),
            Err(ReadingError::UnknownState("Da Xiong".into()))
        );
    }

    #[test]
    fn serde_uses_label() {
        let json = serde_json::to_string(&SixRen::ChiKou).unwrap();
        assert_eq!(json, "\"Chi Kou\"");
        let back: SixRen = serde_json::from_str("\"Liu Lian\"").unwrap();
        assert_eq!(back, SixRen::LiuLian);
    }

    #[test]
    fn display() {
        assert_eq!(SixRen::KongWang.to_string(), "Kong Wang");
        assert_eq!(Sentiment::Volatile.to_string(), "Volatile");
    }

    proptest! {
        #[test]
        fn from_index_wraps(i in 0usize..10_000) {
            prop_assert_eq!(SixRen::from_index(i).index(), i % CYCLE_LEN);
        }
    }
}
