//! Offline rule-based interpreter.
//!
//! Scores the chain by each state's sentiment lean, weighting later stages
//! more heavily, and recognises the two named flows: a stalled day breaking
//! out into Su Xi, and a stable stage collapsing into Kong Wang.

use log::debug;

use super::{Analysis, Interpreter, NarrativeResult};
use crate::chain::Reading;
use crate::cycle::{Sentiment, SixRen};

/// Stage weights for the rule-based interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterpretConfig {
    /// Weight of the month (root) state, 1-9.
    pub month_weight: u32,
    /// Weight of the day (trunk) state, 1-9.
    pub day_weight: u32,
    /// Weight of the hour (leaf) state, 1-9.
    pub hour_weight: u32,
}

impl Default for InterpretConfig {
    fn default() -> Self {
        Self {
            month_weight: 1,
            day_weight: 2,
            hour_weight: 3,
        }
    }
}

impl InterpretConfig {
    /// Set all three stage weights (each clamped to 1-9).
    pub fn with_weights(mut self, month: u32, day: u32, hour: u32) -> Self {
        self.month_weight = month.clamp(1, 9);
        self.day_weight = day.clamp(1, 9);
        self.hour_weight = hour.clamp(1, 9);
        self
    }

    fn weights(&self) -> [u32; 3] {
        [self.month_weight, self.day_weight, self.hour_weight]
    }
}

/// Named transitions that override the weighted score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Breakout,
    Collapse,
}

impl Flow {
    fn detect(chain: [SixRen; 3]) -> Option<Self> {
        let [_, day, hour] = chain;
        if day == SixRen::LiuLian && hour == SixRen::SuXi {
            return Some(Self::Breakout);
        }
        if chain
            .windows(2)
            .any(|w| w[0] == SixRen::DaAn && w[1] == SixRen::KongWang)
        {
            return Some(Self::Collapse);
        }
        None
    }
}

/// Deterministic interpreter that needs no network.
#[derive(Debug, Clone, Default)]
pub struct RuleInterpreter {
    config: InterpretConfig,
}

impl RuleInterpreter {
    /// Create an interpreter with the given weights.
    pub fn new(config: InterpretConfig) -> Self {
        Self { config }
    }

    fn score(&self, chain: [SixRen; 3]) -> (Sentiment, u8) {
        const LEANS: [Sentiment; 4] = [
            Sentiment::Bullish,
            Sentiment::Bearish,
            Sentiment::Volatile,
            Sentiment::Neutral,
        ];
        let weights = self.config.weights();
        let total: u32 = weights.iter().sum();
        let tally = |lean: Sentiment| -> u32 {
            chain
                .iter()
                .zip(weights)
                .filter(|(st, _)| st.details().lean == lean)
                .map(|(_, w)| w)
                .sum()
        };

        // ties go to the hour's lean
        let hour_lean = chain[2].details().lean;
        let (sentiment, top) = LEANS
            .iter()
            .map(|&l| (l, tally(l)))
            .fold((hour_lean, tally(hour_lean)), |best, cur| {
                if cur.1 > best.1 { cur } else { best }
            });

        let probability = 50 + top * 45 / total;
        (sentiment, probability as u8)
    }
}

impl Interpreter for RuleInterpreter {
    fn name(&self) -> &str {
        "rules"
    }

    fn interpret(&self, reading: &Reading) -> NarrativeResult<Analysis> {
        let chain = reading.chain();
        let flow = Flow::detect(chain);
        let (sentiment, probability) = match flow {
            Some(Flow::Breakout) => (Sentiment::Bullish, 88),
            Some(Flow::Collapse) => (Sentiment::Bearish, 85),
            None => self.score(chain),
        };
        debug!("rules: {chain:?} flow={flow:?} -> {sentiment} {probability}%");

        let [month, day, hour] = chain;
        let mut explanation = format!(
            "Root {month} ({}) gives way to trunk {day} ({}) and settles on {hour} ({}). {}",
            month.details().meaning,
            day.details().meaning,
            hour.details().meaning,
            hour.details().description,
        );
        match flow {
            Some(Flow::Breakout) => explanation.push_str(
                " The lingering day breaks into quick joy at the hour: a breakout signal.",
            ),
            Some(Flow::Collapse) => explanation
                .push_str(" Stability collapses into the void: expect a sudden loss of liquidity."),
            None => {}
        }

        let stance = match sentiment {
            Sentiment::Bullish => "Lean long, scale in on dips.",
            Sentiment::Bearish => "Reduce exposure and protect capital.",
            Sentiment::Volatile => "Trade small with tight stops.",
            Sentiment::Neutral => "Stay patient and wait for confirmation.",
        };
        let advice = format!("{stance} Expect: {}", hour.details().stock_implication);

        Ok(Analysis {
            sentiment,
            probability,
            explanation,
            advice,
        })
    }
}
