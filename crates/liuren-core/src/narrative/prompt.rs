//! Prompt text for language-model interpreters.

use crate::chain::Reading;
use crate::cycle::SixRen;

/// JSON schema the interpreter's response must follow.
pub const RESPONSE_SCHEMA: &str = r#"{
  "type": "object",
  "properties": {
    "sentiment": {
      "type": "string",
      "enum": ["Bullish", "Bearish", "Neutral", "Volatile"],
      "description": "Overall market sentiment direction based on the divination flow."
    },
    "probability": {
      "type": "number",
      "description": "Probability percentage (0-100) of the predicted direction occurring."
    },
    "explanation": {
      "type": "string",
      "description": "A detailed interpretation of the Month -> Day -> Hour progression and its impact on the stock market."
    },
    "advice": {
      "type": "string",
      "description": "Actionable trading advice based on this specific combination."
    }
  },
  "required": ["sentiment", "probability", "explanation", "advice"]
}"#;

const STAGES: [(&str, &str); 3] = [
    ("ROOT (Month)", "Macro Context"),
    ("TRUNK (Day)", "Recent Trend / Process"),
    ("LEAF (Hour)", "Final Outcome / Current Moment"),
];

const RULES: &str = "\
Combined Interpretation Rules:
- Analyze the FLOW. For example, moving from 'Liu Lian' (Delay) in Day to 'Su Xi' (Quick Joy) in Hour is a strong breakout signal.
- Moving from 'Da An' (Stable) to 'Kong Wang' (Void) suggests a sudden crash or loss of liquidity.
- The 'Hour' (Final Result) is the most important for the immediate price action, but 'Day' provides the volatility context.

Task:
Provide a prediction for the stock market direction.
- If the progression is positive (e.g. into Su Xi, Da An, Xiao Ji), high probability of rise.
- If the progression is negative (e.g. into Kong Wang, Chi Kou), high probability of fall.
- Be decisive about the \"Probability\".
";

/// Build the interpretation prompt for a reading.
///
/// The prompt carries each stage's state with its static metadata, the
/// flow rules, and [`RESPONSE_SCHEMA`].
pub fn build_prompt(reading: &Reading) -> String {
    let mut out = String::from(
        "You are an expert Stock Market Oracle using the \"Xiao Liu Ren\" (Small Six Ren) method combined with technical market psychology.\n\n",
    );
    out.push_str(&format!(
        "The user wants to know if the market will GO UP (Bullish) or GO DOWN (Bearish) at this specific time: {}.\n\n",
        reading.moment().format("%Y-%m-%d %H:%M")
    ));
    out.push_str("DIVINATION ANALYSIS (3-Step Method):\n");

    for (n, ((stage, role), state)) in STAGES.iter().zip(reading.chain()).enumerate() {
        out.push('\n');
        out.push_str(&stage_block(n + 1, stage, role, state));
    }

    out.push('\n');
    out.push_str(RULES);
    out.push('\n');
    out.push_str("Respond with JSON only, matching this schema:\n");
    out.push_str(RESPONSE_SCHEMA);
    out.push('\n');
    out
}

fn stage_block(n: usize, stage: &str, role: &str, state: SixRen) -> String {
    let d = state.details();
    format!(
        "{n}. {stage} - {role}:\n   State: {state} ({})\n   Meaning: {}\n   Implication: {}\n",
        d.glyph, d.meaning, d.stock_implication
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::compute_chain;
    use crate::moment::parse_moment;

    #[test]
    fn prompt_lists_three_stages_in_order() {
        let r = compute_chain(parse_moment("2024-03-05T14:00").unwrap());
        let p = build_prompt(&r);

        let root = p.find("1. ROOT (Month)").unwrap();
        let trunk = p.find("2. TRUNK (Day)").unwrap();
        let leaf = p.find("3. LEAF (Hour)").unwrap();
        assert!(root < trunk && trunk < leaf);

        assert!(p.contains("State: Su Xi (速喜)"));
        assert!(p.contains("State: Da An (大安)"));
        assert!(p.contains("State: Liu Lian (留连)"));
        assert!(p.contains("2024-03-05 14:00"));
    }

    #[test]
    fn prompt_carries_schema() {
        let r = compute_chain(parse_moment("2024-01-01").unwrap());
        let p = build_prompt(&r);
        assert!(p.contains("\"required\": [\"sentiment\", \"probability\", \"explanation\", \"advice\"]"));
        assert!(p.contains("Be decisive"));
    }

    #[test]
    fn stage_block_layout() {
        assert_eq!(
            stage_block(3, "LEAF (Hour)", "Final Outcome / Current Moment", SixRen::KongWang),
            "3. LEAF (Hour) - Final Outcome / Current Moment:\n   State: Kong Wang (空亡)\n   Meaning: Void / Emptiness\n   Implication: Market crash, low volume, capitulation, bearish.\n"
        );
    }

    #[test]
    fn schema_is_valid_json() {
        let v: serde_json::Value = serde_json::from_str(RESPONSE_SCHEMA).unwrap();
        assert_eq!(v["properties"]["sentiment"]["enum"].as_array().unwrap().len(), 4);
    }
}
