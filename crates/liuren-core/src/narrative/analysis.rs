//! The structured market reading an interpreter returns.

use serde::{Deserialize, Serialize};

use super::{NarrativeError, NarrativeResult};
use crate::cycle::Sentiment;

/// Sentiment, confidence and prose for one reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Analysis {
    /// Predicted direction.
    pub sentiment: Sentiment,
    /// Confidence in the direction, 0-100.
    pub probability: u8,
    /// Interpretation of the month -> day -> hour flow.
    pub explanation: String,
    /// Trading advice for this combination.
    pub advice: String,
}

/// Response shape before range checks. The probability is declared as a
/// plain number, so fractional values are accepted and rounded.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawAnalysis {
    sentiment: Sentiment,
    probability: f64,
    explanation: String,
    advice: String,
}

impl Analysis {
    /// The neutral placeholder used when an interpreter fails.
    pub fn fallback() -> Self {
        Self {
            sentiment: Sentiment::Neutral,
            probability: 50,
            explanation: "The connection to the digital ether is unstable.".to_string(),
            advice: "Exercise caution.".to_string(),
        }
    }

    /// Parse and validate an interpreter's JSON response.
    pub fn from_json(text: &str) -> NarrativeResult<Self> {
        let text = text.trim();
        if text.is_empty() {
            return Err(NarrativeError::EmptyResponse);
        }
        let raw: RawAnalysis = serde_json::from_str(text)?;
        if !raw.probability.is_finite() || !(0.0..=100.0).contains(&raw.probability) {
            return Err(NarrativeError::ProbabilityOutOfRange(raw.probability));
        }
        Ok(Self {
            sentiment: raw.sentiment,
            probability: raw.probability.round() as u8,
            explanation: raw.explanation,
            advice: raw.advice,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_valid_response() {
        let a = Analysis::from_json(
            r#"{"sentiment":"Bullish","probability":72,"explanation":"Breakout.","advice":"Buy."}"#,
        )
        .unwrap();
        assert_eq!(a.sentiment, Sentiment::Bullish);
        assert_eq!(a.probability, 72);
        assert_eq!(a.explanation, "Breakout.");
        assert_eq!(a.advice, "Buy.");
    }

    #[test]
    fn rounds_fractional_probability() {
        let a = Analysis::from_json(
            r#"{"sentiment":"Volatile","probability":66.6,"explanation":"","advice":""}"#,
        )
        .unwrap();
        assert_eq!(a.probability, 67);
    }

    #[test]
    fn rejects_unknown_sentiment() {
        let err = Analysis::from_json(
            r#"{"sentiment":"Sideways","probability":50,"explanation":"","advice":""}"#,
        )
        .unwrap_err();
        assert!(matches!(err, NarrativeError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_missing_field() {
        let err = Analysis::from_json(r#"{"sentiment":"Bearish","probability":50}"#).unwrap_err();
        assert!(matches!(err, NarrativeError::MalformedResponse(_)));
    }

    #[test]
    fn rejects_out_of_range_probability() {
        for p in ["101", "-1", "1e9"] {
            let json = format!(
                r#"{{"sentiment":"Bearish","probability":{p},"explanation":"","advice":""}}"#
            );
            let err = Analysis::from_json(&json).unwrap_err();
            assert!(
                matches!(err, NarrativeError::ProbabilityOutOfRange(_)),
                "{p}: {err}"
            );
        }
    }

    #[test]
    fn rejects_empty() {
        assert!(matches!(
            Analysis::from_json("  \n"),
            Err(NarrativeError::EmptyResponse)
        ));
    }

    #[test]
    fn fallback_is_neutral() {
        let a = Analysis::fallback();
        assert_eq!(a.sentiment, Sentiment::Neutral);
        assert_eq!(a.probability, 50);
        assert_eq!(a.advice, "Exercise caution.");
    }

    #[test]
    fn serializes_plain_record() {
        let v = serde_json::to_value(Analysis::fallback()).unwrap();
        assert_eq!(v["sentiment"], "Neutral");
        assert_eq!(v["probability"], 50);
    }
}
