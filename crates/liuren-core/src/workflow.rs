//! One divination request: chain calculation followed by interpretation.

use chrono::NaiveDateTime;
use log::{info, warn};
use serde::Serialize;

use crate::chain::{Reading, compute_chain};
use crate::moment::TimeSource;
use crate::narrative::{Analysis, Interpreter};

/// A reading together with its interpretation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Divination {
    /// The computed chain.
    pub reading: Reading,
    /// The interpreter's analysis, or the neutral fallback.
    pub analysis: Analysis,
    /// Name of the interpreter that was asked.
    pub interpreter: String,
    /// Why the fallback was used, if it was.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_reason: Option<String>,
}

impl Divination {
    /// Whether the analysis is the neutral placeholder.
    pub fn is_fallback(&self) -> bool {
        self.fallback_reason.is_some()
    }
}

/// Cast a reading for `moment` and interpret it.
///
/// Interpreter failures are logged and replaced by [`Analysis::fallback`];
/// the reading is returned unchanged either way.
pub fn divine<I: Interpreter + ?Sized>(moment: NaiveDateTime, interpreter: &I) -> Divination {
    let reading = compute_chain(moment);
    info!(
        "cast {} -> {} ({})",
        moment.format("%Y-%m-%d %H:%M"),
        reading.result(),
        reading.values_line()
    );

    let (analysis, fallback_reason) = match interpreter.interpret(&reading) {
        Ok(analysis) => (analysis, None),
        Err(e) => {
            warn!("interpreter `{}` failed: {e}", interpreter.name());
            (Analysis::fallback(), Some(e.to_string()))
        }
    };

    Divination {
        reading,
        analysis,
        interpreter: interpreter.name().to_string(),
        fallback_reason,
    }
}

/// Cast a reading for the time source's current moment and interpret it.
pub fn divine_now<I: Interpreter + ?Sized>(clock: &dyn TimeSource, interpreter: &I) -> Divination {
    divine(clock.now(), interpreter)
}
