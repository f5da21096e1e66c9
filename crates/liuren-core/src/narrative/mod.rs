//! Narrative interpretation of a reading.
//!
//! An [`Interpreter`] turns a [`Reading`] into an [`Analysis`]. Interpreters
//! may be slow or fail; the chain itself never depends on them. See
//! [`crate::workflow::divine`] for the neutral fallback.

mod analysis;
mod command;
mod prompt;
mod rules;

use thiserror::Error;

use crate::chain::Reading;

pub use analysis::Analysis;
pub use command::{CommandConfig, CommandInterpreter, DEFAULT_TIMEOUT};
pub use prompt::{RESPONSE_SCHEMA, build_prompt};
pub use rules::{InterpretConfig, RuleInterpreter};

/// Result type for interpreter calls.
pub type NarrativeResult<T> = Result<T, NarrativeError>;

/// Reasons an interpreter can fail to produce an analysis.
#[derive(Debug, Error)]
pub enum NarrativeError {
    /// The external program could not be started.
    #[error("failed to start interpreter `{program}`: {source}")]
    Spawn {
        /// Program name.
        program: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Reading from or writing to the interpreter failed.
    #[error("interpreter i/o: {0}")]
    Io(#[from] std::io::Error),

    /// The external program exited unsuccessfully.
    #[error("interpreter exited with {status}: {stderr}")]
    ProcessFailed {
        /// Exit status description.
        status: String,
        /// Captured standard error, trimmed.
        stderr: String,
    },

    /// The interpreter did not finish within its time limit and was killed.
    #[error("interpreter timed out after {0:?}")]
    Timeout(std::time::Duration),

    /// The interpreter produced no output.
    #[error("no response from interpreter")]
    EmptyResponse,

    /// The response was not valid analysis JSON.
    #[error("malformed interpreter response: {0}")]
    MalformedResponse(#[from] serde_json::Error),

    /// The probability was not a number in 0-100.
    #[error("probability out of range: {0} (expected 0-100)")]
    ProbabilityOutOfRange(f64),
}

/// Produces a market analysis for a reading.
pub trait Interpreter {
    /// Short identifier shown alongside the analysis.
    fn name(&self) -> &str;

    /// Interpret the three-step chain.
    fn interpret(&self, reading: &Reading) -> NarrativeResult<Analysis>;
}

impl<I: Interpreter + ?Sized> Interpreter for &I {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn interpret(&self, reading: &Reading) -> NarrativeResult<Analysis> {
        (**self).interpret(reading)
    }
}

impl<I: Interpreter + ?Sized> Interpreter for Box<I> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn interpret(&self, reading: &Reading) -> NarrativeResult<Analysis> {
        (**self).interpret(reading)
    }
}
