//! Xiao Liu Ren ("small six ren") divination for market timing.
//!
//! A local timestamp is counted around a fixed cycle of six states in three
//! steps: month, then day, then the earthly-branch hour slot. The state the
//! count lands on is the reading. An [`Interpreter`] can then turn the
//! three-step chain into a market sentiment; if it fails, the reading stands
//! and a neutral analysis is substituted.
//!
//! ```
//! use liuren_core::{SixRen, compute_chain, parse_moment};
//!
//! let reading = compute_chain(parse_moment("2024-03-05T14:00").unwrap());
//! assert_eq!(reading.chain(), [SixRen::SuXi, SixRen::DaAn, SixRen::LiuLian]);
//! ```

/// Earthly branch hour slots.
pub mod branch;
/// The Month -> Day -> Hour chain calculator.
pub mod chain;
/// The six-state cycle and its static metadata.
pub mod cycle;
/// Error types for readings.
pub mod error;
/// Timestamp parsing and time sources.
pub mod moment;
/// Interpreters that turn a reading into a market analysis.
pub mod narrative;
/// The end-to-end divination request.
pub mod workflow;

pub use branch::{EarthlyBranch, resolve_hour_slot};
pub use chain::{ChainIndices, Reading, compute_chain, compute_chain_from_parts};
pub use cycle::{Sentiment, SixRen, StateDetails, Tint};
pub use error::{ReadingError, ReadingResult};
pub use moment::{FixedClock, SystemClock, TimeSource, moment_from_parts, parse_moment};
pub use narrative::{
    Analysis, CommandConfig, CommandInterpreter, InterpretConfig, Interpreter, NarrativeError,
    NarrativeResult, RuleInterpreter, build_prompt,
};
pub use workflow::{Divination, divine, divine_now};
