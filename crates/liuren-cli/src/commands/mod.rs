pub mod branches;
pub mod cast;
pub mod cycle;
pub mod prompt;

use chrono::NaiveDateTime;
use colored::{ColoredString, Colorize};

use liuren_core::{SixRen, SystemClock, TimeSource, Tint, parse_moment};

/// Parse `--at`, or read the local clock when it is absent.
fn resolve_moment(at: Option<&str>) -> Result<NaiveDateTime, String> {
    match at {
        Some(s) => parse_moment(s).map_err(|e| e.to_string()),
        None => Ok(SystemClock.now()),
    }
}

/// Label a state in its display colour.
fn painted(state: SixRen) -> ColoredString {
    let label = state.label();
    match state.details().tint {
        Tint::Amber => label.yellow(),
        Tint::Slate => label.bright_black(),
        Tint::Red => label.bright_red(),
        Tint::Rose => label.red(),
        Tint::Emerald => label.green(),
        Tint::Gray => label.dimmed(),
    }
}
