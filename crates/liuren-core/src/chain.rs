//! The Month -> Day -> Hour chain calculator.
//!
//! Each stage continues counting around the cycle from where the previous
//! stage stopped:
//!
//! ```text
//! month_index = (month - 1) % 6
//! day_index   = (month_index + day - 1) % 6
//! final_index = (day_index + hour_slot - 1) % 6
//! ```
//!
//! The Gregorian month and day are used directly; there is no lunisolar
//! conversion.

use chrono::{Datelike, NaiveDateTime};
use log::debug;
use serde::{Deserialize, Serialize};

use crate::branch::{EarthlyBranch, resolve_hour_slot};
use crate::cycle::{CYCLE_LEN, SixRen};
use crate::error::{ReadingError, ReadingResult};

/// The three threaded cycle indices plus the hour slot that fed the last one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainIndices {
    /// Month stage index (0-5).
    pub month: usize,
    /// Day stage index (0-5).
    pub day: usize,
    /// Resolved hour branch.
    pub hour_branch: EarthlyBranch,
    /// Final index (0-5).
    pub last: usize,
}

impl ChainIndices {
    // month in 1..=12 and day >= 1 are the caller's responsibility
    fn thread(month: u32, day: u32, hour_branch: EarthlyBranch) -> Self {
        let month_idx = (month as usize - 1) % CYCLE_LEN;
        let day_idx = (month_idx + day as usize - 1) % CYCLE_LEN;
        let last = (day_idx + hour_branch.slot() as usize - 1) % CYCLE_LEN;
        debug!(
            "chain M{month} D{day} H{}: {month_idx} -> {day_idx} -> {last}",
            hour_branch.slot()
        );
        Self {
            month: month_idx,
            day: day_idx,
            hour_branch,
            last,
        }
    }

    /// The three states, in chain order.
    pub fn states(&self) -> [SixRen; 3] {
        [
            SixRen::from_index(self.month),
            SixRen::from_index(self.day),
            SixRen::from_index(self.last),
        ]
    }
}

/// Longest possible day for each month; February allows the leap day since
/// no year is given.
const MAX_DAY: [u32; 12] = [31, 29, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Compute the chain indices from raw month, day and hour values.
///
/// Fails fast on out-of-range fields instead of wrapping them. The day must
/// exist in the month (Feb 29 is accepted, Feb 30 and Apr 31 are not).
pub fn compute_chain_from_parts(month: u32, day: u32, hour: u32) -> ReadingResult<ChainIndices> {
    if !(1..=12).contains(&month) {
        return Err(ReadingError::MonthOutOfRange(month));
    }
    if !(1..=MAX_DAY[month as usize - 1]).contains(&day) {
        return Err(ReadingError::DayOutOfRange(day));
    }
    let hour_branch = resolve_hour_slot(hour)?;
    Ok(ChainIndices::thread(month, day, hour_branch))
}

/// Run the full Month -> Day -> Hour calculation for a local timestamp.
pub fn compute_chain(moment: NaiveDateTime) -> Reading {
    let indices = ChainIndices::thread(
        moment.month(),
        moment.day(),
        EarthlyBranch::from_time(&moment),
    );
    Reading::from_indices(moment, indices)
}

/// The outcome of one divination. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ReadingRecord", try_from = "ReadingRecord")]
pub struct Reading {
    moment: NaiveDateTime,
    lunar_month: u32,
    lunar_day: u32,
    hour_branch: EarthlyBranch,
    month_state: SixRen,
    day_state: SixRen,
    time_state: SixRen,
    result_index: usize,
}

impl Reading {
    fn from_indices(moment: NaiveDateTime, indices: ChainIndices) -> Self {
        let [month_state, day_state, time_state] = indices.states();
        Self {
            moment,
            lunar_month: moment.month(),
            lunar_day: moment.day(),
            hour_branch: indices.hour_branch,
            month_state,
            day_state,
            time_state,
            result_index: indices.last,
        }
    }

    /// The local timestamp the reading was cast for.
    pub fn moment(&self) -> NaiveDateTime {
        self.moment
    }

    /// Month used as the first count (Gregorian, 1-12).
    pub fn lunar_month(&self) -> u32 {
        self.lunar_month
    }

    /// Day used as the second count (Gregorian, 1-31).
    pub fn lunar_day(&self) -> u32 {
        self.lunar_day
    }

    /// The resolved hour branch.
    pub fn hour_branch(&self) -> EarthlyBranch {
        self.hour_branch
    }

    /// The hour slot number (1-12).
    pub fn hour_slot(&self) -> u32 {
        self.hour_branch.slot()
    }

    /// Root state, from the month.
    pub fn month_state(&self) -> SixRen {
        self.month_state
    }

    /// Trunk state, from month and day.
    pub fn day_state(&self) -> SixRen {
        self.day_state
    }

    /// Leaf state, from month, day and hour.
    pub fn time_state(&self) -> SixRen {
        self.time_state
    }

    /// The final outcome; same as [`Reading::time_state`].
    pub fn result(&self) -> SixRen {
        self.time_state
    }

    /// Position of [`Reading::result`] in the cycle (0-5).
    pub fn result_index(&self) -> usize {
        self.result_index
    }

    /// Month, day and hour states in order.
    pub fn chain(&self) -> [SixRen; 3] {
        [self.month_state, self.day_state, self.time_state]
    }

    /// One-line summary of the counted values, e.g. `M3 + D5 + H(Wei (Goat))`.
    pub fn values_line(&self) -> String {
        format!(
            "M{} + D{} + H({})",
            self.lunar_month, self.lunar_day, self.hour_branch
        )
    }
}

/// Wire shape of a [`Reading`].
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadingRecord {
    date: NaiveDateTime,
    lunar_month: u32,
    lunar_day: u32,
    hour_slot_label: String,
    hour_slot_index: u32,
    month_state: SixRen,
    day_state: SixRen,
    time_state: SixRen,
    result: SixRen,
    result_index: usize,
}

impl From<Reading> for ReadingRecord {
    fn from(r: Reading) -> Self {
        Self {
            date: r.moment,
            lunar_month: r.lunar_month,
            lunar_day: r.lunar_day,
            hour_slot_label: r.hour_branch.label().to_string(),
            hour_slot_index: r.hour_branch.slot(),
            month_state: r.month_state,
            day_state: r.day_state,
            time_state: r.time_state,
            result: r.time_state,
            result_index: r.result_index,
        }
    }
}

impl TryFrom<ReadingRecord> for Reading {
    type Error = ReadingError;

    fn try_from(rec: ReadingRecord) -> ReadingResult<Self> {
        let reading = compute_chain(rec.date);
        let expected = ReadingRecord::from(reading.clone());
        let matches = rec.lunar_month == expected.lunar_month
            && rec.lunar_day == expected.lunar_day
            && rec.hour_slot_index == expected.hour_slot_index
            && rec.hour_slot_label == expected.hour_slot_label
            && rec.month_state == expected.month_state
            && rec.day_state == expected.day_state
            && rec.time_state == expected.time_state
            && rec.result == expected.result
            && rec.result_index == expected.result_index;
        if !matches {
            return Err(ReadingError::Inconsistent(format!(
                "record for {} does not match its recomputed chain",
                rec.date
            )));
        }
        Ok(reading)
    }
}
