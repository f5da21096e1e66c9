//! Earthly branch hour slots.
//!
//! The day is split into twelve two-hour windows. Slot 1 (Zi) wraps
//! midnight and covers 23:00-00:59; slot 12 (Hai) covers 21:00-22:59.

use chrono::Timelike;
use serde::{Deserialize, Serialize};

use crate::error::{ReadingError, ReadingResult};

/// One of the twelve earthly branches, used as the hour input to the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EarthlyBranch {
    /// Rat, 23:00-00:59.
    Zi,
    /// Ox, 01:00-02:59.
    Chou,
    /// Tiger, 03:00-04:59.
    Yin,
    /// Rabbit, 05:00-06:59.
    Mao,
    /// Dragon, 07:00-08:59.
    Chen,
    /// Snake, 09:00-10:59.
    Si,
    /// Horse, 11:00-12:59.
    Wu,
    /// Goat, 13:00-14:59.
    Wei,
    /// Monkey, 15:00-16:59.
    Shen,
    /// Rooster, 17:00-18:59.
    You,
    /// Dog, 19:00-20:59.
    Xu,
    /// Pig, 21:00-22:59.
    Hai,
}

const LABELS: [&str; 12] = [
    "Zi (Rat)",
    "Chou (Ox)",
    "Yin (Tiger)",
    "Mao (Rabbit)",
    "Chen (Dragon)",
    "Si (Snake)",
    "Wu (Horse)",
    "Wei (Goat)",
    "Shen (Monkey)",
    "You (Rooster)",
    "Xu (Dog)",
    "Hai (Pig)",
];

impl EarthlyBranch {
    /// All branches in slot order.
    pub const ALL: [Self; 12] = [
        Self::Zi,
        Self::Chou,
        Self::Yin,
        Self::Mao,
        Self::Chen,
        Self::Si,
        Self::Wu,
        Self::Wei,
        Self::Shen,
        Self::You,
        Self::Xu,
        Self::Hai,
    ];

    /// The branch for a 1-based slot number.
    pub fn from_slot(slot: u32) -> Option<Self> {
        let idx = slot.checked_sub(1)? as usize;
        Self::ALL.get(idx).copied()
    }

    /// The branch covering the hour of a time value.
    pub fn from_time<T: Timelike>(time: &T) -> Self {
        // chrono guarantees hour() < 24
        Self::ALL[slot_for_hour(time.hour()) as usize - 1]
    }

    /// 1-based slot number (1-12).
    pub fn slot(self) -> u32 {
        self as u32 + 1
    }

    /// Human-readable name, e.g. "Zi (Rat)".
    pub fn label(self) -> &'static str {
        LABELS[self as usize]
    }

    /// First wall-clock hour of the window.
    pub fn start_hour(self) -> u32 {
        (self as u32 * 2 + 23) % 24
    }
}

impl std::fmt::Display for EarthlyBranch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

fn slot_for_hour(hour: u32) -> u32 {
    if hour >= 23 || hour < 1 {
        return 1;
    }
    (hour + 1) / 2 + 1
}

/// Resolve a wall-clock hour (0-23) to its earthly branch.
pub fn resolve_hour_slot(hour: u32) -> ReadingResult<EarthlyBranch> {
    if hour > 23 {
        return Err(ReadingError::HourOutOfRange(hour));
    }
    Ok(EarthlyBranch::ALL[slot_for_hour(hour) as usize - 1])
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;

    #[test]
    fn slot_table() {
        let expected = [
            1, 2, 2, 3, 3, 4, 4, 5, 5, 6, 6, 7, 7, 8, 8, 9, 9, 10, 10, 11, 11, 12, 12, 1,
        ];
        for (hour, slot) in expected.iter().enumerate() {
            let b = resolve_hour_slot(hour as u32).unwrap();
            assert_eq!(b.slot(), *slot, "hour {hour}");
        }
    }

    #[test]
    fn midnight_wraps_to_zi() {
        assert_eq!(resolve_hour_slot(0).unwrap(), EarthlyBranch::Zi);
        assert_eq!(resolve_hour_slot(23).unwrap(), EarthlyBranch::Zi);
    }

    #[test]
    fn boundaries() {
        assert_eq!(resolve_hour_slot(1).unwrap().slot(), 2);
        assert_eq!(resolve_hour_slot(22).unwrap().slot(), 12);
        assert_eq!(resolve_hour_slot(14).unwrap(), EarthlyBranch::Wei);
    }

    #[test]
    fn out_of_range_rejected() {
        assert_eq!(resolve_hour_slot(24), Err(ReadingError::HourOutOfRange(24)));
        assert!(resolve_hour_slot(u32::MAX).is_err());
    }

    #[test]
    fn from_time_reads_hour_only() {
        let t = NaiveTime::from_hms_opt(23, 59, 59).unwrap();
        assert_eq!(EarthlyBranch::from_time(&t), EarthlyBranch::Zi);
        let t = NaiveTime::from_hms_opt(0, 30, 0).unwrap();
        assert_eq!(EarthlyBranch::from_time(&t), EarthlyBranch::Zi);
        let t = NaiveTime::from_hms_opt(1, 0, 0).unwrap();
        assert_eq!(EarthlyBranch::from_time(&t), EarthlyBranch::Chou);
    }

    #[test]
    fn start_hours_cover_window() {
        for b in EarthlyBranch::ALL {
            let start = b.start_hour();
            assert_eq!(resolve_hour_slot(start).unwrap(), b);
            assert_eq!(resolve_hour_slot((start + 1) % 24).unwrap(), b);
        }
        assert_eq!(EarthlyBranch::Zi.start_hour(), 23);
        assert_eq!(EarthlyBranch::Hai.start_hour(), 21);
    }

    #[test]
    fn slot_round_trip() {
        for b in EarthlyBranch::ALL {
            assert_eq!(EarthlyBranch::from_slot(b.slot()), Some(b));
        }
        assert_eq!(EarthlyBranch::from_slot(0), None);
        assert_eq!(EarthlyBranch::from_slot(13), None);
    }

    #[test]
    fn labels() {
        assert_eq!(EarthlyBranch::Zi.label(), "Zi (Rat)");
        assert_eq!(EarthlyBranch::Hai.to_string(), "Hai (Pig)");
    }
}
