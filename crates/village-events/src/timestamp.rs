//! Simulation Time
//!
//! Ticks are the only clock the behaviour core knows about. A day is
//! `TICKS_PER_DAY` ticks long and is split into named periods.
//!
//! # Example
//!
//! ```
//! use village_events::{TimeOfDay, TICKS_PER_DAY};
//!
//! assert_eq!(TimeOfDay::from_tick(1500), TimeOfDay::Morning);
//! assert_eq!(TimeOfDay::from_tick(TICKS_PER_DAY + 1500), TimeOfDay::Morning);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Number of ticks per simulated day.
pub const TICKS_PER_DAY: u64 = 24_000;

/// Returns the day index a tick falls on.
pub fn day_of(tick: u64) -> u64 {
    tick / TICKS_PER_DAY
}

/// Whole days elapsed between two ticks. Saturates at zero if `later` is earlier.
pub fn days_between(earlier: u64, later: u64) -> u64 {
    later.saturating_sub(earlier) / TICKS_PER_DAY
}

/// Named period of the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    Dawn,
    Morning,
    Noon,
    Afternoon,
    Dusk,
    Night,
    Midnight,
}

impl TimeOfDay {
    /// Maps a tick onto its period of the day.
    pub fn from_tick(tick: u64) -> Self {
        match tick % TICKS_PER_DAY {
            0..=999 => TimeOfDay::Dawn,
            1_000..=5_999 => TimeOfDay::Morning,
            6_000..=6_999 => TimeOfDay::Noon,
            7_000..=10_999 => TimeOfDay::Afternoon,
            11_000..=12_999 => TimeOfDay::Dusk,
            13_000..=22_999 => TimeOfDay::Night,
            _ => TimeOfDay::Midnight,
        }
    }

    /// Periods during which villagers are expected to work.
    pub fn is_working_hours(self) -> bool {
        matches!(self, TimeOfDay::Morning | TimeOfDay::Afternoon)
    }

    /// Stable integer code, used where a period has to live in an integer fact.
    pub fn code(self) -> i64 {
        match self {
            TimeOfDay::Dawn => 0,
            TimeOfDay::Morning => 1,
            TimeOfDay::Noon => 2,
            TimeOfDay::Afternoon => 3,
            TimeOfDay::Dusk => 4,
            TimeOfDay::Night => 5,
            TimeOfDay::Midnight => 6,
        }
    }

    /// Inverse of [`TimeOfDay::code`].
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(TimeOfDay::Dawn),
            1 => Some(TimeOfDay::Morning),
            2 => Some(TimeOfDay::Noon),
            3 => Some(TimeOfDay::Afternoon),
            4 => Some(TimeOfDay::Dusk),
            5 => Some(TimeOfDay::Night),
            6 => Some(TimeOfDay::Midnight),
            _ => None,
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TimeOfDay::Dawn => write!(f, "dawn"),
            TimeOfDay::Morning => write!(f, "morning"),
            TimeOfDay::Noon => write!(f, "noon"),
            TimeOfDay::Afternoon => write!(f, "afternoon"),
            TimeOfDay::Dusk => write!(f, "dusk"),
            TimeOfDay::Night => write!(f, "night"),
            TimeOfDay::Midnight => write!(f, "midnight"),
        }
    }
}

/// Error type for parsing a period name.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseTimeOfDayError(pub String);

impl fmt::Display for ParseTimeOfDayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time of day: '{}'", self.0)
    }
}

impl std::error::Error for ParseTimeOfDayError {}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "dawn" => Ok(TimeOfDay::Dawn),
            "morning" => Ok(TimeOfDay::Morning),
            "noon" => Ok(TimeOfDay::Noon),
            "afternoon" => Ok(TimeOfDay::Afternoon),
            "dusk" => Ok(TimeOfDay::Dusk),
            "night" => Ok(TimeOfDay::Night),
            "midnight" => Ok(TimeOfDay::Midnight),
            _ => Err(ParseTimeOfDayError(s.to_string())),
        }
    }
}
