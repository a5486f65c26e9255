//! Named time-of-day bands used by the departure filter.

use std::fmt;
use std::ops::Range;
use std::str::FromStr;

use super::ClockTime;

/// Error returned when a slot name is not recognised.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown departure slot: {0:?}")]
pub struct InvalidSlot(pub String);

/// A named band of departure hours.
///
/// The four bands partition the day; every hour belongs to exactly one.
///
/// ```
/// use travel_search::domain::{ClockTime, DepartureSlot};
///
/// let t = ClockTime::parse_hhmm("11:59").unwrap();
/// assert_eq!(DepartureSlot::of(t), DepartureSlot::Morning);
///
/// let slot: DepartureSlot = "night".parse().unwrap();
/// assert!(slot.contains(ClockTime::parse_hhmm("05:59").unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DepartureSlot {
    /// 06:00 to 11:59
    Morning,
    /// 12:00 to 17:59
    Afternoon,
    /// 18:00 to 23:59
    Evening,
    /// 00:00 to 05:59
    Night,
}

impl DepartureSlot {
    pub const ALL: [DepartureSlot; 4] = [
        DepartureSlot::Morning,
        DepartureSlot::Afternoon,
        DepartureSlot::Evening,
        DepartureSlot::Night,
    ];

    /// Wire name of the slot.
    pub fn as_str(&self) -> &'static str {
        match self {
            DepartureSlot::Morning => "morning",
            DepartureSlot::Afternoon => "afternoon",
            DepartureSlot::Evening => "evening",
            DepartureSlot::Night => "night",
        }
    }

    /// Half-open range of hours covered by the slot.
    pub fn hours(&self) -> Range<u32> {
        match self {
            DepartureSlot::Morning => 6..12,
            DepartureSlot::Afternoon => 12..18,
            DepartureSlot::Evening => 18..24,
            DepartureSlot::Night => 0..6,
        }
    }

    pub fn contains(&self, time: ClockTime) -> bool {
        self.hours().contains(&time.hour())
    }

    /// The slot a given time falls into.
    pub fn of(time: ClockTime) -> Self {
        match time.hour() {
            6..=11 => DepartureSlot::Morning,
            12..=17 => DepartureSlot::Afternoon,
            18..=23 => DepartureSlot::Evening,
            _ => DepartureSlot::Night,
        }
    }
}

impl FromStr for DepartureSlot {
    type Err = InvalidSlot;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "morning" => Ok(DepartureSlot::Morning),
            "afternoon" => Ok(DepartureSlot::Afternoon),
            "evening" => Ok(DepartureSlot::Evening),
            "night" => Ok(DepartureSlot::Night),
            _ => Err(InvalidSlot(s.to_string())),
        }
    }
}

impl fmt::Display for DepartureSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Every time of day belongs to exactly one slot, and `of` names it.
        #[test]
        fn slots_partition_the_day(hour in 0u32..24, minute in 0u32..60) {
            let time = ClockTime::from_hm(hour, minute).unwrap();
            let containing: Vec<_> = DepartureSlot::ALL
                .into_iter()
                .filter(|s| s.contains(time))
                .collect();
            prop_assert_eq!(containing, vec![DepartureSlot::of(time)]);
        }
    }
}
