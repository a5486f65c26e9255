//! Filter categories addressable by name.

use std::fmt;
use std::str::FromStr;

use super::error::SessionError;

/// A multi-select filter category.
///
/// Names follow the result page's query keys: `busType` for the class
/// filter and `departureTime` for the slot filter. `class` and `slot` are
/// accepted as aliases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterCategory {
    /// Bus type or cabin class.
    Class,
    /// Departure time band.
    Slot,
}

impl FilterCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterCategory::Class => "busType",
            FilterCategory::Slot => "departureTime",
        }
    }
}

impl FromStr for FilterCategory {
    type Err = SessionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "busType" | "class" => Ok(FilterCategory::Class),
            "departureTime" | "slot" => Ok(FilterCategory::Slot),
            other => Err(SessionError::InvalidArgument(format!(
                "unknown filter category: {other:?}"
            ))),
        }
    }
}

impl fmt::Display for FilterCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
