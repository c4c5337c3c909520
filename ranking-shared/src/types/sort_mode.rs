use chrono::Duration;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::TypeError;

/// Ranking function selected by the caller.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortMode {
    #[default]
    Hot,
    New,
    Top,
    Rising,
    Controversial,
}

impl SortMode {
    /// Parses an optional query value, falling back to `Hot` when it is
    /// missing or not recognised.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for SortMode {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hot" => Ok(SortMode::Hot),
            "new" => Ok(SortMode::New),
            "top" => Ok(SortMode::Top),
            "rising" => Ok(SortMode::Rising),
            "controversial" => Ok(SortMode::Controversial),
            _ => Err(TypeError::InvalidSortMode(s.to_string())),
        }
    }
}

impl fmt::Display for SortMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SortMode::Hot => "hot",
            SortMode::New => "new",
            SortMode::Top => "top",
            SortMode::Rising => "rising",
            SortMode::Controversial => "controversial",
        };
        f.write_str(name)
    }
}

/// Look-back window for the `top` ranking.
///
/// Month and year are fixed 30 and 365 day spans, not calendar-aware.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum TimeWindow {
    Hour,
    Day,
    Week,
    Month,
    Year,
    #[default]
    All,
}

impl TimeWindow {
    /// Window length in milliseconds, `None` for `All`.
    pub fn millis(self) -> Option<i64> {
        match self {
            TimeWindow::Hour => Some(3_600_000),
            TimeWindow::Day => Some(86_400_000),
            TimeWindow::Week => Some(604_800_000),
            TimeWindow::Month => Some(2_592_000_000),
            TimeWindow::Year => Some(31_536_000_000),
            TimeWindow::All => None,
        }
    }

    pub fn duration(self) -> Option<Duration> {
        self.millis().map(Duration::milliseconds)
    }

    /// Parses an optional query value, falling back to `All`.
    pub fn parse_or_default(value: Option<&str>) -> Self {
        value.and_then(|v| v.parse().ok()).unwrap_or_default()
    }
}

impl FromStr for TimeWindow {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hour" => Ok(TimeWindow::Hour),
            "day" => Ok(TimeWindow::Day),
            "week" => Ok(TimeWindow::Week),
            "month" => Ok(TimeWindow::Month),
            "year" => Ok(TimeWindow::Year),
            "all" => Ok(TimeWindow::All),
            _ => Err(TypeError::InvalidTimeWindow(s.to_string())),
        }
    }
}
