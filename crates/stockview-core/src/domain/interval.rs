use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Serialize, Serializer};

use crate::ValidationError;

/// Provider bar unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Timespan {
    Minute,
    Hour,
}

impl Timespan {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Minute => "minute",
            Self::Hour => "hour",
        }
    }
}

impl Display for Timespan {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Bar size as embedded in the ranged aggregates path, e.g. `5/minute`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BarSize {
    pub multiplier: u32,
    pub timespan: Timespan,
}

impl BarSize {
    pub const fn new(multiplier: u32, timespan: Timespan) -> Self {
        Self {
            multiplier,
            timespan,
        }
    }
}

impl Display for BarSize {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.multiplier, self.timespan)
    }
}

/// Interval choices offered by the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntervalSelection {
    RealTime,
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
}

impl IntervalSelection {
    pub const ALL: [Self; 6] = [
        Self::RealTime,
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::RealTime => "Real-time",
            Self::OneMinute => "1 minute",
            Self::FiveMinutes => "5 minute",
            Self::FifteenMinutes => "15 minute",
            Self::ThirtyMinutes => "30 minute",
            Self::OneHour => "1 hour",
        }
    }

    pub const fn is_real_time(self) -> bool {
        matches!(self, Self::RealTime)
    }

    /// `None` for real-time, which uses the previous-close endpoint instead.
    pub const fn bar_size(self) -> Option<BarSize> {
        match self {
            Self::RealTime => None,
            Self::OneMinute => Some(BarSize::new(1, Timespan::Minute)),
            Self::FiveMinutes => Some(BarSize::new(5, Timespan::Minute)),
            Self::FifteenMinutes => Some(BarSize::new(15, Timespan::Minute)),
            Self::ThirtyMinutes => Some(BarSize::new(30, Timespan::Minute)),
            Self::OneHour => Some(BarSize::new(1, Timespan::Hour)),
        }
    }
}

impl Display for IntervalSelection {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for IntervalSelection {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl FromStr for IntervalSelection {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "real-time" | "realtime" => Ok(Self::RealTime),
            "1 minute" | "1m" => Ok(Self::OneMinute),
            "5 minute" | "5m" => Ok(Self::FiveMinutes),
            "15 minute" | "15m" => Ok(Self::FifteenMinutes),
            "30 minute" | "30m" => Ok(Self::ThirtyMinutes),
            "1 hour" | "1h" => Ok(Self::OneHour),
            _ => Err(ValidationError::InvalidInterval {
                value: value.trim().to_owned(),
            }),
        }
    }
}

/// Map a historical interval label to its provider bar size.
///
/// Real-time is not resolvable here; callers branch on it first because it
/// targets a different endpoint.
pub fn resolve_interval(label: &str) -> Result<BarSize, ValidationError> {
    label
        .parse::<IntervalSelection>()?
        .bar_size()
        .ok_or_else(|| ValidationError::InvalidInterval {
            value: label.trim().to_owned(),
        })
}
