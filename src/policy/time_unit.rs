//! Time units for cache windows and caller-side age computation

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

use crate::policy::error::TimeUnitError;

const MILLIS_PER_SECOND: i64 = 1_000;
const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Unit of a cache window passed to `cache_for`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(try_from = "String")]
pub enum TimeUnit {
    Milliseconds,
    Seconds,
    Minutes,
    Hours,
    Days,
}

impl TimeUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeUnit::Milliseconds => "milliseconds",
            TimeUnit::Seconds => "seconds",
            TimeUnit::Minutes => "minutes",
            TimeUnit::Hours => "hours",
            TimeUnit::Days => "days",
        }
    }

    fn millis_per_unit(&self) -> i64 {
        match self {
            TimeUnit::Milliseconds => 1,
            TimeUnit::Seconds => MILLIS_PER_SECOND,
            TimeUnit::Minutes => MILLIS_PER_MINUTE,
            TimeUnit::Hours => MILLIS_PER_HOUR,
            TimeUnit::Days => MILLIS_PER_DAY,
        }
    }

    /// Convert `value` of this unit to milliseconds.
    ///
    /// Integer arithmetic only; results beyond the `i64` range saturate.
    pub fn to_millis(&self, value: i64) -> i64 {
        value.saturating_mul(self.millis_per_unit())
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = TimeUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ms" | "millisecond" | "milliseconds" => Ok(TimeUnit::Milliseconds),
            "s" | "second" | "seconds" => Ok(TimeUnit::Seconds),
            "m" | "minute" | "minutes" => Ok(TimeUnit::Minutes),
            "h" | "hour" | "hours" => Ok(TimeUnit::Hours),
            "d" | "day" | "days" => Ok(TimeUnit::Days),
            _ => Err(TimeUnitError::Unknown(s.to_string())),
        }
    }
}

impl TryFrom<String> for TimeUnit {
    type Error = TimeUnitError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Milliseconds elapsed between a cache entry's timestamp and `now`.
///
/// Negative when the entry claims to come from the future; the policy
/// compares the value as-is.
pub fn age_millis(cached_at: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - cached_at).num_milliseconds()
}
