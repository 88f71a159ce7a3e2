use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DAYS_PER_YEAR, MILLIS_PER_DAY, MILLIS_PER_HOUR, MILLIS_PER_MINUTE, MILLIS_PER_SECOND,
    Y2K38_EPOCH_MILLIS,
};
use crate::error::ParseError;

/// Fixed instant the countdown runs toward, in Unix epoch milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct TargetInstant(i64);

impl TargetInstant {
    pub const Y2K38: Self = Self(Y2K38_EPOCH_MILLIS);

    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    pub const fn as_millis(self) -> i64 {
        self.0
    }

    /// Milliseconds left until the target, clamped at zero.
    pub fn remaining_millis(self, now_millis: i64) -> u64 {
        (i128::from(self.0) - i128::from(now_millis)).clamp(0, i128::from(u64::MAX)) as u64
    }
}

impl Default for TargetInstant {
    fn default() -> Self {
        Self::Y2K38
    }
}

/// Which segments a remaining duration is split into.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Policy {
    /// days (unbounded), hours, minutes, seconds
    #[default]
    Days,
    /// 365-day years, days, hours, minutes, seconds
    Years,
}

impl Policy {
    pub fn units(self) -> &'static [Unit] {
        match self {
            Policy::Days => &[Unit::Days, Unit::Hours, Unit::Minutes, Unit::Seconds],
            Policy::Years => &[
                Unit::Years,
                Unit::Days,
                Unit::Hours,
                Unit::Minutes,
                Unit::Seconds,
            ],
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Policy::Days => "days",
            Policy::Years => "years",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Policy {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "days" => Ok(Policy::Days),
            "years" => Ok(Policy::Years),
            _ => Err(ParseError::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    Years,
    Days,
    Hours,
    Minutes,
    Seconds,
}

impl Unit {
    /// Title-case display label.
    pub fn label(self) -> &'static str {
        match self {
            Unit::Years => "Years",
            Unit::Days => "Days",
            Unit::Hours => "Hours",
            Unit::Minutes => "Minutes",
            Unit::Seconds => "Seconds",
        }
    }

    /// Sub-day units render zero-padded to two digits; years and days never are.
    pub fn is_padded(self) -> bool {
        matches!(self, Unit::Hours | Unit::Minutes | Unit::Seconds)
    }
}

/// One labelled component of a remaining duration.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Segment {
    pub unit: Unit,
    pub value: u64,
}

/// A remaining duration split into segments under one policy, largest unit first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SegmentedDuration {
    pub policy: Policy,
    pub segments: Vec<Segment>,
}

impl SegmentedDuration {
    pub fn get(&self, unit: Unit) -> Option<u64> {
        self.segments
            .iter()
            .find(|s| s.unit == unit)
            .map(|s| s.value)
    }

    /// Whole days, expanding years back at the policy's 365-day rate.
    pub fn whole_days(&self) -> u64 {
        self.get(Unit::Years).unwrap_or(0) * DAYS_PER_YEAR + self.get(Unit::Days).unwrap_or(0)
    }

    /// Whole seconds represented by all segments together.
    pub fn whole_seconds(&self) -> u64 {
        let millis = self.whole_days() * MILLIS_PER_DAY
            + self.get(Unit::Hours).unwrap_or(0) * MILLIS_PER_HOUR
            + self.get(Unit::Minutes).unwrap_or(0) * MILLIS_PER_MINUTE
            + self.get(Unit::Seconds).unwrap_or(0) * MILLIS_PER_SECOND;
        millis / MILLIS_PER_SECOND
    }

    pub fn iter(&self) -> impl Iterator<Item = &Segment> {
        self.segments.iter()
    }
}

/// Result of sampling the countdown at one instant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum Countdown {
    Remaining(SegmentedDuration),
    Reached,
}

impl Countdown {
    pub fn is_reached(&self) -> bool {
        matches!(self, Countdown::Reached)
    }

    pub fn remaining(&self) -> Option<&SegmentedDuration> {
        match self {
            Countdown::Remaining(d) => Some(d),
            Countdown::Reached => None,
        }
    }
}

/// Sample the countdown: `Reached` once `now_millis >= target`, otherwise the
/// remaining time split according to `policy`.
pub fn decompose(target: TargetInstant, now_millis: i64, policy: Policy) -> Countdown {
    if now_millis >= target.as_millis() {
        return Countdown::Reached;
    }
    Countdown::Remaining(split_millis(target.remaining_millis(now_millis), policy))
}

/// Split a non-negative millisecond duration. Sub-second remainders are dropped.
pub fn split_millis(diff: u64, policy: Policy) -> SegmentedDuration {
    let seconds = (diff / MILLIS_PER_SECOND) % 60;
    let minutes = (diff / MILLIS_PER_MINUTE) % 60;
    let hours = (diff / MILLIS_PER_HOUR) % 24;
    let total_days = diff / MILLIS_PER_DAY;

    let mut segments = Vec::with_capacity(policy.units().len());
    match policy {
        Policy::Days => {
            segments.push(Segment {
                unit: Unit::Days,
                value: total_days,
            });
        }
        Policy::Years => {
            segments.push(Segment {
                unit: Unit::Years,
                value: total_days / DAYS_PER_YEAR,
            });
            segments.push(Segment {
                unit: Unit::Days,
                value: total_days % DAYS_PER_YEAR,
            });
        }
    }
    for (unit, value) in [
        (Unit::Hours, hours),
        (Unit::Minutes, minutes),
        (Unit::Seconds, seconds),
    ] {
        segments.push(Segment { unit, value });
    }

    SegmentedDuration { policy, segments }
}
