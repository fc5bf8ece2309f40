//! Busy time ranges and their conversion into per-hour occupancy masks.
//!
//! A [`BusyRange`] is a half-open `[start, end)` wall-clock window on a single
//! day, at minute granularity (seconds are dropped). Bounds are kept as
//! minutes of the day so that a range can run until midnight: an end of
//! `24:00` (or `00:00`) is minute 1440. Splitting a range at hour boundaries
//! gives one [`HourOccupancy`] per touched hour, ready to be folded into a
//! [`DayOccupancy`](crate::day::DayOccupancy).

use chrono::{NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

use crate::error::{OccupancyError, Result};
use crate::hour::{HourOccupancy, MINUTES_PER_HOUR};
use crate::slots::{format_minute_of_day, MINUTES_PER_DAY};

const MINUTES: u16 = MINUTES_PER_HOUR as u16;

/// A busy window within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawRange", into = "RawRange")]
pub struct BusyRange {
    start: u16,
    end: u16,
}

#[derive(Serialize, Deserialize)]
struct RawRange {
    start: String,
    end: String,
}

impl TryFrom<RawRange> for BusyRange {
    type Error = OccupancyError;

    fn try_from(raw: RawRange) -> Result<Self> {
        BusyRange::parse(&raw.start, &raw.end)
    }
}

impl From<BusyRange> for RawRange {
    fn from(range: BusyRange) -> Self {
        RawRange {
            start: format_minute_of_day(range.start),
            end: format_minute_of_day(range.end),
        }
    }
}

impl BusyRange {
    /// A range between two wall-clock times. An `end` of `00:00` means
    /// midnight at the end of the day.
    ///
    /// # Errors
    /// Returns `OccupancyError::InvalidRange` unless `start` is at least one
    /// whole minute before `end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self> {
        Self::from_minutes(minute_of_day(start), end_minute_of_day(end))
    }

    /// A range between two minutes of the day; `end_minute` may be 1440.
    pub fn from_minutes(start_minute: u16, end_minute: u16) -> Result<Self> {
        if start_minute >= end_minute || end_minute > MINUTES_PER_DAY {
            return Err(OccupancyError::InvalidRange {
                start: format_minute_of_day(start_minute),
                end: format_minute_of_day(end_minute),
            });
        }
        Ok(Self {
            start: start_minute,
            end: end_minute,
        })
    }

    /// Parse the start with [`parse_wall_clock`] and the end with
    /// [`parse_range_end`].
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        Self::from_minutes(minute_of_day(parse_wall_clock(start)?), parse_range_end(end)?)
    }

    pub fn start_minute(&self) -> u16 {
        self.start
    }

    /// Exclusive end; 1440 for a range that runs until midnight.
    pub fn end_minute(&self) -> u16 {
        self.end
    }

    pub fn duration_minutes(&self) -> u16 {
        self.end - self.start
    }

    /// One mask per hour the range touches, in hour order.
    pub fn hour_occupancies(&self) -> Result<Vec<HourOccupancy>> {
        let (start, end) = (self.start, self.end);
        let first_hour = start / MINUTES;
        let last_hour = (end - 1) / MINUTES;

        (first_hour..=last_hour)
            .map(|hour| {
                let base = hour * MINUTES;
                let lo = start.max(base) - base;
                let hi = end.min(base + MINUTES) - base;
                HourOccupancy::from_minutes(hour as u8, lo as u8, hi as u8)
            })
            .collect()
    }
}

/// Parse a wall-clock time in `HH:MM`, `HH:MM:SS` or compact `HHMM` form.
///
/// The compact form is what timetable feeds use (`"0930"`).
pub fn parse_wall_clock(s: &str) -> Result<NaiveTime> {
    let trimmed = s.trim();
    ["%H:%M", "%H:%M:%S", "%H%M"]
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(trimmed, fmt).ok())
        .ok_or_else(|| OccupancyError::InvalidTime(s.to_string()))
}

/// Parse the exclusive end of a range as a minute of the day.
///
/// Accepts everything [`parse_wall_clock`] does, plus `24:00`/`2400`. Both
/// `24:00` and `00:00` mean midnight at the end of the day (minute 1440).
pub fn parse_range_end(s: &str) -> Result<u16> {
    if is_end_of_day(s) {
        return Ok(MINUTES_PER_DAY);
    }
    parse_wall_clock(s).map(end_minute_of_day)
}

fn is_end_of_day(s: &str) -> bool {
    matches!(s.trim(), "24:00" | "24:00:00" | "2400")
}

fn minute_of_day(t: NaiveTime) -> u16 {
    (t.hour() * 60 + t.minute()) as u16
}

fn end_minute_of_day(t: NaiveTime) -> u16 {
    match minute_of_day(t) {
        0 => MINUTES_PER_DAY,
        m => m,
    }
}

/// Serde adapter writing `HH:MM` and reading anything [`parse_wall_clock`] accepts.
pub(crate) mod hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_str(&t.format("%H:%M").to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        super::parse_wall_clock(&raw).map_err(de::Error::custom)
    }
}

/// Serde adapter for end times: `24:00`/`2400` read as midnight (`00:00`),
/// and midnight is written back as `24:00`.
pub(crate) mod end_hhmm {
    use chrono::NaiveTime;
    use serde::{de, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(t: &NaiveTime, s: S) -> Result<S::Ok, S::Error> {
        if *t == NaiveTime::MIN {
            s.serialize_str("24:00")
        } else {
            super::hhmm::serialize(t, s)
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(d)?;
        if super::is_end_of_day(&raw) {
            return Ok(NaiveTime::MIN);
        }
        super::parse_wall_clock(&raw).map_err(de::Error::custom)
    }
}
