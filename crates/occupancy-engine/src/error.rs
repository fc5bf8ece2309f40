//! Error types for occupancy-engine operations.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OccupancyError {
    #[error("Hour {0} is out of range (expected 0-23)")]
    HourOutOfRange(u8),

    #[error("Minute {0} is out of range (expected 0-60)")]
    MinuteOutOfRange(u8),

    #[error("Bits {bits:#x} for hour {hour} set minutes beyond 59")]
    BitsOutOfRange { hour: u8, bits: u64 },

    #[error("Incompatible hours: {found} and {expected}")]
    IncompatibleHour { expected: u8, found: u8 },

    #[error("Hour {found} found where hour {position} is expected")]
    MisorderedHours { position: usize, found: u8 },

    #[error("Expected 24 hour masks, got {0}")]
    WrongHourCount(usize),

    #[error("Incompatible dates: {left} and {right}")]
    IncompatibleDates { left: NaiveDate, right: NaiveDate },

    #[error("Invalid wall-clock time: {0}")]
    InvalidTime(String),

    #[error("Invalid time range: {start} to {end}")]
    InvalidRange { start: String, end: String },

    #[error("Unknown lesson type: {0}")]
    UnknownLessonType(String),
}

pub type Result<T> = std::result::Result<T, OccupancyError>;
