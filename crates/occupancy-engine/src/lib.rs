//! # occupancy-engine
//!
//! Minute-level day occupancy for finding common free time.
//!
//! Busy time is stored as bitmasks: one 60-bit mask per clock hour, 24 masks
//! per date. Masks from many sources merge with bitwise OR, and a day is read
//! back as the ordered list of minutes where it flips between free and busy.
//!
//! ## Modules
//!
//! - [`hour`] — `HourOccupancy`: one hour's 60-bit mask, merge and readout
//! - [`day`] — `DayOccupancy`: 24 hour masks for a date, full-day readout
//! - [`events`] — `BusyRange`: wall-clock busy windows → hour masks
//! - [`lesson`] — Timetable lessons and modules folded into a day
//! - [`slots`] — Contiguous free/busy slots from a readout
//! - [`availability`] — Merge N schedules into common availability
//! - [`state`] — Free/busy minute state
//! - [`error`] — Error types

pub mod availability;
pub mod day;
pub mod error;
pub mod events;
pub mod hour;
pub mod lesson;
pub mod slots;
pub mod state;

pub use availability::{common_availability, merge_days, merge_schedules, Schedule, UnifiedAvailability};
pub use day::{DayOccupancy, DayReadout, HourTransitions};
pub use error::OccupancyError;
pub use events::{parse_range_end, parse_wall_clock, BusyRange};
pub use hour::HourOccupancy;
pub use lesson::{Lesson, LessonType, Module};
pub use slots::{find_first_free_slot, find_free_slots, Slot};
pub use state::Occupancy;
