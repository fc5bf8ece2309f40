//! Contiguous free/busy slots reconstructed from a day readout.
//!
//! Each transition minute starts a new interval that runs until the next
//! transition or the end of the day (minute 1440). The interval before the
//! first transition takes the readout's initial state.

use serde::Serialize;
use std::fmt;

use crate::day::{DayOccupancy, DayReadout};
use crate::state::Occupancy;

/// Minutes in a day; the exclusive end of the last slot.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A contiguous run of minutes sharing one state.
/// Built only from a [`DayReadout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Slot {
    /// First minute of the slot (minute of day).
    pub start_minute: u16,
    /// Minute after the last minute of the slot; 1440 for end of day.
    pub end_minute: u16,
    pub state: Occupancy,
    pub duration_minutes: u16,
}

impl Slot {
    fn new(start_minute: u16, end_minute: u16, state: Occupancy) -> Self {
        Self {
            start_minute,
            end_minute,
            state,
            duration_minutes: end_minute - start_minute,
        }
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{} {}",
            format_minute_of_day(self.start_minute),
            format_minute_of_day(self.end_minute),
            self.state
        )
    }
}

/// `HH:MM` for a minute of the day; 1440 renders as `24:00`.
pub fn format_minute_of_day(minute: u16) -> String {
    format!("{:02}:{:02}", minute / 60, minute % 60)
}

impl DayReadout {
    /// Slots covering the whole day, in order, alternating in state.
    pub fn slots(&self) -> Vec<Slot> {
        let mut slots = Vec::new();
        let mut cursor = 0;
        let mut state = self.initial;

        for transition in self.minutes_of_day() {
            // A transition at 00:00 only corrects the assumed initial state.
            if transition > cursor {
                slots.push(Slot::new(cursor, transition, state));
            }
            cursor = transition;
            state = state.flipped();
        }

        if cursor < MINUTES_PER_DAY {
            slots.push(Slot::new(cursor, MINUTES_PER_DAY, state));
        }

        slots
    }
}

/// Every free slot of `day`, sorted by start.
pub fn find_free_slots(day: &DayOccupancy) -> Vec<Slot> {
    slots_in_state(day, Occupancy::Free)
}

/// Every busy slot of `day`, sorted by start.
pub fn find_busy_slots(day: &DayOccupancy) -> Vec<Slot> {
    slots_in_state(day, Occupancy::Busy)
}

/// The first free slot of at least `min_duration_minutes`.
pub fn find_first_free_slot(day: &DayOccupancy, min_duration_minutes: u16) -> Option<Slot> {
    find_free_slots(day)
        .into_iter()
        .find(|slot| slot.duration_minutes >= min_duration_minutes)
}

fn slots_in_state(day: &DayOccupancy, state: Occupancy) -> Vec<Slot> {
    day.get_intervals(false)
        .slots()
        .into_iter()
        .filter(|slot| slot.state == state)
        .collect()
}
