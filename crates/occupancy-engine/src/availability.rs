//! Multi-schedule availability merging.
//!
//! Accepts N schedules (one per person or calendar) for a single date and folds
//! their busy time into one day occupancy. The free slots of the merged day are
//! the times when everyone is free.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::day::DayOccupancy;
use crate::error::Result;
use crate::events::BusyRange;
use crate::slots::{find_busy_slots, find_free_slots, Slot};

/// Busy time of one participant on the analyzed date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    /// Opaque label for the schedule (e.g., "alice", "room-12").
    pub owner: String,
    #[serde(default)]
    pub busy: Vec<BusyRange>,
}

impl Schedule {
    /// This schedule's occupancy of `date`.
    pub fn occupancy_on(&self, date: NaiveDate) -> Result<DayOccupancy> {
        let mut day = DayOccupancy::empty(date);
        for range in &self.busy {
            day.insert_range(range)?;
        }
        Ok(day)
    }
}

/// Unified availability after merging N schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnifiedAvailability {
    pub date: NaiveDate,
    /// Busy slots of the merged day (sorted, non-overlapping).
    pub busy: Vec<Slot>,
    /// Slots where every schedule is free.
    pub free: Vec<Slot>,
    /// Number of schedules that were merged.
    pub schedule_count: usize,
}

/// Fold every schedule's busy time into one occupancy of `date`.
pub fn merge_schedules(date: NaiveDate, schedules: &[Schedule]) -> Result<DayOccupancy> {
    let days = schedules
        .iter()
        .map(|schedule| schedule.occupancy_on(date))
        .collect::<Result<Vec<_>>>()?;
    let day = merge_days(&days)?.unwrap_or_else(|| DayOccupancy::empty(date));
    debug!(%date, schedules = schedules.len(), busy_minutes = day.busy_minutes(), "merged schedules");
    Ok(day)
}

/// Merge N schedules and report busy and commonly free slots for `date`.
///
/// With no schedules the whole day is a single free slot.
pub fn common_availability(date: NaiveDate, schedules: &[Schedule]) -> Result<UnifiedAvailability> {
    let day = merge_schedules(date, schedules)?;
    Ok(UnifiedAvailability {
        date,
        busy: find_busy_slots(&day),
        free: find_free_slots(&day),
        schedule_count: schedules.len(),
    })
}

/// Merge already-built days pairwise with [`DayOccupancy::merge_with`].
///
/// Returns `Ok(None)` for an empty input.
///
/// # Errors
/// Returns `OccupancyError::IncompatibleDates` at the first day whose date
/// differs from the first day's.
pub fn merge_days(days: &[DayOccupancy]) -> Result<Option<DayOccupancy>> {
    let Some((first, rest)) = days.split_first() else {
        return Ok(None);
    };
    rest.iter()
        .try_fold(first.clone(), |acc, day| acc.merge_with(day))
        .map(Some)
}
