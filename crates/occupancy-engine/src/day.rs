//! Minute-level occupancy of a whole calendar day.
//!
//! A [`DayOccupancy`] owns exactly 24 [`HourOccupancy`] masks, one per clock
//! hour, in order. Busy time is folded in hour by hour; the day is read back as
//! a single chain of transition minutes where each hour's terminal state seeds
//! the next hour's readout.

use std::borrow::Borrow;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::error::{OccupancyError, Result};
use crate::events::BusyRange;
use crate::hour::{HourOccupancy, HOURS_PER_DAY};
use crate::lesson::Lesson;
use crate::state::Occupancy;

/// Occupancy of one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayOccupancy {
    date: NaiveDate,
    hours: [HourOccupancy; HOURS_PER_DAY],
}

/// Transition minutes of one hour within a [`DayReadout`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HourTransitions {
    pub hour: u8,
    pub minutes: Vec<u8>,
}

/// Full-day transition readout produced by [`DayOccupancy::get_intervals`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayReadout {
    /// State assumed for the virtual minute before 00:00.
    pub initial: Occupancy,
    /// All 24 hours in order, each with its transition minutes.
    pub hours: Vec<HourTransitions>,
    /// State of 23:59.
    pub terminal: Occupancy,
}

impl DayReadout {
    /// Transitions as minutes of the day (`hour * 60 + minute`), in order.
    pub fn minutes_of_day(&self) -> Vec<u16> {
        self.hours
            .iter()
            .flat_map(|h| {
                let base = u16::from(h.hour) * 60;
                h.minutes.iter().map(move |&m| base + u16::from(m))
            })
            .collect()
    }
}

impl DayOccupancy {
    /// A fresh all-free day. Every call builds its own 24 masks.
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            hours: std::array::from_fn(|hour| HourOccupancy::blank(hour as u8)),
        }
    }

    /// Build a day from 24 masks given in hour order.
    ///
    /// # Errors
    /// Returns `OccupancyError::WrongHourCount` unless exactly 24 masks are
    /// supplied, and `OccupancyError::MisorderedHours` if the mask at position
    /// `i` is not for hour `i`.
    pub fn new(date: NaiveDate, hour_masks: Vec<HourOccupancy>) -> Result<Self> {
        if hour_masks.len() != HOURS_PER_DAY {
            return Err(OccupancyError::WrongHourCount(hour_masks.len()));
        }
        if let Some((position, mask)) = hour_masks
            .iter()
            .enumerate()
            .find(|(i, mask)| usize::from(mask.hour()) != *i)
        {
            return Err(OccupancyError::MisorderedHours {
                position,
                found: mask.hour(),
            });
        }
        let hours = hour_masks
            .try_into()
            .map_err(|v: Vec<HourOccupancy>| OccupancyError::WrongHourCount(v.len()))?;
        Ok(Self { date, hours })
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn hours(&self) -> &[HourOccupancy; HOURS_PER_DAY] {
        &self.hours
    }

    /// The mask for `hour`, or `None` if `hour >= 24`.
    pub fn hour(&self, hour: u8) -> Option<&HourOccupancy> {
        self.hours.get(usize::from(hour))
    }

    pub fn is_free(&self) -> bool {
        self.hours.iter().all(HourOccupancy::is_free)
    }

    pub fn busy_minutes(&self) -> u32 {
        self.hours.iter().map(HourOccupancy::busy_minutes).sum()
    }

    /// A new day where each hour is the union of both operands' hour.
    ///
    /// # Errors
    /// Returns `OccupancyError::IncompatibleDates` if the dates differ.
    pub fn merge_with(&self, other: &DayOccupancy) -> Result<DayOccupancy> {
        if other.date != self.date {
            return Err(OccupancyError::IncompatibleDates {
                left: self.date,
                right: other.date,
            });
        }
        let mut merged = self.clone();
        for (mine, theirs) in merged.hours.iter_mut().zip(other.hours.iter()) {
            mine.absorb(theirs);
        }
        debug!(date = %self.date, busy_minutes = merged.busy_minutes(), "merged day occupancies");
        Ok(merged)
    }

    /// Fold each mask into the hour with the same index.
    ///
    /// Masks always carry a valid hour, so this cannot fail. The result does not
    /// depend on insertion order.
    pub fn insert_events<I>(&mut self, hour_occupancies: I)
    where
        I: IntoIterator,
        I::Item: Borrow<HourOccupancy>,
    {
        for mask in hour_occupancies {
            let mask = mask.borrow();
            self.hours[usize::from(mask.hour())].absorb(mask);
        }
    }

    /// Mark `range` busy.
    pub fn insert_range(&mut self, range: &BusyRange) -> Result<()> {
        let masks = range.hour_occupancies()?;
        self.insert_events(masks);
        Ok(())
    }

    /// Mark every lesson that runs on this date's weekday in `week` busy.
    ///
    /// All lessons are converted before any is inserted, so a lesson with an
    /// invalid time range leaves the day untouched. Returns how many lessons
    /// applied.
    pub fn insert_lessons<'a, I>(&mut self, lessons: I, week: u32) -> Result<usize>
    where
        I: IntoIterator<Item = &'a Lesson>,
    {
        let weekday = self.date.weekday();
        let mut masks = Vec::new();
        let mut applied = 0;
        for lesson in lessons.into_iter().filter(|l| l.runs_on(weekday, week)) {
            masks.extend(lesson.busy_range()?.hour_occupancies()?);
            applied += 1;
        }
        self.insert_events(masks);
        debug!(date = %self.date, week, applied, "inserted lessons");
        Ok(applied)
    }

    /// Read the whole day out as transition minutes, hour by hour.
    ///
    /// The state before 00:00 is assumed busy when
    /// `count_free_as_transition_start` is set and free otherwise, so with the
    /// flag set the first transition of a day that starts free marks the start
    /// of a free interval. Each hour's terminal state is carried into the next.
    pub fn get_intervals(&self, count_free_as_transition_start: bool) -> DayReadout {
        let initial = Occupancy::from(count_free_as_transition_start);
        let mut state = initial;
        let hours = self
            .hours
            .iter()
            .map(|mask| {
                let (minutes, terminal) = mask.readout(state);
                state = terminal;
                HourTransitions {
                    hour: mask.hour(),
                    minutes,
                }
            })
            .collect();
        DayReadout {
            initial,
            hours,
            terminal: state,
        }
    }
}
