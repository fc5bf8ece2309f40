//! Minute-level occupancy of a single clock hour.
//!
//! An hour is a 60-bit mask: bit `i` (least significant first) is minute `i`,
//! 1 meaning busy and 0 meaning free. Time runs from the low bits to the high
//! bits, so minute 0 is the LSB and minute 59 is bit 59.
//!
//! Occupancy only accumulates: masks are combined with bitwise OR and are never
//! partially cleared.

use serde::Serialize;
use tracing::trace;

use crate::error::{OccupancyError, Result};
use crate::state::Occupancy;

/// Number of minutes (and significant bits) in an hour mask.
pub const MINUTES_PER_HOUR: u8 = 60;

/// Number of hours in a day.
pub const HOURS_PER_DAY: usize = 24;

/// All 60 minute bits set.
pub const FULL_HOUR: u64 = (1 << MINUTES_PER_HOUR) - 1;

/// Occupancy bitmask for one clock hour of a day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct HourOccupancy {
    hour: u8,
    bits: u64,
}

impl HourOccupancy {
    /// An all-free mask for `hour`.
    pub fn new(hour: u8) -> Result<Self> {
        Self::from_bits(hour, 0)
    }

    /// A mask for `hour` from a raw bit pattern.
    ///
    /// # Errors
    /// Returns `OccupancyError::HourOutOfRange` if `hour >= 24` and
    /// `OccupancyError::BitsOutOfRange` if any bit above bit 59 is set.
    pub fn from_bits(hour: u8, bits: u64) -> Result<Self> {
        if usize::from(hour) >= HOURS_PER_DAY {
            return Err(OccupancyError::HourOutOfRange(hour));
        }
        if bits & !FULL_HOUR != 0 {
            return Err(OccupancyError::BitsOutOfRange { hour, bits });
        }
        Ok(Self { hour, bits })
    }

    /// A mask for `hour` with minutes `[start_minute, end_minute)` busy.
    ///
    /// `end_minute` may be 60 to cover the rest of the hour. An empty range
    /// produces an all-free mask.
    pub fn from_minutes(hour: u8, start_minute: u8, end_minute: u8) -> Result<Self> {
        if end_minute > MINUTES_PER_HOUR {
            return Err(OccupancyError::MinuteOutOfRange(end_minute));
        }
        if start_minute > end_minute {
            return Err(OccupancyError::MinuteOutOfRange(start_minute));
        }
        let bits = low_bits(end_minute) & !low_bits(start_minute);
        Self::from_bits(hour, bits)
    }

    pub fn hour(&self) -> u8 {
        self.hour
    }

    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// State of `minute`, or `None` past minute 59.
    pub fn state_at(&self, minute: u8) -> Option<Occupancy> {
        (minute < MINUTES_PER_HOUR).then(|| Occupancy::from((self.bits >> minute) & 1 == 1))
    }

    pub fn busy_minutes(&self) -> u32 {
        self.bits.count_ones()
    }

    pub fn is_free(&self) -> bool {
        self.bits == 0
    }

    pub fn is_full(&self) -> bool {
        self.bits == FULL_HOUR
    }

    /// Fold `other` into this mask (`bits |= other.bits`).
    ///
    /// # Errors
    /// Returns `OccupancyError::IncompatibleHour` when the hour indices differ;
    /// neither operand is modified in that case.
    pub fn merge(&mut self, other: &HourOccupancy) -> Result<()> {
        self.check_same_hour(other)?;
        self.absorb(other);
        Ok(())
    }

    /// Non-mutating counterpart of [`merge`](Self::merge).
    pub fn union(&self, other: &HourOccupancy) -> Result<HourOccupancy> {
        self.check_same_hour(other)?;
        Ok(Self {
            hour: self.hour,
            bits: self.bits | other.bits,
        })
    }

    /// Lazily yield the minutes at which the state flips, assuming `prev` for
    /// the virtual minute before minute 0.
    pub fn transitions(&self, prev: Occupancy) -> Transitions {
        Transitions {
            bits: self.bits,
            minute: 0,
            state: prev,
        }
    }

    /// Collect every transition minute and the state of minute 59.
    ///
    /// An hour that is uniformly in state `prev` yields no transitions and a
    /// terminal state equal to `prev`.
    pub fn readout(&self, prev: Occupancy) -> (Vec<u8>, Occupancy) {
        let mut transitions = self.transitions(prev);
        let minutes: Vec<u8> = transitions.by_ref().collect();
        let terminal = transitions.state();
        trace!(hour = self.hour, ?prev, ?minutes, ?terminal, "hour readout");
        (minutes, terminal)
    }

    fn check_same_hour(&self, other: &HourOccupancy) -> Result<()> {
        if other.hour != self.hour {
            return Err(OccupancyError::IncompatibleHour {
                expected: self.hour,
                found: other.hour,
            });
        }
        Ok(())
    }

    /// All-free mask without the range check. `hour` must be below 24.
    pub(crate) const fn blank(hour: u8) -> Self {
        Self { hour, bits: 0 }
    }

    /// OR without the hour check. Callers guarantee matching hours.
    pub(crate) fn absorb(&mut self, other: &HourOccupancy) {
        self.bits |= other.bits;
    }
}

/// Iterator over the transition minutes of an hour mask.
///
/// Created by [`HourOccupancy::transitions`].
#[derive(Debug, Clone)]
pub struct Transitions {
    bits: u64,
    minute: u8,
    state: Occupancy,
}

impl Transitions {
    /// The tracked state: the state of the last minute scanned so far. Once the
    /// iterator is exhausted this is the terminal state of the hour.
    pub fn state(&self) -> Occupancy {
        self.state
    }
}

impl Iterator for Transitions {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        while self.minute < MINUTES_PER_HOUR {
            let minute = self.minute;
            self.minute += 1;
            let bit = Occupancy::from((self.bits >> minute) & 1 == 1);
            if bit != self.state {
                self.state = bit;
                return Some(minute);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(usize::from(MINUTES_PER_HOUR - self.minute)))
    }
}

impl std::iter::FusedIterator for Transitions {}

fn low_bits(n: u8) -> u64 {
    (1u64 << n) - 1
}

