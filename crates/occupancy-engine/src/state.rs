//! Free/busy state of a single minute.

use serde::{Deserialize, Serialize};
use std::fmt;

/// State of one minute. The discriminant is the occupancy bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Occupancy {
    #[default]
    Free = 0,
    Busy = 1,
}

impl Occupancy {
    /// The occupancy bit: 1 for busy, 0 for free.
    pub const fn bit(self) -> u64 {
        self as u64
    }

    pub const fn flipped(self) -> Self {
        match self {
            Occupancy::Free => Occupancy::Busy,
            Occupancy::Busy => Occupancy::Free,
        }
    }

    pub const fn is_busy(self) -> bool {
        matches!(self, Occupancy::Busy)
    }
}

impl From<bool> for Occupancy {
    fn from(busy: bool) -> Self {
        if busy {
            Occupancy::Busy
        } else {
            Occupancy::Free
        }
    }
}

impl fmt::Display for Occupancy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Occupancy::Free => f.write_str("free"),
            Occupancy::Busy => f.write_str("busy"),
        }
    }
}
