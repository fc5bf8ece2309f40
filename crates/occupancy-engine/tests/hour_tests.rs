//! Tests for single-hour occupancy masks: construction, merge, union, readout.

use occupancy_engine::hour::{HourOccupancy, FULL_HOUR};
use occupancy_engine::{Occupancy, OccupancyError};

fn mask(hour: u8, bits: u64) -> HourOccupancy {
    HourOccupancy::from_bits(hour, bits).unwrap()
}

// ── Construction ────────────────────────────────────────────────────────────

#[test]
fn new_mask_is_all_free() {
    let m = HourOccupancy::new(7).unwrap();
    assert_eq!(m.hour(), 7);
    assert_eq!(m.bits(), 0);
    assert!(m.is_free());
    assert!(!m.is_full());
}

#[test]
fn hour_24_is_rejected() {
    assert_eq!(
        HourOccupancy::new(24).unwrap_err(),
        OccupancyError::HourOutOfRange(24)
    );
}

#[test]
fn bits_above_minute_59_are_rejected() {
    let err = HourOccupancy::from_bits(3, 1 << 60).unwrap_err();
    assert_eq!(
        err,
        OccupancyError::BitsOutOfRange {
            hour: 3,
            bits: 1 << 60
        }
    );
    assert!(HourOccupancy::from_bits(3, FULL_HOUR).unwrap().is_full());
}

#[test]
fn from_minutes_sets_half_open_range() {
    let m = HourOccupancy::from_minutes(9, 0, 30).unwrap();
    assert_eq!(m.bits(), 0x3FFF_FFFF);
    assert_eq!(m.busy_minutes(), 30);

    let tail = HourOccupancy::from_minutes(9, 45, 60).unwrap();
    assert_eq!(tail.state_at(44), Some(Occupancy::Free));
    assert_eq!(tail.state_at(45), Some(Occupancy::Busy));
    assert_eq!(tail.state_at(59), Some(Occupancy::Busy));
    assert_eq!(tail.state_at(60), None);

    assert!(HourOccupancy::from_minutes(9, 10, 10).unwrap().is_free());
    assert!(HourOccupancy::from_minutes(9, 0, 60).unwrap().is_full());
}

#[test]
fn from_minutes_rejects_bad_bounds() {
    assert_eq!(
        HourOccupancy::from_minutes(9, 0, 61).unwrap_err(),
        OccupancyError::MinuteOutOfRange(61)
    );
    assert_eq!(
        HourOccupancy::from_minutes(9, 20, 10).unwrap_err(),
        OccupancyError::MinuteOutOfRange(20)
    );
}

// ── Merge / union ───────────────────────────────────────────────────────────

#[test]
fn merge_ors_bits() {
    let mut a = mask(4, 0b0011);
    a.merge(&mask(4, 0b0110)).unwrap();
    assert_eq!(a.bits(), 0b0111);
}

#[test]
fn merge_with_itself_is_idempotent() {
    let original = mask(12, 0xF0F0_F0F0);
    let mut m = original;
    m.merge(&original).unwrap();
    assert_eq!(m, original);
}

#[test]
fn mismatched_hour_merge_fails_and_changes_nothing() {
    let mut six = mask(6, 0b1010);
    let five = mask(5, 0b0101);

    let err = six.merge(&five).unwrap_err();

    assert_eq!(
        err,
        OccupancyError::IncompatibleHour {
            expected: 6,
            found: 5
        }
    );
    let message = err.to_string();
    assert!(message.contains('5') && message.contains('6'), "{message}");
    assert_eq!(six.bits(), 0b1010);
    assert_eq!(five.bits(), 0b0101);
}

#[test]
fn union_is_pure() {
    let a = mask(2, 0b01);
    let b = mask(2, 0b10);
    let u = a.union(&b).unwrap();
    assert_eq!(u.bits(), 0b11);
    assert_eq!(u.hour(), 2);
    assert_eq!(a.bits(), 0b01);
    assert_eq!(b.bits(), 0b10);
}

#[test]
fn union_validates_hour_like_merge() {
    let err = mask(2, 1).union(&mask(3, 1)).unwrap_err();
    assert_eq!(
        err,
        OccupancyError::IncompatibleHour {
            expected: 2,
            found: 3
        }
    );
}

// ── Readout ─────────────────────────────────────────────────────────────────

#[test]
fn readout_of_1101_from_free() {
    // 1101: busy at 0, free at 1, busy from 2 on, then free again at 4.
    let (minutes, terminal) = mask(0, 0b1101).readout(Occupancy::Free);
    assert_eq!(minutes, vec![0, 1, 2, 4]);
    assert_eq!(terminal, Occupancy::Free);
}

#[test]
fn readout_of_first_half_hour_busy() {
    let (minutes, terminal) = mask(9, 0x3FFF_FFFF).readout(Occupancy::Free);
    assert_eq!(minutes, vec![0, 30]);
    assert_eq!(terminal, Occupancy::Free);
}

#[test]
fn uniform_hour_matching_prev_has_no_transitions() {
    assert_eq!(mask(1, 0).readout(Occupancy::Free), (vec![], Occupancy::Free));
    assert_eq!(
        mask(1, FULL_HOUR).readout(Occupancy::Busy),
        (vec![], Occupancy::Busy)
    );
}

#[test]
fn uniform_hour_against_prev_flips_at_minute_zero() {
    assert_eq!(mask(1, 0).readout(Occupancy::Busy), (vec![0], Occupancy::Free));
    assert_eq!(
        mask(1, FULL_HOUR).readout(Occupancy::Free),
        (vec![0], Occupancy::Busy)
    );
}

#[test]
fn busy_last_minute_is_terminal_busy() {
    let (minutes, terminal) = mask(1, 1 << 59).readout(Occupancy::Free);
    assert_eq!(minutes, vec![59]);
    assert_eq!(terminal, Occupancy::Busy);
}

#[test]
fn transitions_iterator_is_lazy_and_tracks_state() {
    let m = mask(0, 0b1101);
    let mut it = m.transitions(Occupancy::Free);
    assert_eq!(it.next(), Some(0));
    assert_eq!(it.state(), Occupancy::Busy);
    assert_eq!(it.next(), Some(1));
    assert_eq!(it.state(), Occupancy::Free);
    assert_eq!(it.by_ref().count(), 2);
    assert_eq!(it.state(), Occupancy::Free);
    assert_eq!(it.next(), None);
}
