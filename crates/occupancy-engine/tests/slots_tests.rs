//! Tests for reconstructing contiguous slots from a day readout.

use chrono::NaiveDate;
use occupancy_engine::slots::{find_busy_slots, format_minute_of_day, MINUTES_PER_DAY};
use occupancy_engine::{find_first_free_slot, find_free_slots, BusyRange, DayOccupancy, Occupancy};

fn day_with(ranges: &[(&str, &str)]) -> DayOccupancy {
    let mut day = DayOccupancy::empty(NaiveDate::from_ymd_opt(2026, 3, 1).unwrap());
    for (start, end) in ranges {
        day.insert_range(&BusyRange::parse(start, end).unwrap())
            .unwrap();
    }
    day
}

#[test]
fn empty_day_is_one_free_slot() {
    let slots = day_with(&[]).get_intervals(false).slots();
    assert_eq!(slots.len(), 1);
    assert_eq!(slots[0].start_minute, 0);
    assert_eq!(slots[0].end_minute, MINUTES_PER_DAY);
    assert_eq!(slots[0].state, Occupancy::Free);
    assert_eq!(slots[0].duration_minutes, 1440);
}

#[test]
fn slots_do_not_depend_on_initial_assumption() {
    let day = day_with(&[("09:00", "10:00"), ("13:30", "14:00")]);
    assert_eq!(day.get_intervals(false).slots(), day.get_intervals(true).slots());
}

#[test]
fn single_event_gives_free_busy_free() {
    let slots = day_with(&[("10:00", "11:00")]).get_intervals(false).slots();
    let rendered: Vec<String> = slots.iter().map(|s| s.to_string()).collect();
    assert_eq!(
        rendered,
        vec!["00:00-10:00 free", "10:00-11:00 busy", "11:00-24:00 free"]
    );
}

#[test]
fn overlapping_events_merge_into_one_busy_slot() {
    let day = day_with(&[("10:00", "11:30"), ("11:00", "12:00")]);
    let busy = find_busy_slots(&day);
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].start_minute, 600);
    assert_eq!(busy[0].end_minute, 720);
}

#[test]
fn adjacent_events_merge() {
    let day = day_with(&[("09:00", "10:00"), ("10:00", "11:00")]);
    let busy = find_busy_slots(&day);
    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].duration_minutes, 120);
}

#[test]
fn slots_cover_the_day_and_alternate() {
    let day = day_with(&[("00:00", "01:00"), ("08:15", "09:40"), ("17:00", "23:59")]);
    let slots = day.get_intervals(false).slots();

    assert_eq!(slots.first().unwrap().start_minute, 0);
    assert_eq!(slots.last().unwrap().end_minute, MINUTES_PER_DAY);
    for pair in slots.windows(2) {
        assert_eq!(pair[0].end_minute, pair[1].start_minute);
        assert_ne!(pair[0].state, pair[1].state);
    }
    let total: u16 = slots.iter().map(|s| s.duration_minutes).sum();
    assert_eq!(total, MINUTES_PER_DAY);
    assert_eq!(slots[0].state, Occupancy::Busy);
}

#[test]
fn first_free_slot_with_minimum_duration() {
    // Free: 09:30-10:00 (30 min), 11:00-24:00
    let day = day_with(&[("00:00", "09:00"), ("09:00", "09:30"), ("10:00", "11:00")]);

    let slot = find_first_free_slot(&day, 45).unwrap();
    assert_eq!(slot.start_minute, 660);

    let short = find_first_free_slot(&day, 30).unwrap();
    assert_eq!(short.start_minute, 570);

    assert_eq!(find_free_slots(&day).len(), 2);
}

#[test]
fn no_free_slot_long_enough() {
    let day = day_with(&[("00:00", "12:00"), ("12:10", "23:59")]);
    assert!(find_first_free_slot(&day, 11).is_none());
}

#[test]
fn minute_formatting() {
    assert_eq!(format_minute_of_day(0), "00:00");
    assert_eq!(format_minute_of_day(570), "09:30");
    assert_eq!(format_minute_of_day(1440), "24:00");
}

#[test]
fn event_until_midnight_closes_the_day_busy() {
    let day = day_with(&[("09:00", "10:00"), ("22:00", "24:00")]);
    let readout = day.get_intervals(false);
    assert_eq!(readout.terminal, Occupancy::Busy);

    let slots = readout.slots();
    assert_eq!(slots.last().unwrap().to_string(), "22:00-24:00 busy");
    assert!(find_first_free_slot(&day, 12 * 60 + 1).is_none());
    assert_eq!(find_first_free_slot(&day, 12 * 60).unwrap().start_minute, 600);
}

#[test]
fn slot_serializes_with_minute_fields() {
    let slots = day_with(&[("10:00", "11:00")]).get_intervals(false).slots();
    let value = serde_json::to_value(slots[1]).unwrap();
    assert_eq!(
        value,
        serde_json::json!({
            "start_minute": 600,
            "end_minute": 660,
            "state": "busy",
            "duration_minutes": 60,
        })
    );
}
