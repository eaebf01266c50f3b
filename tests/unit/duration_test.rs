//! Unit tests for duration parsing.

use repflow::workouts::duration::{format_compact, parse_duration_to_seconds, parse_rest_to_seconds};

#[test]
fn test_malformed_durations_degrade_to_zero() {
    for input in ["", "abc", "1:xx:00", "::", "-5", "1:2:3:4", "00:-1:00"] {
        assert_eq!(parse_duration_to_seconds(input), 0, "input {:?}", input);
    }
}

#[test]
fn test_well_formed_durations() {
    assert_eq!(parse_duration_to_seconds("00:05:00"), 300);
    assert_eq!(parse_duration_to_seconds("01:00:01"), 3601);
    assert_eq!(parse_duration_to_seconds("2:30"), 150);
    assert_eq!(parse_duration_to_seconds(" 45 "), 45);
}

#[test]
fn test_rest_selector_values() {
    assert_eq!(parse_rest_to_seconds("OFF"), 0);
    assert_eq!(parse_rest_to_seconds("90s"), 90);
    assert_eq!(parse_rest_to_seconds("2min"), 120);
    assert_eq!(parse_rest_to_seconds("soon"), 0);
}

#[test]
fn test_compact_format() {
    assert_eq!(format_compact(3900), "1h 5min");
    assert_eq!(format_compact(150), "2min 30s");
    assert_eq!(format_compact(45), "45s");
}
