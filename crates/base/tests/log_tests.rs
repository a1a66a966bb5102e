use base::{Level, civil_from_days, format_line, format_timestamp};

#[test]
fn test_civil_from_days_epoch() {
    assert_eq!(civil_from_days(0), (1970, 1, 1));
}

#[test]
fn test_civil_from_days_leap_day() {
    // 2024-02-29 is 19782 days after the epoch
    assert_eq!(civil_from_days(19782), (2024, 2, 29));
    assert_eq!(civil_from_days(19783), (2024, 3, 1));
}

#[test]
fn test_format_timestamp_shape() {
    let ts = format_timestamp();
    // YYYY-MM-DDTHH:MM:SS
    assert_eq!(ts.len(), 19);
    assert_eq!(&ts[4..5], "-");
    assert_eq!(&ts[10..11], "T");
    assert_eq!(&ts[13..14], ":");
}

#[test]
fn test_format_line_contains_level_and_location() {
    let line = format_line(Level::Warn, "src/main.rs", 42, "camera stalled");
    assert!(line.contains("WARN"));
    assert!(line.contains("src/main.rs:42"));
    assert!(line.ends_with("] camera stalled"));
}

#[test]
fn test_level_ordering_and_parse() {
    assert!(Level::Debug < Level::Info);
    assert!(Level::Error < Level::Fatal);
    assert_eq!(Level::parse("WARNING"), Some(Level::Warn));
    assert_eq!(Level::parse("info"), Some(Level::Info));
    assert_eq!(Level::parse("verbose"), None);
}
