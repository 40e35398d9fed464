// src/tests/datetime_tests.rs

//! tests for `src/data/datetime.rs`

#![allow(non_snake_case)]

use crate::data::datetime::{
    datetime_parse_entry_header,
    datetime_parse_from_str,
    datetime_to_flow_string,
    ymdhms_utc,
    DateTimeL,
    DateTimeLOpt,
    TzInterpretation,
    DATETIME_FLOW_WIDTH,
    DTP_ENTRY_HEADER,
};

use ::chrono::{Local, NaiveDate, TimeZone, Timelike};
use ::test_case::test_case;

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[test_case("2024-01-05 10:00:00.0000", Some(ymdhms_utc(2024, 1, 5, 10, 0, 0, 0)))]
#[test_case("2024-01-05 10:00:00.1000", Some(ymdhms_utc(2024, 1, 5, 10, 0, 0, 100)))]
#[test_case("1999-12-31 23:59:59.9990", Some(ymdhms_utc(1999, 12, 31, 23, 59, 59, 999)))]
#[test_case("2024-02-29 00:00:00.0000", Some(ymdhms_utc(2024, 2, 29, 0, 0, 0, 0)); "leap day")]
#[test_case("2023-02-29 00:00:00.0000", None; "not a leap day")]
#[test_case("2024-13-05 10:00:00.0000", None; "bad month")]
#[test_case("2024-01-05 25:00:00.0000", None; "bad hour")]
#[test_case("2024-01-05", None; "no time")]
#[test_case("", None; "empty")]
fn test_datetime_parse_entry_header_utc(
    data: &str,
    expect: DateTimeLOpt,
) {
    let dt = datetime_parse_entry_header(data, TzInterpretation::Utc);
    assert_eq!(dt, expect, "datetime_parse_entry_header({:?})", data);
}

#[test]
fn test_datetime_parse_entry_header_utc_fraction() {
    let dt: DateTimeL = datetime_parse_entry_header("2024-01-05 10:00:00.1234", TzInterpretation::Utc).unwrap();
    assert_eq!(dt.nanosecond(), 123_400_000);
    assert_eq!(dt.offset().local_minus_utc(), 0);
}

#[test]
fn test_datetime_parse_entry_header_local() {
    // a time not near a daylight savings transition in any timezone
    let data = "2024-01-05 10:00:00.0000";
    let dt: DateTimeL = datetime_parse_entry_header(data, TzInterpretation::Local).unwrap();
    let naive = NaiveDate::from_ymd_opt(2024, 1, 5)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap();
    assert_eq!(dt.naive_local(), naive);
    let offset_local = *Local.from_local_datetime(&naive).earliest().unwrap().offset();
    assert_eq!(dt.offset(), &offset_local);
}

#[test]
fn test_datetime_parse_from_str_pattern() {
    let dt = datetime_parse_from_str("2024-01-05 10:00:00.5", DTP_ENTRY_HEADER, TzInterpretation::Utc);
    assert_eq!(dt, Some(ymdhms_utc(2024, 1, 5, 10, 0, 0, 500)));
}

#[test_case(ymdhms_utc(2024, 1, 5, 10, 0, 0, 0), "10:00:00.0000 +00:00")]
#[test_case(ymdhms_utc(2024, 1, 5, 10, 0, 0, 100), "10:00:00.1000 +00:00")]
#[test_case(ymdhms_utc(2024, 1, 5, 23, 59, 59, 999), "23:59:59.9990 +00:00")]
fn test_datetime_to_flow_string(
    dt: DateTimeL,
    expect: &str,
) {
    let s = datetime_to_flow_string(&dt);
    assert_eq!(s, expect);
    assert_eq!(s.len(), DATETIME_FLOW_WIDTH);
}

#[test]
fn test_datetime_to_flow_string_truncates() {
    let dt: DateTimeL = datetime_parse_from_str("2024-01-05 10:00:00.123456", DTP_ENTRY_HEADER, TzInterpretation::Utc).unwrap();
    assert_eq!(datetime_to_flow_string(&dt), "10:00:00.1234 +00:00");
}

#[test]
fn test_datetime_to_flow_string_offset() {
    let dt: DateTimeL = ymdhms_utc(2024, 1, 5, 10, 0, 0, 0)
        .with_timezone(&::chrono::FixedOffset::west_opt(5 * 3600).unwrap());
    assert_eq!(datetime_to_flow_string(&dt), "05:00:00.0000 -05:00");
}

#[test]
fn test_TzInterpretation_default_is_utc() {
    assert_eq!(TzInterpretation::default(), TzInterpretation::Utc);
}
