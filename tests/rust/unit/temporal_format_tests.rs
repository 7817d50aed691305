//! Unit tests for temporal value stringification
//!
//! The strings are what ends up in table cells after normalization, so
//! they are pinned down exactly.

use bolt_tables::tabular::{BoltDuration, CellValue, TemporalValue};
use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};
use test_case::test_case;

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2021, 3, 4).unwrap()
}

fn nine_thirty() -> NaiveTime {
    NaiveTime::from_hms_nano_opt(9, 30, 0, 0).unwrap()
}

fn plus_one() -> FixedOffset {
    FixedOffset::east_opt(3600).unwrap()
}

#[test]
fn test_date() {
    assert_eq!(TemporalValue::Date(date()).to_string(), "2021-03-04");
}

#[test]
fn test_local_time_has_nanosecond_precision() {
    let time = NaiveTime::from_hms_nano_opt(23, 59, 1, 5).unwrap();
    assert_eq!(
        TemporalValue::LocalTime(time).to_string(),
        "23:59:01.000000005"
    );
}

#[test]
fn test_time_with_offset() {
    let value = TemporalValue::Time {
        time: nine_thirty(),
        offset: FixedOffset::west_opt(5 * 3600).unwrap(),
    };
    assert_eq!(value.to_string(), "09:30:00.000000000-05:00");
}

#[test]
fn test_local_datetime() {
    let value = TemporalValue::LocalDateTime(date().and_time(nine_thirty()));
    assert_eq!(value.to_string(), "2021-03-04T09:30:00.000000000");
}

#[test]
fn test_datetime_with_offset() {
    let dt = plus_one().with_ymd_and_hms(2021, 3, 4, 9, 30, 0).unwrap();
    assert_eq!(
        TemporalValue::DateTime(dt).to_string(),
        "2021-03-04T09:30:00.000000000+01:00"
    );
}

#[test]
fn test_datetime_with_zone_name() {
    let datetime = plus_one().with_ymd_and_hms(2021, 3, 4, 9, 30, 0).unwrap();
    let value = TemporalValue::DateTimeZoned {
        datetime,
        zone: "Europe/Paris".to_string(),
    };
    assert_eq!(
        value.to_string(),
        "2021-03-04T09:30:00.000000000+01:00[Europe/Paris]"
    );
}

#[test_case(0, 0, 0, 0, "PT0S" ; "zero")]
#[test_case(14, 3, 0, 0, "P1Y2M3D" ; "calendar parts only")]
#[test_case(0, 0, 3661, 0, "PT1H1M1S" ; "clock parts only")]
#[test_case(0, 0, 6, 500_000_000, "PT6.5S" ; "fractional seconds")]
#[test_case(0, 0, 0, 1, "PT0.000000001S" ; "single nanosecond")]
#[test_case(12, 0, 60, 0, "P1YT1M" ; "years and minutes")]
#[test_case(0, -2, 0, 0, "P-2D" ; "negative days")]
fn test_duration(months: i64, days: i64, seconds: i64, nanos: i32, expected: &str) {
    let duration = BoltDuration::new(months, days, seconds, nanos);
    assert_eq!(TemporalValue::Duration(duration).to_string(), expected);
}

#[test]
fn test_type_names() {
    let cell: CellValue = TemporalValue::Date(date()).into();
    assert_eq!(cell.type_name(), "date");
    assert_eq!(CellValue::Bytes(vec![]).type_name(), "bytes");
}
