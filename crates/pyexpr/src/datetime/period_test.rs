use super::Granularity;
use crate::datetime::{Date, DateError, DateTime};

fn date(year: i64, month: i64, day: i64) -> Date {
    Date::new(year, month, day).expect("date")
}

fn date_time(year: i64, month: i64, day: i64, hour: i64, minute: i64) -> DateTime {
    DateTime::new(year, month, day, hour, minute, 0, 0).expect("datetime")
}

fn end_time(year: i64, month: i64, day: i64, hour: i64) -> DateTime {
    DateTime::new(year, month, day, hour, 59, 59, 999_999).expect("datetime")
}

#[test]
fn parses_known_granularities() {
    assert_eq!("quarter".parse::<Granularity>(), Ok(Granularity::Quarter));
    assert_eq!("hour".parse::<Granularity>(), Ok(Granularity::Hour));
    assert!(matches!(
        "decade".parse::<Granularity>(),
        Err(DateError::InvalidGranularity { .. })
    ));
}

#[test]
fn date_periods() {
    let value = date(2024, 8, 14);
    assert_eq!(value.start_of(Granularity::Year).expect("start"), date(2024, 1, 1));
    assert_eq!(value.end_of(Granularity::Year).expect("end"), date(2024, 12, 31));
    assert_eq!(value.start_of(Granularity::Quarter).expect("start"), date(2024, 7, 1));
    assert_eq!(value.end_of(Granularity::Quarter).expect("end"), date(2024, 9, 30));
    assert_eq!(value.start_of(Granularity::Month).expect("start"), date(2024, 8, 1));
    assert_eq!(date(2024, 2, 3).end_of(Granularity::Month).expect("end"), date(2024, 2, 29));
}

#[test]
fn date_rejects_sub_month_granularities() {
    let err = date(2024, 8, 14).start_of(Granularity::Week).unwrap_err();
    assert_eq!(
        err,
        DateError::InvalidGranularity {
            granularity: "week".to_string(),
            allowed: "year, quarter or month",
        }
    );
    assert!(date(2024, 8, 14).end_of(Granularity::Hour).is_err());
}

#[test]
fn date_time_periods() {
    // 2024-08-14 was a Wednesday.
    let value = DateTime::new(2024, 8, 14, 15, 42, 7, 11).expect("datetime");
    assert_eq!(
        value.start_of(Granularity::Quarter).expect("start"),
        date_time(2024, 7, 1, 0, 0)
    );
    assert_eq!(
        value.end_of(Granularity::Quarter).expect("end"),
        end_time(2024, 9, 30, 23)
    );
    assert_eq!(
        value.start_of(Granularity::Week).expect("start"),
        date_time(2024, 8, 12, 0, 0)
    );
    assert_eq!(value.end_of(Granularity::Week).expect("end"), end_time(2024, 8, 18, 23));
    assert_eq!(
        value.start_of(Granularity::Day).expect("start"),
        date_time(2024, 8, 14, 0, 0)
    );
    assert_eq!(value.end_of(Granularity::Day).expect("end"), end_time(2024, 8, 14, 23));
    assert_eq!(
        value.start_of(Granularity::Hour).expect("start"),
        date_time(2024, 8, 14, 15, 0)
    );
    assert_eq!(value.end_of(Granularity::Hour).expect("end"), end_time(2024, 8, 14, 15));
}

#[test]
fn week_may_cross_a_month_boundary() {
    // 2024-03-01 was a Friday.
    let value = date_time(2024, 3, 1, 8, 0);
    assert_eq!(
        value.start_of(Granularity::Week).expect("start"),
        date_time(2024, 2, 26, 0, 0)
    );
    assert_eq!(value.end_of(Granularity::Week).expect("end"), end_time(2024, 3, 3, 23));
}
