use super::DateTime;
use crate::datetime::{Date, DateError, Duration, TimeOfDay};

fn date_time(
    year: i64,
    month: i64,
    day: i64,
    hour: i64,
    minute: i64,
    second: i64,
    microsecond: i64,
) -> DateTime {
    DateTime::new(year, month, day, hour, minute, second, microsecond).expect("datetime")
}

#[test]
fn adding_a_duration_carries_into_the_next_year() {
    let base = date_time(2017, 12, 31, 23, 59, 59, 999_999);
    let tick = Duration::new(0, 0, 1).expect("duration");
    assert_eq!(
        base.add_duration(&tick).expect("add"),
        date_time(2018, 1, 1, 0, 0, 0, 0)
    );
}

#[test]
fn subtracting_a_duration_borrows_across_days() {
    let base = date_time(2016, 3, 1, 0, 0, 0, 0);
    let shift = Duration::new(0, 1, 0).expect("duration");
    assert_eq!(
        base.sub_duration(&shift).expect("sub"),
        date_time(2016, 2, 29, 23, 59, 59, 0)
    );
}

#[test]
fn difference_keeps_seconds_and_microseconds() {
    let later = date_time(2020, 1, 2, 6, 0, 0, 500);
    let earlier = date_time(2020, 1, 1, 12, 0, 0, 0);
    let delta = later.since(&earlier).expect("since");
    assert_eq!(delta, Duration::new(0, 64_800, 500).expect("duration"));

    let negative = earlier.since(&later).expect("since");
    assert_eq!(negative.days(), -1);
    assert_eq!(negative.seconds(), 21_599);
    assert_eq!(negative.microseconds(), 999_500);
}

#[test]
fn combine_and_split() {
    let date = Date::new(2017, 4, 18).expect("date");
    let time = TimeOfDay::new(9, 30, 0, 0).expect("time");
    let value = DateTime::combine(date, time);
    assert_eq!(value.date(), date);
    assert_eq!(value.time(), time);
    assert_eq!(value, date_time(2017, 4, 18, 9, 30, 0, 0));
}

#[test]
fn rejects_invalid_time_fields() {
    assert_eq!(
        DateTime::new(2017, 4, 18, 24, 0, 0, 0),
        Err(DateError::FieldOutOfRange {
            field: "hour",
            value: 24,
            min: 0,
            max: 23,
        })
    );
}

#[test]
fn replace_individual_fields() {
    let base = date_time(2017, 4, 18, 9, 30, 15, 0);
    let replaced = base
        .replace(None, None, Some(1), Some(0), None, Some(0), None)
        .expect("replace");
    assert_eq!(replaced, date_time(2017, 4, 1, 0, 30, 0, 0));
}

#[test]
fn iso_and_display_forms() {
    let value = date_time(2017, 4, 18, 9, 5, 0, 0);
    assert_eq!(value.isoformat('T'), "2017-04-18T09:05:00");
    assert_eq!(value.to_string(), "2017-04-18 09:05:00");
    let precise = date_time(2017, 4, 18, 9, 5, 0, 120);
    assert_eq!(precise.to_string(), "2017-04-18 09:05:00.000120");
    assert_eq!(
        precise.strftime("%Y%m%d-%H%M%S.%f").expect("format"),
        "20170418-090500.000120"
    );
}

#[test]
fn time_of_day_formats_against_1900() {
    let time = TimeOfDay::new(7, 8, 9, 0).expect("time");
    assert_eq!(time.to_string(), "07:08:09");
    assert_eq!(time.strftime("%H:%M %Y").expect("format"), "07:08 1900");
    assert_eq!(time.seconds_of_day(), 25_689);
}
