use super::Date;
use crate::datetime::{DateError, Duration};

fn date(year: i64, month: i64, day: i64) -> Date {
    Date::new(year, month, day).expect("date")
}

#[test]
fn subtracting_a_day_from_march_first_respects_leap_years() {
    let one_day = Duration::from_days(1).expect("duration");
    assert_eq!(
        date(2012, 3, 1).sub_duration(&one_day).expect("sub"),
        date(2012, 2, 29)
    );
    assert_eq!(
        date(2013, 3, 1).sub_duration(&one_day).expect("sub"),
        date(2013, 2, 28)
    );
}

#[test]
fn rejects_out_of_range_fields() {
    assert_eq!(
        Date::new(2017, 2, 29),
        Err(DateError::FieldOutOfRange {
            field: "day",
            value: 29,
            min: 1,
            max: 28,
        })
    );
    assert!(Date::new(2017, 13, 1).is_err());
    assert!(Date::new(0, 1, 1).is_err());
    assert!(Date::new(10_000, 1, 1).is_err());
}

#[test]
fn ordinal_and_weekday_match_python() {
    assert_eq!(date(1, 1, 1).to_ordinal(), 1);
    assert_eq!(date(2017, 4, 18).to_ordinal(), 736_437);
    assert_eq!(Date::from_ordinal(736_437).expect("date"), date(2017, 4, 18));
    // 2017-04-18 was a Tuesday.
    assert_eq!(date(2017, 4, 18).weekday(), 1);
    assert_eq!(date(2017, 4, 18).isoweekday(), 2);
    assert!(Date::from_ordinal(0).is_err());
}

#[test]
fn shifting_past_the_calendar_limits_overflows() {
    let one_day = Duration::from_days(1).expect("duration");
    assert_eq!(
        date(9999, 12, 31).add_duration(&one_day),
        Err(DateError::Overflow)
    );
    assert_eq!(date(1, 1, 1).sub_duration(&one_day), Err(DateError::Overflow));
}

#[test]
fn time_part_of_a_duration_is_ignored() {
    let shift = Duration::new(1, 86_399, 0).expect("duration");
    assert_eq!(date(2020, 1, 1).add_duration(&shift).expect("add"), date(2020, 1, 2));
}

#[test]
fn difference_is_whole_days() {
    let delta = date(2020, 3, 1).since(&date(2020, 2, 1)).expect("since");
    assert_eq!(delta.days(), 29);
    assert_eq!(delta.seconds(), 0);
}

#[test]
fn replace_validates_the_result() {
    let base = date(2020, 1, 31);
    assert_eq!(
        base.replace(None, Some(3), None).expect("replace"),
        date(2020, 3, 31)
    );
    assert!(base.replace(None, Some(2), None).is_err());
}

#[test]
fn quarter_and_formatting() {
    assert_eq!(date(2020, 1, 1).quarter(), 1);
    assert_eq!(date(2020, 6, 30).quarter(), 2);
    assert_eq!(date(2020, 12, 31).quarter(), 4);
    assert_eq!(date(5, 7, 9).isoformat(), "0005-07-09");
    assert_eq!(date(2020, 7, 9).to_string(), "2020-07-09");
    assert_eq!(date(2020, 7, 9).strftime("%d/%m %H").expect("format"), "09/07 00");
}
