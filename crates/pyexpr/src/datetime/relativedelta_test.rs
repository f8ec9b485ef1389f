use super::{RelativeDelta, RelativeDeltaArgs, Weekday};
use crate::datetime::{Date, DateError, DateTime, Duration, Moment};

fn date(year: i64, month: i64, day: i64) -> Moment {
    Moment::Date(Date::new(year, month, day).expect("date"))
}

fn delta(args: RelativeDeltaArgs) -> RelativeDelta {
    RelativeDelta::from_args(&args).expect("relativedelta")
}

fn weekday(index: i64, n: Option<i64>) -> Weekday {
    Weekday::new(index, n).expect("weekday")
}

#[test]
fn adding_a_month_clamps_to_the_last_day() {
    let one_month = delta(RelativeDeltaArgs {
        months: 1,
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(one_month.apply(date(2018, 1, 31)).expect("apply"), date(2018, 2, 28));
    assert_eq!(one_month.apply(date(2020, 1, 31)).expect("apply"), date(2020, 2, 29));
    assert_eq!(
        date(2018, 3, 31).sub_relative(&one_month).expect("apply"),
        date(2018, 2, 28)
    );
}

#[test]
fn negative_months_borrow_a_year() {
    let back = delta(RelativeDeltaArgs {
        months: -1,
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(back.apply(date(2018, 1, 15)).expect("apply"), date(2017, 12, 15));
}

#[test]
fn relative_fields_are_normalized_with_their_sign() {
    let value = delta(RelativeDeltaArgs {
        months: 14,
        microseconds: -1_000_001,
        weeks: 2,
        days: 1,
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(value.years(), 1);
    assert_eq!(value.months(), 2);
    assert_eq!(value.days(), 15);
    assert_eq!(value.weeks(), 2);
    assert_eq!(value.seconds(), -1);
    assert_eq!(value.microseconds(), -1);
}

#[test]
fn absolute_fields_replace_before_relative_ones_add() {
    let value = delta(RelativeDeltaArgs {
        day: Some(31),
        months: 1,
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(value.apply(date(2021, 1, 10)).expect("apply"), date(2021, 2, 28));

    let pinned = delta(RelativeDeltaArgs {
        year: Some(2000),
        month: Some(2),
        day: Some(30),
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(pinned.apply(date(2021, 7, 4)).expect("apply"), date(2000, 2, 29));
}

#[test]
fn time_fields_promote_a_date() {
    let value = delta(RelativeDeltaArgs {
        hours: 1,
        ..RelativeDeltaArgs::default()
    });
    let expected = DateTime::new(2020, 5, 1, 1, 0, 0, 0).expect("datetime");
    assert_eq!(
        value.apply(date(2020, 5, 1)).expect("apply"),
        Moment::DateTime(expected)
    );

    let end_of_day = delta(RelativeDeltaArgs {
        hour: Some(23),
        minute: Some(59),
        ..RelativeDeltaArgs::default()
    });
    let expected = DateTime::new(2020, 5, 1, 23, 59, 0, 0).expect("datetime");
    assert_eq!(
        end_of_day.apply(date(2020, 5, 1)).expect("apply"),
        Moment::DateTime(expected)
    );
}

#[test]
fn weekday_anchor_moves_forward_or_back() {
    // 2017-04-18 was a Tuesday.
    let next_monday = delta(RelativeDeltaArgs {
        weekday: Some(weekday(0, None)),
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(next_monday.apply(date(2017, 4, 18)).expect("apply"), date(2017, 4, 24));

    let last_monday = delta(RelativeDeltaArgs {
        weekday: Some(weekday(0, Some(-1))),
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(last_monday.apply(date(2017, 4, 18)).expect("apply"), date(2017, 4, 17));

    let second_friday = delta(RelativeDeltaArgs {
        weekday: Some(weekday(4, Some(2))),
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(second_friday.apply(date(2017, 4, 18)).expect("apply"), date(2017, 4, 28));

    let same_day = delta(RelativeDeltaArgs {
        weekday: Some(weekday(1, None)),
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(same_day.apply(date(2017, 4, 18)).expect("apply"), date(2017, 4, 18));
}

#[test]
fn yearday_sets_month_and_day_with_leap_adjustment() {
    let value = delta(RelativeDeltaArgs {
        yearday: Some(260),
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(value.month(), Some(9));
    assert_eq!(value.day(), Some(17));
    assert_eq!(value.leapdays(), -1);
    assert_eq!(value.apply(date(2020, 1, 1)).expect("apply"), date(2020, 9, 16));
    assert_eq!(value.apply(date(2019, 1, 1)).expect("apply"), date(2019, 9, 17));

    assert!(matches!(
        RelativeDelta::from_args(&RelativeDeltaArgs {
            yearday: Some(367),
            ..RelativeDeltaArgs::default()
        }),
        Err(DateError::InvalidArgument(_))
    ));
}

#[test]
fn extreme_relative_fields_overflow_instead_of_panicking() {
    let result = RelativeDelta::from_args(&RelativeDeltaArgs {
        microseconds: i64::MIN,
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(result, Err(DateError::Overflow));

    let value = delta(RelativeDeltaArgs {
        hours: i64::MIN + 1,
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(value.hours(), (i64::MIN + 1) % 24);
}

#[test]
fn zero_absolute_date_fields_leave_the_target_unchanged() {
    let value = delta(RelativeDeltaArgs {
        year: Some(0),
        month: Some(0),
        day: Some(0),
        months: 1,
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(value.apply(date(2021, 1, 31)).expect("apply"), date(2021, 2, 28));
}

#[test]
fn weekday_rejects_zero_n() {
    assert!(matches!(
        Weekday::new(0, Some(0)),
        Err(DateError::InvalidArgument(_))
    ));
    assert_eq!(weekday(0, None), weekday(0, Some(1)));
    assert_ne!(weekday(0, Some(2)), weekday(0, Some(1)));
}

#[test]
fn combining_deltas() {
    let left = delta(RelativeDeltaArgs {
        months: 8,
        day: Some(1),
        ..RelativeDeltaArgs::default()
    });
    let right = delta(RelativeDeltaArgs {
        months: 6,
        day: Some(15),
        ..RelativeDeltaArgs::default()
    });
    let sum = left.add_delta(&right).expect("sum");
    assert_eq!(sum.years(), 1);
    assert_eq!(sum.months(), 2);
    assert_eq!(sum.day(), Some(15));

    let with_duration = left
        .add_duration(&Duration::new(1, 3_600, 0).expect("duration"))
        .expect("sum");
    assert_eq!(with_duration.days(), 1);
    assert_eq!(with_duration.hours(), 1);
    assert_eq!(with_duration.seconds(), 0);

    let doubled = left.mul_float(2.5).expect("scaled");
    assert_eq!(doubled.years(), 1);
    assert_eq!(doubled.months(), 8);
    assert_eq!(doubled.day(), Some(1));
}

#[test]
fn negation_keeps_absolute_fields() {
    let value = delta(RelativeDeltaArgs {
        years: 1,
        hours: -2,
        month: Some(3),
        ..RelativeDeltaArgs::default()
    });
    let negated = value.negate().expect("negate");
    assert_eq!(negated.years(), -1);
    assert_eq!(negated.hours(), 2);
    assert_eq!(negated.month(), Some(3));
    assert!(RelativeDelta::default().is_zero());
    assert!(!negated.is_zero());
}

#[test]
fn display_matches_dateutil_repr() {
    let value = delta(RelativeDeltaArgs {
        years: 1,
        months: -2,
        day: Some(31),
        weekday: Some(weekday(0, Some(-1))),
        hour: Some(0),
        ..RelativeDeltaArgs::default()
    });
    assert_eq!(
        value.to_string(),
        "relativedelta(years=+1, months=-2, day=31, weekday=MO(-1), hour=0)"
    );
    assert_eq!(RelativeDelta::default().to_string(), "relativedelta()");
    assert_eq!(weekday(6, None).to_string(), "SU");
}
