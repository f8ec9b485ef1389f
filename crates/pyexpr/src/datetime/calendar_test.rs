use super::{
    carry_fields, date_to_ordinal, days_before_year, days_in_month, is_leap_year,
    ordinal_to_date, weekday_of_ordinal, CalendarFields, MAX_ORDINAL,
};
use crate::datetime::DateError;

fn fields(year: i64, month: i64, day: i64) -> CalendarFields {
    CalendarFields {
        year,
        month,
        day,
        ..CalendarFields::default()
    }
}

#[test]
fn leap_year_rule_handles_centuries() {
    assert!(is_leap_year(2012));
    assert!(!is_leap_year(2013));
    assert!(!is_leap_year(1900));
    assert!(is_leap_year(2000));
    assert!(!is_leap_year(2100));
}

#[test]
fn february_length_follows_leap_years() {
    assert_eq!(days_in_month(2012, 2), 29);
    assert_eq!(days_in_month(2013, 2), 28);
    assert_eq!(days_in_month(2013, 12), 31);
    assert_eq!(days_in_month(2013, 4), 30);
}

#[test]
fn ordinal_anchors_match_python() {
    assert_eq!(date_to_ordinal(1, 1, 1), 1);
    assert_eq!(date_to_ordinal(9999, 12, 31), MAX_ORDINAL);
    assert_eq!(date_to_ordinal(1970, 1, 1), 719_163);
    assert_eq!(date_to_ordinal(2000, 3, 1), 730_180);
    assert_eq!(days_before_year(2), 365);
}

#[test]
fn ordinal_to_date_handles_cycle_boundaries() {
    // 400-year and 4-year cycle ends land on December 31st.
    assert_eq!(ordinal_to_date(date_to_ordinal(2000, 12, 31)), (2000, 12, 31));
    assert_eq!(ordinal_to_date(date_to_ordinal(2004, 12, 31)), (2004, 12, 31));
    assert_eq!(ordinal_to_date(date_to_ordinal(1600, 12, 31)), (1600, 12, 31));
    assert_eq!(ordinal_to_date(date_to_ordinal(2001, 1, 1)), (2001, 1, 1));
    assert_eq!(ordinal_to_date(date_to_ordinal(2012, 2, 29)), (2012, 2, 29));
    assert_eq!(ordinal_to_date(date_to_ordinal(1900, 3, 1)), (1900, 3, 1));
}

#[test]
fn ordinal_conversion_is_an_exact_inverse() {
    let mut ordinal = 1;
    while ordinal <= MAX_ORDINAL {
        let (year, month, day) = ordinal_to_date(ordinal);
        assert_eq!(date_to_ordinal(year, month, day), ordinal, "ordinal {ordinal}");
        ordinal += 97;
    }
    for ordinal in MAX_ORDINAL - 800..=MAX_ORDINAL {
        let (year, month, day) = ordinal_to_date(ordinal);
        assert_eq!(date_to_ordinal(year, month, day), ordinal);
    }
}

#[test]
fn weekday_counts_from_monday() {
    // 2017-04-18 was a Tuesday.
    assert_eq!(weekday_of_ordinal(date_to_ordinal(2017, 4, 18)), 1);
    // 0001-01-01 was a Monday.
    assert_eq!(weekday_of_ordinal(1), 0);
}

#[test]
fn carry_resolves_day_zero_to_previous_month_end() {
    assert_eq!(carry_fields(fields(2012, 3, 0)).expect("carry"), fields(2012, 2, 29));
    assert_eq!(carry_fields(fields(2013, 3, 0)).expect("carry"), fields(2013, 2, 28));
    assert_eq!(carry_fields(fields(2013, 1, 0)).expect("carry"), fields(2012, 12, 31));
}

#[test]
fn carry_moves_months_into_years_both_ways() {
    assert_eq!(carry_fields(fields(2013, 13, 1)).expect("carry"), fields(2014, 1, 1));
    assert_eq!(carry_fields(fields(2013, 0, 1)).expect("carry"), fields(2012, 12, 1));
    assert_eq!(carry_fields(fields(2013, -11, 1)).expect("carry"), fields(2012, 1, 1));
    assert_eq!(carry_fields(fields(2013, 25, 1)).expect("carry"), fields(2015, 1, 1));
}

#[test]
fn carry_floors_negative_time_fields() {
    let carried = carry_fields(CalendarFields {
        microsecond: -1,
        ..fields(2013, 1, 1)
    })
    .expect("carry");
    assert_eq!(
        carried,
        CalendarFields {
            year: 2012,
            month: 12,
            day: 31,
            hour: 23,
            minute: 59,
            second: 59,
            microsecond: 999_999,
        }
    );
}

#[test]
fn carry_is_idempotent_on_normalized_fields() {
    let normalized = CalendarFields {
        year: 2017,
        month: 4,
        day: 18,
        hour: 9,
        minute: 30,
        second: 15,
        microsecond: 42,
    };
    assert_eq!(carry_fields(normalized).expect("carry"), normalized);
}

#[test]
fn carry_rejects_years_outside_calendar() {
    assert_eq!(carry_fields(fields(9999, 12, 32)), Err(DateError::Overflow));
    assert_eq!(carry_fields(fields(1, 1, 0)), Err(DateError::Overflow));
    assert_eq!(carry_fields(fields(10_000, 1, 1)), Err(DateError::Overflow));
}
