use super::DateError;

pub const MIN_YEAR: i64 = 1;
pub const MAX_YEAR: i64 = 9999;
/// Ordinal of 9999-12-31.
pub const MAX_ORDINAL: i64 = 3_652_059;

const DAYS_IN_MONTH: [i64; 13] = [0, 31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];
const DAYS_BEFORE_MONTH: [i64; 13] = [0, 0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334];

const DAYS_IN_400_YEARS: i64 = 146_097;
const DAYS_IN_100_YEARS: i64 = 36_524;
const DAYS_IN_4_YEARS: i64 = 1_461;

// Years this far out cannot be carried back into range by any sane day
// offset, and keep the ordinal math well inside i64.
const CARRY_YEAR_LIMIT: i64 = 1_000_000_000;

pub fn is_leap_year(year: i64) -> bool {
    year.rem_euclid(4) == 0 && (year.rem_euclid(100) != 0 || year.rem_euclid(400) == 0)
}

/// Number of days in `month` (1..=12) of `year`.
pub fn days_in_month(year: i64, month: i64) -> i64 {
    debug_assert!((1..=12).contains(&month));
    if month == 2 && is_leap_year(year) {
        29
    } else {
        DAYS_IN_MONTH[month as usize]
    }
}

/// Days from 0001-01-01 up to (excluding) January 1st of `year`.
pub fn days_before_year(year: i64) -> i64 {
    let y = year - 1;
    y * 365 + y.div_euclid(4) - y.div_euclid(100) + y.div_euclid(400)
}

pub fn days_before_month(year: i64, month: i64) -> i64 {
    debug_assert!((1..=12).contains(&month));
    DAYS_BEFORE_MONTH[month as usize] + i64::from(month > 2 && is_leap_year(year))
}

/// Proleptic-Gregorian ordinal, where 0001-01-01 is day 1.
pub fn date_to_ordinal(year: i64, month: i64, day: i64) -> i64 {
    days_before_year(year) + days_before_month(year, month) + day
}

/// Exact inverse of [`date_to_ordinal`].
pub fn ordinal_to_date(ordinal: i64) -> (i64, i64, i64) {
    let mut n = ordinal - 1;
    let n400 = n.div_euclid(DAYS_IN_400_YEARS);
    n = n.rem_euclid(DAYS_IN_400_YEARS);
    let mut year = n400 * 400 + 1;

    let n100 = n / DAYS_IN_100_YEARS;
    n %= DAYS_IN_100_YEARS;
    let n4 = n / DAYS_IN_4_YEARS;
    n %= DAYS_IN_4_YEARS;
    let n1 = n / 365;
    n %= 365;

    year += n100 * 100 + n4 * 4 + n1;
    // Last day of a 4-year or 400-year cycle: the remainder points one past
    // the final year, which is December 31st of the year before.
    if n1 == 4 || n100 == 4 {
        return (year - 1, 12, 31);
    }

    let leap = n1 == 3 && (n4 != 24 || n100 == 3);
    let mut month = (n + 50) >> 5;
    let mut preceding = DAYS_BEFORE_MONTH[month as usize] + i64::from(month > 2 && leap);
    if preceding > n {
        month -= 1;
        preceding -= DAYS_IN_MONTH[month as usize] + i64::from(month == 2 && leap);
    }
    n -= preceding;
    (year, month, n + 1)
}

/// Monday is 0, Sunday is 6.
pub fn weekday_of_ordinal(ordinal: i64) -> i64 {
    (ordinal + 6).rem_euclid(7)
}

/// Broken-down calendar fields that may be out of range before
/// [`carry_fields`] runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CalendarFields {
    pub year: i64,
    pub month: i64,
    pub day: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub microsecond: i64,
}

/// Floor-carries every field into its valid range.
///
/// Overflow travels microsecond → second → minute → hour → day, months
/// carry into years, and a day outside the month is resolved through the
/// ordinal so `day = 0` lands on the last day of the previous month. Fails
/// with [`DateError::Overflow`] when the result leaves years 1..=9999.
pub fn carry_fields(fields: CalendarFields) -> Result<CalendarFields, DateError> {
    let mut out = fields;

    out.second = out
        .second
        .checked_add(out.microsecond.div_euclid(1_000_000))
        .ok_or(DateError::Overflow)?;
    out.microsecond = out.microsecond.rem_euclid(1_000_000);

    out.minute = out
        .minute
        .checked_add(out.second.div_euclid(60))
        .ok_or(DateError::Overflow)?;
    out.second = out.second.rem_euclid(60);

    out.hour = out
        .hour
        .checked_add(out.minute.div_euclid(60))
        .ok_or(DateError::Overflow)?;
    out.minute = out.minute.rem_euclid(60);

    out.day = out
        .day
        .checked_add(out.hour.div_euclid(24))
        .ok_or(DateError::Overflow)?;
    out.hour = out.hour.rem_euclid(24);

    out.year = out
        .year
        .checked_add((out.month - 1).div_euclid(12))
        .ok_or(DateError::Overflow)?;
    out.month = (out.month - 1).rem_euclid(12) + 1;

    if out.year.abs() > CARRY_YEAR_LIMIT {
        return Err(DateError::Overflow);
    }

    if out.day < 1 || out.day > days_in_month(out.year, out.month) {
        let ordinal = date_to_ordinal(out.year, out.month, 1)
            .checked_add(out.day - 1)
            .ok_or(DateError::Overflow)?;
        if !(1..=MAX_ORDINAL).contains(&ordinal) {
            return Err(DateError::Overflow);
        }
        let (year, month, day) = ordinal_to_date(ordinal);
        out.year = year;
        out.month = month;
        out.day = day;
    }

    if !(MIN_YEAR..=MAX_YEAR).contains(&out.year) {
        return Err(DateError::Overflow);
    }
    Ok(out)
}

pub(crate) fn check_range(
    field: &'static str,
    value: i64,
    min: i64,
    max: i64,
) -> Result<(), DateError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(DateError::FieldOutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

#[cfg(test)]
#[path = "calendar_test.rs"]
mod tests;
