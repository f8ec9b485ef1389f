use super::calendar::check_range;
use super::{days_in_month, is_leap_year, DateError, Duration, Moment};
use std::fmt;

const WEEKDAY_NAMES: [&str; 7] = ["MO", "TU", "WE", "TH", "FR", "SA", "SU"];

/// Cumulative day counts at the end of each month in a non-leap year; the
/// last entry admits day 366.
const YEARDAY_MONTH_ENDS: [i64; 12] = [31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 366];

/// Weekday anchor (`MO`, `TU(+2)`, `FR(-1)`).
///
/// Without `n` the anchor means "this weekday or the next one", the same
/// as `n = +1`.
#[derive(Debug, Clone, Copy)]
pub struct Weekday {
    weekday: i64,
    n: Option<i64>,
}

impl Weekday {
    /// `MO` through `SU`, without `n`.
    pub const ANCHORS: [Weekday; 7] = [
        Weekday { weekday: 0, n: None },
        Weekday { weekday: 1, n: None },
        Weekday { weekday: 2, n: None },
        Weekday { weekday: 3, n: None },
        Weekday { weekday: 4, n: None },
        Weekday { weekday: 5, n: None },
        Weekday { weekday: 6, n: None },
    ];

    pub fn new(weekday: i64, n: Option<i64>) -> Result<Self, DateError> {
        check_range("weekday", weekday, 0, 6)?;
        if n == Some(0) {
            return Err(DateError::InvalidArgument(
                "can't create weekday with n == 0".to_string(),
            ));
        }
        Ok(Self { weekday, n })
    }

    /// Monday is 0.
    pub fn weekday(&self) -> i64 {
        self.weekday
    }

    pub fn n(&self) -> Option<i64> {
        self.n
    }

    /// Two-letter anchor name, `MO` for Monday.
    pub fn name(&self) -> &'static str {
        WEEKDAY_NAMES[self.weekday as usize]
    }

    pub fn with_n(&self, n: i64) -> Result<Self, DateError> {
        Self::new(self.weekday, Some(n))
    }

    fn nth(&self) -> i64 {
        self.n.unwrap_or(1)
    }
}

impl PartialEq for Weekday {
    fn eq(&self, other: &Self) -> bool {
        self.weekday == other.weekday && self.nth() == other.nth()
    }
}

impl Eq for Weekday {}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.name();
        match self.n {
            None => f.write_str(name),
            Some(n) => write!(f, "{name}({n:+})"),
        }
    }
}

/// Constructor arguments of [`RelativeDelta`], as accepted by dateutil's
/// `relativedelta(...)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeDeltaArgs {
    pub years: i64,
    pub months: i64,
    pub days: i64,
    pub leapdays: i64,
    pub weeks: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    pub microseconds: i64,
    pub year: Option<i64>,
    pub month: Option<i64>,
    pub day: Option<i64>,
    pub weekday: Option<Weekday>,
    pub yearday: Option<i64>,
    pub nlyearday: Option<i64>,
    pub hour: Option<i64>,
    pub minute: Option<i64>,
    pub second: Option<i64>,
    pub microsecond: Option<i64>,
}

/// Calendar-aware offset: relative fields add, absolute fields replace.
///
/// An absolute `year`, `month` or `day` of 0 leaves that field unchanged.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelativeDelta {
    years: i64,
    months: i64,
    days: i64,
    leapdays: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    microseconds: i64,
    year: Option<i64>,
    month: Option<i64>,
    day: Option<i64>,
    weekday: Option<Weekday>,
    hour: Option<i64>,
    minute: Option<i64>,
    second: Option<i64>,
    microsecond: Option<i64>,
}

impl RelativeDelta {
    pub fn from_args(args: &RelativeDeltaArgs) -> Result<Self, DateError> {
        let days = args
            .weeks
            .checked_mul(7)
            .and_then(|weeks| weeks.checked_add(args.days))
            .ok_or(DateError::Overflow)?;
        let mut delta = Self {
            years: args.years,
            months: args.months,
            days,
            leapdays: args.leapdays,
            hours: args.hours,
            minutes: args.minutes,
            seconds: args.seconds,
            microseconds: args.microseconds,
            year: args.year,
            month: args.month,
            day: args.day,
            weekday: args.weekday,
            hour: args.hour,
            minute: args.minute,
            second: args.second,
            microsecond: args.microsecond,
        };

        let yearday = match (args.nlyearday, args.yearday) {
            (Some(nlyearday), _) if nlyearday != 0 => Some(nlyearday),
            (_, Some(yearday)) if yearday != 0 => {
                if yearday > 59 {
                    delta.leapdays = -1;
                }
                Some(yearday)
            }
            _ => None,
        };
        if let Some(yearday) = yearday {
            let (month, day) = month_day_of_yearday(yearday)?;
            delta.month = Some(month);
            delta.day = Some(day);
        }

        delta.normalize()?;
        Ok(delta)
    }

    /// Moves relative fields beyond their natural range into the next
    /// larger unit, keeping each field's sign.
    fn normalize(&mut self) -> Result<(), DateError> {
        carry_signed(&mut self.microseconds, &mut self.seconds, 1_000_000)?;
        carry_signed(&mut self.seconds, &mut self.minutes, 60)?;
        carry_signed(&mut self.minutes, &mut self.hours, 60)?;
        carry_signed(&mut self.hours, &mut self.days, 24)?;
        carry_signed(&mut self.months, &mut self.years, 12)?;
        Ok(())
    }

    pub fn years(&self) -> i64 {
        self.years
    }

    pub fn months(&self) -> i64 {
        self.months
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    /// Whole weeks in `days`, truncated toward zero.
    pub fn weeks(&self) -> i64 {
        self.days / 7
    }

    pub fn leapdays(&self) -> i64 {
        self.leapdays
    }

    pub fn hours(&self) -> i64 {
        self.hours
    }

    pub fn minutes(&self) -> i64 {
        self.minutes
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn microseconds(&self) -> i64 {
        self.microseconds
    }

    pub fn year(&self) -> Option<i64> {
        self.year
    }

    pub fn month(&self) -> Option<i64> {
        self.month
    }

    pub fn day(&self) -> Option<i64> {
        self.day
    }

    pub fn weekday(&self) -> Option<Weekday> {
        self.weekday
    }

    pub fn hour(&self) -> Option<i64> {
        self.hour
    }

    pub fn minute(&self) -> Option<i64> {
        self.minute
    }

    pub fn second(&self) -> Option<i64> {
        self.second
    }

    pub fn microsecond(&self) -> Option<i64> {
        self.microsecond
    }

    /// True when applying the delta needs a time of day.
    pub fn has_time(&self) -> bool {
        self.hours != 0
            || self.minutes != 0
            || self.seconds != 0
            || self.microseconds != 0
            || self.hour.is_some()
            || self.minute.is_some()
            || self.second.is_some()
            || self.microsecond.is_some()
    }

    pub fn is_zero(&self) -> bool {
        *self == RelativeDelta::default()
    }

    /// Shifts `target`. A plain date becomes a date with time when the
    /// delta carries a time component.
    pub fn apply(&self, target: Moment) -> Result<Moment, DateError> {
        let target = match target {
            Moment::Date(date) if self.has_time() => Moment::DateTime(date.at_midnight()),
            other => other,
        };
        let base = target.to_date_time();

        let mut year = self
            .year
            .filter(|year| *year != 0)
            .unwrap_or(base.year())
            .checked_add(self.years)
            .ok_or(DateError::Overflow)?;
        let mut month = self
            .month
            .filter(|month| *month != 0)
            .unwrap_or(base.month());
        check_range("month", month, 1, 12)?;
        if self.months != 0 {
            month += self.months;
            if month > 12 {
                year = year.checked_add(1).ok_or(DateError::Overflow)?;
                month -= 12;
            } else if month < 1 {
                year = year.checked_sub(1).ok_or(DateError::Overflow)?;
                month += 12;
            }
        }
        let day = self.day.filter(|day| *day != 0).unwrap_or(base.day());
        let day = days_in_month(year, month).min(day);

        let mut days = self.days;
        if self.leapdays != 0 && month > 2 && is_leap_year(year) {
            days = days.checked_add(self.leapdays).ok_or(DateError::Overflow)?;
        }
        let shift = Duration::from_microseconds(
            i128::from(days) * 86_400_000_000
                + i128::from(self.hours) * 3_600_000_000
                + i128::from(self.minutes) * 60_000_000
                + i128::from(self.seconds) * 1_000_000
                + i128::from(self.microseconds),
        )?;

        let shifted = match target {
            Moment::Date(date) => {
                Moment::Date(date.replace(Some(year), Some(month), Some(day))?.add_duration(&shift)?)
            }
            Moment::DateTime(date_time) => Moment::DateTime(
                date_time
                    .replace(
                        Some(year),
                        Some(month),
                        Some(day),
                        self.hour,
                        self.minute,
                        self.second,
                        self.microsecond,
                    )?
                    .add_duration(&shift)?,
            ),
        };

        match self.weekday {
            Some(anchor) => jump_to_weekday(shifted, anchor),
            None => Ok(shifted),
        }
    }

    /// Flips the relative fields; absolute fields, `leapdays` and the
    /// weekday anchor are kept.
    pub fn negate(&self) -> Result<Self, DateError> {
        let flip = |value: i64| value.checked_neg().ok_or(DateError::Overflow);
        Ok(Self {
            years: flip(self.years)?,
            months: flip(self.months)?,
            days: flip(self.days)?,
            hours: flip(self.hours)?,
            minutes: flip(self.minutes)?,
            seconds: flip(self.seconds)?,
            microseconds: flip(self.microseconds)?,
            ..*self
        })
    }

    /// Field-wise sum; absolute fields of `other` win when set.
    pub fn add_delta(&self, other: &RelativeDelta) -> Result<Self, DateError> {
        let sum = |left: i64, right: i64| left.checked_add(right).ok_or(DateError::Overflow);
        let mut delta = Self {
            years: sum(self.years, other.years)?,
            months: sum(self.months, other.months)?,
            days: sum(self.days, other.days)?,
            leapdays: if other.leapdays != 0 {
                other.leapdays
            } else {
                self.leapdays
            },
            hours: sum(self.hours, other.hours)?,
            minutes: sum(self.minutes, other.minutes)?,
            seconds: sum(self.seconds, other.seconds)?,
            microseconds: sum(self.microseconds, other.microseconds)?,
            year: other.year.or(self.year),
            month: other.month.or(self.month),
            day: other.day.or(self.day),
            weekday: other.weekday.or(self.weekday),
            hour: other.hour.or(self.hour),
            minute: other.minute.or(self.minute),
            second: other.second.or(self.second),
            microsecond: other.microsecond.or(self.microsecond),
        };
        delta.normalize()?;
        Ok(delta)
    }

    pub fn add_duration(&self, duration: &Duration) -> Result<Self, DateError> {
        let sum = |left: i64, right: i64| left.checked_add(right).ok_or(DateError::Overflow);
        let mut delta = Self {
            days: sum(self.days, duration.days())?,
            seconds: sum(self.seconds, duration.seconds())?,
            microseconds: sum(self.microseconds, duration.microseconds())?,
            ..*self
        };
        delta.normalize()?;
        Ok(delta)
    }

    /// Scales every relative field, truncating toward zero.
    pub fn mul_float(&self, factor: f64) -> Result<Self, DateError> {
        let scale = |value: i64| {
            let scaled = (value as f64 * factor).trunc();
            if scaled.is_finite() && scaled.abs() < i64::MAX as f64 {
                Ok(scaled as i64)
            } else {
                Err(DateError::Overflow)
            }
        };
        let mut delta = Self {
            years: scale(self.years)?,
            months: scale(self.months)?,
            days: scale(self.days)?,
            leapdays: scale(self.leapdays)?,
            hours: scale(self.hours)?,
            minutes: scale(self.minutes)?,
            seconds: scale(self.seconds)?,
            microseconds: scale(self.microseconds)?,
            ..*self
        };
        delta.normalize()?;
        Ok(delta)
    }
}

impl fmt::Display for RelativeDelta {
    /// `relativedelta(months=+1, day=31)`; zero and unset fields are left
    /// out.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        let relative = [
            ("years", self.years),
            ("months", self.months),
            ("days", self.days),
            ("leapdays", self.leapdays),
            ("hours", self.hours),
            ("minutes", self.minutes),
            ("seconds", self.seconds),
            ("microseconds", self.microseconds),
        ];
        for (name, value) in relative {
            if value != 0 {
                parts.push(format!("{name}={value:+}"));
            }
        }
        let absolute_date = [("year", self.year), ("month", self.month), ("day", self.day)];
        for (name, value) in absolute_date {
            if let Some(value) = value {
                parts.push(format!("{name}={value}"));
            }
        }
        if let Some(weekday) = self.weekday {
            parts.push(format!("weekday={weekday}"));
        }
        let absolute_time = [
            ("hour", self.hour),
            ("minute", self.minute),
            ("second", self.second),
            ("microsecond", self.microsecond),
        ];
        for (name, value) in absolute_time {
            if let Some(value) = value {
                parts.push(format!("{name}={value}"));
            }
        }
        write!(f, "relativedelta({})", parts.join(", "))
    }
}

/// Keeps `|value| < unit` by moving whole units into `next`, with the
/// quotient taking the sign of `value`.
fn carry_signed(value: &mut i64, next: &mut i64, unit: i64) -> Result<(), DateError> {
    if value.checked_abs().ok_or(DateError::Overflow)? < unit {
        return Ok(());
    }
    let quotient = *value / unit;
    *value %= unit;
    *next = next.checked_add(quotient).ok_or(DateError::Overflow)?;
    Ok(())
}

fn month_day_of_yearday(yearday: i64) -> Result<(i64, i64), DateError> {
    let mut previous_end = 0;
    for (index, month_end) in YEARDAY_MONTH_ENDS.iter().enumerate() {
        if yearday <= *month_end {
            return Ok((index as i64 + 1, yearday - previous_end));
        }
        previous_end = *month_end;
    }
    Err(DateError::InvalidArgument(format!(
        "invalid year day ({yearday})"
    )))
}

fn jump_to_weekday(moment: Moment, anchor: Weekday) -> Result<Moment, DateError> {
    let current = match moment {
        Moment::Date(date) => date.weekday(),
        Moment::DateTime(date_time) => date_time.weekday(),
    };
    let nth = anchor.nth();
    let mut jump = nth
        .checked_abs()
        .and_then(|count| (count - 1).checked_mul(7))
        .ok_or(DateError::Overflow)?;
    if nth > 0 {
        jump += (7 - current + anchor.weekday()).rem_euclid(7);
    } else {
        jump += (current - anchor.weekday()).rem_euclid(7);
        jump = -jump;
    }
    let shift = Duration::from_days(jump)?;
    match moment {
        Moment::Date(date) => date.add_duration(&shift).map(Moment::Date),
        Moment::DateTime(date_time) => date_time.add_duration(&shift).map(Moment::DateTime),
    }
}

#[cfg(test)]
#[path = "relativedelta_test.rs"]
mod tests;
