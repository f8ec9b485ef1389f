//! Proleptic-Gregorian calendar arithmetic.
//!
//! The types here mirror the Python `datetime` module (`date`, `datetime`,
//! `time`, `timedelta`) and dateutil's `relativedelta`. They are plain
//! immutable values; every operation returns a new value or a [`DateError`].

mod calendar;
mod date;
mod date_time;
mod duration;
mod format;
mod period;
mod relativedelta;
mod time_of_day;

pub use calendar::{
    carry_fields, date_to_ordinal, days_before_month, days_before_year, days_in_month,
    is_leap_year, ordinal_to_date, weekday_of_ordinal, CalendarFields, MAX_ORDINAL, MAX_YEAR,
    MIN_YEAR,
};
pub use date::Date;
pub use date_time::DateTime;
pub use duration::{Amount, Duration, DurationParts};
pub use format::strftime;
pub use period::Granularity;
pub use relativedelta::{RelativeDelta, RelativeDeltaArgs, Weekday};
pub use time_of_day::TimeOfDay;

#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
pub enum DateError {
    #[error("{field} {value} is out of range ({min}..={max})")]
    FieldOutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    #[error("date value out of range")]
    Overflow,
    #[error("granularity must be {allowed}, got '{granularity}'")]
    InvalidGranularity {
        granularity: String,
        allowed: &'static str,
    },
    #[error("invalid format directive '%{0}'")]
    UnknownDirective(char),
    #[error("format string ends with a stray '%'")]
    TrailingPercent,
    #[error("division by zero")]
    DivisionByZero,
    #[error("{0}")]
    InvalidArgument(String),
}

/// A calendar value that relative arithmetic can target: either a plain
/// date or a date with a time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Moment {
    Date(Date),
    DateTime(DateTime),
}

impl Moment {
    pub fn to_date_time(self) -> DateTime {
        match self {
            Moment::Date(date) => date.at_midnight(),
            Moment::DateTime(date_time) => date_time,
        }
    }

    pub fn start_of(self, granularity: Granularity) -> Result<Moment, DateError> {
        match self {
            Moment::Date(date) => date.start_of(granularity).map(Moment::Date),
            Moment::DateTime(date_time) => date_time.start_of(granularity).map(Moment::DateTime),
        }
    }

    pub fn end_of(self, granularity: Granularity) -> Result<Moment, DateError> {
        match self {
            Moment::Date(date) => date.end_of(granularity).map(Moment::Date),
            Moment::DateTime(date_time) => date_time.end_of(granularity).map(Moment::DateTime),
        }
    }

    pub fn add_relative(self, delta: &RelativeDelta) -> Result<Moment, DateError> {
        delta.apply(self)
    }

    pub fn sub_relative(self, delta: &RelativeDelta) -> Result<Moment, DateError> {
        delta.negate()?.apply(self)
    }
}

impl From<Date> for Moment {
    fn from(value: Date) -> Self {
        Moment::Date(value)
    }
}

impl From<DateTime> for Moment {
    fn from(value: DateTime) -> Self {
        Moment::DateTime(value)
    }
}
