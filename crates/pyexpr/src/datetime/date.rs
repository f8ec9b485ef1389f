use super::calendar::{
    check_range, date_to_ordinal, days_in_month, ordinal_to_date, weekday_of_ordinal, MAX_ORDINAL,
    MAX_YEAR, MIN_YEAR,
};
use super::format::strftime;
use super::{DateError, DateTime, Duration, TimeOfDay};
use std::fmt;

/// Calendar date with 1-indexed month and day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Date {
    year: i64,
    month: i64,
    day: i64,
}

impl Date {
    pub fn new(year: i64, month: i64, day: i64) -> Result<Self, DateError> {
        check_range("year", year, MIN_YEAR, MAX_YEAR)?;
        check_range("month", month, 1, 12)?;
        check_range("day", day, 1, days_in_month(year, month))?;
        Ok(Self { year, month, day })
    }

    pub fn from_ordinal(ordinal: i64) -> Result<Self, DateError> {
        check_range("ordinal", ordinal, 1, MAX_ORDINAL)?;
        let (year, month, day) = ordinal_to_date(ordinal);
        Ok(Self { year, month, day })
    }

    pub fn year(&self) -> i64 {
        self.year
    }

    pub fn month(&self) -> i64 {
        self.month
    }

    pub fn day(&self) -> i64 {
        self.day
    }

    pub fn to_ordinal(&self) -> i64 {
        date_to_ordinal(self.year, self.month, self.day)
    }

    /// Monday is 0.
    pub fn weekday(&self) -> i64 {
        weekday_of_ordinal(self.to_ordinal())
    }

    /// Monday is 1.
    pub fn isoweekday(&self) -> i64 {
        self.weekday() + 1
    }

    pub fn quarter(&self) -> i64 {
        (self.month - 1) / 3 + 1
    }

    pub fn at_midnight(&self) -> DateTime {
        DateTime::combine(*self, TimeOfDay::MIDNIGHT)
    }

    /// Shifts by whole days; the time part of `duration` is ignored.
    pub fn add_duration(&self, duration: &Duration) -> Result<Self, DateError> {
        let ordinal = self
            .to_ordinal()
            .checked_add(duration.days())
            .ok_or(DateError::Overflow)?;
        Self::from_ordinal(ordinal).map_err(|_| DateError::Overflow)
    }

    pub fn sub_duration(&self, duration: &Duration) -> Result<Self, DateError> {
        self.add_duration(&duration.negate()?)
    }

    pub fn add_days(&self, days: i64) -> Result<Self, DateError> {
        self.add_duration(&Duration::from_days(days)?)
    }

    pub fn since(&self, other: &Date) -> Result<Duration, DateError> {
        Duration::from_days(self.to_ordinal() - other.to_ordinal())
    }

    pub fn replace(
        &self,
        year: Option<i64>,
        month: Option<i64>,
        day: Option<i64>,
    ) -> Result<Self, DateError> {
        Self::new(
            year.unwrap_or(self.year),
            month.unwrap_or(self.month),
            day.unwrap_or(self.day),
        )
    }

    pub fn isoformat(&self) -> String {
        format!("{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }

    pub fn strftime(&self, format: &str) -> Result<String, DateError> {
        strftime(format, self, &TimeOfDay::MIDNIGHT)
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat())
    }
}

#[cfg(test)]
#[path = "date_test.rs"]
mod tests;
