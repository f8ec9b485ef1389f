use super::calendar::{carry_fields, CalendarFields};
use super::format::strftime;
use super::{Date, DateError, Duration, TimeOfDay};
use std::fmt;

/// Naive date and time of day; no time zone is attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DateTime {
    date: Date,
    time: TimeOfDay,
}

impl DateTime {
    pub fn new(
        year: i64,
        month: i64,
        day: i64,
        hour: i64,
        minute: i64,
        second: i64,
        microsecond: i64,
    ) -> Result<Self, DateError> {
        Ok(Self {
            date: Date::new(year, month, day)?,
            time: TimeOfDay::new(hour, minute, second, microsecond)?,
        })
    }

    pub fn combine(date: Date, time: TimeOfDay) -> Self {
        Self { date, time }
    }

    /// Builds a value from possibly out-of-range fields by carrying them.
    pub fn from_fields(fields: CalendarFields) -> Result<Self, DateError> {
        let carried = carry_fields(fields)?;
        Self::new(
            carried.year,
            carried.month,
            carried.day,
            carried.hour,
            carried.minute,
            carried.second,
            carried.microsecond,
        )
    }

    pub fn fields(&self) -> CalendarFields {
        CalendarFields {
            year: self.year(),
            month: self.month(),
            day: self.day(),
            hour: self.hour(),
            minute: self.minute(),
            second: self.second(),
            microsecond: self.microsecond(),
        }
    }

    pub fn date(&self) -> Date {
        self.date
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn year(&self) -> i64 {
        self.date.year()
    }

    pub fn month(&self) -> i64 {
        self.date.month()
    }

    pub fn day(&self) -> i64 {
        self.date.day()
    }

    pub fn hour(&self) -> i64 {
        self.time.hour()
    }

    pub fn minute(&self) -> i64 {
        self.time.minute()
    }

    pub fn second(&self) -> i64 {
        self.time.second()
    }

    pub fn microsecond(&self) -> i64 {
        self.time.microsecond()
    }

    pub fn weekday(&self) -> i64 {
        self.date.weekday()
    }

    pub fn to_ordinal(&self) -> i64 {
        self.date.to_ordinal()
    }

    pub fn add_duration(&self, duration: &Duration) -> Result<Self, DateError> {
        let mut fields = self.fields();
        fields.day += duration.days();
        fields.second += duration.seconds();
        fields.microsecond += duration.microseconds();
        Self::from_fields(fields)
    }

    pub fn sub_duration(&self, duration: &Duration) -> Result<Self, DateError> {
        self.add_duration(&duration.negate()?)
    }

    pub fn since(&self, other: &DateTime) -> Result<Duration, DateError> {
        Duration::new(
            self.to_ordinal() - other.to_ordinal(),
            self.time.seconds_of_day() - other.time.seconds_of_day(),
            self.microsecond() - other.microsecond(),
        )
    }

    #[allow(clippy::too_many_arguments)]
    pub fn replace(
        &self,
        year: Option<i64>,
        month: Option<i64>,
        day: Option<i64>,
        hour: Option<i64>,
        minute: Option<i64>,
        second: Option<i64>,
        microsecond: Option<i64>,
    ) -> Result<Self, DateError> {
        Ok(Self {
            date: self.date.replace(year, month, day)?,
            time: self.time.replace(hour, minute, second, microsecond)?,
        })
    }

    pub fn isoformat(&self, separator: char) -> String {
        format!("{}{separator}{}", self.date.isoformat(), self.time.isoformat())
    }

    pub fn strftime(&self, format: &str) -> Result<String, DateError> {
        strftime(format, &self.date, &self.time)
    }
}

impl fmt::Display for DateTime {
    /// Python `str(datetime)`, space separated.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat(' '))
    }
}

#[cfg(test)]
#[path = "date_time_test.rs"]
mod tests;
