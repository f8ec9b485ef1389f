use super::{days_in_month, Date, DateError, DateTime, TimeOfDay};
use std::fmt;
use std::str::FromStr;

const DATE_GRANULARITIES: &str = "year, quarter or month";
const DATE_TIME_GRANULARITIES: &str = "year, quarter, month, week, day or hour";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    Year,
    Quarter,
    Month,
    Week,
    Day,
    Hour,
}

impl Granularity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Year => "year",
            Granularity::Quarter => "quarter",
            Granularity::Month => "month",
            Granularity::Week => "week",
            Granularity::Day => "day",
            Granularity::Hour => "hour",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = DateError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "year" => Ok(Granularity::Year),
            "quarter" => Ok(Granularity::Quarter),
            "month" => Ok(Granularity::Month),
            "week" => Ok(Granularity::Week),
            "day" => Ok(Granularity::Day),
            "hour" => Ok(Granularity::Hour),
            other => Err(DateError::InvalidGranularity {
                granularity: other.to_string(),
                allowed: DATE_TIME_GRANULARITIES,
            }),
        }
    }
}

impl Date {
    /// First day of the enclosing year, quarter or month.
    pub fn start_of(&self, granularity: Granularity) -> Result<Date, DateError> {
        match granularity {
            Granularity::Year => Date::new(self.year(), 1, 1),
            Granularity::Quarter => Date::new(self.year(), quarter_first_month(self), 1),
            Granularity::Month => Date::new(self.year(), self.month(), 1),
            other => Err(date_granularity_error(other)),
        }
    }

    /// Last day of the enclosing year, quarter or month.
    pub fn end_of(&self, granularity: Granularity) -> Result<Date, DateError> {
        match granularity {
            Granularity::Year => Date::new(self.year(), 12, 31),
            Granularity::Quarter => {
                let month = quarter_first_month(self) + 2;
                Date::new(self.year(), month, days_in_month(self.year(), month))
            }
            Granularity::Month => Date::new(
                self.year(),
                self.month(),
                days_in_month(self.year(), self.month()),
            ),
            other => Err(date_granularity_error(other)),
        }
    }
}

impl DateTime {
    /// Start of the enclosing period at `00:00:00`; `hour` keeps the hour.
    pub fn start_of(&self, granularity: Granularity) -> Result<DateTime, DateError> {
        let date = self.date();
        let start = match granularity {
            Granularity::Year | Granularity::Quarter | Granularity::Month => {
                date.start_of(granularity)?
            }
            Granularity::Week => date.add_days(-date.weekday())?,
            Granularity::Day => date,
            Granularity::Hour => {
                let time = TimeOfDay::new(self.hour(), 0, 0, 0)?;
                return Ok(DateTime::combine(date, time));
            }
        };
        Ok(DateTime::combine(start, TimeOfDay::MIDNIGHT))
    }

    /// End of the enclosing period at `23:59:59.999999`; `hour` keeps the
    /// hour.
    pub fn end_of(&self, granularity: Granularity) -> Result<DateTime, DateError> {
        let date = self.date();
        let end = match granularity {
            Granularity::Year | Granularity::Quarter | Granularity::Month => {
                date.end_of(granularity)?
            }
            Granularity::Week => date.add_days(6 - date.weekday())?,
            Granularity::Day => date,
            Granularity::Hour => {
                let time = TimeOfDay::new(self.hour(), 59, 59, 999_999)?;
                return Ok(DateTime::combine(date, time));
            }
        };
        Ok(DateTime::combine(end, TimeOfDay::MAX))
    }
}

fn quarter_first_month(date: &Date) -> i64 {
    (date.quarter() - 1) * 3 + 1
}

fn date_granularity_error(granularity: Granularity) -> DateError {
    DateError::InvalidGranularity {
        granularity: granularity.to_string(),
        allowed: DATE_GRANULARITIES,
    }
}

#[cfg(test)]
#[path = "period_test.rs"]
mod tests;
