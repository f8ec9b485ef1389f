use super::calendar::check_range;
use super::format::strftime;
use super::{Date, DateError};
use std::fmt;

/// Wall-clock time without a date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay {
    hour: i64,
    minute: i64,
    second: i64,
    microsecond: i64,
}

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay {
        hour: 0,
        minute: 0,
        second: 0,
        microsecond: 0,
    };

    pub const MAX: TimeOfDay = TimeOfDay {
        hour: 23,
        minute: 59,
        second: 59,
        microsecond: 999_999,
    };

    pub fn new(hour: i64, minute: i64, second: i64, microsecond: i64) -> Result<Self, DateError> {
        check_range("hour", hour, 0, 23)?;
        check_range("minute", minute, 0, 59)?;
        check_range("second", second, 0, 59)?;
        check_range("microsecond", microsecond, 0, 999_999)?;
        Ok(Self {
            hour,
            minute,
            second,
            microsecond,
        })
    }

    pub fn hour(&self) -> i64 {
        self.hour
    }

    pub fn minute(&self) -> i64 {
        self.minute
    }

    pub fn second(&self) -> i64 {
        self.second
    }

    pub fn microsecond(&self) -> i64 {
        self.microsecond
    }

    pub fn seconds_of_day(&self) -> i64 {
        self.hour * 3_600 + self.minute * 60 + self.second
    }

    pub fn replace(
        &self,
        hour: Option<i64>,
        minute: Option<i64>,
        second: Option<i64>,
        microsecond: Option<i64>,
    ) -> Result<Self, DateError> {
        Self::new(
            hour.unwrap_or(self.hour),
            minute.unwrap_or(self.minute),
            second.unwrap_or(self.second),
            microsecond.unwrap_or(self.microsecond),
        )
    }

    pub fn isoformat(&self) -> String {
        let mut out = format!("{:02}:{:02}:{:02}", self.hour, self.minute, self.second);
        if self.microsecond != 0 {
            out.push_str(&format!(".{:06}", self.microsecond));
        }
        out
    }

    /// Date directives render against 1900-01-01, like Python.
    pub fn strftime(&self, format: &str) -> Result<String, DateError> {
        let epoch = Date::new(1900, 1, 1)?;
        strftime(format, &epoch, self)
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.isoformat())
    }
}
