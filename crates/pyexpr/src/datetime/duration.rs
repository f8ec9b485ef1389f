use super::DateError;
use std::fmt;

pub const MICROS_PER_SECOND: i128 = 1_000_000;
pub const MICROS_PER_DAY: i128 = 86_400 * MICROS_PER_SECOND;
pub const MAX_DAYS: i64 = 999_999_999;

// Integral parts above this are far beyond MAX_DAYS in every unit.
const WHOLE_LIMIT: f64 = 1e20;

/// A numeric constructor argument; fractional amounts are allowed for
/// durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Amount {
    Int(i64),
    Float(f64),
}

impl Default for Amount {
    fn default() -> Self {
        Amount::Int(0)
    }
}

impl From<i64> for Amount {
    fn from(value: i64) -> Self {
        Amount::Int(value)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

/// Keyword arguments of the `timedelta` constructor.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DurationParts {
    pub days: Amount,
    pub seconds: Amount,
    pub microseconds: Amount,
    pub milliseconds: Amount,
    pub minutes: Amount,
    pub hours: Amount,
    pub weeks: Amount,
}

/// Fixed-length span normalized so that `0 <= seconds < 86400` and
/// `0 <= microseconds < 1_000_000`; the sign lives in `days`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Duration {
    days: i64,
    seconds: i64,
    microseconds: i64,
}

impl Duration {
    pub const ZERO: Duration = Duration {
        days: 0,
        seconds: 0,
        microseconds: 0,
    };

    pub fn new(days: i64, seconds: i64, microseconds: i64) -> Result<Self, DateError> {
        let total = i128::from(days) * MICROS_PER_DAY
            + i128::from(seconds) * MICROS_PER_SECOND
            + i128::from(microseconds);
        Self::from_microseconds(total)
    }

    pub fn from_days(days: i64) -> Result<Self, DateError> {
        Self::new(days, 0, 0)
    }

    pub fn from_microseconds(total: i128) -> Result<Self, DateError> {
        let days = total.div_euclid(MICROS_PER_DAY);
        let rest = total.rem_euclid(MICROS_PER_DAY);
        if days.abs() > i128::from(MAX_DAYS) {
            return Err(DateError::Overflow);
        }
        Ok(Self {
            days: days as i64,
            seconds: (rest / MICROS_PER_SECOND) as i64,
            microseconds: (rest % MICROS_PER_SECOND) as i64,
        })
    }

    /// Folds every unit into days/seconds/microseconds. Integral parts are
    /// summed exactly; fractional parts are accumulated in microseconds and
    /// rounded half to even.
    pub fn from_parts(parts: &DurationParts) -> Result<Self, DateError> {
        let units: [(Amount, i128); 7] = [
            (parts.weeks, 7 * MICROS_PER_DAY),
            (parts.days, MICROS_PER_DAY),
            (parts.hours, 3_600 * MICROS_PER_SECOND),
            (parts.minutes, 60 * MICROS_PER_SECOND),
            (parts.seconds, MICROS_PER_SECOND),
            (parts.milliseconds, 1_000),
            (parts.microseconds, 1),
        ];

        let mut whole: i128 = 0;
        let mut fraction = 0.0f64;
        for (amount, unit) in units {
            match amount {
                Amount::Int(value) => {
                    whole = i128::from(value)
                        .checked_mul(unit)
                        .and_then(|value| whole.checked_add(value))
                        .ok_or(DateError::Overflow)?;
                }
                Amount::Float(value) => {
                    if !value.is_finite() {
                        return Err(DateError::InvalidArgument(format!(
                            "cannot convert float {value} to a duration"
                        )));
                    }
                    let integral = value.trunc();
                    if integral.abs() > WHOLE_LIMIT {
                        return Err(DateError::Overflow);
                    }
                    whole = (integral as i128)
                        .checked_mul(unit)
                        .and_then(|value| whole.checked_add(value))
                        .ok_or(DateError::Overflow)?;
                    fraction += (value - integral) * unit as f64;
                }
            }
        }

        let rounded = fraction.round_ties_even() as i128;
        Self::from_microseconds(whole + rounded)
    }

    pub fn days(&self) -> i64 {
        self.days
    }

    pub fn seconds(&self) -> i64 {
        self.seconds
    }

    pub fn microseconds(&self) -> i64 {
        self.microseconds
    }

    pub fn total_microseconds(&self) -> i128 {
        i128::from(self.days) * MICROS_PER_DAY
            + i128::from(self.seconds) * MICROS_PER_SECOND
            + i128::from(self.microseconds)
    }

    pub fn total_seconds(&self) -> f64 {
        self.total_microseconds() as f64 / MICROS_PER_SECOND as f64
    }

    pub fn is_zero(&self) -> bool {
        self.days == 0 && self.seconds == 0 && self.microseconds == 0
    }

    pub fn checked_add(&self, other: &Duration) -> Result<Duration, DateError> {
        Self::from_microseconds(self.total_microseconds() + other.total_microseconds())
    }

    pub fn checked_sub(&self, other: &Duration) -> Result<Duration, DateError> {
        Self::from_microseconds(self.total_microseconds() - other.total_microseconds())
    }

    pub fn negate(&self) -> Result<Duration, DateError> {
        Self::from_microseconds(-self.total_microseconds())
    }

    pub fn mul_int(&self, factor: i128) -> Result<Duration, DateError> {
        let total = self
            .total_microseconds()
            .checked_mul(factor)
            .ok_or(DateError::Overflow)?;
        Self::from_microseconds(total)
    }

    pub fn mul_float(&self, factor: f64) -> Result<Duration, DateError> {
        Self::from_float_microseconds(self.total_microseconds() as f64 * factor)
    }

    fn from_float_microseconds(total: f64) -> Result<Duration, DateError> {
        let scaled = total.round_ties_even();
        let limit = (i128::from(MAX_DAYS) + 1) as f64 * MICROS_PER_DAY as f64;
        if !scaled.is_finite() || scaled.abs() > limit {
            return Err(DateError::Overflow);
        }
        Self::from_microseconds(scaled as i128)
    }

    /// `self // divisor`, flooring the total microseconds.
    pub fn floor_div(&self, divisor: i128) -> Result<Duration, DateError> {
        if divisor == 0 {
            return Err(DateError::DivisionByZero);
        }
        Self::from_microseconds(floor_div_i128(self.total_microseconds(), divisor))
    }

    /// `self / divisor`, rounding half to even.
    pub fn true_div(&self, divisor: f64) -> Result<Duration, DateError> {
        if divisor == 0.0 {
            return Err(DateError::DivisionByZero);
        }
        Self::from_float_microseconds(self.total_microseconds() as f64 / divisor)
    }

    /// `self // other` as an integer count.
    pub fn floor_div_duration(&self, other: &Duration) -> Result<i128, DateError> {
        let divisor = other.total_microseconds();
        if divisor == 0 {
            return Err(DateError::DivisionByZero);
        }
        Ok(floor_div_i128(self.total_microseconds(), divisor))
    }

    pub fn ratio(&self, other: &Duration) -> Result<f64, DateError> {
        let divisor = other.total_microseconds();
        if divisor == 0 {
            return Err(DateError::DivisionByZero);
        }
        Ok(self.total_microseconds() as f64 / divisor as f64)
    }
}

// `div_euclid` only floors for positive divisors; Python's `//` always does.
fn floor_div_i128(dividend: i128, divisor: i128) -> i128 {
    let quotient = dividend.div_euclid(divisor);
    if divisor < 0 && dividend.rem_euclid(divisor) != 0 {
        quotient - 1
    } else {
        quotient
    }
}

impl fmt::Display for Duration {
    /// Python `str(timedelta)`: `-1 day, 23:59:59.999999`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days != 0 {
            let plural = if self.days.abs() == 1 { "" } else { "s" };
            write!(f, "{} day{plural}, ", self.days)?;
        }
        let hours = self.seconds / 3_600;
        let minutes = (self.seconds % 3_600) / 60;
        let seconds = self.seconds % 60;
        write!(f, "{hours}:{minutes:02}:{seconds:02}")?;
        if self.microseconds != 0 {
            write!(f, ".{:06}", self.microseconds)?;
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "duration_test.rs"]
mod tests;
