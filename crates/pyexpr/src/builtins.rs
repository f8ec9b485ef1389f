//! The fixed name table every expression can see after its context.

use crate::call::{expect_int, BoundArgs, Builtin, CallArgs, Callable, Constructor};
use crate::datetime::{
    Amount, Date, DateTime, Duration, DurationParts, RelativeDelta, RelativeDeltaArgs, TimeOfDay,
    Weekday,
};
use crate::evaluator::{EvalContext, EvalError};
use crate::value::{Module, Value};
use lazy_static::lazy_static;
use num_traits::ToPrimitive;
use std::collections::BTreeMap;

const TIMEDELTA_PARAMS: &[&str] = &[
    "days",
    "seconds",
    "microseconds",
    "milliseconds",
    "minutes",
    "hours",
    "weeks",
];

const RELATIVEDELTA_PARAMS: &[&str] = &[
    "years",
    "months",
    "days",
    "leapdays",
    "weeks",
    "hours",
    "minutes",
    "seconds",
    "microseconds",
    "year",
    "month",
    "day",
    "weekday",
    "yearday",
    "nlyearday",
    "hour",
    "minute",
    "second",
    "microsecond",
];

const DATE_PARAMS: &[&str] = &["year", "month", "day"];
const DATETIME_PARAMS: &[&str] = &[
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "microsecond",
];
const TIME_PARAMS: &[&str] = &["hour", "minute", "second", "microsecond"];

lazy_static! {
    static ref BUILTINS: BTreeMap<&'static str, Value> = {
        let mut table = BTreeMap::new();
        table.insert("bool", Value::Callable(Callable::Builtin(Builtin::Bool)));
        table.insert(
            "context_today",
            Value::Callable(Callable::Builtin(Builtin::ContextToday)),
        );
        table.insert("datetime", Value::Module(Module::Datetime));
        table.insert("time", Value::Module(Module::Time));
        table.insert("date", Value::Callable(Callable::Constructor(Constructor::Date)));
        table.insert(
            "timedelta",
            Value::Callable(Callable::Constructor(Constructor::TimeDelta)),
        );
        table.insert(
            "relativedelta",
            Value::Callable(Callable::Constructor(Constructor::RelativeDelta)),
        );
        for anchor in Weekday::ANCHORS {
            table.insert(anchor.name(), Value::Weekday(anchor));
        }
        table
    };
}

/// Resolves a builtin name. `today`, `current_date` and `now` are strings
/// rendered from the context clock.
pub fn lookup(name: &str, context: &EvalContext) -> Result<Option<Value>, EvalError> {
    match name {
        "today" | "current_date" => Ok(Some(Value::Str(context.today()?.isoformat()))),
        "now" => Ok(Some(Value::Str(context.now()?.strftime("%Y-%m-%d %H:%M:%S")?))),
        _ => Ok(BUILTINS.get(name).cloned()),
    }
}

pub fn call_builtin(builtin: Builtin, args: CallArgs, context: &EvalContext) -> Result<Value, EvalError> {
    match builtin {
        Builtin::Bool => {
            let bound = args.bind("bool", &["x"])?;
            Ok(Value::Bool(bound.get("x").is_some_and(Value::is_truthy)))
        }
        Builtin::ContextToday => {
            args.expect_none("context_today")?;
            Ok(Value::Date(context.today()?))
        }
        Builtin::TimeStrftime => {
            let bound = args.bind("strftime", &["format"])?;
            let format = bound.required_str("format")?;
            Ok(Value::Str(context.now()?.strftime(format)?))
        }
    }
}

pub fn construct(constructor: Constructor, args: CallArgs) -> Result<Value, EvalError> {
    match constructor {
        Constructor::Date => {
            let bound = args.bind("date", DATE_PARAMS)?;
            Ok(Value::Date(Date::new(
                bound.required_int("year")?,
                bound.required_int("month")?,
                bound.required_int("day")?,
            )?))
        }
        Constructor::DateTime => {
            let bound = args.bind("datetime", DATETIME_PARAMS)?;
            Ok(Value::DateTime(DateTime::new(
                bound.required_int("year")?,
                bound.required_int("month")?,
                bound.required_int("day")?,
                bound.int_or("hour", 0)?,
                bound.int_or("minute", 0)?,
                bound.int_or("second", 0)?,
                bound.int_or("microsecond", 0)?,
            )?))
        }
        Constructor::Time => {
            let bound = args.bind("time", TIME_PARAMS)?;
            Ok(Value::Time(TimeOfDay::new(
                bound.int_or("hour", 0)?,
                bound.int_or("minute", 0)?,
                bound.int_or("second", 0)?,
                bound.int_or("microsecond", 0)?,
            )?))
        }
        Constructor::TimeDelta => Ok(Value::Duration(duration_from_args(args)?)),
        Constructor::RelativeDelta => Ok(Value::RelativeDelta(relativedelta_from_args(args)?)),
    }
}

fn duration_from_args(args: CallArgs) -> Result<Duration, EvalError> {
    let bound = args.bind("timedelta", TIMEDELTA_PARAMS)?;
    let parts = DurationParts {
        days: amount(&bound, "days")?,
        seconds: amount(&bound, "seconds")?,
        microseconds: amount(&bound, "microseconds")?,
        milliseconds: amount(&bound, "milliseconds")?,
        minutes: amount(&bound, "minutes")?,
        hours: amount(&bound, "hours")?,
        weeks: amount(&bound, "weeks")?,
    };
    Ok(Duration::from_parts(&parts)?)
}

fn amount(bound: &BoundArgs, name: &str) -> Result<Amount, EvalError> {
    match bound.get(name) {
        None => Ok(Amount::Int(0)),
        Some(Value::Float(value)) => Ok(Amount::Float(*value)),
        Some(Value::Int(value)) => value
            .to_i64()
            .map(Amount::Int)
            .ok_or_else(|| EvalError::Value(format!("timedelta() argument '{name}' is too large"))),
        Some(Value::Bool(value)) => Ok(Amount::Int(i64::from(*value))),
        Some(other) => Err(EvalError::Type(format!(
            "unsupported type for timedelta {name} component: {}",
            other.type_name()
        ))),
    }
}

/// `relativedelta(**kwargs)`; the two-datetime form is not supported.
pub(crate) fn relativedelta_from_args(args: CallArgs) -> Result<RelativeDelta, EvalError> {
    if !args.positional.is_empty() {
        return Err(EvalError::Type(
            "relativedelta() only accepts keyword arguments".to_string(),
        ));
    }
    let bound = args.bind("relativedelta", RELATIVEDELTA_PARAMS)?;
    let relative = |name: &str| -> Result<i64, EvalError> {
        Ok(whole_number(&bound, name)?.unwrap_or(0))
    };
    let weekday = match bound.get("weekday") {
        None | Some(Value::None) => None,
        Some(Value::Weekday(weekday)) => Some(*weekday),
        Some(other) => Some(Weekday::new(expect_int("relativedelta", "weekday", other)?, None)?),
    };
    let delta_args = RelativeDeltaArgs {
        years: relative("years")?,
        months: relative("months")?,
        days: relative("days")?,
        leapdays: relative("leapdays")?,
        weeks: relative("weeks")?,
        hours: relative("hours")?,
        minutes: relative("minutes")?,
        seconds: relative("seconds")?,
        microseconds: relative("microseconds")?,
        year: whole_number(&bound, "year")?,
        month: whole_number(&bound, "month")?,
        day: whole_number(&bound, "day")?,
        weekday,
        yearday: whole_number(&bound, "yearday")?,
        nlyearday: whole_number(&bound, "nlyearday")?,
        hour: whole_number(&bound, "hour")?,
        minute: whole_number(&bound, "minute")?,
        second: whole_number(&bound, "second")?,
        microsecond: whole_number(&bound, "microsecond")?,
    };
    Ok(RelativeDelta::from_args(&delta_args)?)
}

/// An `int`, or a `float` without a fractional part. `None` when the
/// argument is absent or `None`.
fn whole_number(bound: &BoundArgs, name: &str) -> Result<Option<i64>, EvalError> {
    match bound.get(name) {
        None | Some(Value::None) => Ok(None),
        Some(Value::Float(value)) if value.fract() == 0.0 && value.abs() < i64::MAX as f64 => {
            Ok(Some(*value as i64))
        }
        Some(Value::Float(_)) => Err(EvalError::Value(format!(
            "{}() argument '{name}' must be a whole number",
            bound.function()
        ))),
        Some(other) => expect_int(bound.function(), name, other).map(Some),
    }
}

#[cfg(test)]
#[path = "builtins_test.rs"]
mod tests;
