//! Attribute access and the methods it can return.
//!
//! Only the members listed here are reachable from an expression; there is
//! no generic attribute fallback.

use crate::builtins::relativedelta_from_args;
use crate::call::{BoundArgs, Builtin, CallArgs, Callable, Constructor};
use crate::datetime::{Date, DateTime, Granularity, Moment, RelativeDelta, TimeOfDay};
use crate::evaluator::{EvalContext, EvalError};
use crate::value::{Dict, Module, Value};

const DICT_METHODS: &[&str] = &["get"];
const DATE_METHODS: &[&str] = &[
    "weekday",
    "isoweekday",
    "toordinal",
    "isoformat",
    "strftime",
    "replace",
    "add",
    "subtract",
    "start_of",
    "end_of",
];
const DATETIME_METHODS: &[&str] = &[
    "weekday",
    "isoweekday",
    "toordinal",
    "isoformat",
    "strftime",
    "replace",
    "add",
    "subtract",
    "start_of",
    "end_of",
    "date",
    "time",
];
const TIME_METHODS: &[&str] = &["isoformat", "strftime", "replace"];
const DURATION_METHODS: &[&str] = &["total_seconds"];
const DATE_CLASS_METHODS: &[&str] = &["today", "fromordinal"];
const DATETIME_CLASS_METHODS: &[&str] = &["now", "today", "combine"];

const DATE_FIELDS: &[&str] = &["year", "month", "day"];
const DATETIME_FIELDS: &[&str] = &[
    "year",
    "month",
    "day",
    "hour",
    "minute",
    "second",
    "microsecond",
];
const TIME_FIELDS: &[&str] = &["hour", "minute", "second", "microsecond"];

/// `target.name`.
pub fn get_attribute(target: &Value, name: &str) -> Result<Value, EvalError> {
    let found = match target {
        Value::Dict(_) => method(target, name, DICT_METHODS),
        Value::Date(date) => date_field(date, name).or_else(|| method(target, name, DATE_METHODS)),
        Value::DateTime(date_time) => {
            date_time_field(date_time, name).or_else(|| method(target, name, DATETIME_METHODS))
        }
        Value::Time(time) => time_field(time, name).or_else(|| method(target, name, TIME_METHODS)),
        Value::Duration(span) => match name {
            "days" => Some(Value::int(span.days())),
            "seconds" => Some(Value::int(span.seconds())),
            "microseconds" => Some(Value::int(span.microseconds())),
            _ => method(target, name, DURATION_METHODS),
        },
        Value::RelativeDelta(delta) => relativedelta_field(delta, name),
        Value::Weekday(weekday) => match name {
            "weekday" => Some(Value::int(weekday.weekday())),
            "n" => Some(weekday.n().map_or(Value::None, Value::int)),
            _ => None,
        },
        Value::Module(module) => module_member(*module, name),
        Value::Callable(Callable::Constructor(Constructor::Date)) => {
            method(target, name, DATE_CLASS_METHODS)
        }
        Value::Callable(Callable::Constructor(Constructor::DateTime)) => {
            method(target, name, DATETIME_CLASS_METHODS)
        }
        _ => None,
    };
    found.ok_or_else(|| no_attribute(target, name))
}

/// Runs a method previously returned by [`get_attribute`].
pub fn call_method(
    receiver: &Value,
    name: &'static str,
    args: CallArgs,
    context: &EvalContext,
) -> Result<Value, EvalError> {
    match receiver {
        Value::Dict(dict) => dict_method(dict, name, args),
        Value::Date(date) => date_method(*date, name, args),
        Value::DateTime(date_time) => date_time_method(*date_time, name, args),
        Value::Time(time) => time_method(*time, name, args),
        Value::Duration(span) if name == "total_seconds" => {
            args.expect_none("total_seconds")?;
            Ok(Value::Float(span.total_seconds()))
        }
        Value::Callable(Callable::Constructor(constructor)) => {
            class_method(*constructor, name, args, context)
        }
        _ => Err(no_attribute(receiver, name)),
    }
}

fn method(target: &Value, name: &str, names: &'static [&'static str]) -> Option<Value> {
    names
        .iter()
        .find(|candidate| **candidate == name)
        .map(|candidate| Value::Callable(Callable::method(target.clone(), candidate)))
}

fn no_attribute(target: &Value, name: &str) -> EvalError {
    match target {
        Value::Module(module) => EvalError::Attribute(format!(
            "module '{}' has no attribute '{name}'",
            module.name()
        )),
        Value::Callable(Callable::Constructor(constructor)) => EvalError::Attribute(format!(
            "type object '{}' has no attribute '{name}'",
            constructor.qualified_name()
        )),
        other => EvalError::Attribute(format!(
            "'{}' object has no attribute '{name}'",
            other.type_name()
        )),
    }
}

fn date_field(date: &Date, name: &str) -> Option<Value> {
    match name {
        "year" => Some(Value::int(date.year())),
        "month" => Some(Value::int(date.month())),
        "day" => Some(Value::int(date.day())),
        _ => None,
    }
}

fn date_time_field(date_time: &DateTime, name: &str) -> Option<Value> {
    date_field(&date_time.date(), name).or_else(|| time_field(&date_time.time(), name))
}

fn time_field(time: &TimeOfDay, name: &str) -> Option<Value> {
    match name {
        "hour" => Some(Value::int(time.hour())),
        "minute" => Some(Value::int(time.minute())),
        "second" => Some(Value::int(time.second())),
        "microsecond" => Some(Value::int(time.microsecond())),
        _ => None,
    }
}

fn relativedelta_field(delta: &RelativeDelta, name: &str) -> Option<Value> {
    let absolute = |value: Option<i64>| value.map_or(Value::None, Value::int);
    let value = match name {
        "years" => Value::int(delta.years()),
        "months" => Value::int(delta.months()),
        "days" => Value::int(delta.days()),
        "weeks" => Value::int(delta.weeks()),
        "leapdays" => Value::int(delta.leapdays()),
        "hours" => Value::int(delta.hours()),
        "minutes" => Value::int(delta.minutes()),
        "seconds" => Value::int(delta.seconds()),
        "microseconds" => Value::int(delta.microseconds()),
        "year" => absolute(delta.year()),
        "month" => absolute(delta.month()),
        "day" => absolute(delta.day()),
        "weekday" => delta.weekday().map_or(Value::None, Value::Weekday),
        "hour" => absolute(delta.hour()),
        "minute" => absolute(delta.minute()),
        "second" => absolute(delta.second()),
        "microsecond" => absolute(delta.microsecond()),
        _ => return None,
    };
    Some(value)
}

fn module_member(module: Module, name: &str) -> Option<Value> {
    let member = match (module, name) {
        (Module::Datetime, "date") => Callable::Constructor(Constructor::Date),
        (Module::Datetime, "datetime") => Callable::Constructor(Constructor::DateTime),
        (Module::Datetime, "time") => Callable::Constructor(Constructor::Time),
        (Module::Datetime, "timedelta") => Callable::Constructor(Constructor::TimeDelta),
        (Module::Time, "strftime") => Callable::Builtin(Builtin::TimeStrftime),
        _ => return None,
    };
    Some(Value::Callable(member))
}

fn dict_method(dict: &Dict, name: &str, args: CallArgs) -> Result<Value, EvalError> {
    if name != "get" {
        return Err(no_attribute(&Value::Dict(dict.clone()), name));
    }
    let bound = args.bind("get", &["key", "default"])?;
    let key = bound.required("key")?;
    key.ensure_hashable()?;
    Ok(dict
        .get(key)
        .or_else(|| bound.get("default"))
        .cloned()
        .unwrap_or(Value::None))
}

fn date_method(date: Date, name: &'static str, args: CallArgs) -> Result<Value, EvalError> {
    match name {
        "replace" => {
            let bound = args.bind("replace", DATE_FIELDS)?;
            Ok(Value::Date(date.replace(
                bound.int("year")?,
                bound.int("month")?,
                bound.int("day")?,
            )?))
        }
        "isoformat" => {
            args.expect_none("isoformat")?;
            Ok(Value::Str(date.isoformat()))
        }
        _ => moment_method(Moment::Date(date), name, args),
    }
}

fn date_time_method(
    date_time: DateTime,
    name: &'static str,
    args: CallArgs,
) -> Result<Value, EvalError> {
    match name {
        "date" => {
            args.expect_none("date")?;
            Ok(Value::Date(date_time.date()))
        }
        "time" => {
            args.expect_none("time")?;
            Ok(Value::Time(date_time.time()))
        }
        "replace" => {
            let bound = args.bind("replace", DATETIME_FIELDS)?;
            Ok(Value::DateTime(date_time.replace(
                bound.int("year")?,
                bound.int("month")?,
                bound.int("day")?,
                bound.int("hour")?,
                bound.int("minute")?,
                bound.int("second")?,
                bound.int("microsecond")?,
            )?))
        }
        "isoformat" => {
            let bound = args.bind("isoformat", &["sep"])?;
            let separator = separator(&bound)?;
            Ok(Value::Str(date_time.isoformat(separator)))
        }
        _ => moment_method(Moment::DateTime(date_time), name, args),
    }
}

fn separator(bound: &BoundArgs) -> Result<char, EvalError> {
    let Some(sep) = bound.str("sep")? else {
        return Ok('T');
    };
    let mut chars = sep.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) => Ok(ch),
        _ => Err(EvalError::Type(
            "isoformat() argument 'sep' must be a single character".to_string(),
        )),
    }
}

/// Members shared by dates and datetimes.
fn moment_method(moment: Moment, name: &'static str, args: CallArgs) -> Result<Value, EvalError> {
    match name {
        "weekday" => {
            args.expect_none("weekday")?;
            Ok(Value::int(moment.to_date_time().weekday()))
        }
        "isoweekday" => {
            args.expect_none("isoweekday")?;
            Ok(Value::int(moment.to_date_time().date().isoweekday()))
        }
        "toordinal" => {
            args.expect_none("toordinal")?;
            Ok(Value::int(moment.to_date_time().to_ordinal()))
        }
        "strftime" => {
            let bound = args.bind("strftime", &["format"])?;
            let format = bound.required_str("format")?;
            let text = match moment {
                Moment::Date(date) => date.strftime(format)?,
                Moment::DateTime(date_time) => date_time.strftime(format)?,
            };
            Ok(Value::Str(text))
        }
        "add" => {
            let delta = relativedelta_from_args(args)?;
            Ok(Value::from(moment.add_relative(&delta)?))
        }
        "subtract" => {
            let delta = relativedelta_from_args(args)?;
            Ok(Value::from(moment.sub_relative(&delta)?))
        }
        "start_of" | "end_of" => {
            let bound = args.bind(name, &["granularity"])?;
            let granularity: Granularity = bound.required_str("granularity")?.parse()?;
            let result = if name == "start_of" {
                moment.start_of(granularity)?
            } else {
                moment.end_of(granularity)?
            };
            Ok(Value::from(result))
        }
        _ => Err(no_attribute(&Value::from(moment), name)),
    }
}

fn time_method(time: TimeOfDay, name: &str, args: CallArgs) -> Result<Value, EvalError> {
    match name {
        "isoformat" => {
            args.expect_none("isoformat")?;
            Ok(Value::Str(time.isoformat()))
        }
        "strftime" => {
            let bound = args.bind("strftime", &["format"])?;
            Ok(Value::Str(time.strftime(bound.required_str("format")?)?))
        }
        "replace" => {
            let bound = args.bind("replace", TIME_FIELDS)?;
            Ok(Value::Time(time.replace(
                bound.int("hour")?,
                bound.int("minute")?,
                bound.int("second")?,
                bound.int("microsecond")?,
            )?))
        }
        _ => Err(no_attribute(&Value::Time(time), name)),
    }
}

fn class_method(
    constructor: Constructor,
    name: &str,
    args: CallArgs,
    context: &EvalContext,
) -> Result<Value, EvalError> {
    match (constructor, name) {
        (Constructor::Date, "today") => {
            args.expect_none("today")?;
            Ok(Value::Date(context.today()?))
        }
        (Constructor::Date, "fromordinal") => {
            let bound = args.bind("fromordinal", &["ordinal"])?;
            Ok(Value::Date(Date::from_ordinal(bound.required_int("ordinal")?)?))
        }
        (Constructor::DateTime, "now" | "today") => {
            args.expect_none(name)?;
            Ok(Value::DateTime(context.now()?))
        }
        (Constructor::DateTime, "combine") => {
            let bound = args.bind("combine", &["date", "time"])?;
            let date = match bound.required("date")? {
                Value::Date(date) => *date,
                Value::DateTime(date_time) => date_time.date(),
                other => return Err(argument_type("combine", "date", "datetime.date", other)),
            };
            let time = match bound.required("time")? {
                Value::Time(time) => *time,
                other => return Err(argument_type("combine", "time", "datetime.time", other)),
            };
            Ok(Value::DateTime(DateTime::combine(date, time)))
        }
        _ => Err(no_attribute(&Value::Callable(Callable::Constructor(constructor)), name)),
    }
}

fn argument_type(function: &str, name: &str, expected: &str, found: &Value) -> EvalError {
    EvalError::Type(format!(
        "{function}() argument '{name}' must be {expected}, not {}",
        found.type_name()
    ))
}

#[cfg(test)]
#[path = "methods_test.rs"]
mod tests;
