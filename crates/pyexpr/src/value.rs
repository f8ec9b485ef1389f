use crate::call::Callable;
use crate::datetime::{Date, DateTime, Duration, Moment, RelativeDelta, TimeOfDay, Weekday};
use crate::evaluator::EvalError;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, Signed, ToPrimitive, Zero};
use std::cmp::Ordering;
use std::fmt;

/// A runtime value. Every variant is immutable once built.
#[derive(Debug, Clone)]
pub enum Value {
    None,
    Bool(bool),
    Int(BigInt),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    Dict(Dict),
    Date(Date),
    DateTime(DateTime),
    Time(TimeOfDay),
    Duration(Duration),
    RelativeDelta(RelativeDelta),
    Weekday(Weekday),
    Module(Module),
    Callable(Callable),
}

/// Discriminant of [`Value`], used to key operator dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    None,
    Bool,
    Int,
    Float,
    Str,
    List,
    Tuple,
    Dict,
    Date,
    DateTime,
    Time,
    Duration,
    RelativeDelta,
    Weekday,
    Module,
    Callable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Module {
    Datetime,
    Time,
}

impl Module {
    pub fn name(&self) -> &'static str {
        match self {
            Module::Datetime => "datetime",
            Module::Time => "time",
        }
    }
}

/// Insertion-ordered mapping with value-equality keys.
#[derive(Debug, Clone, Default)]
pub struct Dict {
    entries: Vec<(Value, Value)>,
}

impl Dict {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: impl IntoIterator<Item = (Value, Value)>) -> Self {
        let mut dict = Self::new();
        for (key, value) in entries {
            dict.insert(key, value);
        }
        dict
    }

    /// Replaces the value of an equal key in place, keeping its position.
    pub fn insert(&mut self, key: Value, value: Value) {
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn get(&self, key: &Value) -> Option<&Value> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &(Value, Value)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(key, _)| key)
    }
}

impl PartialEq for Dict {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .entries
                .iter()
                .all(|(key, value)| other.get(key) == Some(value))
    }
}

/// Numeric view of `bool`, `int` and `float` values.
#[derive(Debug, Clone, PartialEq)]
pub enum Number {
    Int(BigInt),
    Float(f64),
}

impl Number {
    pub fn to_f64(&self) -> f64 {
        match self {
            Number::Int(value) => int_to_f64(value),
            Number::Float(value) => *value,
        }
    }

    pub fn is_zero(&self) -> bool {
        match self {
            Number::Int(value) => value.is_zero(),
            Number::Float(value) => *value == 0.0,
        }
    }
}

pub fn int_to_f64(value: &BigInt) -> f64 {
    value.to_f64().unwrap_or(if value.is_negative() {
        f64::NEG_INFINITY
    } else {
        f64::INFINITY
    })
}

impl Value {
    pub fn int(value: i64) -> Value {
        Value::Int(BigInt::from(value))
    }

    pub fn str(value: impl Into<String>) -> Value {
        Value::Str(value.into())
    }

    pub fn kind(&self) -> Kind {
        match self {
            Value::None => Kind::None,
            Value::Bool(_) => Kind::Bool,
            Value::Int(_) => Kind::Int,
            Value::Float(_) => Kind::Float,
            Value::Str(_) => Kind::Str,
            Value::List(_) => Kind::List,
            Value::Tuple(_) => Kind::Tuple,
            Value::Dict(_) => Kind::Dict,
            Value::Date(_) => Kind::Date,
            Value::DateTime(_) => Kind::DateTime,
            Value::Time(_) => Kind::Time,
            Value::Duration(_) => Kind::Duration,
            Value::RelativeDelta(_) => Kind::RelativeDelta,
            Value::Weekday(_) => Kind::Weekday,
            Value::Module(_) => Kind::Module,
            Value::Callable(_) => Kind::Callable,
        }
    }

    /// Python type name, as used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::None => "NoneType",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Float(_) => "float",
            Value::Str(_) => "str",
            Value::List(_) => "list",
            Value::Tuple(_) => "tuple",
            Value::Dict(_) => "dict",
            Value::Date(_) => "datetime.date",
            Value::DateTime(_) => "datetime.datetime",
            Value::Time(_) => "datetime.time",
            Value::Duration(_) => "datetime.timedelta",
            Value::RelativeDelta(_) => "relativedelta",
            Value::Weekday(_) => "weekday",
            Value::Module(_) => "module",
            Value::Callable(callable) => callable.type_name(),
        }
    }

    pub fn as_number(&self) -> Option<Number> {
        match self {
            Value::Bool(value) => Some(Number::Int(BigInt::from(u8::from(*value)))),
            Value::Int(value) => Some(Number::Int(value.clone())),
            Value::Float(value) => Some(Number::Float(*value)),
            _ => None,
        }
    }

    /// Dates and datetimes as a calendar point.
    pub fn as_moment(&self) -> Option<Moment> {
        match self {
            Value::Date(date) => Some(Moment::Date(*date)),
            Value::DateTime(date_time) => Some(Moment::DateTime(*date_time)),
            _ => None,
        }
    }

    /// `int` or `bool` as an `i64`; `None` for other kinds or overflow.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Bool(value) => Some(i64::from(*value)),
            Value::Int(value) => value.to_i64(),
            _ => None,
        }
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Value::None => false,
            Value::Bool(value) => *value,
            Value::Int(value) => !value.is_zero(),
            Value::Float(value) => *value != 0.0,
            Value::Str(value) => !value.is_empty(),
            Value::List(items) | Value::Tuple(items) => !items.is_empty(),
            Value::Dict(dict) => !dict.is_empty(),
            Value::Duration(duration) => !duration.is_zero(),
            Value::RelativeDelta(delta) => !delta.is_zero(),
            Value::Date(_)
            | Value::DateTime(_)
            | Value::Time(_)
            | Value::Weekday(_)
            | Value::Module(_)
            | Value::Callable(_) => true,
        }
    }

    /// Strict identity for `is`: same kind and equal value.
    pub fn is_identical(&self, other: &Value) -> bool {
        self.kind() == other.kind() && self == other
    }

    /// Dict keys must be immutable values.
    pub fn ensure_hashable(&self) -> Result<(), EvalError> {
        match self {
            Value::List(_) | Value::Dict(_) => Err(EvalError::Type(format!(
                "unhashable type: '{}'",
                self.type_name()
            ))),
            Value::Tuple(items) => items.iter().try_for_each(Value::ensure_hashable),
            _ => Ok(()),
        }
    }

    /// Python ordering. `Ok(None)` means the operands are unordered (NaN).
    pub fn try_cmp(&self, other: &Value) -> Result<Option<Ordering>, EvalError> {
        if let (Some(left), Some(right)) = (self.as_number(), other.as_number()) {
            return Ok(compare_numbers(&left, &right));
        }
        let ordering = match (self, other) {
            (Value::None, Value::None) => Some(Ordering::Equal),
            (Value::Str(left), Value::Str(right)) => Some(left.cmp(right)),
            (Value::List(left), Value::List(right)) | (Value::Tuple(left), Value::Tuple(right)) => {
                compare_sequences(left, right)?
            }
            (Value::Dict(left), Value::Dict(right)) => {
                let left: Vec<Value> = left.iter().map(entry_tuple).collect();
                let right: Vec<Value> = right.iter().map(entry_tuple).collect();
                compare_sequences(&left, &right)?
            }
            (Value::Date(left), Value::Date(right)) => Some(left.cmp(right)),
            (Value::DateTime(left), Value::DateTime(right)) => Some(left.cmp(right)),
            (Value::Time(left), Value::Time(right)) => Some(left.cmp(right)),
            (Value::Duration(left), Value::Duration(right)) => Some(left.cmp(right)),
            _ => {
                let (Some(left), Some(right)) = (self.kind().rank(), other.kind().rank()) else {
                    return Err(unorderable(self, other));
                };
                if left == right {
                    if self.kind() == other.kind() {
                        return Err(unorderable(self, other));
                    }
                    // list against tuple
                    Some(self.type_name().cmp(other.type_name()))
                } else {
                    Some(left.cmp(&right))
                }
            }
        };
        Ok(ordering)
    }
}

impl Kind {
    /// Position in the cross-kind order; `None` for kinds that never order.
    fn rank(&self) -> Option<u8> {
        match self {
            Kind::None => Some(0),
            Kind::Bool | Kind::Int | Kind::Float => Some(1),
            Kind::Dict => Some(2),
            Kind::Date => Some(3),
            Kind::DateTime => Some(4),
            Kind::Time => Some(5),
            Kind::Duration => Some(6),
            Kind::RelativeDelta => Some(7),
            Kind::Str => Some(8),
            Kind::List | Kind::Tuple => Some(9),
            Kind::Weekday | Kind::Module | Kind::Callable => None,
        }
    }
}

fn unorderable(left: &Value, right: &Value) -> EvalError {
    EvalError::Type(format!(
        "'<' not supported between instances of '{}' and '{}'",
        left.type_name(),
        right.type_name()
    ))
}

fn entry_tuple(entry: &(Value, Value)) -> Value {
    Value::Tuple(vec![entry.0.clone(), entry.1.clone()])
}

fn compare_sequences(left: &[Value], right: &[Value]) -> Result<Option<Ordering>, EvalError> {
    for (a, b) in left.iter().zip(right) {
        if a != b {
            return a.try_cmp(b);
        }
    }
    Ok(Some(left.len().cmp(&right.len())))
}

/// Exact comparison, including big integers against floats.
pub fn compare_numbers(left: &Number, right: &Number) -> Option<Ordering> {
    match (left, right) {
        (Number::Int(a), Number::Int(b)) => Some(a.cmp(b)),
        (Number::Float(a), Number::Float(b)) => a.partial_cmp(b),
        (Number::Int(a), Number::Float(b)) => compare_int_float(a, *b),
        (Number::Float(a), Number::Int(b)) => compare_int_float(b, *a).map(Ordering::reverse),
    }
}

fn compare_int_float(int: &BigInt, float: f64) -> Option<Ordering> {
    if float.is_nan() {
        return None;
    }
    if float.is_infinite() {
        return Some(if float > 0.0 {
            Ordering::Less
        } else {
            Ordering::Greater
        });
    }
    let floor = float.floor();
    let floor_int = BigInt::from_f64(floor)?;
    Some(match int.cmp(&floor_int) {
        Ordering::Equal if float > floor => Ordering::Less,
        other => other,
    })
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        if let (Some(left), Some(right)) = (self.as_number(), other.as_number()) {
            return compare_numbers(&left, &right) == Some(Ordering::Equal);
        }
        match (self, other) {
            (Value::None, Value::None) => true,
            (Value::Str(left), Value::Str(right)) => left == right,
            (Value::List(left), Value::List(right)) => left == right,
            (Value::Tuple(left), Value::Tuple(right)) => left == right,
            (Value::Dict(left), Value::Dict(right)) => left == right,
            (Value::Date(left), Value::Date(right)) => left == right,
            (Value::DateTime(left), Value::DateTime(right)) => left == right,
            (Value::Time(left), Value::Time(right)) => left == right,
            (Value::Duration(left), Value::Duration(right)) => left == right,
            (Value::RelativeDelta(left), Value::RelativeDelta(right)) => left == right,
            (Value::Weekday(left), Value::Weekday(right)) => left == right,
            (Value::Module(left), Value::Module(right)) => left == right,
            (Value::Callable(left), Value::Callable(right)) => left == right,
            _ => false,
        }
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::int(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Str(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Str(value)
    }
}

impl From<Date> for Value {
    fn from(value: Date) -> Self {
        Value::Date(value)
    }
}

impl From<DateTime> for Value {
    fn from(value: DateTime) -> Self {
        Value::DateTime(value)
    }
}

impl From<Moment> for Value {
    fn from(value: Moment) -> Self {
        match value {
            Moment::Date(date) => Value::Date(date),
            Moment::DateTime(date_time) => Value::DateTime(date_time),
        }
    }
}

impl From<Duration> for Value {
    fn from(value: Duration) -> Self {
        Value::Duration(value)
    }
}

impl fmt::Display for Value {
    /// Python `repr()`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::None => f.write_str("None"),
            Value::Bool(true) => f.write_str("True"),
            Value::Bool(false) => f.write_str("False"),
            Value::Int(value) => write!(f, "{value}"),
            Value::Float(value) => f.write_str(&float_repr(*value)),
            Value::Str(value) => f.write_str(&string_repr(value)),
            Value::List(items) => {
                f.write_str("[")?;
                write_items(f, items)?;
                f.write_str("]")
            }
            Value::Tuple(items) => {
                f.write_str("(")?;
                write_items(f, items)?;
                if items.len() == 1 {
                    f.write_str(",")?;
                }
                f.write_str(")")
            }
            Value::Dict(dict) => {
                f.write_str("{")?;
                for (index, (key, value)) in dict.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Date(date) => write!(
                f,
                "datetime.date({}, {}, {})",
                date.year(),
                date.month(),
                date.day()
            ),
            Value::DateTime(value) => {
                write!(
                    f,
                    "datetime.datetime({}, {}, {}, {}, {}",
                    value.year(),
                    value.month(),
                    value.day(),
                    value.hour(),
                    value.minute()
                )?;
                write_seconds(f, value.second(), value.microsecond())?;
                f.write_str(")")
            }
            Value::Time(time) => {
                write!(f, "datetime.time({}, {}", time.hour(), time.minute())?;
                write_seconds(f, time.second(), time.microsecond())?;
                f.write_str(")")
            }
            Value::Duration(duration) => {
                let fields = [
                    ("days", duration.days()),
                    ("seconds", duration.seconds()),
                    ("microseconds", duration.microseconds()),
                ];
                let parts: Vec<String> = fields
                    .iter()
                    .filter(|(_, value)| *value != 0)
                    .map(|(name, value)| format!("{name}={value}"))
                    .collect();
                if parts.is_empty() {
                    f.write_str("datetime.timedelta(0)")
                } else {
                    write!(f, "datetime.timedelta({})", parts.join(", "))
                }
            }
            Value::RelativeDelta(delta) => write!(f, "{delta}"),
            Value::Weekday(weekday) => write!(f, "{weekday}"),
            Value::Module(module) => write!(f, "<module '{}'>", module.name()),
            Value::Callable(callable) => write!(f, "{callable}"),
        }
    }
}

fn write_items(f: &mut fmt::Formatter<'_>, items: &[Value]) -> fmt::Result {
    for (index, item) in items.iter().enumerate() {
        if index > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{item}")?;
    }
    Ok(())
}

fn write_seconds(f: &mut fmt::Formatter<'_>, second: i64, microsecond: i64) -> fmt::Result {
    if microsecond != 0 {
        write!(f, ", {second}, {microsecond}")
    } else if second != 0 {
        write!(f, ", {second}")
    } else {
        Ok(())
    }
}

/// Python `repr(float)`: shortest round-trip digits, scientific notation
/// outside `1e-4 <= |x| < 1e16`.
pub fn float_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }
    if value == 0.0 {
        return if value.is_sign_negative() { "-0.0" } else { "0.0" }.to_string();
    }

    let scientific = format!("{:e}", value.abs());
    let (mantissa, exponent) = scientific.split_once('e').unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent.parse().unwrap_or(0);
    let digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let sign = if value < 0.0 { "-" } else { "" };

    if (-4..16).contains(&exponent) {
        let point = exponent + 1;
        let body = if point <= 0 {
            format!("0.{}{}", "0".repeat((-point) as usize), digits)
        } else if point as usize >= digits.len() {
            format!("{}{}.0", digits, "0".repeat(point as usize - digits.len()))
        } else {
            let (whole, fraction) = digits.split_at(point as usize);
            format!("{whole}.{fraction}")
        };
        return format!("{sign}{body}");
    }

    let (first, rest) = digits.split_at(1);
    let mantissa = if rest.is_empty() {
        first.to_string()
    } else {
        format!("{first}.{rest}")
    };
    let exponent_sign = if exponent < 0 { '-' } else { '+' };
    format!("{sign}{mantissa}e{exponent_sign}{:02}", exponent.abs())
}

/// Python `repr(str)`: single quotes unless the text contains only double
/// ones.
pub fn string_repr(value: &str) -> String {
    let quote = if value.contains('\'') && !value.contains('"') {
        '"'
    } else {
        '\''
    };
    let mut out = String::with_capacity(value.len() + 2);
    out.push(quote);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            ch if ch == quote => {
                out.push('\\');
                out.push(ch);
            }
            ch if (ch as u32) < 0x20 || ch as u32 == 0x7f => {
                out.push_str(&format!("\\x{:02x}", ch as u32));
            }
            ch => out.push(ch),
        }
    }
    out.push(quote);
    out
}

#[cfg(test)]
#[path = "value_test.rs"]
mod tests;
