//! Conversion between evaluator values and `serde_json` values, used to load
//! contexts from files and to print results.

use crate::value::{Dict, Value};
use num_bigint::BigInt;
use num_traits::ToPrimitive;
use serde_json::{Map, Number};

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum JsonError {
    #[error("a {0} value has no JSON representation")]
    Unsupported(&'static str),
    #[error("dict keys must be str to convert to JSON, got {0}")]
    NonStringKey(&'static str),
    #[error("float {0} has no JSON representation")]
    NonFiniteFloat(f64),
    #[error("context must be a JSON object, got {0}")]
    ContextNotObject(&'static str),
}

pub fn value_from_json(value: &serde_json::Value) -> Value {
    match value {
        serde_json::Value::Null => Value::None,
        serde_json::Value::Bool(value) => Value::Bool(*value),
        serde_json::Value::Number(number) => number_from_json(number),
        serde_json::Value::String(value) => Value::Str(value.clone()),
        serde_json::Value::Array(values) => Value::List(values.iter().map(value_from_json).collect()),
        serde_json::Value::Object(values) => Value::Dict(Dict::from_entries(
            values
                .iter()
                .map(|(key, value)| (Value::Str(key.clone()), value_from_json(value))),
        )),
    }
}

fn number_from_json(number: &Number) -> Value {
    if let Some(value) = number.as_i64() {
        return Value::Int(BigInt::from(value));
    }
    if let Some(value) = number.as_u64() {
        return Value::Int(BigInt::from(value));
    }
    Value::Float(number.as_f64().unwrap_or(f64::NAN))
}

/// Splits a JSON object into named bindings for an evaluation context.
pub fn bindings_from_json(
    value: &serde_json::Value,
) -> Result<Vec<(String, Value)>, JsonError> {
    let serde_json::Value::Object(values) = value else {
        return Err(JsonError::ContextNotObject(json_type_name(value)));
    };
    Ok(values
        .iter()
        .map(|(key, value)| (key.clone(), value_from_json(value)))
        .collect())
}

pub fn value_to_json(value: &Value) -> Result<serde_json::Value, JsonError> {
    match value {
        Value::None => Ok(serde_json::Value::Null),
        Value::Bool(value) => Ok(serde_json::Value::Bool(*value)),
        Value::Int(value) => Ok(integer_to_json(value)),
        Value::Float(value) => float_to_json(*value),
        Value::Str(value) => Ok(serde_json::Value::String(value.clone())),
        Value::List(values) | Value::Tuple(values) => values
            .iter()
            .map(value_to_json)
            .collect::<Result<Vec<_>, _>>()
            .map(serde_json::Value::Array),
        Value::Dict(dict) => {
            let mut out = Map::new();
            for (key, value) in dict.iter() {
                let Value::Str(key) = key else {
                    return Err(JsonError::NonStringKey(key.type_name()));
                };
                out.insert(key.clone(), value_to_json(value)?);
            }
            Ok(serde_json::Value::Object(out))
        }
        Value::Date(date) => Ok(serde_json::Value::String(date.isoformat())),
        Value::DateTime(moment) => Ok(serde_json::Value::String(format!(
            "{} {:02}:{:02}:{:02}",
            moment.date().isoformat(),
            moment.hour(),
            moment.minute(),
            moment.second()
        ))),
        Value::Time(time) => Ok(serde_json::Value::String(format!(
            "{:02}:{:02}:{:02}",
            time.hour(),
            time.minute(),
            time.second()
        ))),
        Value::Duration(duration) => float_to_json(duration.total_seconds()),
        Value::RelativeDelta(_) | Value::Weekday(_) | Value::Module(_) | Value::Callable(_) => {
            Err(JsonError::Unsupported(value.type_name()))
        }
    }
}

fn integer_to_json(value: &BigInt) -> serde_json::Value {
    if let Some(parsed) = value.to_i64() {
        return serde_json::Value::Number(Number::from(parsed));
    }
    if let Some(parsed) = value.to_u64() {
        return serde_json::Value::Number(Number::from(parsed));
    }
    serde_json::Value::String(value.to_string())
}

fn float_to_json(value: f64) -> Result<serde_json::Value, JsonError> {
    Number::from_f64(value)
        .map(serde_json::Value::Number)
        .ok_or(JsonError::NonFiniteFloat(value))
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
#[path = "json_test.rs"]
mod tests;
