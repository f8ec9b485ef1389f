//! Operator semantics.
//!
//! Binary operators go through [`lookup`], a table keyed on the operator
//! and both operand kinds; pairs it does not list are a `TypeError`.

use crate::ast::{BinaryOp, CompareOp, UnaryOp};
use crate::datetime::{Duration, Moment, RelativeDelta};
use crate::evaluator::EvalError;
use crate::value::{int_to_f64, Kind, Number, Value};
use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive, Zero};
use std::cmp::Ordering;

type Handler = fn(BinaryOp, &Value, &Value) -> Result<Value, EvalError>;

/// Largest integer result, in bits, that `**` and `<<` may produce.
const MAX_INT_BITS: u64 = 1 << 20;
/// Largest sequence that repetition may build.
const MAX_REPEAT_LEN: usize = 1 << 20;

pub fn binary(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match lookup(op, left.kind(), right.kind()) {
        Some(handler) => handler(op, left, right),
        None => Err(unsupported(op, left, right)),
    }
}

fn lookup(op: BinaryOp, left: Kind, right: Kind) -> Option<Handler> {
    use BinaryOp::*;
    use Kind::{Bool, Date, DateTime, Float, Int, List, Str, Tuple};

    let handler: Handler = match (op, left, right) {
        (Add, Kind::RelativeDelta, Date | DateTime) => relative_plus_moment,
        (Add, Date | DateTime, Kind::RelativeDelta) => moment_plus_relative,
        (Sub, Date | DateTime, Kind::RelativeDelta) => moment_minus_relative,
        (Add | Sub, Kind::RelativeDelta, Kind::RelativeDelta) => relative_with_relative,
        (Add, Kind::RelativeDelta, Kind::Duration) | (Add, Kind::Duration, Kind::RelativeDelta) => {
            relative_plus_duration
        }
        (Sub, Kind::Duration, Kind::RelativeDelta) => duration_minus_relative,
        (Mul, Kind::RelativeDelta, Bool | Int | Float) | (Mul, Bool | Int | Float, Kind::RelativeDelta) => {
            scale_relative
        }

        (Add | Sub, Kind::Duration, Kind::Duration) => duration_with_duration,
        (Add, Kind::Duration, Date | DateTime) | (Add | Sub, Date | DateTime, Kind::Duration) => {
            moment_with_duration
        }
        (Sub, Date | DateTime, Date | DateTime) => moment_difference,
        (Mul, Kind::Duration, Bool | Int | Float) | (Mul, Bool | Int | Float, Kind::Duration) => {
            scale_duration
        }
        (Div | FloorDiv, Kind::Duration, Bool | Int | Float) => divide_duration,
        (Div | FloorDiv | Mod, Kind::Duration, Kind::Duration) => duration_by_duration,

        (Add, Str, Str) | (Add, List, List) | (Add, Tuple, Tuple) => concatenate,
        (Mul, Str | List | Tuple, Bool | Int) | (Mul, Bool | Int, Str | List | Tuple) => repeat,

        (_, Bool | Int, Bool | Int) => int_arithmetic,
        (Add | Sub | Mul | Div | FloorDiv | Mod | Pow, Bool | Int | Float, Bool | Int | Float) => {
            float_arithmetic
        }
        _ => return None,
    };
    Some(handler)
}

fn unsupported(op: BinaryOp, left: &Value, right: &Value) -> EvalError {
    EvalError::Type(format!(
        "unsupported operand type(s) for {}: '{}' and '{}'",
        op.symbol(),
        left.type_name(),
        right.type_name()
    ))
}

pub fn unary(op: UnaryOp, operand: &Value) -> Result<Value, EvalError> {
    match (op, operand) {
        (UnaryOp::Not, value) => Ok(Value::Bool(!value.is_truthy())),
        (UnaryOp::Neg, Value::Float(value)) => Ok(Value::Float(-value)),
        (UnaryOp::Pos, Value::Float(value)) => Ok(Value::Float(*value)),
        (UnaryOp::Neg, Value::Duration(duration)) => Ok(Value::Duration(duration.negate()?)),
        (UnaryOp::Pos, Value::Duration(duration)) => Ok(Value::Duration(*duration)),
        (UnaryOp::Neg, Value::RelativeDelta(delta)) => Ok(Value::RelativeDelta(delta.negate()?)),
        (_, Value::Int(_) | Value::Bool(_)) => {
            let Some(Number::Int(value)) = operand.as_number() else {
                return Err(bad_unary(op, operand));
            };
            Ok(Value::Int(match op {
                UnaryOp::Neg => -value,
                UnaryOp::Invert => !value,
                _ => value,
            }))
        }
        _ => Err(bad_unary(op, operand)),
    }
}

fn bad_unary(op: UnaryOp, operand: &Value) -> EvalError {
    EvalError::Type(format!(
        "bad operand type for unary {}: '{}'",
        op.symbol(),
        operand.type_name()
    ))
}

/// One link of a comparison chain.
pub fn compare(op: CompareOp, left: &Value, right: &Value) -> Result<bool, EvalError> {
    let ordered = |accept: fn(Ordering) -> bool| -> Result<bool, EvalError> {
        Ok(left.try_cmp(right)?.is_some_and(accept))
    };
    match op {
        CompareOp::Eq => Ok(left == right),
        CompareOp::Ne => Ok(left != right),
        CompareOp::Lt => ordered(Ordering::is_lt),
        CompareOp::Le => ordered(Ordering::is_le),
        CompareOp::Gt => ordered(Ordering::is_gt),
        CompareOp::Ge => ordered(Ordering::is_ge),
        CompareOp::In => contains(right, left),
        CompareOp::NotIn => contains(right, left).map(|found| !found),
        CompareOp::Is => Ok(left.is_identical(right)),
        CompareOp::IsNot => Ok(!left.is_identical(right)),
    }
}

/// `item in container`.
pub fn contains(container: &Value, item: &Value) -> Result<bool, EvalError> {
    match container {
        Value::Str(text) => match item {
            Value::Str(needle) => Ok(text.contains(needle.as_str())),
            other => Err(EvalError::Type(format!(
                "'in <string>' requires string as left operand, not {}",
                other.type_name()
            ))),
        },
        Value::List(items) | Value::Tuple(items) => Ok(items.iter().any(|value| value == item)),
        Value::Dict(dict) => {
            item.ensure_hashable()?;
            Ok(dict.contains_key(item))
        }
        other => Err(EvalError::Type(format!(
            "argument of type '{}' is not iterable",
            other.type_name()
        ))),
    }
}

fn operands<'v, A, B>(
    op: BinaryOp,
    left: &'v Value,
    right: &'v Value,
    first: impl Fn(&'v Value) -> Option<A>,
    second: impl Fn(&'v Value) -> Option<B>,
) -> Result<(A, B), EvalError> {
    match (first(left), second(right)) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(unsupported(op, left, right)),
    }
}

fn relative(value: &Value) -> Option<&RelativeDelta> {
    match value {
        Value::RelativeDelta(delta) => Some(delta),
        _ => None,
    }
}

fn duration(value: &Value) -> Option<&Duration> {
    match value {
        Value::Duration(duration) => Some(duration),
        _ => None,
    }
}

fn relative_plus_moment(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (delta, moment) = operands(op, left, right, relative, Value::as_moment)?;
    Ok(Value::from(moment.add_relative(delta)?))
}

fn moment_plus_relative(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    relative_plus_moment(op, right, left)
}

fn moment_minus_relative(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (moment, delta) = operands(op, left, right, Value::as_moment, relative)?;
    Ok(Value::from(moment.sub_relative(delta)?))
}

fn relative_with_relative(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands(op, left, right, relative, relative)?;
    let result = if op == BinaryOp::Sub {
        // Absolute fields of the left operand win on subtraction.
        b.negate()?.add_delta(a)?
    } else {
        a.add_delta(b)?
    };
    Ok(Value::RelativeDelta(result))
}

fn relative_plus_duration(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (delta, span) = match (left, right) {
        (Value::RelativeDelta(delta), Value::Duration(span))
        | (Value::Duration(span), Value::RelativeDelta(delta)) => (delta, span),
        _ => return Err(unsupported(op, left, right)),
    };
    Ok(Value::RelativeDelta(delta.add_duration(span)?))
}

fn duration_minus_relative(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (span, delta) = operands(op, left, right, duration, relative)?;
    Ok(Value::RelativeDelta(delta.negate()?.add_duration(span)?))
}

fn scale_relative(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (delta, factor) = match (left, right) {
        (Value::RelativeDelta(delta), factor) | (factor, Value::RelativeDelta(delta)) => {
            (delta, factor)
        }
        _ => return Err(unsupported(op, left, right)),
    };
    let factor = factor
        .as_number()
        .ok_or_else(|| unsupported(op, left, right))?
        .to_f64();
    Ok(Value::RelativeDelta(delta.mul_float(factor)?))
}

fn duration_with_duration(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands(op, left, right, duration, duration)?;
    let result = if op == BinaryOp::Sub {
        a.checked_sub(b)?
    } else {
        a.checked_add(b)?
    };
    Ok(Value::Duration(result))
}

fn moment_with_duration(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (moment, span) = match (left, right) {
        (Value::Duration(span), moment) | (moment, Value::Duration(span)) => (moment, span),
        _ => return Err(unsupported(op, left, right)),
    };
    let span = if op == BinaryOp::Sub {
        span.negate()?
    } else {
        *span
    };
    match moment {
        Value::Date(date) => Ok(Value::Date(date.add_duration(&span)?)),
        Value::DateTime(date_time) => Ok(Value::DateTime(date_time.add_duration(&span)?)),
        _ => Err(unsupported(op, left, right)),
    }
}

/// A date mixed with a datetime is taken at midnight.
fn moment_difference(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands(op, left, right, Value::as_moment, Value::as_moment)?;
    let span = match (a, b) {
        (Moment::Date(a), Moment::Date(b)) => a.since(&b)?,
        (a, b) => a.to_date_time().since(&b.to_date_time())?,
    };
    Ok(Value::Duration(span))
}

fn scale_duration(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (span, factor) = match (left, right) {
        (Value::Duration(span), factor) | (factor, Value::Duration(span)) => (span, factor),
        _ => return Err(unsupported(op, left, right)),
    };
    let scaled = match factor.as_number() {
        Some(Number::Int(value)) => span.mul_int(big_to_i128(&value)?)?,
        Some(Number::Float(value)) => span.mul_float(value)?,
        None => return Err(unsupported(op, left, right)),
    };
    Ok(Value::Duration(scaled))
}

fn divide_duration(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let span = duration(left).ok_or_else(|| unsupported(op, left, right))?;
    let result = match (op, right.as_number()) {
        (BinaryOp::FloorDiv, Some(Number::Int(value))) => span.floor_div(big_to_i128(&value)?)?,
        (BinaryOp::Div, Some(number)) => span.true_div(number.to_f64())?,
        _ => return Err(unsupported(op, left, right)),
    };
    Ok(Value::Duration(result))
}

fn duration_by_duration(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (a, b) = operands(op, left, right, duration, duration)?;
    match op {
        BinaryOp::Div => Ok(Value::Float(a.ratio(b)?)),
        BinaryOp::FloorDiv => Ok(Value::Int(BigInt::from(a.floor_div_duration(b)?))),
        _ => {
            let quotient = a.floor_div_duration(b)?;
            Ok(Value::Duration(a.checked_sub(&b.mul_int(quotient)?)?))
        }
    }
}

fn concatenate(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    match (left, right) {
        (Value::Str(a), Value::Str(b)) => Ok(Value::Str(format!("{a}{b}"))),
        (Value::List(a), Value::List(b)) => Ok(Value::List(a.iter().chain(b).cloned().collect())),
        (Value::Tuple(a), Value::Tuple(b)) => {
            Ok(Value::Tuple(a.iter().chain(b).cloned().collect()))
        }
        _ => Err(unsupported(op, left, right)),
    }
}

fn repeat(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (sequence, count) = match left {
        Value::Str(_) | Value::List(_) | Value::Tuple(_) => (left, right),
        _ => (right, left),
    };
    let count = match count {
        Value::Int(value) if value.is_negative() => 0,
        other => other
            .as_i64()
            .and_then(|count| usize::try_from(count).ok())
            .unwrap_or(usize::MAX),
    };
    let item_len = match sequence {
        Value::Str(text) => text.chars().count(),
        Value::List(items) | Value::Tuple(items) => items.len(),
        _ => return Err(unsupported(op, left, right)),
    };
    if item_len == 0 || count == 0 {
        return Ok(match sequence {
            Value::Str(_) => Value::Str(String::new()),
            Value::List(_) => Value::List(Vec::new()),
            _ => Value::Tuple(Vec::new()),
        });
    }
    if item_len.saturating_mul(count) > MAX_REPEAT_LEN {
        return Err(EvalError::Value("repeated sequence is too long".to_string()));
    }
    Ok(match sequence {
        Value::Str(text) => Value::Str(text.repeat(count)),
        Value::List(items) => Value::List(repeat_items(items, count)),
        Value::Tuple(items) => Value::Tuple(repeat_items(items, count)),
        _ => return Err(unsupported(op, left, right)),
    })
}

fn repeat_items(items: &[Value], count: usize) -> Vec<Value> {
    let mut out = Vec::with_capacity(items.len() * count);
    for _ in 0..count {
        out.extend_from_slice(items);
    }
    out
}

fn int_operands(op: BinaryOp, left: &Value, right: &Value) -> Result<(BigInt, BigInt), EvalError> {
    match (left.as_number(), right.as_number()) {
        (Some(Number::Int(a)), Some(Number::Int(b))) => Ok((a, b)),
        _ => Err(unsupported(op, left, right)),
    }
}

fn int_arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (a, b) = int_operands(op, left, right)?;
    let zero_division = || EvalError::ZeroDivision("integer division or modulo by zero".to_string());
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b.is_zero() {
                return Err(EvalError::ZeroDivision("division by zero".to_string()));
            }
            return Ok(Value::Float(int_to_f64(&a) / int_to_f64(&b)));
        }
        BinaryOp::FloorDiv => {
            if b.is_zero() {
                return Err(zero_division());
            }
            floor_div(&a, &b)
        }
        BinaryOp::Mod => {
            if b.is_zero() {
                return Err(zero_division());
            }
            floor_mod(&a, &b)
        }
        BinaryOp::Pow => return int_pow(&a, &b),
        BinaryOp::BitAnd => a & b,
        BinaryOp::BitOr => a | b,
        BinaryOp::BitXor => a ^ b,
        BinaryOp::Shl | BinaryOp::Shr => return shift(op, &a, &b),
    };
    Ok(Value::Int(result))
}

fn floor_div(a: &BigInt, b: &BigInt) -> BigInt {
    let quotient = a / b;
    let remainder = a % b;
    if !remainder.is_zero() && (remainder.is_negative() != b.is_negative()) {
        quotient - 1
    } else {
        quotient
    }
}

fn floor_mod(a: &BigInt, b: &BigInt) -> BigInt {
    let remainder = a % b;
    if !remainder.is_zero() && (remainder.is_negative() != b.is_negative()) {
        remainder + b
    } else {
        remainder
    }
}

fn int_pow(base: &BigInt, exponent: &BigInt) -> Result<Value, EvalError> {
    if exponent.is_negative() {
        if base.is_zero() {
            return Err(EvalError::ZeroDivision(
                "0.0 cannot be raised to a negative power".to_string(),
            ));
        }
        return Ok(Value::Float(int_to_f64(base).powf(int_to_f64(exponent))));
    }
    let magnitude = base.abs();
    if magnitude <= BigInt::from(1) {
        let odd = (exponent % 2u32) == BigInt::from(1);
        let result = if base.is_negative() && !odd {
            BigInt::from(1)
        } else if exponent.is_zero() {
            BigInt::from(1)
        } else {
            base.clone()
        };
        return Ok(Value::Int(result));
    }
    let exponent = exponent
        .to_u32()
        .filter(|exponent| u64::from(*exponent).saturating_mul(base.bits()) <= MAX_INT_BITS)
        .ok_or_else(|| EvalError::Value("integer power result is too large".to_string()))?;
    Ok(Value::Int(base.pow(exponent)))
}

fn shift(op: BinaryOp, value: &BigInt, count: &BigInt) -> Result<Value, EvalError> {
    if count.is_negative() {
        return Err(EvalError::Value("negative shift count".to_string()));
    }
    if op == BinaryOp::Shr {
        let Some(count) = count.to_usize() else {
            return Ok(Value::Int(if value.is_negative() {
                BigInt::from(-1)
            } else {
                BigInt::zero()
            }));
        };
        return Ok(Value::Int(value >> count));
    }
    let count = count
        .to_u64()
        .filter(|count| count.saturating_add(value.bits()) <= MAX_INT_BITS)
        .ok_or_else(|| EvalError::Value("shift result is too large".to_string()))?;
    Ok(Value::Int(value << count as usize))
}

fn float_arithmetic(op: BinaryOp, left: &Value, right: &Value) -> Result<Value, EvalError> {
    let (Some(a), Some(b)) = (left.as_number(), right.as_number()) else {
        return Err(unsupported(op, left, right));
    };
    let (a, b) = (a.to_f64(), b.to_f64());
    let zero_division = |message: &str| EvalError::ZeroDivision(message.to_string());
    let result = match op {
        BinaryOp::Add => a + b,
        BinaryOp::Sub => a - b,
        BinaryOp::Mul => a * b,
        BinaryOp::Div => {
            if b == 0.0 {
                return Err(zero_division("float division by zero"));
            }
            a / b
        }
        BinaryOp::FloorDiv => {
            if b == 0.0 {
                return Err(zero_division("float divmod()"));
            }
            (a / b).floor()
        }
        BinaryOp::Mod => {
            if b == 0.0 {
                return Err(zero_division("float modulo"));
            }
            let remainder = a % b;
            if remainder != 0.0 && (remainder < 0.0) != (b < 0.0) {
                remainder + b
            } else if remainder == 0.0 {
                0.0f64.copysign(b)
            } else {
                remainder
            }
        }
        BinaryOp::Pow => {
            if a == 0.0 && b < 0.0 {
                return Err(zero_division("0.0 cannot be raised to a negative power"));
            }
            if a < 0.0 && b.fract() != 0.0 {
                return Err(EvalError::Value(
                    "negative number cannot be raised to a fractional power".to_string(),
                ));
            }
            a.powf(b)
        }
        _ => return Err(unsupported(op, left, right)),
    };
    Ok(Value::Float(result))
}

fn big_to_i128(value: &BigInt) -> Result<i128, EvalError> {
    value
        .to_i128()
        .ok_or_else(|| EvalError::Value("integer is too large for a duration".to_string()))
}

#[cfg(test)]
#[path = "operators_test.rs"]
mod tests;
