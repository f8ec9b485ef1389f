use crate::ast::{AstNode, BoolOp, CompareOp, UnaryOp};
use crate::builtins;
use crate::call::{CallArgs, Callable};
use crate::datetime::{Date, DateError, DateTime};
use crate::methods;
use crate::operators;
use crate::parser::{parse_expression, ParseError};
use crate::value::{Dict, Value};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use num_traits::{Signed, ToPrimitive};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum EvalError {
    #[error("{0}")]
    Parse(#[from] ParseError),
    #[error("{0}")]
    Date(#[from] DateError),
    #[error("name '{0}' is not defined")]
    Name(String),
    #[error("{0}")]
    Type(String),
    #[error("{0}")]
    Value(String),
    #[error("{0}")]
    Key(String),
    #[error("{0}")]
    Index(String),
    #[error("{0}")]
    ZeroDivision(String),
    #[error("{0}")]
    Attribute(String),
    #[error("expression is {len} characters long, the limit is {max}")]
    SourceTooLong { len: usize, max: usize },
}

/// Python exception class an [`EvalError`] corresponds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    SyntaxError,
    NameError,
    TypeError,
    ValueError,
    KeyError,
    IndexError,
    ZeroDivisionError,
    AttributeError,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::SyntaxError => "SyntaxError",
            ErrorKind::NameError => "NameError",
            ErrorKind::TypeError => "TypeError",
            ErrorKind::ValueError => "ValueError",
            ErrorKind::KeyError => "KeyError",
            ErrorKind::IndexError => "IndexError",
            ErrorKind::ZeroDivisionError => "ZeroDivisionError",
            ErrorKind::AttributeError => "AttributeError",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl EvalError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            EvalError::Parse(_) => ErrorKind::SyntaxError,
            EvalError::Date(DateError::DivisionByZero) => ErrorKind::ZeroDivisionError,
            EvalError::Date(_) => ErrorKind::ValueError,
            EvalError::Name(_) => ErrorKind::NameError,
            EvalError::Type(_) => ErrorKind::TypeError,
            EvalError::Value(_) | EvalError::SourceTooLong { .. } => ErrorKind::ValueError,
            EvalError::Key(_) => ErrorKind::KeyError,
            EvalError::Index(_) => ErrorKind::IndexError,
            EvalError::ZeroDivision(_) => ErrorKind::ZeroDivisionError,
            EvalError::Attribute(_) => ErrorKind::AttributeError,
        }
    }

    /// Source position, for syntax errors.
    pub fn pos(&self) -> Option<usize> {
        match self {
            EvalError::Parse(err) => Some(err.pos()),
            _ => None,
        }
    }
}

/// Caller-supplied bindings plus the clock used by `today`/`now` helpers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EvalContext {
    bindings: BTreeMap<String, Value>,
    now: Option<DateTime>,
}

impl EvalContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_bindings(bindings: BTreeMap<String, Value>) -> Self {
        Self {
            bindings,
            now: None,
        }
    }

    /// Pins the clock; without it the local wall-clock time is used.
    pub fn with_now(mut self, now: DateTime) -> Self {
        self.now = Some(now);
        self
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<Value>) {
        self.bindings.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.bindings.get(name)
    }

    pub fn bindings(&self) -> &BTreeMap<String, Value> {
        &self.bindings
    }

    pub fn now(&self) -> Result<DateTime, EvalError> {
        match self.now {
            Some(now) => Ok(now),
            None => {
                log::trace!("no pinned clock, reading local time");
                Ok(from_naive(Local::now().naive_local())?)
            }
        }
    }

    pub fn today(&self) -> Result<Date, EvalError> {
        Ok(self.now()?.date())
    }
}

fn from_naive(value: NaiveDateTime) -> Result<DateTime, DateError> {
    // Leap seconds report more than 999_999 microseconds.
    let microsecond = i64::from(value.nanosecond() / 1_000).min(999_999);
    DateTime::new(
        i64::from(value.year()),
        i64::from(value.month()),
        i64::from(value.day()),
        i64::from(value.hour()),
        i64::from(value.minute()),
        i64::from(value.second()),
        microsecond,
    )
}

pub fn evaluate_expression(expression: &str, context: &EvalContext) -> Result<Value, EvalError> {
    let ast = parse_expression(expression)?;
    evaluate(&ast, context)
}

pub fn evaluate(ast: &AstNode, context: &EvalContext) -> Result<Value, EvalError> {
    Evaluator::new(context).eval(ast)
}

/// Tree-walking interpreter over one context.
pub struct Evaluator<'a> {
    context: &'a EvalContext,
}

impl<'a> Evaluator<'a> {
    pub fn new(context: &'a EvalContext) -> Self {
        Self { context }
    }

    pub fn eval(&self, node: &AstNode) -> Result<Value, EvalError> {
        match node {
            AstNode::None => Ok(Value::None),
            AstNode::Bool(value) => Ok(Value::Bool(*value)),
            AstNode::Integer(value) => Ok(Value::Int(value.clone())),
            AstNode::Float(value) => Ok(Value::Float(*value)),
            AstNode::String(value) => Ok(Value::Str(value.clone())),
            AstNode::List(items) => Ok(Value::List(self.eval_all(items)?)),
            AstNode::Tuple(items) => Ok(Value::Tuple(self.eval_all(items)?)),
            AstNode::Dict(entries) => {
                let mut dict = Dict::new();
                for (key, value) in entries {
                    let key = self.eval(key)?;
                    key.ensure_hashable()?;
                    dict.insert(key, self.eval(value)?);
                }
                Ok(Value::Dict(dict))
            }
            AstNode::Name(name) => self.resolve(name),
            AstNode::Unary { op, operand } => {
                let value = self.eval(operand)?;
                match op {
                    UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
                    _ => operators::unary(*op, &value),
                }
            }
            AstNode::Binary { left, op, right } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                operators::binary(*op, &left, &right)
            }
            AstNode::Compare { left, comparisons } => self.eval_compare(left, comparisons),
            AstNode::BoolOp { left, op, right } => {
                let left = self.eval(left)?;
                match (op, left.is_truthy()) {
                    (BoolOp::And, false) | (BoolOp::Or, true) => Ok(left),
                    _ => self.eval(right),
                }
            }
            AstNode::Conditional {
                condition,
                if_true,
                if_false,
            } => {
                if self.eval(condition)?.is_truthy() {
                    self.eval(if_true)
                } else {
                    self.eval(if_false)
                }
            }
            AstNode::Call {
                callee,
                args,
                kwargs,
            } => {
                let callee = self.eval(callee)?;
                let positional = self.eval_all(args)?;
                let mut keywords = Vec::with_capacity(kwargs.len());
                for (name, value) in kwargs {
                    keywords.push((name.clone(), self.eval(value)?));
                }
                call_value(&callee, CallArgs::new(positional, keywords), self.context)
            }
            AstNode::Lookup { target, key } => {
                let target = self.eval(target)?;
                let key = self.eval(key)?;
                subscript(&target, &key)
            }
            AstNode::ObjLookup { target, name } => {
                let target = self.eval(target)?;
                methods::get_attribute(&target, name)
            }
        }
    }

    fn eval_all(&self, nodes: &[AstNode]) -> Result<Vec<Value>, EvalError> {
        nodes.iter().map(|node| self.eval(node)).collect()
    }

    /// Caller bindings first, then the builtin table.
    fn resolve(&self, name: &str) -> Result<Value, EvalError> {
        if let Some(value) = self.context.get(name) {
            return Ok(value.clone());
        }
        builtins::lookup(name, self.context)?.ok_or_else(|| EvalError::Name(name.to_string()))
    }

    fn eval_compare(
        &self,
        left: &AstNode,
        comparisons: &[(CompareOp, AstNode)],
    ) -> Result<Value, EvalError> {
        let mut left = self.eval(left)?;
        for (op, right) in comparisons {
            let right = self.eval(right)?;
            if !operators::compare(*op, &left, &right)? {
                return Ok(Value::Bool(false));
            }
            left = right;
        }
        Ok(Value::Bool(true))
    }
}

/// Invokes `callee` with already evaluated arguments.
pub fn call_value(callee: &Value, args: CallArgs, context: &EvalContext) -> Result<Value, EvalError> {
    match callee {
        Value::Callable(Callable::Builtin(builtin)) => builtins::call_builtin(*builtin, args, context),
        Value::Callable(Callable::Constructor(constructor)) => builtins::construct(*constructor, args),
        Value::Callable(Callable::Method(method)) => {
            methods::call_method(&method.receiver, method.name, args, context)
        }
        Value::Callable(Callable::Native(native)) => native.call(args),
        Value::Weekday(weekday) => {
            let bound = args.bind("weekday", &["n"])?;
            match bound.int("n")? {
                None => Ok(Value::Weekday(*weekday)),
                Some(n) if Some(n) == weekday.n() => Ok(Value::Weekday(*weekday)),
                Some(n) => Ok(Value::Weekday(weekday.with_n(n)?)),
            }
        }
        other => Err(EvalError::Type(format!(
            "'{}' object is not callable",
            other.type_name()
        ))),
    }
}

/// `target[key]`.
pub fn subscript(target: &Value, key: &Value) -> Result<Value, EvalError> {
    match target {
        Value::List(items) | Value::Tuple(items) => {
            let index = sequence_index(target, key, items.len())?;
            Ok(items[index].clone())
        }
        Value::Str(text) => {
            let chars: Vec<char> = text.chars().collect();
            let index = sequence_index(target, key, chars.len())?;
            Ok(Value::Str(chars[index].to_string()))
        }
        Value::Dict(dict) => {
            key.ensure_hashable()?;
            dict.get(key)
                .cloned()
                .ok_or_else(|| EvalError::Key(key.to_string()))
        }
        other => Err(EvalError::Type(format!(
            "'{}' object is not subscriptable",
            other.type_name()
        ))),
    }
}

fn sequence_index(target: &Value, key: &Value, len: usize) -> Result<usize, EvalError> {
    let index = match key {
        Value::Int(value) => value.clone(),
        Value::Bool(value) => i64::from(*value).into(),
        other => {
            return Err(EvalError::Type(format!(
                "{} indices must be integers, not {}",
                target.type_name(),
                other.type_name()
            )))
        }
    };
    let out_of_range = || EvalError::Index(format!("{} index out of range", target.type_name()));
    let resolved = if index.is_negative() {
        index + len
    } else {
        index
    };
    match resolved.to_usize() {
        Some(position) if position < len => Ok(position),
        _ => Err(out_of_range()),
    }
}

#[cfg(test)]
#[path = "evaluator_test.rs"]
mod tests;
