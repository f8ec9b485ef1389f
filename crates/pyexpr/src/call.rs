use crate::evaluator::EvalError;
use crate::value::Value;
use std::fmt;
use std::sync::Arc;

/// Evaluated call arguments in source order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keywords: Vec<(String, Value)>,
}

impl CallArgs {
    pub fn new(positional: Vec<Value>, keywords: Vec<(String, Value)>) -> Self {
        Self {
            positional,
            keywords,
        }
    }

    pub fn positional(values: Vec<Value>) -> Self {
        Self::new(values, Vec::new())
    }

    pub fn is_empty(&self) -> bool {
        self.positional.is_empty() && self.keywords.is_empty()
    }

    /// Binds positional arguments to `params` in order, then keywords by
    /// name.
    pub fn bind(self, function: &str, params: &'static [&'static str]) -> Result<BoundArgs, EvalError> {
        if self.positional.len() > params.len() {
            return Err(EvalError::Type(format!(
                "{function}() takes at most {} arguments ({} given)",
                params.len(),
                self.positional.len()
            )));
        }
        let mut slots: Vec<Option<Value>> = vec![None; params.len()];
        for (slot, value) in slots.iter_mut().zip(self.positional) {
            *slot = Some(value);
        }
        for (name, value) in self.keywords {
            let Some(index) = params.iter().position(|param| *param == name) else {
                return Err(EvalError::Type(format!(
                    "{function}() got an unexpected keyword argument '{name}'"
                )));
            };
            if slots[index].is_some() {
                return Err(EvalError::Type(format!(
                    "{function}() got multiple values for argument '{name}'"
                )));
            }
            slots[index] = Some(value);
        }
        Ok(BoundArgs {
            function: function.to_string(),
            params,
            slots,
        })
    }

    /// Fails unless the call carries no arguments at all.
    pub fn expect_none(self, function: &str) -> Result<(), EvalError> {
        self.bind(function, &[]).map(|_| ())
    }
}

/// Arguments bound to a fixed parameter list.
#[derive(Debug)]
pub struct BoundArgs {
    function: String,
    params: &'static [&'static str],
    slots: Vec<Option<Value>>,
}

impl BoundArgs {
    pub fn get(&self, name: &str) -> Option<&Value> {
        let index = self.params.iter().position(|param| *param == name)?;
        self.slots[index].as_ref()
    }

    pub fn required(&self, name: &str) -> Result<&Value, EvalError> {
        self.get(name).ok_or_else(|| {
            EvalError::Type(format!(
                "{}() missing required argument '{name}'",
                self.function
            ))
        })
    }

    pub fn function(&self) -> &str {
        &self.function
    }

    /// `(name, value)` for every supplied argument, in parameter order.
    pub fn supplied(&self) -> impl Iterator<Item = (&'static str, &Value)> {
        self.params
            .iter()
            .zip(&self.slots)
            .filter_map(|(name, slot)| slot.as_ref().map(|value| (*name, value)))
    }

    /// Integer argument with Python `int`/`bool` semantics.
    pub fn int(&self, name: &str) -> Result<Option<i64>, EvalError> {
        match self.get(name) {
            None => Ok(None),
            Some(value) => expect_int(&self.function, name, value).map(Some),
        }
    }

    pub fn int_or(&self, name: &str, default: i64) -> Result<i64, EvalError> {
        Ok(self.int(name)?.unwrap_or(default))
    }

    pub fn required_int(&self, name: &str) -> Result<i64, EvalError> {
        expect_int(&self.function, name, self.required(name)?)
    }

    pub fn str(&self, name: &str) -> Result<Option<&str>, EvalError> {
        match self.get(name) {
            None => Ok(None),
            Some(Value::Str(value)) => Ok(Some(value)),
            Some(other) => Err(EvalError::Type(format!(
                "{}() argument '{name}' must be str, not {}",
                self.function,
                other.type_name()
            ))),
        }
    }

    pub fn required_str(&self, name: &str) -> Result<&str, EvalError> {
        self.required(name)?;
        self.str(name)?.ok_or_else(|| {
            EvalError::Type(format!(
                "{}() missing required argument '{name}'",
                self.function
            ))
        })
    }
}

pub fn expect_int(function: &str, name: &str, value: &Value) -> Result<i64, EvalError> {
    match value {
        Value::Int(_) | Value::Bool(_) => value.as_i64().ok_or_else(|| {
            EvalError::Value(format!("{function}() argument '{name}' is out of range"))
        }),
        other => Err(EvalError::Type(format!(
            "{function}() argument '{name}' must be int, not {}",
            other.type_name()
        ))),
    }
}

pub type NativeFn = dyn Fn(CallArgs) -> Result<Value, EvalError> + Send + Sync;

/// Host-supplied function that expressions may call.
#[derive(Clone)]
pub struct NativeFunction {
    name: String,
    func: Arc<NativeFn>,
}

impl NativeFunction {
    pub fn new<F>(name: impl Into<String>, func: F) -> Self
    where
        F: Fn(CallArgs) -> Result<Value, EvalError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn call(&self, args: CallArgs) -> Result<Value, EvalError> {
        (self.func)(args)
    }
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.func, &other.func)
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Free functions of the builtin table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    Bool,
    ContextToday,
    TimeStrftime,
}

impl Builtin {
    pub fn name(&self) -> &'static str {
        match self {
            Builtin::Bool => "bool",
            Builtin::ContextToday => "context_today",
            Builtin::TimeStrftime => "strftime",
        }
    }
}

/// Temporal types callable as constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Constructor {
    Date,
    DateTime,
    Time,
    TimeDelta,
    RelativeDelta,
}

impl Constructor {
    pub fn name(&self) -> &'static str {
        match self {
            Constructor::Date => "date",
            Constructor::DateTime => "datetime",
            Constructor::Time => "time",
            Constructor::TimeDelta => "timedelta",
            Constructor::RelativeDelta => "relativedelta",
        }
    }

    pub fn qualified_name(&self) -> &'static str {
        match self {
            Constructor::Date => "datetime.date",
            Constructor::DateTime => "datetime.datetime",
            Constructor::Time => "datetime.time",
            Constructor::TimeDelta => "datetime.timedelta",
            Constructor::RelativeDelta => "dateutil.relativedelta.relativedelta",
        }
    }
}

/// A method looked up on a value, waiting for its arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundMethod {
    pub receiver: Value,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Callable {
    Builtin(Builtin),
    Constructor(Constructor),
    Method(Box<BoundMethod>),
    Native(NativeFunction),
}

impl Callable {
    pub fn method(receiver: Value, name: &'static str) -> Self {
        Callable::Method(Box::new(BoundMethod { receiver, name }))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Callable::Builtin(_) | Callable::Native(_) => "builtin_function_or_method",
            Callable::Constructor(_) => "type",
            Callable::Method(_) => "method",
        }
    }
}

impl From<NativeFunction> for Callable {
    fn from(value: NativeFunction) -> Self {
        Callable::Native(value)
    }
}

impl fmt::Display for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Callable::Builtin(builtin) => write!(f, "<built-in function {}>", builtin.name()),
            Callable::Constructor(constructor) => {
                write!(f, "<class '{}'>", constructor.qualified_name())
            }
            Callable::Method(method) => write!(
                f,
                "<built-in method {} of {} object>",
                method.name,
                method.receiver.type_name()
            ),
            Callable::Native(native) => write!(f, "<built-in function {}>", native.name()),
        }
    }
}

#[cfg(test)]
#[path = "call_test.rs"]
mod tests;
