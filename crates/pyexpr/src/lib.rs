pub mod ast;
pub mod builtins;
pub mod call;
pub mod datetime;
pub mod engine;
pub mod evaluator;
pub mod formatter;
pub mod json;
pub mod lexer;
pub mod methods;
pub mod operators;
pub mod parser;
pub mod value;

pub use ast::AstNode;
pub use call::{CallArgs, Callable, NativeFunction};
pub use datetime::{
    DateError, Date, DateTime, Duration, Granularity, Moment, RelativeDelta, TimeOfDay, Weekday,
};
pub use engine::{Engine, EngineLimits};
pub use evaluator::{evaluate, evaluate_expression, ErrorKind, EvalContext, EvalError};
pub use formatter::format_ast;
pub use json::{bindings_from_json, value_from_json, value_to_json, JsonError};
pub use lexer::{tokenize, LexError, Token, TokenKind};
pub use parser::{parse, parse_expression, parse_expression_with_depth, ParseError, Parser};
pub use value::{Dict, Kind, Value};
