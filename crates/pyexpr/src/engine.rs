use crate::ast::AstNode;
use crate::evaluator::{evaluate, EvalContext, EvalError};
use crate::formatter::format_ast;
use crate::lexer::tokenize;
use crate::parser::{ParseError, Parser, DEFAULT_MAX_DEPTH};
use crate::value::Value;
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_SOURCE_LEN: usize = 4096;

/// Input bounds applied before any parsing work starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineLimits {
    /// Longest accepted source, in characters.
    pub max_source_len: usize,
    /// Deepest accepted nesting of sub-expressions.
    pub max_depth: usize,
}

impl Default for EngineLimits {
    fn default() -> Self {
        Self {
            max_source_len: DEFAULT_MAX_SOURCE_LEN,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Bounded parse-and-evaluate pipeline. Holds no per-expression state, so one
/// engine can serve any number of threads.
#[derive(Debug, Clone, Default)]
pub struct Engine {
    limits: EngineLimits,
}

impl Engine {
    pub fn new(limits: EngineLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> &EngineLimits {
        &self.limits
    }

    pub fn parse(&self, source: &str) -> Result<AstNode, EvalError> {
        let len = source.chars().count();
        if len > self.limits.max_source_len {
            log::debug!(
                "rejecting {len}-character expression (limit {})",
                self.limits.max_source_len
            );
            return Err(EvalError::SourceTooLong {
                len,
                max: self.limits.max_source_len,
            });
        }
        let tokens = tokenize(source).map_err(ParseError::from)?;
        log::trace!("{} tokens", tokens.len());
        Ok(Parser::with_max_depth(tokens, self.limits.max_depth).parse()?)
    }

    pub fn evaluate(&self, source: &str, context: &EvalContext) -> Result<Value, EvalError> {
        log::debug!(
            "evaluating expression with {} bindings",
            context.bindings().len()
        );
        let ast = self.parse(source)?;
        let value = evaluate(&ast, context)?;
        log::trace!("{source} => {value}");
        Ok(value)
    }

    /// Parses and prints `source` in canonical form.
    pub fn format(&self, source: &str) -> Result<String, EvalError> {
        Ok(format_ast(&self.parse(source)?))
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
