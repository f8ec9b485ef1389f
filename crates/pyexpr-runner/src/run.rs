use crate::cli::{EvalCommand, FormatCommand, OutputFormat, TokensCommand};
use crate::config::{load_limits_config, LimitsConfigError};
use chrono::{Datelike, NaiveDate, NaiveDateTime, Timelike};
use pyexpr::{
    bindings_from_json, tokenize, value_to_json, DateTime, Engine, EngineLimits, EvalContext,
    EvalError, JsonError, LexError,
};
use serde_json::Value;
use std::fs;
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("read file failed `{path}`: {source}")]
    ReadFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("context parse failed: {0}")]
    ContextParse(String),
    #[error("context conversion failed: {0}")]
    Context(#[source] JsonError),
    #[error(transparent)]
    Config(#[from] LimitsConfigError),
    #[error("--now must look like `YYYY-MM-DD HH:MM:SS`, got `{0}`")]
    InvalidNow(String),
    #[error("{0}")]
    Eval(#[from] EvalError),
    #[error("{0}")]
    Lex(#[from] LexError),
    #[error("result has no JSON form: {0}")]
    Result(#[source] JsonError),
    #[error("json encode failed: {0}")]
    JsonEncode(#[from] serde_json::Error),
}

impl RunnerError {
    /// Label printed before the message on stderr.
    pub fn kind(&self) -> &'static str {
        match self {
            RunnerError::Eval(error) => error.kind().as_str(),
            RunnerError::Lex(_) => "SyntaxError",
            RunnerError::Result(_) => "TypeError",
            RunnerError::ReadFile { .. } => "OSError",
            RunnerError::ContextParse(_) | RunnerError::Context(_) => "ContextError",
            RunnerError::Config(_) => "ConfigError",
            RunnerError::InvalidNow(_) => "UsageError",
            RunnerError::JsonEncode(_) => "JsonError",
        }
    }
}

pub fn execute_eval(command: &EvalCommand) -> Result<String, RunnerError> {
    let engine = Engine::new(load_limits(command.config.as_deref())?);
    let mut context = match &command.context {
        Some(path) => load_context(path)?,
        None => EvalContext::new(),
    };
    if let Some(now) = &command.now {
        context = context.with_now(parse_now(now)?);
    }

    let value = engine.evaluate(command.expr.as_str(), &context)?;
    match command.format {
        OutputFormat::Text => Ok(value.to_string()),
        OutputFormat::Json => {
            let json = value_to_json(&value).map_err(RunnerError::Result)?;
            Ok(serde_json::to_string_pretty(&json)?)
        }
    }
}

pub fn execute_format(command: &FormatCommand) -> Result<String, RunnerError> {
    let engine = Engine::new(load_limits(command.config.as_deref())?);
    Ok(engine.format(command.expr.as_str())?)
}

pub fn execute_tokens(command: &TokensCommand) -> Result<String, RunnerError> {
    let tokens = tokenize(command.expr.as_str())?;
    log::debug!("{} tokens", tokens.len());
    let lines: Vec<String> = tokens
        .iter()
        .map(|token| format!("{}\t{:?}\t{:?}", token.pos, token.kind, token.lexeme))
        .collect();
    Ok(lines.join("\n"))
}

fn load_limits(path: Option<&Path>) -> Result<EngineLimits, RunnerError> {
    match path {
        Some(path) => Ok(load_limits_config(path)?),
        None => Ok(EngineLimits::default()),
    }
}

fn load_context(path: &Path) -> Result<EvalContext, RunnerError> {
    let text = fs::read_to_string(path).map_err(|source| RunnerError::ReadFile {
        path: path.display().to_string(),
        source,
    })?;
    let document = parse_context_value(path, text.as_str())?;
    let bindings = bindings_from_json(&document).map_err(RunnerError::Context)?;
    let context = EvalContext::from_bindings(bindings.into_iter().collect());
    log::debug!(
        "loaded {} context bindings from {}",
        context.bindings().len(),
        path.display()
    );
    Ok(context)
}

fn parse_context_value(path: &Path, input: &str) -> Result<Value, RunnerError> {
    let as_json = match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => true,
        Some("yaml") | Some("yml") => false,
        _ => {
            let trimmed = input.trim_start();
            trimmed.starts_with('{') || trimmed.starts_with('[')
        }
    };
    if as_json {
        serde_json::from_str::<Value>(input)
            .map_err(|error| RunnerError::ContextParse(error.to_string()))
    } else {
        serde_yaml::from_str::<Value>(input)
            .map_err(|error| RunnerError::ContextParse(error.to_string()))
    }
}

/// Accepts `YYYY-MM-DD HH:MM:SS`, or a bare date meaning midnight.
fn parse_now(input: &str) -> Result<DateTime, RunnerError> {
    let invalid = || RunnerError::InvalidNow(input.to_string());
    let naive = NaiveDateTime::parse_from_str(input, "%Y-%m-%d %H:%M:%S")
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(input, "%Y-%m-%d")
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
        .ok_or_else(invalid)?;
    DateTime::new(
        i64::from(naive.year()),
        i64::from(naive.month()),
        i64::from(naive.day()),
        i64::from(naive.hour()),
        i64::from(naive.minute()),
        i64::from(naive.second()),
        0,
    )
    .map_err(|_| invalid())
}

#[cfg(test)]
#[path = "run_test.rs"]
mod tests;
