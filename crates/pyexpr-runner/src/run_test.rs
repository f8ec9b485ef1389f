use super::{execute_eval, execute_format, execute_tokens, RunnerError};
use crate::cli::{EvalCommand, FormatCommand, OutputFormat, TokensCommand};
use serde_json::Value;
use std::fs;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

fn eval_command(expr: &str) -> EvalCommand {
    EvalCommand {
        expr: expr.to_string(),
        context: None,
        config: None,
        now: None,
        format: OutputFormat::Text,
        verbose: false,
    }
}

#[test]
fn eval_prints_python_repr() {
    let output = execute_eval(&eval_command("[1, 'a', None, 2 / 4]")).expect("eval");
    assert_eq!(output, "[1, 'a', None, 0.5]");
}

#[test]
fn eval_reads_json_context_and_pinned_clock() {
    let context = write_temp_file(
        "context-json",
        ".json",
        r#"{"partner": {"name": "Ada", "credit": 120}, "limit": 100}"#,
    );
    let output = execute_eval(&EvalCommand {
        context: Some(context),
        now: Some("2024-02-28 18:00:00".to_string()),
        ..eval_command(
            "(partner['name'], partner['credit'] > limit, context_today() + timedelta(days=1))",
        )
    })
    .expect("eval");
    assert_eq!(output, "('Ada', True, datetime.date(2024, 2, 29))");
}

#[test]
fn eval_reads_yaml_context() {
    let context = write_temp_file("context-yaml", ".yml", "ids:\n  - 3\n  - 4\n");
    let output = execute_eval(&EvalCommand {
        context: Some(context),
        ..eval_command("4 in ids")
    })
    .expect("eval");
    assert_eq!(output, "True");
}

#[test]
fn eval_json_output_renders_dates_as_strings() {
    let output = execute_eval(&EvalCommand {
        now: Some("2024-01-31".to_string()),
        format: OutputFormat::Json,
        ..eval_command("{'due': context_today() + relativedelta(months=1), 'now': now}")
    })
    .expect("eval");
    let parsed: Value = serde_json::from_str(output.as_str()).expect("must be valid json");
    assert_eq!(parsed["due"], Value::String("2024-02-29".to_string()));
    assert_eq!(parsed["now"], Value::String("2024-01-31 00:00:00".to_string()));
}

#[test]
fn eval_errors_carry_python_kinds() {
    let err = execute_eval(&eval_command("1 / 0")).expect_err("division");
    assert_eq!(err.kind(), "ZeroDivisionError");
    let err = execute_eval(&eval_command("missing + 1")).expect_err("name");
    assert_eq!(err.kind(), "NameError");
    assert_eq!(err.to_string(), "name 'missing' is not defined");
    let output = execute_eval(&eval_command("MO")).expect("eval");
    assert_eq!(output, "MO");
}

#[test]
fn eval_rejects_bad_inputs() {
    let err = execute_eval(&EvalCommand {
        now: Some("yesterday".to_string()),
        ..eval_command("1")
    })
    .expect_err("bad clock");
    assert!(matches!(err, RunnerError::InvalidNow(_)));

    let err = execute_eval(&EvalCommand {
        format: OutputFormat::Json,
        ..eval_command("relativedelta(days=1)")
    })
    .expect_err("no json form");
    assert_eq!(err.kind(), "TypeError");

    let context = write_temp_file("context-list", ".json", "[1, 2]");
    let err = execute_eval(&EvalCommand {
        context: Some(context),
        ..eval_command("1")
    })
    .expect_err("context must be an object");
    assert_eq!(err.kind(), "ContextError");
}

#[test]
fn eval_applies_configured_limits() {
    let config = write_temp_file("limits", ".yaml", "max_source_len: 3\n");
    let err = execute_eval(&EvalCommand {
        config: Some(config),
        ..eval_command("1 + 2")
    })
    .expect_err("too long");
    assert_eq!(err.kind(), "ValueError");
}

#[test]
fn format_prints_canonical_source() {
    let output = execute_format(&FormatCommand {
        expr: "( a  if b else(c))".to_string(),
        config: None,
    })
    .expect("format");
    assert_eq!(output, "a if b else c");
}

#[test]
fn tokens_prints_one_line_per_token() {
    let output = execute_tokens(&TokensCommand {
        expr: "x.y".to_string(),
    })
    .expect("tokens");
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "0\tIdentifier\t\"x\"");
    assert_eq!(lines[1], "1\tDot\t\".\"");
    let err = execute_tokens(&TokensCommand {
        expr: "'open".to_string(),
    })
    .expect_err("unterminated");
    assert_eq!(err.kind(), "SyntaxError");
}

fn write_temp_file(prefix: &str, extension: &str, content: &str) -> PathBuf {
    let mut path = std::env::temp_dir();
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time must be monotonic")
        .as_nanos();
    path.push(format!(
        "pyexpr-runner-{prefix}-{}-{nanos}{extension}",
        std::process::id()
    ));
    fs::write(&path, content).expect("must write temp file");
    path
}
