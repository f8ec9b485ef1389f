use super::{bindings_from_json, value_from_json, value_to_json, JsonError};
use crate::datetime::{Date, DateTime, Duration, TimeOfDay};
use crate::evaluator::{evaluate_expression, EvalContext};
use crate::value::{Dict, Value};
use num_bigint::BigInt;
use serde_json::json;

#[test]
fn json_documents_become_values() {
    let value = value_from_json(&json!({
        "count": 3,
        "big": 18_446_744_073_709_551_615u64,
        "ratio": 0.25,
        "tags": ["a", null, true],
    }));
    let Value::Dict(dict) = value else {
        panic!("expected dict");
    };
    assert_eq!(dict.get(&Value::str("count")), Some(&Value::int(3)));
    assert_eq!(
        dict.get(&Value::str("big")),
        Some(&Value::Int(BigInt::from(u64::MAX)))
    );
    assert_eq!(dict.get(&Value::str("ratio")), Some(&Value::Float(0.25)));
    assert_eq!(
        dict.get(&Value::str("tags")),
        Some(&Value::List(vec![Value::str("a"), Value::None, Value::Bool(true)]))
    );
}

#[test]
fn context_files_must_be_objects() {
    let bindings = bindings_from_json(&json!({"user": {"id": 7}})).expect("bindings");
    let context = EvalContext::new().with(bindings[0].0.clone(), bindings[0].1.clone());
    assert_eq!(
        evaluate_expression("user['id'] + 1", &context).expect("eval"),
        Value::int(8)
    );
    assert_eq!(
        bindings_from_json(&json!([1, 2])).expect_err("array"),
        JsonError::ContextNotObject("array")
    );
}

#[test]
fn calendar_values_render_as_strings() {
    let date_time = DateTime::new(2024, 1, 2, 3, 4, 5, 678).expect("datetime");
    assert_eq!(
        value_to_json(&Value::DateTime(date_time)).expect("json"),
        json!("2024-01-02 03:04:05")
    );
    assert_eq!(
        value_to_json(&Value::Date(Date::new(2024, 1, 2).expect("date"))).expect("json"),
        json!("2024-01-02")
    );
    assert_eq!(
        value_to_json(&Value::Time(TimeOfDay::new(23, 0, 9, 0).expect("time"))).expect("json"),
        json!("23:00:09")
    );
    let span = Duration::new(1, 30, 500_000).expect("duration");
    assert_eq!(value_to_json(&Value::Duration(span)).expect("json"), json!(86_430.5));
}

#[test]
fn containers_and_wide_integers() {
    let value = Value::Tuple(vec![
        Value::int(-4),
        Value::int(i64::MIN),
        Value::Int(BigInt::from(u64::MAX)),
        Value::Int(BigInt::from(u64::MAX) * BigInt::from(2)),
        Value::Dict(Dict::from_entries([(Value::str("k"), Value::None)])),
    ]);
    assert_eq!(
        value_to_json(&value).expect("json"),
        json!([-4, i64::MIN, u64::MAX, "36893488147419103230", {"k": null}])
    );
}

#[test]
fn rejects_values_without_a_json_form() {
    let context = EvalContext::new();
    let delta = evaluate_expression("relativedelta(days=1)", &context).expect("eval");
    assert_eq!(
        value_to_json(&delta).expect_err("relativedelta"),
        JsonError::Unsupported("relativedelta")
    );
    let anchor = evaluate_expression("MO", &context).expect("eval");
    assert!(value_to_json(&anchor).is_err());
    let keyed = Value::Dict(Dict::from_entries([(Value::int(1), Value::None)]));
    assert_eq!(
        value_to_json(&keyed).expect_err("int key"),
        JsonError::NonStringKey("int")
    );
    assert_eq!(
        value_to_json(&Value::Float(f64::INFINITY)).expect_err("inf"),
        JsonError::NonFiniteFloat(f64::INFINITY)
    );
}
