use super::lookup;
use crate::datetime::{Date, DateTime, Duration, TimeOfDay, Weekday};
use crate::evaluator::{evaluate_expression, EvalContext, ErrorKind};
use crate::value::{Module, Value};

fn context() -> EvalContext {
    EvalContext::new().with_now(DateTime::new(2023, 12, 31, 23, 59, 58, 0).expect("now"))
}

fn eval(expression: &str) -> Value {
    evaluate_expression(expression, &context()).expect("eval")
}

fn eval_kind(expression: &str) -> ErrorKind {
    evaluate_expression(expression, &context())
        .expect_err("should fail")
        .kind()
}

#[test]
fn table_exposes_modules_and_weekday_anchors() {
    let context = context();
    assert_eq!(
        lookup("datetime", &context).expect("lookup"),
        Some(Value::Module(Module::Datetime))
    );
    assert_eq!(
        lookup("FR", &context).expect("lookup"),
        Some(Value::Weekday(Weekday::new(4, None).expect("weekday")))
    );
    assert_eq!(lookup("open", &context).expect("lookup"), None);
    assert!(lookup("relativedelta", &context).expect("lookup").is_some());
    assert!(lookup("eval", &context).expect("lookup").is_none());
}

#[test]
fn bool_follows_truthiness() {
    assert!(matches!(eval("bool([])"), Value::Bool(false)));
    assert!(matches!(eval("bool('x')"), Value::Bool(true)));
    assert!(matches!(eval("bool()"), Value::Bool(false)));
}

#[test]
fn constructors_validate_fields() {
    assert_eq!(
        eval("date(2024, 2, 29)"),
        Value::Date(Date::new(2024, 2, 29).expect("date"))
    );
    assert_eq!(eval_kind("date(2023, 2, 29)"), ErrorKind::ValueError);
    assert_eq!(eval_kind("date(2023, 2)"), ErrorKind::TypeError);
    assert_eq!(eval_kind("date('2023', 2, 1)"), ErrorKind::TypeError);
    assert_eq!(
        eval("datetime.time(8, 30)"),
        Value::Time(TimeOfDay::new(8, 30, 0, 0).expect("time"))
    );
    assert_eq!(eval_kind("datetime.time(24)"), ErrorKind::ValueError);
}

#[test]
fn timedelta_accepts_fractional_parts() {
    let Value::Duration(span) = eval("timedelta(hours=1.5, milliseconds=2)") else {
        panic!("expected duration");
    };
    assert_eq!(span.days(), 0);
    assert_eq!(span.seconds(), 5_400);
    assert_eq!(span.microseconds(), 2_000);

    assert_eq!(
        eval("timedelta(weeks=1, days=-1)"),
        Value::Duration(Duration::from_days(6).expect("duration"))
    );
    assert_eq!(eval_kind("timedelta(days='1')"), ErrorKind::TypeError);
}

#[test]
fn relativedelta_accepts_keywords_only() {
    let Value::RelativeDelta(delta) = eval("relativedelta(months=14, day=31, weekday=MO(-1))")
    else {
        panic!("expected relativedelta");
    };
    assert_eq!(delta.years(), 1);
    assert_eq!(delta.months(), 2);
    assert_eq!(delta.day(), Some(31));
    assert_eq!(delta.weekday(), Some(Weekday::new(0, Some(-1)).expect("weekday")));

    assert_eq!(eval_kind("relativedelta(date(2020, 1, 1), date(2019, 1, 1))"), ErrorKind::TypeError);
    assert_eq!(eval_kind("relativedelta(fortnights=1)"), ErrorKind::TypeError);
    assert_eq!(
        eval_kind("relativedelta(microseconds=-9223372036854775807 - 1)"),
        ErrorKind::ValueError
    );
}

#[test]
fn relativedelta_wants_whole_numbers() {
    let Value::RelativeDelta(delta) = eval("relativedelta(days=2.0, weekday=4)") else {
        panic!("expected relativedelta");
    };
    assert_eq!(delta.days(), 2);
    assert_eq!(delta.weekday(), Some(Weekday::new(4, None).expect("weekday")));
    assert_eq!(eval_kind("relativedelta(days=1.5)"), ErrorKind::ValueError);
}

#[test]
fn clock_names_render_the_context_time() {
    assert_eq!(eval("now"), Value::str("2023-12-31 23:59:58"));
    assert_eq!(eval("today"), Value::str("2023-12-31"));
    assert_eq!(
        eval("context_today() + relativedelta(days=1)"),
        Value::Date(Date::new(2024, 1, 1).expect("date"))
    );
    assert_eq!(eval("time.strftime('%H:%M')"), Value::str("23:59"));
    assert_eq!(eval_kind("context_today(1)"), ErrorKind::TypeError);
}

#[test]
fn weekday_anchors_take_an_optional_count() {
    assert_eq!(
        eval("TU(2)"),
        Value::Weekday(Weekday::new(1, Some(2)).expect("weekday"))
    );
    assert!(matches!(eval("MO == MO(1)"), Value::Bool(true)));
    assert_eq!(eval_kind("MO(0)"), ErrorKind::ValueError);
}
