//! Evaluation behaviour of the parameter graph end to end, using the
//! formula backend.

use calcdown_core::{
    EvalError, Evaluator, InputDefinition, InputKind, NumberRange, ParameterDefinition,
    Parameters, RangeBound, Value, Values,
};
use calcdown_formula::FormulaBackend;

fn calculation(expression: &str) -> ParameterDefinition {
    ParameterDefinition::Calculation { expression: expression.to_string() }
}

fn function(arguments: &[&str], expression: &str) -> ParameterDefinition {
    ParameterDefinition::Function {
        arguments: arguments.iter().map(ToString::to_string).collect(),
        expression: expression.to_string(),
    }
}

fn number_input(default: Option<f64>) -> ParameterDefinition {
    ParameterDefinition::Input(InputDefinition {
        kind: InputKind::Number { range: None },
        width: None,
        height: None,
        default: default.map(Value::Number),
    })
}

#[test]
fn calculation_chain_evaluates() {
    let parameters = Parameters::from([
        ("a".to_string(), calculation("2")),
        ("b".to_string(), calculation("a * 3")),
    ]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate_term("b").unwrap(), Value::Number(6.0));
}

#[test]
fn evaluation_is_deterministic() {
    let parameters = Parameters::from([
        ("x".to_string(), number_input(Some(3.0))),
        ("y".to_string(), calculation("x ^ 2 + 1")),
    ]);
    let values = Values::from([("x".to_string(), Value::Number(4.0))]);
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    let first = evaluator.evaluate_term("y").unwrap();
    let second = evaluator.evaluate_term("y").unwrap();
    assert_eq!(first, Value::Number(17.0));
    assert_eq!(first, second);
}

#[test]
fn input_falls_back_to_default() {
    let parameters = Parameters::from([
        ("x".to_string(), number_input(Some(5.0))),
        ("y".to_string(), calculation("x * 2")),
    ]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate_term("y").unwrap(), Value::Number(10.0));
}

#[test]
fn stored_value_wins_over_default() {
    let parameters = Parameters::from([("x".to_string(), number_input(Some(5.0)))]);
    let values = Values::from([("x".to_string(), Value::Number(8.0))]);
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate_term("x").unwrap(), Value::Number(8.0));
}

#[test]
fn missing_default_is_an_error() {
    let parameters = Parameters::from([
        ("x".to_string(), number_input(None)),
        ("y".to_string(), calculation("x * 2")),
    ]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    let err = evaluator.evaluate_term("x").unwrap_err();
    assert!(matches!(err, EvalError::MissingDefault(name) if name == "x"));

    // Through a calculation the failure is wrapped with the term name.
    let err = evaluator.evaluate_term("y").unwrap_err();
    let EvalError::Evaluation { term, message, .. } = err else {
        panic!("expected wrapped evaluation error, got {err}");
    };
    assert_eq!(term, "y");
    assert!(message.contains("no default for input `x`"));
}

#[test]
fn text_input_defaults_to_empty_string() {
    let parameters = Parameters::from([(
        "note".to_string(),
        ParameterDefinition::Input(InputDefinition {
            kind: InputKind::Text { max_length: None },
            width: None,
            height: None,
            default: None,
        }),
    )]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate_term("note").unwrap(), Value::Text(String::new()));
}

#[test]
fn numeric_input_coerces_stored_text() {
    let parameters = Parameters::from([
        ("x".to_string(), number_input(None)),
        ("y".to_string(), calculation("x + 1")),
    ]);
    // Widgets hand values back as strings.
    let values = Values::from([("x".to_string(), Value::Text("41".to_string()))]);
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate_term("y").unwrap(), Value::Number(42.0));
}

#[test]
fn numeric_input_rejects_unparseable_text() {
    let parameters = Parameters::from([("x".to_string(), number_input(None))]);
    let values = Values::from([("x".to_string(), Value::Text("not a number".to_string()))]);
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    let err = evaluator.evaluate_term("x").unwrap_err();
    assert!(matches!(err, EvalError::NotNumeric { .. }));
}

#[test]
fn number_input_clamps_into_declared_range() {
    let parameters = Parameters::from([(
        "x".to_string(),
        ParameterDefinition::Input(InputDefinition {
            kind: InputKind::Number {
                range: Some(NumberRange {
                    min: RangeBound { value: 1.0, inclusive: None },
                    max: RangeBound { value: 10.0, inclusive: None },
                }),
            },
            width: None,
            height: None,
            default: None,
        }),
    )]);
    let values = Values::from([("x".to_string(), Value::Number(99.0))]);
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate_term("x").unwrap(), Value::Number(10.0));

    let values = Values::from([("x".to_string(), Value::Number(-5.0))]);
    let evaluator = Evaluator::new(&parameters, &values, &backend);
    assert_eq!(evaluator.evaluate_term("x").unwrap(), Value::Number(1.0));
}

#[test]
fn function_calls_are_independent() {
    let parameters = Parameters::from([("f".to_string(), function(&["n"], "n * 2"))]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate("f(5)").unwrap(), Value::Number(10.0));
    assert_eq!(evaluator.evaluate("f(3)").unwrap(), Value::Number(6.0));
    // The bound `n` from earlier calls is gone.
    let err = evaluator.evaluate("n").unwrap_err();
    assert!(matches!(err, EvalError::UnknownTerm(name) if name == "n"));
}

#[test]
fn calculation_cycle_is_reported_not_overflowed() {
    let parameters = Parameters::from([
        ("a".to_string(), calculation("b + 1")),
        ("b".to_string(), calculation("a + 1")),
    ]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    let err = evaluator.evaluate_term("a").unwrap_err();
    assert!(matches!(err, EvalError::Cycle { .. }), "got {err}");
}

#[test]
fn constant_structures_resolve() {
    let parameters = Parameters::from([(
        "flag".to_string(),
        ParameterDefinition::Constant { value: Value::Bool(true) },
    )]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(
        evaluator.evaluate("if(flag, 1, 2)").unwrap(),
        Value::Number(1.0)
    );
}
