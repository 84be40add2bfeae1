//! The formula grammar driving calcdown's evaluation facade.

use std::collections::HashMap;

use calcdown_core::{EvalError, Evaluator, ParameterDefinition, Parameters, Value, Values};
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

#[test]
fn document_function_dispatches_through_scope() {
    let parameters = Parameters::from([("double".to_string(), function(&["n"], "n * 2"))]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate("double(5)").unwrap(), Value::Number(10.0));
}

#[test]
fn function_arguments_shadow_parameters() {
    let parameters = Parameters::from([
        (
            "n".to_string(),
            ParameterDefinition::Constant { value: Value::Number(100.0) },
        ),
        ("double".to_string(), function(&["n"], "n * 2")),
    ]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    // Inside the call, `n` is the bound argument, not the constant.
    assert_eq!(evaluator.evaluate("double(3)").unwrap(), Value::Number(6.0));
    // Outside the call, the constant is untouched.
    assert_eq!(evaluator.evaluate("n").unwrap(), Value::Number(100.0));
}

#[test]
fn nested_function_calls_compose() {
    let parameters = Parameters::from([
        ("inc".to_string(), function(&["x"], "x + 1")),
        ("twice_inc".to_string(), function(&["x"], "inc(inc(x))")),
    ]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate("twice_inc(1)").unwrap(), Value::Number(3.0));
}

#[test]
fn function_wrong_arity_is_reported() {
    let parameters = Parameters::from([("double".to_string(), function(&["n"], "n * 2"))]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    let err = evaluator.evaluate("double(1, 2)").unwrap_err();
    assert!(matches!(err, EvalError::Arity { expected: 1, received: 2, .. }));
}

#[test]
fn unbounded_function_recursion_is_cut_off() {
    let parameters = Parameters::from([("spin".to_string(), function(&["n"], "spin(n)"))]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    let err = evaluator.evaluate("spin(1)").unwrap_err();
    assert!(matches!(err, EvalError::Cycle { .. }), "got {err}");
}

#[test]
fn bounded_recursion_terminates() {
    let parameters = Parameters::from([(
        "fact".to_string(),
        function(&["n"], "if(n <= 1, 1, n * fact(n - 1))"),
    )]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate("fact(5)").unwrap(), Value::Number(120.0));
}

#[test]
fn calculations_and_functions_mix() {
    let parameters = Parameters::from([
        ("base".to_string(), calculation("4")),
        ("area".to_string(), function(&["s"], "s ^ 2")),
        ("result".to_string(), calculation("area(base) + 1")),
    ]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    assert_eq!(evaluator.evaluate_term("result").unwrap(), Value::Number(17.0));
}

#[test]
fn overrides_shadow_for_one_call_only() {
    let parameters = Parameters::from([(
        "x".to_string(),
        ParameterDefinition::Constant { value: Value::Number(1.0) },
    )]);
    let values = Values::new();
    let backend = FormulaBackend::new();
    let evaluator = Evaluator::new(&parameters, &values, &backend);

    let overrides = HashMap::from([("x".to_string(), Value::Number(9.0))]);
    assert_eq!(
        evaluator.evaluate_with("x + 1", &overrides).unwrap(),
        Value::Number(10.0)
    );
    assert_eq!(evaluator.evaluate("x + 1").unwrap(), Value::Number(2.0));
}
