//! Tree-walk evaluation.
//!
//! Bare terms resolve through the [`TermScope`]; call syntax dispatches
//! to document functions when the scope classifies the name as callable,
//! otherwise to the builtin table. `if` is a special form so only the
//! taken branch evaluates.

use calcdown_core::{TermKind, TermScope, Value};

use crate::error::FormulaError;
use crate::parser::{BinOp, Expr, UnaryOp};

pub fn evaluate(expr: &Expr, scope: &dyn TermScope) -> Result<Value, FormulaError> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::Text(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Term(name) => Ok(scope.resolve(name)?),
        Expr::Unary { op, operand } => evaluate_unary(*op, operand, scope),
        Expr::Binary { op, left, right } => evaluate_binary(*op, left, right, scope),
        Expr::Call { name, args } => evaluate_call(name, args, scope),
    }
}

fn evaluate_unary(
    op: UnaryOp,
    operand: &Expr,
    scope: &dyn TermScope,
) -> Result<Value, FormulaError> {
    let value = evaluate(operand, scope)?;
    match op {
        UnaryOp::Neg => Ok(Value::Number(-expect_number(&value, "-")?)),
        UnaryOp::Not => Ok(Value::Bool(!expect_bool(&value, "not")?)),
    }
}

fn evaluate_binary(
    op: BinOp,
    left: &Expr,
    right: &Expr,
    scope: &dyn TermScope,
) -> Result<Value, FormulaError> {
    // Logical operators short-circuit; everything else is strict.
    match op {
        BinOp::And => {
            let lhs = expect_bool(&evaluate(left, scope)?, "and")?;
            if !lhs {
                return Ok(Value::Bool(false));
            }
            return Ok(Value::Bool(expect_bool(&evaluate(right, scope)?, "and")?));
        }
        BinOp::Or => {
            let lhs = expect_bool(&evaluate(left, scope)?, "or")?;
            if lhs {
                return Ok(Value::Bool(true));
            }
            return Ok(Value::Bool(expect_bool(&evaluate(right, scope)?, "or")?));
        }
        _ => {}
    }

    let lhs = evaluate(left, scope)?;
    let rhs = evaluate(right, scope)?;

    match op {
        BinOp::Add => numeric(op, &lhs, &rhs, |a, b| a + b),
        BinOp::Sub => numeric(op, &lhs, &rhs, |a, b| a - b),
        BinOp::Mul => numeric(op, &lhs, &rhs, |a, b| a * b),
        BinOp::Div => numeric(op, &lhs, &rhs, |a, b| a / b),
        BinOp::Rem => numeric(op, &lhs, &rhs, |a, b| a % b),
        BinOp::Pow => numeric(op, &lhs, &rhs, f64::powf),
        BinOp::Eq => Ok(Value::Bool(lhs == rhs)),
        BinOp::NotEq => Ok(Value::Bool(lhs != rhs)),
        BinOp::Lt | BinOp::LtEq | BinOp::Gt | BinOp::GtEq => compare(op, &lhs, &rhs),
        BinOp::And | BinOp::Or => unreachable!("handled above"),
    }
}

fn numeric(
    op: BinOp,
    lhs: &Value,
    rhs: &Value,
    apply: impl Fn(f64, f64) -> f64,
) -> Result<Value, FormulaError> {
    let symbol = op_symbol(op);
    let a = expect_number(lhs, symbol)?;
    let b = expect_number(rhs, symbol)?;
    Ok(Value::Number(apply(a, b)))
}

fn compare(op: BinOp, lhs: &Value, rhs: &Value) -> Result<Value, FormulaError> {
    let symbol = op_symbol(op);
    let ordering = match (lhs, rhs) {
        (Value::Text(a), Value::Text(b)) => a.cmp(b),
        _ => {
            let a = expect_number(lhs, symbol)?;
            let b = expect_number(rhs, symbol)?;
            let Some(ordering) = a.partial_cmp(&b) else {
                return Ok(Value::Bool(false));
            };
            ordering
        }
    };
    let result = match op {
        BinOp::Lt => ordering.is_lt(),
        BinOp::LtEq => ordering.is_le(),
        BinOp::Gt => ordering.is_gt(),
        BinOp::GtEq => ordering.is_ge(),
        _ => unreachable!("compare is only called for ordering operators"),
    };
    Ok(Value::Bool(result))
}

fn op_symbol(op: BinOp) -> &'static str {
    match op {
        BinOp::Add => "+",
        BinOp::Sub => "-",
        BinOp::Mul => "*",
        BinOp::Div => "/",
        BinOp::Rem => "%",
        BinOp::Pow => "^",
        BinOp::Eq => "=",
        BinOp::NotEq => "!=",
        BinOp::Lt => "<",
        BinOp::LtEq => "<=",
        BinOp::Gt => ">",
        BinOp::GtEq => ">=",
        BinOp::And => "and",
        BinOp::Or => "or",
    }
}

fn evaluate_call(
    name: &str,
    args: &[Expr],
    scope: &dyn TermScope,
) -> Result<Value, FormulaError> {
    // Only the taken branch of a conditional evaluates.
    if name == "if" {
        if args.len() != 3 {
            return Err(FormulaError::BuiltinArity {
                name: "if".to_string(),
                expected: "3".to_string(),
                received: args.len(),
            });
        }
        let condition = expect_bool(&evaluate(&args[0], scope)?, "if")?;
        let branch = if condition { &args[1] } else { &args[2] };
        return evaluate(branch, scope);
    }

    if scope.classify(name) == TermKind::Callable {
        let mut values = Vec::with_capacity(args.len());
        for arg in args {
            values.push(evaluate(arg, scope)?);
        }
        return Ok(scope.call(name, &values)?);
    }

    let mut values = Vec::with_capacity(args.len());
    for arg in args {
        values.push(evaluate(arg, scope)?);
    }
    call_builtin(name, &values)
}

fn call_builtin(name: &str, args: &[Value]) -> Result<Value, FormulaError> {
    match name {
        "sqrt" => Ok(Value::Number(unary_number(name, args)?.sqrt())),
        "abs" => Ok(Value::Number(unary_number(name, args)?.abs())),
        "round" => Ok(Value::Number(unary_number(name, args)?.round())),
        "floor" => Ok(Value::Number(unary_number(name, args)?.floor())),
        "ceil" => Ok(Value::Number(unary_number(name, args)?.ceil())),
        "min" | "max" => {
            if args.is_empty() {
                return Err(FormulaError::BuiltinArity {
                    name: name.to_string(),
                    expected: "at least 1".to_string(),
                    received: 0,
                });
            }
            let mut best = expect_number(&args[0], name)?;
            for arg in &args[1..] {
                let n = expect_number(arg, name)?;
                best = if name == "min" { best.min(n) } else { best.max(n) };
            }
            Ok(Value::Number(best))
        }
        "len" => match exactly_one(name, args)? {
            Value::Text(s) => Ok(Value::Number(s.chars().count() as f64)),
            Value::List(items) => Ok(Value::Number(items.len() as f64)),
            other => Err(FormulaError::Type(format!(
                "`len` expects text or a list, got `{other}`"
            ))),
        },
        "upper" => match exactly_one(name, args)? {
            Value::Text(s) => Ok(Value::Text(s.to_uppercase())),
            other => Err(FormulaError::Type(format!("`upper` expects text, got `{other}`"))),
        },
        "lower" => match exactly_one(name, args)? {
            Value::Text(s) => Ok(Value::Text(s.to_lowercase())),
            other => Err(FormulaError::Type(format!("`lower` expects text, got `{other}`"))),
        },
        "concat" => {
            let mut out = String::new();
            for arg in args {
                out.push_str(&arg.to_string());
            }
            Ok(Value::Text(out))
        }
        _ => Err(FormulaError::UnknownFunction(name.to_string())),
    }
}

fn exactly_one<'a>(name: &str, args: &'a [Value]) -> Result<&'a Value, FormulaError> {
    if args.len() != 1 {
        return Err(FormulaError::BuiltinArity {
            name: name.to_string(),
            expected: "1".to_string(),
            received: args.len(),
        });
    }
    Ok(&args[0])
}

fn unary_number(name: &str, args: &[Value]) -> Result<f64, FormulaError> {
    expect_number(exactly_one(name, args)?, name)
}

fn expect_number(value: &Value, context: &str) -> Result<f64, FormulaError> {
    match value {
        Value::Number(n) => Ok(*n),
        other => Err(FormulaError::Type(format!(
            "`{context}` expects a number, got `{other}`"
        ))),
    }
}

fn expect_bool(value: &Value, context: &str) -> Result<bool, FormulaError> {
    match value {
        Value::Bool(b) => Ok(*b),
        other => Err(FormulaError::Type(format!(
            "`{context}` expects a boolean, got `{other}`"
        ))),
    }
}
