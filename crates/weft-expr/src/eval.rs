//! Closed expression evaluator.
//!
//! Walks an [`Expr`] tree against an [`Environment`] and produces a
//! [`Value`]. The only deliberately lenient path is name/field resolution,
//! which yields `Undefined` for missing bindings; every other misuse is an
//! [`EvalError`] that propagates unchanged out of the render call.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use weft_types::Value;

/// Evaluate an expression to a value.
pub fn eval(expr: &Expr, env: &Environment) -> EvalResult<Value> {
    match expr {
        Expr::Number(n) => Ok(Value::Number(*n)),
        Expr::Str(s) => Ok(Value::String(s.clone())),
        Expr::Bool(b) => Ok(Value::Bool(*b)),
        Expr::Null => Ok(Value::Null),
        Expr::Ident(name) => Ok(env.get(name).cloned().unwrap_or(Value::Undefined)),
        Expr::Field { object, name } => eval_field(&eval(object, env)?, name),
        Expr::Index { object, index } => {
            let object = eval(object, env)?;
            let index = eval(index, env)?;
            eval_index(&object, &index)
        }
        Expr::MethodCall {
            object,
            method,
            args,
        } => {
            let object = eval(object, env)?;
            let args = args
                .iter()
                .map(|a| eval(a, env))
                .collect::<EvalResult<Vec<_>>>()?;
            eval_method(&object, method, &args)
        }
        Expr::Unary { op, operand } => eval_unary(*op, &eval(operand, env)?),
        Expr::Binary { left, op, right } => eval_binary(left, *op, right, env),
        Expr::Ternary {
            cond,
            then,
            otherwise,
        } => {
            if eval(cond, env)?.is_truthy() {
                eval(then, env)
            } else {
                eval(otherwise, env)
            }
        }
    }
}

// ─────────────────────────────────────────────────────────────────────
// Access
// ─────────────────────────────────────────────────────────────────────

fn eval_field(object: &Value, name: &str) -> EvalResult<Value> {
    match object {
        Value::Map(fields) => Ok(fields.get(name).cloned().unwrap_or(Value::Undefined)),
        Value::Undefined | Value::Null => Err(EvalError::UndefinedAccess {
            access: format!("field `{name}`"),
            of: object.type_name(),
        }),
        other => Err(EvalError::TypeMismatch(format!(
            "cannot read field `{name}` of {}",
            other.type_name()
        ))),
    }
}

fn eval_index(object: &Value, index: &Value) -> EvalResult<Value> {
    match (object, index) {
        (Value::List(items), Value::Number(n)) => {
            if n.fract() != 0.0 || *n < 0.0 {
                return Ok(Value::Undefined);
            }
            Ok(items.get(*n as usize).cloned().unwrap_or(Value::Undefined))
        }
        (Value::Map(fields), Value::String(key)) => {
            Ok(fields.get(key).cloned().unwrap_or(Value::Undefined))
        }
        (Value::Undefined | Value::Null, _) => Err(EvalError::UndefinedAccess {
            access: "index".to_string(),
            of: object.type_name(),
        }),
        (other, idx) => Err(EvalError::TypeMismatch(format!(
            "cannot index {} with {}",
            other.type_name(),
            idx.type_name()
        ))),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Builtin methods
// ─────────────────────────────────────────────────────────────────────

fn eval_method(object: &Value, method: &str, args: &[Value]) -> EvalResult<Value> {
    if matches!(object, Value::Undefined | Value::Null) {
        return Err(EvalError::UndefinedAccess {
            access: format!("method `{method}`"),
            of: object.type_name(),
        });
    }

    match method {
        "length" => {
            expect_args(method, 0, args)?;
            let len = match object {
                Value::String(s) => s.chars().count(),
                Value::List(items) => items.len(),
                Value::Map(fields) => fields.len(),
                other => {
                    return Err(EvalError::TypeMismatch(format!(
                        "`length()` is not defined on {}",
                        other.type_name()
                    )))
                }
            };
            Ok(Value::Number(len as f64))
        }
        "upper" => {
            expect_args(method, 0, args)?;
            Ok(Value::String(expect_string(object, method)?.to_uppercase()))
        }
        "lower" => {
            expect_args(method, 0, args)?;
            Ok(Value::String(expect_string(object, method)?.to_lowercase()))
        }
        "trim" => {
            expect_args(method, 0, args)?;
            Ok(Value::String(expect_string(object, method)?.trim().to_string()))
        }
        "contains" => {
            expect_args(method, 1, args)?;
            match object {
                Value::String(s) => match &args[0] {
                    Value::String(needle) => Ok(Value::Bool(s.contains(needle.as_str()))),
                    other => Err(EvalError::TypeMismatch(format!(
                        "`contains()` on a string takes a string, got {}",
                        other.type_name()
                    ))),
                },
                Value::List(items) => Ok(Value::Bool(items.contains(&args[0]))),
                other => Err(EvalError::TypeMismatch(format!(
                    "`contains()` is not defined on {}",
                    other.type_name()
                ))),
            }
        }
        _ => Err(EvalError::UnknownMethod {
            method: method.to_string(),
            on: object.type_name(),
        }),
    }
}

fn expect_args(method: &str, expected: usize, args: &[Value]) -> EvalResult<()> {
    if args.len() == expected {
        Ok(())
    } else {
        Err(EvalError::WrongArgCount {
            method: method.to_string(),
            expected,
            found: args.len(),
        })
    }
}

fn expect_string<'a>(object: &'a Value, method: &str) -> EvalResult<&'a str> {
    match object {
        Value::String(s) => Ok(s),
        other => Err(EvalError::TypeMismatch(format!(
            "`{method}()` is not defined on {}",
            other.type_name()
        ))),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Operators
// ─────────────────────────────────────────────────────────────────────

fn eval_unary(op: UnaryOp, operand: &Value) -> EvalResult<Value> {
    match op {
        UnaryOp::Not => Ok(Value::Bool(!operand.is_truthy())),
        UnaryOp::Neg => match operand {
            Value::Number(n) => Ok(Value::Number(-n)),
            other => Err(EvalError::TypeMismatch(format!(
                "cannot negate {}",
                other.type_name()
            ))),
        },
    }
}

fn eval_binary(left: &Expr, op: BinaryOp, right: &Expr, env: &Environment) -> EvalResult<Value> {
    // Short-circuiting forms evaluate the right side lazily.
    match op {
        BinaryOp::And => {
            let l = eval(left, env)?;
            if !l.is_truthy() {
                return Ok(Value::Bool(false));
            }
            return Ok(Value::Bool(eval(right, env)?.is_truthy()));
        }
        BinaryOp::Or => {
            let l = eval(left, env)?;
            if l.is_truthy() {
                return Ok(Value::Bool(true));
            }
            return Ok(Value::Bool(eval(right, env)?.is_truthy()));
        }
        _ => {}
    }

    let l = eval(left, env)?;
    let r = eval(right, env)?;
    match op {
        BinaryOp::Eq => Ok(Value::Bool(l == r)),
        BinaryOp::NotEq => Ok(Value::Bool(l != r)),
        BinaryOp::Add => eval_add(&l, &r),
        BinaryOp::Sub => numeric(op, &l, &r, |a, b| a - b),
        BinaryOp::Mul => numeric(op, &l, &r, |a, b| a * b),
        BinaryOp::Div => numeric(op, &l, &r, |a, b| a / b),
        BinaryOp::Rem => numeric(op, &l, &r, |a, b| a % b),
        BinaryOp::Less => compare(op, &l, &r),
        BinaryOp::LessEq => compare(op, &l, &r),
        BinaryOp::Greater => compare(op, &l, &r),
        BinaryOp::GreaterEq => compare(op, &l, &r),
        BinaryOp::And | BinaryOp::Or => unreachable!("handled above"),
    }
}

/// `+` concatenates when either side is a string, otherwise adds numbers.
fn eval_add(l: &Value, r: &Value) -> EvalResult<Value> {
    if l.is_undefined() || r.is_undefined() {
        return Err(EvalError::TypeMismatch(
            "cannot apply `+` to undefined".to_string(),
        ));
    }
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        (Value::String(_), _) | (_, Value::String(_)) => {
            Ok(Value::String(format!("{l}{r}")))
        }
        _ => Err(EvalError::TypeMismatch(format!(
            "cannot add {} and {}",
            l.type_name(),
            r.type_name()
        ))),
    }
}

fn numeric(op: BinaryOp, l: &Value, r: &Value, f: impl Fn(f64, f64) -> f64) -> EvalResult<Value> {
    match (l, r) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(f(*a, *b))),
        _ => Err(EvalError::TypeMismatch(format!(
            "`{op}` requires numbers, got {} and {}",
            l.type_name(),
            r.type_name()
        ))),
    }
}

fn compare(op: BinaryOp, l: &Value, r: &Value) -> EvalResult<Value> {
    let result = match (l, r) {
        (Value::Number(a), Value::Number(b)) => match op {
            BinaryOp::Less => a < b,
            BinaryOp::LessEq => a <= b,
            BinaryOp::Greater => a > b,
            BinaryOp::GreaterEq => a >= b,
            _ => unreachable!("compare called with non-comparison op"),
        },
        (Value::String(a), Value::String(b)) => match op {
            BinaryOp::Less => a < b,
            BinaryOp::LessEq => a <= b,
            BinaryOp::Greater => a > b,
            BinaryOp::GreaterEq => a >= b,
            _ => unreachable!("compare called with non-comparison op"),
        },
        _ => {
            return Err(EvalError::TypeMismatch(format!(
                "`{op}` cannot compare {} and {}",
                l.type_name(),
                r.type_name()
            )))
        }
    };
    Ok(Value::Bool(result))
}
