//! Render-program execution.
//!
//! A program-counter loop over the op list with one output accumulator
//! and a loop-frame stack. Each `IterStart` pushes a frame and a binding
//! scope; `IterNext` advances the innermost frame or closes it. Scopes
//! come from `weft-expr`'s [`Environment`], so item bindings and `$index`
//! shadow context fields exactly as identifier resolution specifies.

use weft_expr::{eval, Environment, EvalError};
use weft_types::{Context, Value};

use crate::program::{Op, Program};

/// The implicit per-iteration index binding.
const INDEX_BINDING: &str = "$index";

/// One open iteration.
struct LoopFrame {
    items: Vec<Value>,
    index: usize,
    item_name: String,
}

pub(crate) fn run(program: &Program, ctx: &Context) -> Result<String, EvalError> {
    let mut output = String::new();
    let mut env = Environment::from_context(ctx);
    let mut frames: Vec<LoopFrame> = Vec::new();
    let mut pc = 0;

    while let Some(op) = program.ops.get(pc) {
        match op {
            Op::Text(value) => {
                output.push_str(value);
                pc += 1;
            }

            Op::Emit(expr) => {
                let value = eval(expr, &env)?;
                // The single absence guard: a missing top-level value
                // renders as nothing, never as placeholder text.
                if !value.is_undefined() {
                    output.push_str(&value.output());
                }
                pc += 1;
            }

            Op::Branch { cond, target } => {
                if eval(cond, &env)?.is_truthy() {
                    pc += 1;
                } else {
                    pc = *target;
                }
            }

            Op::Jump { target } => pc = *target,

            Op::IterStart {
                item,
                collection,
                exit,
            } => {
                let items = match eval(collection, &env)? {
                    Value::List(items) => items,
                    other => {
                        return Err(EvalError::TypeMismatch(format!(
                            "`each` expects a list, got {}",
                            other.type_name()
                        )))
                    }
                };
                if items.is_empty() {
                    pc = *exit;
                } else {
                    env.push_scope();
                    env.define(item, items[0].clone());
                    env.define(INDEX_BINDING, Value::Number(0.0));
                    frames.push(LoopFrame {
                        items,
                        index: 0,
                        item_name: item.clone(),
                    });
                    pc += 1;
                }
            }

            Op::IterNext { back } => {
                // Compiler invariant: IterNext only executes inside an
                // open IterStart frame.
                let Some(frame) = frames.last_mut() else {
                    return Err(EvalError::TypeMismatch(
                        "iteration op outside a loop".to_string(),
                    ));
                };
                frame.index += 1;
                if frame.index < frame.items.len() {
                    env.define(&frame.item_name, frame.items[frame.index].clone());
                    env.define(INDEX_BINDING, Value::Number(frame.index as f64));
                    pc = *back;
                } else {
                    frames.pop();
                    env.pop_scope();
                    pc += 1;
                }
            }
        }
    }

    Ok(output)
}
