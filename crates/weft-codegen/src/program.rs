//! The compiled render program.
//!
//! A [`Program`] is the terminal artifact of compilation and the unit the
//! cache stores. Callers never inspect the op list; they invoke
//! [`Program::run`] with a data context and get the rendered string back.

use std::fmt;

use weft_expr::{EvalError, Expr};
use weft_types::Context;

use crate::runtime;

/// One instruction of the flat render program.
///
/// Jump targets are op indices, backpatched by the compiler when the
/// corresponding block closes.
#[derive(Debug, Clone, PartialEq)]
pub enum Op {
    /// Append a literal text run to the output accumulator.
    Text(String),
    /// Append an expression's value; `undefined` appends nothing.
    Emit(Expr),
    /// Jump to `target` when the condition is falsy.
    Branch { cond: Expr, target: usize },
    /// Unconditional jump (end of an `if` arm, skipping the `else` arm).
    Jump { target: usize },
    /// Evaluate the collection, open an iteration scope binding `item` and
    /// `$index`; jump to `exit` when the collection is empty.
    IterStart {
        item: String,
        collection: Expr,
        exit: usize,
    },
    /// Advance the innermost iteration; jump to `back` while elements
    /// remain, otherwise close the scope and fall through.
    IterNext { back: usize },
}

/// An executable render procedure: a flat op list with one output
/// accumulator.
#[derive(Debug, Clone, PartialEq)]
pub struct Program {
    pub(crate) ops: Vec<Op>,
}

impl Program {
    /// Render the program against a data context.
    ///
    /// Evaluation failures propagate unchanged; there is no partial
    /// recovery and no partial output on error.
    pub fn run(&self, ctx: &Context) -> Result<String, EvalError> {
        runtime::run(self, ctx)
    }

    /// Number of ops, for diagnostics.
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    /// Returns `true` for the empty program (an empty template).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }
}

impl fmt::Display for Program {
    /// Disassembly listing, one op per line. This is what the compiler's
    /// debug flag logs.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, op) in self.ops.iter().enumerate() {
            match op {
                Op::Text(value) => writeln!(f, "{i:4}  text {value:?}")?,
                Op::Emit(expr) => writeln!(f, "{i:4}  emit {expr}")?,
                Op::Branch { cond, target } => {
                    writeln!(f, "{i:4}  branch {cond} -> {target}")?
                }
                Op::Jump { target } => writeln!(f, "{i:4}  jump -> {target}")?,
                Op::IterStart {
                    item,
                    collection,
                    exit,
                } => writeln!(f, "{i:4}  iter {item} in {collection} -> {exit}")?,
                Op::IterNext { back } => writeln!(f, "{i:4}  next -> {back}")?,
            }
        }
        Ok(())
    }
}
