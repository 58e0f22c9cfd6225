//! Weft directive-body expression language.
//!
//! Template directive bodies (`{{user.name}}`, `{{if count > 2}}`,
//! `{{each x in items}}`) are parsed once at compile time into a typed
//! [`Expr`] tree and evaluated at render time against an explicit scope
//! chain. The evaluator is closed and non-Turing-complete: member access,
//! indexing, arithmetic, comparison, boolean logic, a ternary, and a fixed
//! set of builtin methods. A template can therefore be shown to untrusted
//! eyes without ever granting host code execution.
//!
//! Free identifiers resolve against the innermost scope outward — inside an
//! `each` block the item binding and `$index` shadow identically named
//! context fields — and an unbound identifier resolves to
//! [`weft_types::Value::Undefined`] rather than erroring.

pub mod ast;
pub mod env;
pub mod error;
pub mod eval;
pub mod parser;
mod token;

pub use ast::{BinaryOp, Expr, UnaryOp};
pub use env::Environment;
pub use error::{EvalError, EvalResult, SyntaxError};
pub use eval::eval;
pub use parser::parse;
