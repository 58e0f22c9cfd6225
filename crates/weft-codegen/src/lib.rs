//! Weft code generator: compiles a token stream into an executable
//! render program.
//!
//! # Architecture
//!
//! The compiler walks the scanner's token stream once and emits a flat
//! [`program::Op`] list with one output accumulator — the straight-line
//! program the template denotes. Block structure is validated with a stack
//! that pairs `if`/`each` openers with their closers; conditional and loop
//! constructs become jumps whose targets are backpatched when the block
//! closes. Directive bodies are parsed into `weft-expr` trees here, so a
//! malformed body is a compile-time error, never a render-time one.
//!
//! The finished [`program::Program`] is opaque to callers: the only entry
//! point is [`program::Program::run`], which executes the ops against a
//! data context and returns the rendered string.

pub mod compiler;
pub mod error;
pub mod program;
mod runtime;

pub use compiler::Compiler;
pub use error::{CompileError, CompileResult};
pub use program::{Op, Program};
