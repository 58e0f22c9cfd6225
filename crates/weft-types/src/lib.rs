//! Shared types for the weft template engine.
//!
//! This crate defines the token stream produced by the template scanner,
//! the delimiter configuration, and the runtime value/context model shared
//! by the expression evaluator, the code generator, and the engine facade.

mod delimiters;
mod token;
mod value;

pub use delimiters::Delimiters;
pub use token::{BlockKind, Token};
pub use value::{Context, Value};
