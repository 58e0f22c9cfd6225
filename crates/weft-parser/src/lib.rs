//! Weft template scanner: converts raw template text into a token stream.

pub mod parser;

pub use parser::Parser;
