//! Weft engine facade: the caller-facing boundary of the template
//! pipeline.
//!
//! ```text
//! template string → Parser → tokens → Compiler → Program → Cache
//!                                                    ↓
//!                               Renderer(program, context) → output string
//! ```
//!
//! An engine owns one scanner (with its delimiter pair), one compiler
//! (with its debug flag), one renderer, and one compiled-template cache.
//! The pipeline is synchronous and single-threaded: nothing here locks,
//! blocks, or yields. Sharing an engine across threads requires external
//! serialization of cache mutation.
//!
//! Directive bodies are evaluated by a closed interpreter (`weft-expr`),
//! so rendering a template never executes host code. Templates are still
//! an author-level artifact: an attacker who controls template text
//! controls the output string.

pub mod cache;
pub mod dom;
pub mod engine;
pub mod error;
pub mod renderer;

pub use cache::{CachePolicy, LruCache, TemplateCache, UnboundedCache};
pub use dom::{DomSink, MemorySink};
pub use engine::{EngineOptions, TemplateEngine};
pub use error::{EngineError, RenderError};
pub use renderer::Renderer;

// Re-exported so callers need only this crate for the common path.
pub use weft_codegen::{CompileError, Program};
pub use weft_types::{Context, Delimiters, Value};
