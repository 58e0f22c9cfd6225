//! The template engine facade.

use std::sync::Arc;

use weft_codegen::{CompileError, Compiler, Program};
use weft_parser::Parser;
use weft_types::{Context, Delimiters};

use crate::cache::{CachePolicy, TemplateCache};
use crate::dom::DomSink;
use crate::error::EngineError;
use crate::renderer::Renderer;

/// Engine construction options.
#[derive(Debug, Clone, Default)]
pub struct EngineOptions {
    /// Delimiter pair, default `{{` / `}}`. Immutable once the engine
    /// exists.
    pub delimiters: Delimiters,
    /// Log each compiled program's disassembly via `log::debug!`.
    pub debug: bool,
    /// Compiled-template cache policy, default unbounded.
    pub cache: CachePolicy,
}

/// One template engine instance: a scanner with its delimiter pair, a
/// compiler with its debug flag, a renderer, and a compiled-template
/// cache. Created once, reused across many compile/render calls; holds
/// no other mutable state.
pub struct TemplateEngine {
    parser: Parser,
    compiler: Compiler,
    renderer: Renderer,
    cache: Box<dyn TemplateCache>,
}

impl TemplateEngine {
    /// Build an engine from options.
    pub fn new(options: EngineOptions) -> Self {
        Self {
            parser: Parser::new(options.delimiters),
            compiler: Compiler::new(options.debug),
            renderer: Renderer::new(),
            cache: options.cache.build(),
        }
    }

    /// The delimiter pair this engine scans with.
    pub fn delimiters(&self) -> &Delimiters {
        self.parser.delimiters()
    }

    /// Compile a template, consulting the cache first.
    ///
    /// A hit returns the stored procedure without re-invoking the scanner
    /// or compiler; a miss parses, compiles, stores, and returns. Keys
    /// are the exact template string, so templates differing only in
    /// whitespace compile independently.
    pub fn compile(&mut self, template: &str) -> Result<Arc<Program>, CompileError> {
        if let Some(hit) = self.cache.get(template) {
            log::trace!("template cache hit ({} bytes)", template.len());
            return Ok(hit);
        }
        let tokens = self.parser.parse(template);
        let program = Arc::new(self.compiler.compile(&tokens)?);
        self.cache.insert(template.to_string(), Arc::clone(&program));
        Ok(program)
    }

    /// Compile (or fetch) a template and render it against a context.
    pub fn render(&mut self, template: &str, ctx: &Context) -> Result<String, EngineError> {
        let program = self.compile(template)?;
        Ok(self.renderer.render(&program, ctx)?)
    }

    /// Compile (or fetch) a template, render it, and hand the output to
    /// the DOM sink under `selector`.
    pub fn render_to_dom(
        &mut self,
        selector: &str,
        template: &str,
        ctx: &Context,
        sink: &mut dyn DomSink,
    ) -> Result<(), EngineError> {
        let program = self.compile(template)?;
        Ok(self
            .renderer
            .render_to_dom(&program, selector, ctx, sink)?)
    }

    // ── Cache management ─────────────────────────────────────────────

    /// Returns `true` if this exact template string is cached.
    pub fn is_cached(&self, template: &str) -> bool {
        self.cache.contains(template)
    }

    /// Number of cached compiled templates.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    /// Drop one cached template. Returns `true` if it was present.
    pub fn evict(&mut self, template: &str) -> bool {
        self.cache.remove(template)
    }

    /// Drop every cached template.
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

impl Default for TemplateEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}
