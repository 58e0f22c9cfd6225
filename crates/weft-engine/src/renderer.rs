//! Render procedure invocation.

use weft_codegen::Program;
use weft_types::Context;

use crate::dom::DomSink;
use crate::error::RenderError;

/// Invokes compiled programs. Stateless; all buffering happens inside
/// the procedure itself.
#[derive(Debug, Clone, Default)]
pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    /// Run a compiled program against a data context.
    pub fn render(&self, program: &Program, ctx: &Context) -> Result<String, RenderError> {
        Ok(program.run(ctx)?)
    }

    /// Run a compiled program and hand the output to the DOM sink.
    ///
    /// Fails with [`RenderError::ElementNotFound`] when the sink reports
    /// no target for `selector`. The render happens before the lookup, so
    /// an evaluation failure is reported in preference to a missing
    /// target.
    pub fn render_to_dom(
        &self,
        program: &Program,
        selector: &str,
        ctx: &Context,
        sink: &mut dyn DomSink,
    ) -> Result<(), RenderError> {
        let html = self.render(program, ctx)?;
        if sink.replace_contents(selector, &html) {
            Ok(())
        } else {
            Err(RenderError::ElementNotFound {
                selector: selector.to_string(),
            })
        }
    }
}
