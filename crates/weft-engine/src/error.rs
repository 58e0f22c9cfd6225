//! Render-time and engine-level error types.

use thiserror::Error;
use weft_codegen::CompileError;
use weft_expr::EvalError;

/// Failures while executing a compiled program or delivering its output.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RenderError {
    /// An expression, condition, or collection reference failed to
    /// evaluate; propagated unchanged from the render procedure.
    #[error(transparent)]
    Eval(#[from] EvalError),

    /// The DOM sink resolved the selector to nothing.
    #[error("element not found: {selector}")]
    ElementNotFound { selector: String },
}

/// Union of everything an engine entry point can fail with.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Compile(#[from] CompileError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

impl From<EvalError> for EngineError {
    fn from(e: EvalError) -> Self {
        EngineError::Render(RenderError::Eval(e))
    }
}
