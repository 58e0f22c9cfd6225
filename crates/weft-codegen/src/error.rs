//! Compile-time error types.

use thiserror::Error;
use weft_expr::SyntaxError;
use weft_types::BlockKind;

/// Structural and directive-body errors, fatal to the compile call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CompileError {
    /// An `else` with no open `if` (or a second `else` in the same block).
    #[error("`else` without a matching `if`")]
    DanglingElse,

    /// A closing directive whose kind does not match the innermost open
    /// block (`expected` is `None` when no block is open at all).
    #[error("mismatched block closing `/{found}`: {}", expected_text(.expected))]
    BlockMismatch {
        expected: Option<BlockKind>,
        found: BlockKind,
    },

    /// End of template reached with a block still open.
    #[error("unclosed `{0}` block at end of template")]
    UnclosedBlock(BlockKind),

    /// A directive body the expression language rejects.
    #[error("in directive `{body}`: {source}")]
    Syntax { body: String, source: SyntaxError },
}

fn expected_text(expected: &Option<BlockKind>) -> String {
    match expected {
        Some(kind) => format!("expected `/{kind}`"),
        None => "no block is open".to_string(),
    }
}

/// Result alias for compilation.
pub type CompileResult<T> = Result<T, CompileError>;
