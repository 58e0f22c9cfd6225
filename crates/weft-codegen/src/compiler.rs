//! Token stream to render program.
//!
//! One pass over the tokens with a block stack pairing openers and
//! closers. `if`/`else` compile to a falsy-branch plus an arm-skipping
//! jump; `each` compiles to an `IterStart`/`IterNext` pair. All jump
//! targets are placeholders until the block closes and the compiler
//! backpatches them.

use weft_expr::Expr;
use weft_types::{BlockKind, Token};

use crate::error::{CompileError, CompileResult};
use crate::program::{Op, Program};

/// Placeholder for a jump target patched at block close.
const UNPATCHED: usize = usize::MAX;

/// The weft compiler. Carries only the debug flag; each [`Compiler::compile`]
/// call is independent.
#[derive(Debug, Clone)]
pub struct Compiler {
    debug: bool,
}

/// An open block awaiting its closer.
enum Frame {
    If {
        /// Index of the opening `Branch`, or `None` once `else` patched it.
        branch_at: Option<usize>,
        /// Indices of arm-ending `Jump`s to patch to the block end.
        end_jumps: Vec<usize>,
    },
    Each {
        /// Index of the `IterStart` op.
        start_at: usize,
    },
}

impl Frame {
    fn kind(&self) -> BlockKind {
        match self {
            Frame::If { .. } => BlockKind::If,
            Frame::Each { .. } => BlockKind::Each,
        }
    }
}

impl Compiler {
    /// Create a compiler. With `debug` set, every compiled program's
    /// disassembly is emitted via `log::debug!`.
    pub fn new(debug: bool) -> Self {
        Self { debug }
    }

    /// Compile a token stream into a render program.
    ///
    /// Fails with a structural error for malformed block nesting and with
    /// a syntax error for a directive body the expression language
    /// rejects — both at compile time, never at render time.
    pub fn compile(&self, tokens: &[Token]) -> CompileResult<Program> {
        let mut ops: Vec<Op> = Vec::with_capacity(tokens.len());
        let mut stack: Vec<Frame> = Vec::new();

        for token in tokens {
            match token {
                Token::Text { value } => ops.push(Op::Text(value.clone())),

                Token::Expression { value } => {
                    ops.push(Op::Emit(parse_body(value)?));
                }

                Token::If { condition } => {
                    let cond = parse_body(condition)?;
                    stack.push(Frame::If {
                        branch_at: Some(ops.len()),
                        end_jumps: Vec::new(),
                    });
                    ops.push(Op::Branch {
                        cond,
                        target: UNPATCHED,
                    });
                }

                Token::Else => match stack.last_mut() {
                    // A second `else` in the same block finds `branch_at`
                    // already consumed and is rejected like a stray one.
                    Some(Frame::If {
                        branch_at,
                        end_jumps,
                    }) if branch_at.is_some() => {
                        // The then-arm skips the else-arm.
                        end_jumps.push(ops.len());
                        ops.push(Op::Jump { target: UNPATCHED });
                        // A falsy condition lands here.
                        let else_start = ops.len();
                        if let Some(at) = branch_at.take() {
                            patch(&mut ops, at, else_start);
                        }
                    }
                    _ => return Err(CompileError::DanglingElse),
                },

                Token::Each { item, collection } => {
                    let collection = parse_body(collection)?;
                    stack.push(Frame::Each { start_at: ops.len() });
                    ops.push(Op::IterStart {
                        item: item.clone(),
                        collection,
                        exit: UNPATCHED,
                    });
                }

                Token::CloseBlock { kind } => {
                    let Some(frame) = stack.pop() else {
                        return Err(CompileError::BlockMismatch {
                            expected: None,
                            found: *kind,
                        });
                    };
                    if frame.kind() != *kind {
                        return Err(CompileError::BlockMismatch {
                            expected: Some(frame.kind()),
                            found: *kind,
                        });
                    }
                    match frame {
                        Frame::If {
                            branch_at,
                            end_jumps,
                        } => {
                            let end = ops.len();
                            if let Some(at) = branch_at {
                                patch(&mut ops, at, end);
                            }
                            for at in end_jumps {
                                patch(&mut ops, at, end);
                            }
                        }
                        Frame::Each { start_at } => {
                            ops.push(Op::IterNext { back: start_at + 1 });
                            let exit = ops.len();
                            patch(&mut ops, start_at, exit);
                        }
                    }
                }
            }
        }

        if let Some(frame) = stack.pop() {
            return Err(CompileError::UnclosedBlock(frame.kind()));
        }

        let program = Program { ops };
        if self.debug {
            log::debug!("compiled program ({} ops):\n{program}", program.len());
        }
        Ok(program)
    }
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(false)
    }
}

/// Parse a directive body, wrapping syntax failures with the body text.
fn parse_body(body: &str) -> CompileResult<Expr> {
    weft_expr::parse(body).map_err(|source| CompileError::Syntax {
        body: body.to_string(),
        source,
    })
}

/// Patch the placeholder target of the op at `at`.
fn patch(ops: &mut [Op], at: usize, to: usize) {
    match &mut ops[at] {
        Op::Branch { target, .. } | Op::Jump { target } => *target = to,
        Op::IterStart { exit, .. } => *exit = to,
        // Compiler invariant: only jump-bearing ops are recorded for
        // patching.
        _ => {}
    }
}
