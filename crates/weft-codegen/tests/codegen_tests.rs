//! Compiler + runtime integration tests.
//!
//! Covers: literal pass-through, interpolation, the absence guard,
//! conditional and iteration blocks (including nesting), structural
//! errors, directive-body syntax errors, and the unclosed-block check.

use weft_codegen::{CompileError, Compiler, Program};
use weft_parser::Parser;
use weft_types::{BlockKind, Context};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn compile(template: &str) -> Result<Program, CompileError> {
    let tokens = Parser::default().parse(template);
    Compiler::default().compile(&tokens)
}

fn render(template: &str, ctx: serde_json::Value) -> String {
    let program = compile(template).unwrap_or_else(|e| panic!("compile `{template}`: {e}"));
    program
        .run(&Context::from(ctx))
        .unwrap_or_else(|e| panic!("render `{template}`: {e}"))
}

// ─────────────────────────────────────────────────────────────────────
// Text & interpolation
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_delimiter_free_template_passes_through() {
    let t = "plain text, no directives\nat all";
    assert_eq!(render(t, serde_json::json!({})), t);
    assert_eq!(render(t, serde_json::json!({"x": 1})), t);
}

#[test]
fn test_empty_template_renders_empty() {
    assert_eq!(render("", serde_json::json!({})), "");
    assert!(compile("").unwrap().is_empty());
}

#[test]
fn test_hello_interpolation() {
    assert_eq!(
        render("Hello, {{name}}!", serde_json::json!({"name": "Ada"})),
        "Hello, Ada!"
    );
}

#[test]
fn test_expression_arithmetic() {
    assert_eq!(
        render("{{count * 2}}", serde_json::json!({"count": 21})),
        "42"
    );
}

#[test]
fn test_missing_field_renders_empty() {
    assert_eq!(
        render("[{{missing}}]", serde_json::json!({"name": "Ada"})),
        "[]"
    );
}

#[test]
fn test_missing_field_never_prints_undefined() {
    let out = render("{{missing}}", serde_json::json!({}));
    assert_eq!(out, "");
    assert!(!out.contains("undefined"));
}

#[test]
fn test_nested_access_on_absent_object_fails_at_render() {
    let program = compile("{{missing.field}}").unwrap();
    assert!(program.run(&Context::new()).is_err());
}

// ─────────────────────────────────────────────────────────────────────
// Conditionals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_if_else_branches() {
    let t = "{{if ok}}Yes{{else}}No{{/if}}";
    assert_eq!(render(t, serde_json::json!({"ok": true})), "Yes");
    assert_eq!(render(t, serde_json::json!({"ok": false})), "No");
}

#[test]
fn test_if_without_else() {
    let t = "a{{if ok}}b{{/if}}c";
    assert_eq!(render(t, serde_json::json!({"ok": true})), "abc");
    assert_eq!(render(t, serde_json::json!({"ok": false})), "ac");
}

#[test]
fn test_if_condition_is_an_expression() {
    let t = "{{if count > 2}}many{{/if}}";
    assert_eq!(render(t, serde_json::json!({"count": 3})), "many");
    assert_eq!(render(t, serde_json::json!({"count": 2})), "");
}

#[test]
fn test_missing_condition_field_is_falsy() {
    assert_eq!(
        render("{{if nothere}}x{{else}}y{{/if}}", serde_json::json!({})),
        "y"
    );
}

#[test]
fn test_nested_if() {
    let t = "{{if a}}1{{if b}}2{{else}}3{{/if}}4{{/if}}";
    assert_eq!(render(t, serde_json::json!({"a": true, "b": true})), "124");
    assert_eq!(render(t, serde_json::json!({"a": true, "b": false})), "134");
    assert_eq!(render(t, serde_json::json!({"a": false, "b": true})), "");
}

// ─────────────────────────────────────────────────────────────────────
// Iteration
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_each_with_index() {
    assert_eq!(
        render(
            "{{each x in items}}[{{x}}:{{$index}}]{{/each}}",
            serde_json::json!({"items": ["a", "b"]})
        ),
        "[a:0][b:1]"
    );
}

#[test]
fn test_each_over_empty_list() {
    assert_eq!(
        render(
            "<{{each x in items}}{{x}}{{/each}}>",
            serde_json::json!({"items": []})
        ),
        "<>"
    );
}

#[test]
fn test_each_item_shadows_context_field() {
    assert_eq!(
        render(
            "{{x}}|{{each x in items}}{{x}}{{/each}}|{{x}}",
            serde_json::json!({"x": "outer", "items": ["inner"]})
        ),
        "outer|inner|outer"
    );
}

#[test]
fn test_nested_each() {
    assert_eq!(
        render(
            "{{each row in rows}}{{each cell in row.cells}}{{cell}}{{$index}} {{/each}}| {{/each}}",
            serde_json::json!({"rows": [
                {"cells": ["a", "b"]},
                {"cells": ["c"]}
            ]})
        ),
        "a0 b1 | c0 | "
    );
}

#[test]
fn test_each_items_may_be_maps() {
    assert_eq!(
        render(
            "{{each t in todos}}{{t.title}};{{/each}}",
            serde_json::json!({"todos": [{"title": "one"}, {"title": "two"}]})
        ),
        "one;two;"
    );
}

#[test]
fn test_if_inside_each() {
    assert_eq!(
        render(
            "{{each n in nums}}{{if n > 1}}{{n}}{{/if}}{{/each}}",
            serde_json::json!({"nums": [1, 2, 3]})
        ),
        "23"
    );
}

#[test]
fn test_each_over_non_list_fails_at_render() {
    let program = compile("{{each x in items}}{{x}}{{/each}}").unwrap();
    let ctx = Context::from(serde_json::json!({"items": "oops"}));
    assert!(program.run(&ctx).is_err());
}

// ─────────────────────────────────────────────────────────────────────
// Structural errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_dangling_else() {
    assert_eq!(
        compile("a{{else}}b").unwrap_err(),
        CompileError::DanglingElse
    );
}

#[test]
fn test_second_else_in_same_block() {
    assert_eq!(
        compile("{{if a}}1{{else}}2{{else}}3{{/if}}").unwrap_err(),
        CompileError::DanglingElse
    );
}

#[test]
fn test_else_inside_each_is_dangling() {
    assert_eq!(
        compile("{{each x in items}}{{else}}{{/each}}").unwrap_err(),
        CompileError::DanglingElse
    );
}

#[test]
fn test_close_with_no_open_block() {
    assert_eq!(
        compile("{{/if}}").unwrap_err(),
        CompileError::BlockMismatch {
            expected: None,
            found: BlockKind::If,
        }
    );
}

#[test]
fn test_mismatched_close_kind() {
    assert_eq!(
        compile("{{if a}}{{/each}}").unwrap_err(),
        CompileError::BlockMismatch {
            expected: Some(BlockKind::If),
            found: BlockKind::Each,
        }
    );
    assert_eq!(
        compile("{{each x in xs}}{{/if}}").unwrap_err(),
        CompileError::BlockMismatch {
            expected: Some(BlockKind::Each),
            found: BlockKind::If,
        }
    );
}

#[test]
fn test_interleaved_closers_report_innermost() {
    assert_eq!(
        compile("{{if a}}{{each x in xs}}{{/if}}{{/each}}").unwrap_err(),
        CompileError::BlockMismatch {
            expected: Some(BlockKind::Each),
            found: BlockKind::If,
        }
    );
}

#[test]
fn test_unclosed_block_at_end_of_input() {
    assert_eq!(
        compile("{{if a}}never closed").unwrap_err(),
        CompileError::UnclosedBlock(BlockKind::If)
    );
    assert_eq!(
        compile("{{each x in xs}}").unwrap_err(),
        CompileError::UnclosedBlock(BlockKind::Each)
    );
}

#[test]
fn test_bad_directive_body_is_a_compile_error() {
    assert!(matches!(
        compile("{{count +}}").unwrap_err(),
        CompileError::Syntax { .. }
    ));
    // A malformed `each` body scans as an expression and fails here.
    assert!(matches!(
        compile("{{each items}}").unwrap_err(),
        CompileError::Syntax { .. }
    ));
}

#[test]
fn test_compile_failure_produces_no_program() {
    // Structural errors are fatal to the compile call; there is no
    // partial artifact to run.
    assert!(compile("before {{/if}} after").is_err());
}

// ─────────────────────────────────────────────────────────────────────
// Program surface
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_disassembly_lists_every_op() {
    let program = compile("{{if ok}}{{x}}{{else}}no{{/if}}").unwrap();
    let listing = program.to_string();
    assert_eq!(listing.lines().count(), program.len());
    assert!(listing.contains("branch ok"));
    assert!(listing.contains("emit x"));
}
