//! Token types produced by the template scanner.
//!
//! Tokens appear in document order. Block structure is *implicit*: an
//! `If`/`Each` opener and its `CloseBlock` are siblings in the stream and
//! are paired up by the code generator's block stack, never by the scanner.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two block-forming directive kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    If,
    Each,
}

impl BlockKind {
    /// Look up the kind named after the `/` in a closing directive.
    /// Returns `None` for anything other than `"if"` or `"each"`.
    pub fn from_close_name(name: &str) -> Option<BlockKind> {
        match name {
            "if" => Some(BlockKind::If),
            "each" => Some(BlockKind::Each),
            _ => None,
        }
    }
}

impl fmt::Display for BlockKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BlockKind::If => f.write_str("if"),
            BlockKind::Each => f.write_str("each"),
        }
    }
}

/// A single token scanned from a template.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum Token {
    /// A literal run of template text, emitted verbatim.
    Text { value: String },
    /// An interpolation directive; `value` is the directive body verbatim.
    Expression { value: String },
    /// Opens a conditional block; `condition` is the body after `if `.
    If { condition: String },
    /// Switches the active branch of the nearest open `If`.
    Else,
    /// Opens an iteration block over `collection`, binding `item` and an
    /// implicit `$index` per iteration.
    Each { item: String, collection: String },
    /// Closes the nearest open block of the stated kind.
    CloseBlock { kind: BlockKind },
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Text { value } => write!(f, "text {value:?}"),
            Token::Expression { value } => write!(f, "expression `{value}`"),
            Token::If { condition } => write!(f, "if `{condition}`"),
            Token::Else => f.write_str("else"),
            Token::Each { item, collection } => {
                write!(f, "each `{item}` in `{collection}`")
            }
            Token::CloseBlock { kind } => write!(f, "/{kind}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_close_name() {
        assert_eq!(BlockKind::from_close_name("if"), Some(BlockKind::If));
        assert_eq!(BlockKind::from_close_name("each"), Some(BlockKind::Each));
        assert_eq!(BlockKind::from_close_name("for"), None);
        assert_eq!(BlockKind::from_close_name(""), None);
    }

    #[test]
    fn test_block_kind_display() {
        assert_eq!(BlockKind::If.to_string(), "if");
        assert_eq!(BlockKind::Each.to_string(), "each");
    }

    #[test]
    fn test_token_display() {
        let t = Token::Each {
            item: "x".into(),
            collection: "items".into(),
        };
        assert_eq!(t.to_string(), "each `x` in `items`");
        assert_eq!(
            Token::CloseBlock { kind: BlockKind::If }.to_string(),
            "/if"
        );
    }
}
