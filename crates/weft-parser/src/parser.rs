//! Core template scanner — converts template text to a token stream.
//!
//! Single left-to-right scan with a cursor and a pending-text buffer; no
//! backtracking. The scanner performs *no* nesting validation — pairing of
//! openers and closers is entirely the code generator's job.
//!
//! Delimiter recovery policy: an open delimiter with no following close
//! delimiter is not an error. The marker and everything after it are
//! emitted verbatim as literal text.

use weft_types::{BlockKind, Delimiters, Token};

/// The weft template scanner.
///
/// Holds the delimiter pair for one engine instance and converts template
/// strings into ordered [`Token`] sequences.
#[derive(Debug, Clone)]
pub struct Parser {
    delimiters: Delimiters,
}

impl Parser {
    /// Create a scanner with the given delimiter pair.
    pub fn new(delimiters: Delimiters) -> Self {
        Self { delimiters }
    }

    /// The delimiter pair this scanner was configured with.
    pub fn delimiters(&self) -> &Delimiters {
        &self.delimiters
    }

    /// Scan a template into tokens, in document order.
    pub fn parse(&self, template: &str) -> Vec<Token> {
        let open = self.delimiters.open.as_str();
        let close = self.delimiters.close.as_str();

        let mut tokens = Vec::new();
        let mut cursor = 0;
        let mut text_buffer = String::new();

        // Flush the pending text as a single Text token, if non-empty.
        fn flush_text(tokens: &mut Vec<Token>, buffer: &mut String) {
            if !buffer.is_empty() {
                tokens.push(Token::Text {
                    value: std::mem::take(buffer),
                });
            }
        }

        while cursor < template.len() {
            let Some(open_at) = find_from(template, open, cursor) else {
                // No more delimiters: the tail is literal text.
                text_buffer.push_str(&template[cursor..]);
                break;
            };

            text_buffer.push_str(&template[cursor..open_at]);

            let body_start = open_at + open.len();
            let Some(close_at) = find_from(template, close, body_start) else {
                // Unmatched open delimiter: emit it and the rest verbatim.
                text_buffer.push_str(&template[open_at..]);
                break;
            };

            flush_text(&mut tokens, &mut text_buffer);

            let body = template[body_start..close_at].trim();
            tokens.push(classify(body));

            cursor = close_at + close.len();
        }

        flush_text(&mut tokens, &mut text_buffer);
        tokens
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Delimiters::default())
    }
}

/// Byte offset of the next occurrence of `needle` at or after `from`.
fn find_from(haystack: &str, needle: &str, from: usize) -> Option<usize> {
    haystack[from..].find(needle).map(|i| from + i)
}

/// Classify a trimmed directive body into a token.
fn classify(body: &str) -> Token {
    if let Some(rest) = body.strip_prefix("if ") {
        return Token::If {
            condition: rest.trim().to_string(),
        };
    }
    if body == "else" {
        return Token::Else;
    }
    if let Some(rest) = body.strip_prefix("each ") {
        if let Some((item, collection)) = split_each_body(rest.trim()) {
            return Token::Each { item, collection };
        }
        // No `in` separator: fall through so the code generator reports the
        // malformed body as an expression syntax error.
    }
    if let Some(name) = body.strip_prefix('/') {
        if let Some(kind) = BlockKind::from_close_name(name) {
            return Token::CloseBlock { kind };
        }
    }
    Token::Expression {
        value: body.to_string(),
    }
}

/// Split an `each` body (after the `each ` prefix) on its first
/// whitespace-delimited `in` into (item, collection).
fn split_each_body(rest: &str) -> Option<(String, String)> {
    let item_end = rest.find(char::is_whitespace)?;
    let item = &rest[..item_end];
    let after_item = rest[item_end..].trim_start();
    let collection = after_item.strip_prefix("in")?;
    if !collection.starts_with(char::is_whitespace) {
        return None;
    }
    let collection = collection.trim();
    if item.is_empty() || collection.is_empty() {
        return None;
    }
    Some((item.to_string(), collection.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_each_body() {
        assert_eq!(
            split_each_body("x in items"),
            Some(("x".into(), "items".into()))
        );
        assert_eq!(
            split_each_body("todo   in   user.todos"),
            Some(("todo".into(), "user.todos".into()))
        );
        assert_eq!(split_each_body("x"), None);
        assert_eq!(split_each_body("x items"), None);
        assert_eq!(split_each_body("x in"), None);
        // `in` must be a standalone word, not a prefix.
        assert_eq!(split_each_body("x items in"), None);
    }

    #[test]
    fn test_classify_expression_verbatim() {
        assert_eq!(
            classify("user.name"),
            Token::Expression {
                value: "user.name".into()
            }
        );
        // Unknown close names stay expressions.
        assert_eq!(
            classify("/for"),
            Token::Expression {
                value: "/for".into()
            }
        );
    }
}
