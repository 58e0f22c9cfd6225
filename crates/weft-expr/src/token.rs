//! Token scanner for directive bodies.

use crate::error::SyntaxError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    Number(f64),
    Str(String),
    Ident(String),
    True,
    False,
    Null,
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    BangEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,
    AndAnd,
    OrOr,
    Bang,
    Question,
    Colon,
    Dot,
    Comma,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    /// Byte offset into the directive body.
    pub pos: usize,
}

/// Scan a directive body into tokens. The stream always ends with `Eof`.
pub(crate) fn scan(body: &str) -> Result<Vec<Token>, SyntaxError> {
    let bytes = body.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let start = pos;
        let b = bytes[pos];
        match b {
            b' ' | b'\t' | b'\r' | b'\n' => {
                pos += 1;
                continue;
            }
            b'0'..=b'9' => {
                let (n, next) = scan_number(body, pos)?;
                tokens.push(Token {
                    kind: TokenKind::Number(n),
                    pos: start,
                });
                pos = next;
            }
            b'"' | b'\'' => {
                let (s, next) = scan_string(body, pos)?;
                tokens.push(Token {
                    kind: TokenKind::Str(s),
                    pos: start,
                });
                pos = next;
            }
            b'+' => tokens.push(single(TokenKind::Plus, &mut pos)),
            b'-' => tokens.push(single(TokenKind::Minus, &mut pos)),
            b'*' => tokens.push(single(TokenKind::Star, &mut pos)),
            b'/' => tokens.push(single(TokenKind::Slash, &mut pos)),
            b'%' => tokens.push(single(TokenKind::Percent, &mut pos)),
            b'?' => tokens.push(single(TokenKind::Question, &mut pos)),
            b':' => tokens.push(single(TokenKind::Colon, &mut pos)),
            b'.' => tokens.push(single(TokenKind::Dot, &mut pos)),
            b',' => tokens.push(single(TokenKind::Comma, &mut pos)),
            b'(' => tokens.push(single(TokenKind::LParen, &mut pos)),
            b')' => tokens.push(single(TokenKind::RParen, &mut pos)),
            b'[' => tokens.push(single(TokenKind::LBracket, &mut pos)),
            b']' => tokens.push(single(TokenKind::RBracket, &mut pos)),
            b'=' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    tokens.push(Token {
                        kind: TokenKind::EqEq,
                        pos: start,
                    });
                } else {
                    return Err(SyntaxError::new(pos, "expected `==`"));
                }
            }
            b'!' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    tokens.push(Token {
                        kind: TokenKind::BangEq,
                        pos: start,
                    });
                } else {
                    tokens.push(single(TokenKind::Bang, &mut pos));
                }
            }
            b'<' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    tokens.push(Token {
                        kind: TokenKind::LessEq,
                        pos: start,
                    });
                } else {
                    tokens.push(single(TokenKind::Less, &mut pos));
                }
            }
            b'>' => {
                if bytes.get(pos + 1) == Some(&b'=') {
                    pos += 2;
                    tokens.push(Token {
                        kind: TokenKind::GreaterEq,
                        pos: start,
                    });
                } else {
                    tokens.push(single(TokenKind::Greater, &mut pos));
                }
            }
            b'&' => {
                if bytes.get(pos + 1) == Some(&b'&') {
                    pos += 2;
                    tokens.push(Token {
                        kind: TokenKind::AndAnd,
                        pos: start,
                    });
                } else {
                    return Err(SyntaxError::new(pos, "expected `&&`"));
                }
            }
            b'|' => {
                if bytes.get(pos + 1) == Some(&b'|') {
                    pos += 2;
                    tokens.push(Token {
                        kind: TokenKind::OrOr,
                        pos: start,
                    });
                } else {
                    return Err(SyntaxError::new(pos, "expected `||`"));
                }
            }
            _ if is_ident_start(b) => {
                let mut end = pos + 1;
                while end < bytes.len() && is_ident_continue(bytes[end]) {
                    end += 1;
                }
                let word = &body[pos..end];
                let kind = match word {
                    "true" => TokenKind::True,
                    "false" => TokenKind::False,
                    "null" => TokenKind::Null,
                    _ => TokenKind::Ident(word.to_string()),
                };
                tokens.push(Token { kind, pos: start });
                pos = end;
            }
            _ => {
                let ch = body[pos..].chars().next().unwrap_or('?');
                return Err(SyntaxError::new(
                    pos,
                    format!("unexpected character `{ch}`"),
                ));
            }
        }
    }

    tokens.push(Token {
        kind: TokenKind::Eof,
        pos: bytes.len(),
    });
    Ok(tokens)
}

fn single(kind: TokenKind, pos: &mut usize) -> Token {
    let token = Token { kind, pos: *pos };
    *pos += 1;
    token
}

fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_' || b == b'$'
}

fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'$'
}

fn scan_number(body: &str, start: usize) -> Result<(f64, usize), SyntaxError> {
    let bytes = body.as_bytes();
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    // A `.` only belongs to the number when a digit follows; `items.0`
    // style access is handled by the parser, not the scanner.
    if end < bytes.len()
        && bytes[end] == b'.'
        && bytes.get(end + 1).is_some_and(|b| b.is_ascii_digit())
    {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
        }
    }
    body[start..end]
        .parse::<f64>()
        .map(|n| (n, end))
        .map_err(|_| SyntaxError::new(start, "malformed number literal"))
}

fn scan_string(body: &str, start: usize) -> Result<(String, usize), SyntaxError> {
    let bytes = body.as_bytes();
    let quote = bytes[start];
    let mut out = String::new();
    let mut pos = start + 1;

    while pos < bytes.len() {
        match bytes[pos] {
            b if b == quote => return Ok((out, pos + 1)),
            b'\\' => {
                let escaped = bytes
                    .get(pos + 1)
                    .ok_or_else(|| SyntaxError::new(pos, "unterminated escape"))?;
                match escaped {
                    b'\\' => out.push('\\'),
                    b'\'' => out.push('\''),
                    b'"' => out.push('"'),
                    b'n' => out.push('\n'),
                    b't' => out.push('\t'),
                    _ => {
                        return Err(SyntaxError::new(pos, "unknown escape sequence"));
                    }
                }
                pos += 2;
            }
            b if b.is_ascii() => {
                out.push(b as char);
                pos += 1;
            }
            _ => {
                // Multi-byte character: copy it whole.
                let ch = body[pos..]
                    .chars()
                    .next()
                    .ok_or_else(|| SyntaxError::new(pos, "invalid character"))?;
                out.push(ch);
                pos += ch.len_utf8();
            }
        }
    }
    Err(SyntaxError::new(start, "unterminated string literal"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(body: &str) -> Vec<TokenKind> {
        scan(body)
            .expect("scan failed")
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_scan_operators() {
        assert_eq!(
            kinds("a == b && !c"),
            vec![
                TokenKind::Ident("a".into()),
                TokenKind::EqEq,
                TokenKind::Ident("b".into()),
                TokenKind::AndAnd,
                TokenKind::Bang,
                TokenKind::Ident("c".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_number_and_member_dot() {
        assert_eq!(
            kinds("3.25 + a.b"),
            vec![
                TokenKind::Number(3.25),
                TokenKind::Plus,
                TokenKind::Ident("a".into()),
                TokenKind::Dot,
                TokenKind::Ident("b".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_dollar_identifier() {
        assert_eq!(
            kinds("$index"),
            vec![TokenKind::Ident("$index".into()), TokenKind::Eof]
        );
    }

    #[test]
    fn test_scan_strings_with_escapes() {
        assert_eq!(
            kinds(r#""a\"b" 'c\n'"#),
            vec![
                TokenKind::Str("a\"b".into()),
                TokenKind::Str("c\n".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_scan_errors() {
        assert!(scan("a & b").is_err());
        assert!(scan("'open").is_err());
        assert!(scan("a # b").is_err());
        assert!(scan("a = b").is_err());
    }
}
