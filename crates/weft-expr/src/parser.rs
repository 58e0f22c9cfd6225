//! Pratt parser: directive-body text to a typed [`Expr`] tree.
//!
//! Parsing happens once, at template compile time; render-time work is
//! evaluation only. The grammar is deliberately closed: no assignment, no
//! free function calls, no lambdas.

use crate::ast::{BinaryOp, Expr, UnaryOp};
use crate::error::SyntaxError;
use crate::token::{scan, Token, TokenKind};

/// Parse a complete directive body. Trailing tokens are an error.
pub fn parse(body: &str) -> Result<Expr, SyntaxError> {
    let tokens = scan(body)?;
    let mut parser = ExprParser { tokens, pos: 0 };
    let expr = parser.parse_expr()?;
    match parser.peek_kind() {
        TokenKind::Eof => Ok(expr),
        other => Err(SyntaxError::new(
            parser.peek().pos,
            format!("unexpected trailing {other:?}"),
        )),
    }
}

struct ExprParser {
    tokens: Vec<Token>,
    pos: usize,
}

impl ExprParser {
    // ── Token cursor ─────────────────────────────────────────────────

    fn peek(&self) -> &Token {
        // scan() always terminates the stream with Eof.
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek_kind() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> Result<(), SyntaxError> {
        if self.eat(&kind) {
            Ok(())
        } else {
            Err(SyntaxError::new(
                self.peek().pos,
                format!("expected {what}, found {:?}", self.peek_kind()),
            ))
        }
    }

    // ── Grammar ──────────────────────────────────────────────────────

    /// expr := binary ( `?` expr `:` expr )?
    ///
    /// The ternary binds loosest and associates to the right.
    fn parse_expr(&mut self) -> Result<Expr, SyntaxError> {
        let cond = self.parse_binary(0)?;
        if !self.eat(&TokenKind::Question) {
            return Ok(cond);
        }
        let then = self.parse_expr()?;
        self.expect(TokenKind::Colon, "`:` in ternary")?;
        let otherwise = self.parse_expr()?;
        Ok(Expr::Ternary {
            cond: Box::new(cond),
            then: Box::new(then),
            otherwise: Box::new(otherwise),
        })
    }

    /// Precedence-climbing loop over the binary operator table.
    fn parse_binary(&mut self, min_bp: u8) -> Result<Expr, SyntaxError> {
        let mut left = self.parse_unary()?;
        loop {
            let Some(op) = binary_op(self.peek_kind()) else {
                break;
            };
            let bp = op.binding_power();
            if bp < min_bp {
                break;
            }
            self.advance();
            let right = self.parse_binary(bp + 1)?;
            left = Expr::Binary {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, SyntaxError> {
        let op = match self.peek_kind() {
            TokenKind::Bang => Some(UnaryOp::Not),
            TokenKind::Minus => Some(UnaryOp::Neg),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.parse_unary()?;
            return Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
            });
        }
        self.parse_postfix()
    }

    /// postfix := primary ( `.` ident args? | `[` expr `]` )*
    fn parse_postfix(&mut self) -> Result<Expr, SyntaxError> {
        let mut expr = self.parse_primary()?;
        loop {
            if self.eat(&TokenKind::Dot) {
                let name = self.expect_ident("field or method name")?;
                if self.eat(&TokenKind::LParen) {
                    let args = self.parse_args()?;
                    expr = Expr::MethodCall {
                        object: Box::new(expr),
                        method: name,
                        args,
                    };
                } else {
                    expr = Expr::Field {
                        object: Box::new(expr),
                        name,
                    };
                }
            } else if self.eat(&TokenKind::LBracket) {
                let index = self.parse_expr()?;
                self.expect(TokenKind::RBracket, "`]`")?;
                expr = Expr::Index {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Arguments after an already-consumed `(`.
    fn parse_args(&mut self) -> Result<Vec<Expr>, SyntaxError> {
        let mut args = Vec::new();
        if self.eat(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expr()?);
            if self.eat(&TokenKind::Comma) {
                continue;
            }
            self.expect(TokenKind::RParen, "`)` after arguments")?;
            return Ok(args);
        }
    }

    fn parse_primary(&mut self) -> Result<Expr, SyntaxError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Number(n) => Ok(Expr::Number(n)),
            TokenKind::Str(s) => Ok(Expr::Str(s)),
            TokenKind::True => Ok(Expr::Bool(true)),
            TokenKind::False => Ok(Expr::Bool(false)),
            TokenKind::Null => Ok(Expr::Null),
            TokenKind::Ident(name) => {
                // `name(...)` would be a free function call; the evaluator
                // has no function table, so reject it up front.
                if self.peek_kind() == &TokenKind::LParen {
                    return Err(SyntaxError::new(
                        self.peek().pos,
                        format!("free function calls are not supported: `{name}(...)`"),
                    ));
                }
                Ok(Expr::Ident(name))
            }
            TokenKind::LParen => {
                let inner = self.parse_expr()?;
                self.expect(TokenKind::RParen, "`)`")?;
                Ok(inner)
            }
            TokenKind::Eof => Err(SyntaxError::new(token.pos, "empty expression")),
            other => Err(SyntaxError::new(
                token.pos,
                format!("unexpected {other:?}"),
            )),
        }
    }

    fn expect_ident(&mut self, what: &str) -> Result<String, SyntaxError> {
        let token = self.advance();
        match token.kind {
            TokenKind::Ident(name) => Ok(name),
            other => Err(SyntaxError::new(
                token.pos,
                format!("expected {what}, found {other:?}"),
            )),
        }
    }
}

fn binary_op(kind: &TokenKind) -> Option<BinaryOp> {
    Some(match kind {
        TokenKind::OrOr => BinaryOp::Or,
        TokenKind::AndAnd => BinaryOp::And,
        TokenKind::EqEq => BinaryOp::Eq,
        TokenKind::BangEq => BinaryOp::NotEq,
        TokenKind::Less => BinaryOp::Less,
        TokenKind::LessEq => BinaryOp::LessEq,
        TokenKind::Greater => BinaryOp::Greater,
        TokenKind::GreaterEq => BinaryOp::GreaterEq,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Rem,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_mul_over_add() {
        let e = parse("1 + 2 * 3").unwrap();
        assert_eq!(e.to_string(), "(1 + (2 * 3))");
    }

    #[test]
    fn test_precedence_comparison_over_and() {
        let e = parse("a < b && c >= d").unwrap();
        assert_eq!(e.to_string(), "((a < b) && (c >= d))");
    }

    #[test]
    fn test_ternary_right_associative() {
        let e = parse("a ? b : c ? d : e").unwrap();
        assert_eq!(e.to_string(), "(a ? b : (c ? d : e))");
    }

    #[test]
    fn test_postfix_chain() {
        let e = parse("user.todos[0].title").unwrap();
        assert_eq!(e.to_string(), "user.todos[0].title");
    }

    #[test]
    fn test_method_call_with_args() {
        let e = parse("name.contains('a')").unwrap();
        assert_eq!(e.to_string(), "name.contains(\"a\")");
    }

    #[test]
    fn test_parenthesized_grouping() {
        let e = parse("(1 + 2) * 3").unwrap();
        assert_eq!(e.to_string(), "((1 + 2) * 3)");
    }

    #[test]
    fn test_rejects_empty_body() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }

    #[test]
    fn test_rejects_trailing_tokens() {
        assert!(parse("a b").is_err());
    }

    #[test]
    fn test_rejects_free_function_call() {
        let err = parse("print(x)").unwrap_err();
        assert!(err.message.contains("free function"));
    }

    #[test]
    fn test_rejects_unbalanced_parens() {
        assert!(parse("(a + b").is_err());
        assert!(parse("items[1").is_err());
    }
}
