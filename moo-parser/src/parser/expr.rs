use super::Parser;
use crate::ast::{BinaryOp, Expr, LiteralKind, UnaryOp};
use crate::error::{Expected, ParseError};
use crate::token::{TokenKind, LOWEST_PREC};

impl Parser<'_> {
    pub(super) fn parse_expr(&mut self) -> Result<Expr, ParseError> {
        self.rule("Expression", |p| {
            p.nested(|p| p.parse_binary_expr(LOWEST_PREC + 1))
        })
    }

    /// Parse an expression in a context where `=` means equality.
    pub(super) fn parse_rhs(&mut self) -> Result<Expr, ParseError> {
        let old = std::mem::replace(&mut self.in_rhs, true);
        let expr = self.parse_expr();
        self.in_rhs = old;
        expr
    }

    /// Current token and its binding strength, with `=` read as `==` on a
    /// right-hand side.
    fn tok_prec(&self) -> (TokenKind, u8) {
        let kind = match self.tok.kind {
            TokenKind::Assign if self.in_rhs => TokenKind::Eq,
            kind => kind,
        };
        (kind, kind.precedence())
    }

    /// Precedence climbing. Starting from the tier of the operator that
    /// follows the first operand, consume every operator of exactly that tier
    /// left to right, then step down one tier until `min_prec`.
    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Expr, ParseError> {
        self.rule("BinaryExpr", |p| {
            let mut lhs = p.parse_unary_expr()?;
            let mut prec = p.tok_prec().1;
            while prec >= min_prec {
                loop {
                    let (kind, op_prec) = p.tok_prec();
                    if op_prec != prec {
                        break;
                    }
                    let offset = p.tok.offset;
                    p.next();
                    let rhs = p.parse_binary_expr(prec + 1)?;
                    lhs = Expr::Binary {
                        op: binary_op(kind),
                        lhs: Box::new(lhs),
                        rhs: Box::new(rhs),
                        offset,
                    };
                }
                prec -= 1;
            }
            Ok(lhs)
        })
    }

    fn parse_unary_expr(&mut self) -> Result<Expr, ParseError> {
        self.rule("UnaryExpr", |p| {
            let op = match p.tok.kind {
                TokenKind::Plus => UnaryOp::Plus,
                TokenKind::Minus => UnaryOp::Neg,
                TokenKind::Not => UnaryOp::Not,
                _ => return p.parse_primary_expr(),
            };
            let offset = p.tok.offset;
            p.next();
            let operand = p.nested(|p| p.parse_unary_expr())?;
            Ok(Expr::Unary {
                op,
                operand: Box::new(operand),
                offset,
            })
        })
    }

    /// An operand followed by any number of `.prop`, `:verb(...)` and `[...]`
    /// suffixes. A `[` with no operand before it starts a standalone range.
    fn parse_primary_expr(&mut self) -> Result<Expr, ParseError> {
        self.rule("PrimaryExpr", |p| {
            let mut x = p.parse_operand()?;
            loop {
                x = match (p.tok.kind, x.take()) {
                    (TokenKind::LBracket, object) => Some(p.parse_index_or_slice(object)?),
                    (TokenKind::Period, Some(object)) => Some(p.parse_property_ref(object)?),
                    (TokenKind::Colon, Some(object)) => Some(p.parse_verb_call(object)?),
                    (_, x) => return x.ok_or_else(|| p.unexpected(Expected::Expression)),
                };
            }
        })
    }

    /// Returns `None` when the current token cannot start an operand.
    fn parse_operand(&mut self) -> Result<Option<Expr>, ParseError> {
        self.rule("Operand", |p| {
            let kind = match p.tok.kind {
                TokenKind::Identifier => {
                    let (name, offset) = p.parse_identifier()?;
                    return Ok(Some(Expr::Identifier { name, offset }));
                }
                TokenKind::LParen => return p.parse_paren_expr().map(Some),
                TokenKind::LBrace => return p.parse_list_expr().map(Some),
                TokenKind::IntLiteral => LiteralKind::Int,
                TokenKind::FloatLiteral => LiteralKind::Float,
                TokenKind::StringLiteral => LiteralKind::String,
                TokenKind::ObjectRefLiteral => LiteralKind::ObjectRef,
                _ => return Ok(None),
            };
            let offset = p.tok.offset;
            let raw = std::mem::take(&mut p.tok.lexeme);
            p.next();
            Ok(Some(Expr::Literal { kind, raw, offset }))
        })
    }

    fn parse_paren_expr(&mut self) -> Result<Expr, ParseError> {
        self.rule("ParenExpr", |p| {
            let lparen = p.expect(TokenKind::LParen)?;
            let inner = p.parse_rhs()?;
            let rparen = p.expect(TokenKind::RParen)?;
            Ok(Expr::Parenthesized {
                inner: Box::new(inner),
                lparen,
                rparen,
            })
        })
    }

    fn parse_list_expr(&mut self) -> Result<Expr, ParseError> {
        self.rule("ListExpr", |p| {
            let lbrace = p.expect(TokenKind::LBrace)?;
            let elements = p.parse_expr_list(TokenKind::RBrace)?;
            let rbrace = p.expect(TokenKind::RBrace)?;
            Ok(Expr::List {
                elements,
                lbrace,
                rbrace,
            })
        })
    }

    /// Comma-separated expressions up to (not including) `close`. Empty when
    /// `close` comes first; a trailing comma is an error.
    fn parse_expr_list(&mut self, close: TokenKind) -> Result<Vec<Expr>, ParseError> {
        let mut exprs = Vec::new();
        if self.at(close) {
            return Ok(exprs);
        }
        loop {
            exprs.push(self.parse_expr()?);
            if !self.at(TokenKind::Comma) {
                return Ok(exprs);
            }
            self.next();
        }
    }

    /// Property or verb name: a bare identifier or `(expr)`. The parentheses
    /// only delimit the name; `=` inside them keeps its surrounding meaning.
    fn parse_member_name(&mut self) -> Result<Expr, ParseError> {
        if !self.at(TokenKind::LParen) {
            let (name, offset) = self.parse_identifier()?;
            return Ok(Expr::Identifier { name, offset });
        }
        self.next();
        let name = self.parse_expr()?;
        self.expect(TokenKind::RParen)?;
        Ok(name)
    }

    fn parse_property_ref(&mut self, object: Expr) -> Result<Expr, ParseError> {
        self.rule("PropertyRef", |p| {
            let offset = p.expect(TokenKind::Period)?;
            let property = p.parse_member_name()?;
            Ok(Expr::PropertyRef {
                object: Box::new(object),
                property: Box::new(property),
                offset,
            })
        })
    }

    fn parse_verb_call(&mut self, object: Expr) -> Result<Expr, ParseError> {
        self.rule("VerbCall", |p| {
            let offset = p.expect(TokenKind::Colon)?;
            let verb = p.parse_member_name()?;
            p.expect(TokenKind::LParen)?;
            let args = p.parse_expr_list(TokenKind::RParen)?;
            p.expect(TokenKind::RParen)?;
            Ok(Expr::VerbCall {
                object: Box::new(object),
                verb: Box::new(verb),
                args,
                offset,
            })
        })
    }

    /// `[i]` and `[lo..hi]` after an object give `Index` and `Slice`; without
    /// an object only the `[lo..hi]` form is valid and gives a `Range`.
    fn parse_index_or_slice(&mut self, object: Option<Expr>) -> Result<Expr, ParseError> {
        self.rule("IndexOrSlice", |p| {
            let lbracket = p.expect(TokenKind::LBracket)?;
            let low = Box::new(p.parse_rhs()?);
            let high = if p.at(TokenKind::DotDot) {
                p.next();
                Some(Box::new(p.parse_rhs()?))
            } else {
                None
            };
            let Some(object) = object else {
                let Some(high) = high else {
                    return Err(p.unexpected(Expected::Token(TokenKind::DotDot)));
                };
                let rbracket = p.expect(TokenKind::RBracket)?;
                return Ok(Expr::Range {
                    low,
                    high,
                    lbracket,
                    rbracket,
                });
            };
            let rbracket = p.expect(TokenKind::RBracket)?;
            let object = Box::new(object);
            Ok(match high {
                Some(high) => Expr::Slice {
                    object,
                    low,
                    high,
                    lbracket,
                    rbracket,
                },
                None => Expr::Index {
                    object,
                    index: low,
                    lbracket,
                    rbracket,
                },
            })
        })
    }

    /// `[lo..hi]` with both bounds, as used by `for ... in`.
    pub(super) fn parse_range(&mut self) -> Result<Expr, ParseError> {
        self.rule("Range", |p| {
            let lbracket = p.expect(TokenKind::LBracket)?;
            let low = p.parse_rhs()?;
            p.expect(TokenKind::DotDot)?;
            let high = p.parse_rhs()?;
            let rbracket = p.expect(TokenKind::RBracket)?;
            Ok(Expr::Range {
                low: Box::new(low),
                high: Box::new(high),
                lbracket,
                rbracket,
            })
        })
    }
}

fn binary_op(kind: TokenKind) -> BinaryOp {
    match kind {
        TokenKind::Assign => BinaryOp::Assign,
        TokenKind::Or => BinaryOp::Or,
        TokenKind::And => BinaryOp::And,
        TokenKind::Eq => BinaryOp::Eq,
        TokenKind::Neq => BinaryOp::Neq,
        TokenKind::Lt => BinaryOp::Lt,
        TokenKind::Le => BinaryOp::Le,
        TokenKind::Gt => BinaryOp::Gt,
        TokenKind::Ge => BinaryOp::Ge,
        TokenKind::Plus => BinaryOp::Add,
        TokenKind::Minus => BinaryOp::Sub,
        TokenKind::Star => BinaryOp::Mul,
        TokenKind::Slash => BinaryOp::Div,
        TokenKind::Percent => BinaryOp::Mod,
        _ => unreachable!("not a binary operator: {kind:?}"),
    }
}
