//! Recursive-descent parser with precedence climbing for MOO-style source.
//!
//! The parser pulls tokens from [`crate::lexer::scan`] one at a time and
//! keeps a single token of lookahead. Statements are parsed by first-token
//! dispatch (see `stmt.rs`), binary expressions by precedence climbing over
//! [`TokenKind::precedence`] (see `expr.rs`).
//!
//! A parser is single-use: every entry point consumes it. The first error
//! ends the parse and no partial tree is returned.

mod expr;
mod stmt;

use crate::ast::{Expr, Stmt};
use crate::error::{Expected, ParseError};
use crate::lexer::scan;
use crate::token::{Token, TokenKind};

/// Default limit for [`ParserOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 128;

/// Knobs for a single parse.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    /// Log grammar-rule entry and exit at `Trace` level under the
    /// `moo_parser::trace` target.
    pub trace: bool,
    /// Deepest allowed nesting of expressions, unary chains and statement
    /// bodies before the parse fails with [`ParseError::TooDeep`].
    pub max_depth: usize,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            trace: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Parse a complete program into its top-level statements.
///
/// ```
/// use moo_parser::parse_program;
///
/// let stmts = parse_program("x = 1 + 2; return x;").unwrap();
/// assert_eq!(stmts.len(), 2);
/// ```
pub fn parse_program(source: impl AsRef<[u8]>) -> Result<Vec<Stmt>, ParseError> {
    Parser::new(source.as_ref()).parse_program()
}

/// Parse a single expression that must span the whole input.
///
/// ```
/// use moo_parser::parse_expression;
///
/// let expr = parse_expression("2 - 3 * (2 / 5)").unwrap();
/// assert_eq!(
///     expr.to_string(),
///     "Binary(Literal(2), SUB, Binary(Literal(3), MUL, \
///      Parenthesized(Binary(Literal(2), DIV, Literal(5)))))"
/// );
/// ```
pub fn parse_expression(source: impl AsRef<[u8]>) -> Result<Expr, ParseError> {
    Parser::new(source.as_ref()).parse_expression()
}

/// Parse a single `if ... endif` statement that must span the whole input.
pub fn parse_if_statement(source: impl AsRef<[u8]>) -> Result<Stmt, ParseError> {
    Parser::new(source.as_ref()).parse_if_statement()
}

pub struct Parser<'a> {
    source: &'a [u8],
    /// Scanner cursor, just past the current token.
    pos: usize,
    tok: Token,
    /// Inside parentheses or brackets, where `=` reads as `==`.
    in_rhs: bool,
    depth: usize,
    indent: usize,
    options: ParserOptions,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a [u8]) -> Self {
        Self::with_options(source, ParserOptions::default())
    }

    pub fn with_options(source: &'a [u8], options: ParserOptions) -> Self {
        let (tok, pos) = scan(source, 0);
        Self {
            source,
            pos,
            tok,
            in_rhs: false,
            depth: 0,
            indent: 0,
            options,
        }
    }

    pub fn parse_program(mut self) -> Result<Vec<Stmt>, ParseError> {
        let stmts = self.rule("Program", |p| p.parse_statement_list())?;
        self.expect(TokenKind::EndOfInput)?;
        log::debug!(
            "parsed {} top-level statements from {} bytes",
            stmts.len(),
            self.source.len()
        );
        Ok(stmts)
    }

    pub fn parse_expression(mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_expr()?;
        self.expect(TokenKind::EndOfInput)?;
        log::debug!("parsed expression from {} bytes", self.source.len());
        Ok(expr)
    }

    pub fn parse_if_statement(mut self) -> Result<Stmt, ParseError> {
        let stmt = self.parse_if()?;
        self.expect(TokenKind::EndOfInput)?;
        log::debug!("parsed if statement from {} bytes", self.source.len());
        Ok(Stmt::If(stmt))
    }

    // ========================================================================
    // Token helpers
    // ========================================================================

    fn next(&mut self) {
        let (tok, pos) = scan(self.source, self.pos);
        self.tok = tok;
        self.pos = pos;
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.tok.kind == kind
    }

    /// Consume a token of `kind` and return its offset.
    fn expect(&mut self, kind: TokenKind) -> Result<usize, ParseError> {
        if !self.at(kind) {
            return Err(self.unexpected(Expected::Token(kind)));
        }
        let offset = self.tok.offset;
        self.next();
        Ok(offset)
    }

    fn parse_identifier(&mut self) -> Result<(String, usize), ParseError> {
        if !self.at(TokenKind::Identifier) {
            return Err(self.unexpected(Expected::Token(TokenKind::Identifier)));
        }
        let offset = self.tok.offset;
        let name = std::mem::take(&mut self.tok.lexeme);
        self.next();
        Ok((name, offset))
    }

    /// Error describing the current token. Illegal bytes surface as lexical
    /// errors, everything else as syntax errors.
    fn unexpected(&self, expected: Expected) -> ParseError {
        if self.tok.kind == TokenKind::Illegal {
            return ParseError::Lex {
                lexeme: self.tok.lexeme.clone(),
                offset: self.tok.offset,
            };
        }
        ParseError::Syntax {
            expected,
            found: self.tok.kind,
            lexeme: self.tok.lexeme.clone(),
            offset: self.tok.offset,
        }
    }

    // ========================================================================
    // Tracing and nesting
    // ========================================================================

    /// Run one grammar rule, logging its entry and exit in trace mode.
    fn rule<T>(
        &mut self,
        name: &'static str,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if !self.options.trace {
            return f(self);
        }
        self.print_trace(&format!("{name} ("));
        self.indent += 1;
        let result = f(self);
        self.indent -= 1;
        self.print_trace(")");
        result
    }

    /// Run `f` one nesting level deeper, failing once `max_depth` is reached.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(ParseError::TooDeep {
                limit: self.options.max_depth,
                offset: self.tok.offset,
            });
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn print_trace(&self, msg: &str) {
        log::trace!(
            target: "moo_parser::trace",
            "{:5}: {}{}",
            self.tok.offset,
            ". ".repeat(self.indent),
            msg
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::{BinaryOp, ElseBranch, LiteralKind, UnaryOp};

    fn single_stmt(src: &str) -> Stmt {
        let mut stmts = parse_program(src).unwrap();
        assert_eq!(stmts.len(), 1, "expected one statement in {src:?}");
        stmts.remove(0)
    }

    #[test]
    fn parse_literal_statement() {
        match single_stmt("42;") {
            Stmt::Expr {
                expr: Expr::Literal { kind, raw, offset },
                ..
            } => {
                assert_eq!(kind, LiteralKind::Int);
                assert_eq!(raw, "42");
                assert_eq!(offset, 0);
            }
            other => panic!("expected Int literal, got {other:?}"),
        }
    }

    #[test]
    fn parse_negative_number() {
        match parse_expression("-7").unwrap() {
            Expr::Unary { op, operand, .. } => {
                assert_eq!(op, UnaryOp::Neg);
                match *operand {
                    Expr::Literal { raw, .. } => assert_eq!(raw, "7"),
                    other => panic!("expected Literal, got {other:?}"),
                }
            }
            other => panic!("expected Unary(Neg), got {other:?}"),
        }
    }

    #[test]
    fn assignment_outside_parens() {
        match parse_expression("x = 1").unwrap() {
            Expr::Binary { op, offset, .. } => {
                assert_eq!(op, BinaryOp::Assign);
                assert_eq!(offset, 2);
            }
            other => panic!("expected Binary(Assign), got {other:?}"),
        }
    }

    #[test]
    fn assignment_reads_as_equality_in_parens() {
        match parse_expression("(x = 1)").unwrap() {
            Expr::Parenthesized { inner, lparen, rparen } => {
                assert_eq!((lparen, rparen), (0, 6));
                match *inner {
                    Expr::Binary { op, .. } => assert_eq!(op, BinaryOp::Eq),
                    other => panic!("expected Binary(Eq), got {other:?}"),
                }
            }
            other => panic!("expected Parenthesized, got {other:?}"),
        }
    }

    #[test]
    fn rhs_context_restored_after_parens() {
        match parse_expression("(a = b) = c").unwrap() {
            Expr::Binary { op, lhs, .. } => {
                assert_eq!(op, BinaryOp::Assign);
                assert!(matches!(*lhs, Expr::Parenthesized { .. }));
            }
            other => panic!("expected Binary(Assign), got {other:?}"),
        }
    }

    #[test]
    fn return_statement_offsets() {
        match single_stmt("  return x;") {
            Stmt::Return { value, offset } => {
                assert_eq!(offset, 2);
                assert_eq!(value.offset(), 9);
            }
            other => panic!("expected Return, got {other:?}"),
        }
    }

    #[test]
    fn for_range_statement() {
        match single_stmt("for i in [1..10] x; endfor") {
            Stmt::ForRange {
                var,
                var_offset,
                range,
                body,
                offset,
            } => {
                assert_eq!(var, "i");
                assert_eq!((offset, var_offset), (0, 4));
                assert!(matches!(range, Expr::Range { lbracket: 9, .. }));
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected ForRange, got {other:?}"),
        }
    }

    #[test]
    fn elseif_chain_nests_right() {
        let Stmt::If(outer) = single_stmt("if a x; elseif b y; else z; endif") else {
            panic!("expected If");
        };
        let Some(ElseBranch::ElseIf(inner)) = outer.else_branch else {
            panic!("expected elseif branch");
        };
        assert_eq!(inner.offset, 8);
        match inner.else_branch {
            Some(ElseBranch::Else { body, offset }) => {
                assert_eq!(offset, 20);
                assert_eq!(body.len(), 1);
            }
            other => panic!("expected else branch, got {other:?}"),
        }
    }

    #[test]
    fn if_statement_entry_point() {
        let stmt = parse_if_statement("if (x) return 1; endif").unwrap();
        assert!(matches!(stmt, Stmt::If(_)));
        assert!(parse_if_statement("x;").is_err());
        assert!(parse_if_statement("if x; endif y;").is_err());
    }

    #[test]
    fn stray_terminator_at_top_level() {
        let err = parse_program("x; endif").unwrap_err();
        assert_eq!(err.found(), Some(TokenKind::EndIf));
        assert_eq!(err.expected(), Some(Expected::Token(TokenKind::EndOfInput)));
        assert_eq!(err.offset(), 3);
    }

    #[test]
    fn depth_limit_is_configurable() {
        let src = format!("{}x{}", "(".repeat(10), ")".repeat(10));
        let shallow = ParserOptions {
            max_depth: 5,
            ..ParserOptions::default()
        };
        let err = Parser::with_options(src.as_bytes(), shallow)
            .parse_expression()
            .unwrap_err();
        assert_eq!(err, ParseError::TooDeep { limit: 5, offset: 5 });
        assert!(Parser::new(src.as_bytes()).parse_expression().is_ok());
    }
}
