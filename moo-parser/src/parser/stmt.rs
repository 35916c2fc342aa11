use super::Parser;
use crate::ast::{ElseBranch, Expr, IfStmt, Stmt};
use crate::error::{Expected, ParseError};
use crate::token::TokenKind;

impl Parser<'_> {
    /// Statements up to the next `endif`, `endfor`, `else`, `elseif` or end of
    /// input. The terminator is left for the caller.
    pub(super) fn parse_statement_list(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut stmts = Vec::new();
        while !matches!(
            self.tok.kind,
            TokenKind::EndIf
                | TokenKind::EndFor
                | TokenKind::Else
                | TokenKind::ElseIf
                | TokenKind::EndOfInput
        ) {
            stmts.push(self.parse_statement()?);
        }
        Ok(stmts)
    }

    /// Body of an `if`/`else`/`for`, one nesting level down.
    fn parse_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        self.rule("Body", |p| p.nested(|p| p.parse_statement_list()))
    }

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.rule("Statement", |p| match p.tok.kind {
            TokenKind::Semicolon => {
                let offset = p.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Empty { offset })
            }
            TokenKind::Return => p.parse_return(),
            TokenKind::If => p.parse_if().map(Stmt::If),
            TokenKind::For => p.parse_for_range(),
            TokenKind::Identifier
            | TokenKind::IntLiteral
            | TokenKind::FloatLiteral
            | TokenKind::StringLiteral
            | TokenKind::ObjectRefLiteral
            | TokenKind::LParen
            | TokenKind::LBrace
            | TokenKind::LBracket
            | TokenKind::Plus
            | TokenKind::Minus
            | TokenKind::Not => {
                let offset = p.tok.offset;
                let expr = p.parse_expr()?;
                p.expect(TokenKind::Semicolon)?;
                Ok(Stmt::Expr { expr, offset })
            }
            _ => Err(p.unexpected(Expected::Statement)),
        })
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        self.rule("Return", |p| {
            let offset = p.expect(TokenKind::Return)?;
            let value = p.parse_expr()?;
            p.expect(TokenKind::Semicolon)?;
            Ok(Stmt::Return { value, offset })
        })
    }

    /// Whole `if ... endif` chain. `elseif` arms are read in a loop and
    /// folded from the right into nested [`IfStmt`]s, so a long flat chain
    /// costs neither stack nor nesting depth.
    pub(super) fn parse_if(&mut self) -> Result<IfStmt, ParseError> {
        self.rule("IfStmt", |p| {
            let head = p.parse_if_arm(TokenKind::If)?;
            let mut arms = Vec::new();
            let mut tail = None;
            loop {
                match p.tok.kind {
                    TokenKind::EndIf => {
                        p.next();
                        break;
                    }
                    TokenKind::ElseIf => arms.push(p.parse_if_arm(TokenKind::ElseIf)?),
                    TokenKind::Else => {
                        let offset = p.expect(TokenKind::Else)?;
                        let body = p.parse_body()?;
                        p.expect(TokenKind::EndIf)?;
                        tail = Some(ElseBranch::Else { body, offset });
                        break;
                    }
                    _ => return Err(p.unexpected(Expected::Token(TokenKind::EndIf))),
                }
            }
            let else_branch = arms.into_iter().rev().fold(tail, |tail, arm| {
                Some(ElseBranch::ElseIf(Box::new(arm.into_stmt(tail))))
            });
            Ok(head.into_stmt(else_branch))
        })
    }

    /// `if`/`elseif` keyword, condition and body. A `;` directly after the
    /// condition closes the header, so `if a; endif` has an empty body.
    fn parse_if_arm(&mut self, lead: TokenKind) -> Result<IfArm, ParseError> {
        self.rule("IfArm", |p| {
            let offset = p.expect(lead)?;
            let condition = p.parse_expr()?;
            if p.at(TokenKind::Semicolon) {
                p.next();
            }
            let then_body = p.parse_body()?;
            Ok(IfArm {
                condition,
                then_body,
                offset,
            })
        })
    }

    fn parse_for_range(&mut self) -> Result<Stmt, ParseError> {
        self.rule("ForRange", |p| {
            let offset = p.expect(TokenKind::For)?;
            let (var, var_offset) = p.parse_identifier()?;
            p.expect(TokenKind::In)?;
            let range = p.parse_range()?;
            let body = p.parse_body()?;
            p.expect(TokenKind::EndFor)?;
            Ok(Stmt::ForRange {
                var,
                var_offset,
                range,
                body,
                offset,
            })
        })
    }
}

/// One `if` or `elseif` arm before its continuation is known.
struct IfArm {
    condition: Expr,
    then_body: Vec<Stmt>,
    offset: usize,
}

impl IfArm {
    fn into_stmt(self, else_branch: Option<ElseBranch>) -> IfStmt {
        IfStmt {
            condition: self.condition,
            then_body: self.then_body,
            else_branch,
            offset: self.offset,
        }
    }
}
