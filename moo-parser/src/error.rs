/// Parse errors with source byte offsets.
use std::fmt;

use thiserror::Error;

use crate::token::TokenKind;

/// What the parser was looking for when it stopped.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Expected {
    Token(TokenKind),
    Expression,
    Statement,
}

impl fmt::Display for Expected {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expected::Token(kind) if kind.name().len() <= 2 || kind.is_keyword() => {
                write!(f, "`{kind}`")
            }
            Expected::Token(kind) => write!(f, "{kind}"),
            Expected::Expression => f.write_str("expression"),
            Expected::Statement => f.write_str("statement"),
        }
    }
}

/// The first failure of a parse. Parsing never resumes after one.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error at byte {offset}: expected {expected}, found {}", describe(.found, .lexeme))]
    Syntax {
        expected: Expected,
        found: TokenKind,
        lexeme: String,
        offset: usize,
    },
    #[error("unrecognized character `{lexeme}` at byte {offset}")]
    Lex { lexeme: String, offset: usize },
    #[error("nesting deeper than {limit} levels at byte {offset}")]
    TooDeep { limit: usize, offset: usize },
}

impl ParseError {
    pub fn offset(&self) -> usize {
        match self {
            ParseError::Syntax { offset, .. }
            | ParseError::Lex { offset, .. }
            | ParseError::TooDeep { offset, .. } => *offset,
        }
    }

    /// Kind of the token the parser stopped on, when there was one.
    pub fn found(&self) -> Option<TokenKind> {
        match self {
            ParseError::Syntax { found, .. } => Some(*found),
            ParseError::Lex { .. } => Some(TokenKind::Illegal),
            ParseError::TooDeep { .. } => None,
        }
    }

    pub fn expected(&self) -> Option<Expected> {
        match self {
            ParseError::Syntax { expected, .. } => Some(*expected),
            _ => None,
        }
    }
}

fn describe(found: &TokenKind, lexeme: &str) -> String {
    match *found {
        TokenKind::EndOfInput => "end of input".to_string(),
        _ if lexeme.is_empty() => found.name().to_string(),
        _ => format!("`{lexeme}`"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn syntax_error_message() {
        let err = ParseError::Syntax {
            expected: Expected::Token(TokenKind::Semicolon),
            found: TokenKind::Identifier,
            lexeme: "foo".into(),
            offset: 4,
        };
        assert_eq!(
            err.to_string(),
            "syntax error at byte 4: expected `;`, found `foo`"
        );
        assert_eq!(err.offset(), 4);
        assert_eq!(err.found(), Some(TokenKind::Identifier));
    }

    #[test]
    fn end_of_input_message() {
        let err = ParseError::Syntax {
            expected: Expected::Expression,
            found: TokenKind::EndOfInput,
            lexeme: String::new(),
            offset: 6,
        };
        assert_eq!(
            err.to_string(),
            "syntax error at byte 6: expected expression, found end of input"
        );
    }

    #[test]
    fn keyword_and_class_names() {
        assert_eq!(Expected::Token(TokenKind::EndIf).to_string(), "`endif`");
        assert_eq!(Expected::Token(TokenKind::Identifier).to_string(), "identifier");
        assert_eq!(Expected::Token(TokenKind::DotDot).to_string(), "`..`");
    }
}
