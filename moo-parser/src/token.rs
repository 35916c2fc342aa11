/// Token types for the MOO-style lexer.
use std::fmt;

use serde::Serialize;

/// A single token produced by the lexer.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Byte offset of this token's first character in the source buffer.
    pub offset: usize,
}

impl Token {
    pub fn new(kind: TokenKind, lexeme: impl Into<String>, offset: usize) -> Self {
        Self {
            kind,
            lexeme: lexeme.into(),
            offset,
        }
    }
}

/// All token variants recognized by the lexer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    EndOfInput,
    Illegal,

    // Literals
    Identifier,
    IntLiteral,
    FloatLiteral,
    StringLiteral,
    ObjectRefLiteral,

    // Punctuation
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Colon,
    Semicolon,
    Period,
    Comma,

    // Operators
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    Assign,
    Eq,
    Neq,
    Lt,
    Gt,
    Le,
    Ge,
    Not,
    And,
    Or,
    DotDot,

    // Keywords
    For,
    EndFor,
    In,
    If,
    ElseIf,
    Else,
    EndIf,
    Return,
}

/// Reserved words. Identifier-shaped lexemes found here become keywords.
pub const KEYWORDS: &[(&str, TokenKind)] = &[
    ("for", TokenKind::For),
    ("endfor", TokenKind::EndFor),
    ("in", TokenKind::In),
    ("if", TokenKind::If),
    ("elseif", TokenKind::ElseIf),
    ("else", TokenKind::Else),
    ("endif", TokenKind::EndIf),
    ("return", TokenKind::Return),
];

/// Operator spellings, matched against a maximal run of operator glyphs.
pub const OPERATORS: &[(&str, TokenKind)] = &[
    ("+", TokenKind::Plus),
    ("-", TokenKind::Minus),
    ("*", TokenKind::Star),
    ("/", TokenKind::Slash),
    ("%", TokenKind::Percent),
    ("..", TokenKind::DotDot),
    ("==", TokenKind::Eq),
    ("=", TokenKind::Assign),
    ("<", TokenKind::Lt),
    (">", TokenKind::Gt),
    ("<=", TokenKind::Le),
    (">=", TokenKind::Ge),
    ("!=", TokenKind::Neq),
    ("!", TokenKind::Not),
    ("&&", TokenKind::And),
    ("||", TokenKind::Or),
];

pub fn keyword(lexeme: &str) -> Option<TokenKind> {
    KEYWORDS
        .iter()
        .find(|(spelling, _)| *spelling == lexeme)
        .map(|(_, kind)| *kind)
}

pub fn operator(lexeme: &str) -> Option<TokenKind> {
    OPERATORS
        .iter()
        .find(|(spelling, _)| *spelling == lexeme)
        .map(|(_, kind)| *kind)
}

pub fn punctuation(byte: u8) -> Option<TokenKind> {
    Some(match byte {
        b'{' => TokenKind::LBrace,
        b'}' => TokenKind::RBrace,
        b'[' => TokenKind::LBracket,
        b']' => TokenKind::RBracket,
        b'(' => TokenKind::LParen,
        b')' => TokenKind::RParen,
        b':' => TokenKind::Colon,
        b';' => TokenKind::Semicolon,
        b'.' => TokenKind::Period,
        b',' => TokenKind::Comma,
        _ => return None,
    })
}

impl TokenKind {
    /// Binding strength of a binary operator, 0 for everything else.
    pub fn precedence(self) -> u8 {
        match self {
            TokenKind::Assign => 1,
            TokenKind::Or => 2,
            TokenKind::And => 3,
            TokenKind::Eq
            | TokenKind::Neq
            | TokenKind::Lt
            | TokenKind::Le
            | TokenKind::Gt
            | TokenKind::Ge => 4,
            TokenKind::Plus | TokenKind::Minus => 5,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => 6,
            _ => LOWEST_PREC,
        }
    }

    pub fn is_keyword(self) -> bool {
        KEYWORDS.iter().any(|(_, kind)| *kind == self)
    }

    pub fn name(self) -> &'static str {
        match self {
            TokenKind::EndOfInput => "end of input",
            TokenKind::Illegal => "illegal character",
            TokenKind::Identifier => "identifier",
            TokenKind::IntLiteral => "integer",
            TokenKind::FloatLiteral => "float",
            TokenKind::StringLiteral => "string",
            TokenKind::ObjectRefLiteral => "object reference",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Colon => ":",
            TokenKind::Semicolon => ";",
            TokenKind::Period => ".",
            TokenKind::Comma => ",",
            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::Assign => "=",
            TokenKind::Eq => "==",
            TokenKind::Neq => "!=",
            TokenKind::Lt => "<",
            TokenKind::Gt => ">",
            TokenKind::Le => "<=",
            TokenKind::Ge => ">=",
            TokenKind::Not => "!",
            TokenKind::And => "&&",
            TokenKind::Or => "||",
            TokenKind::DotDot => "..",
            TokenKind::For => "for",
            TokenKind::EndFor => "endfor",
            TokenKind::In => "in",
            TokenKind::If => "if",
            TokenKind::ElseIf => "elseif",
            TokenKind::Else => "else",
            TokenKind::EndIf => "endif",
            TokenKind::Return => "return",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub const LOWEST_PREC: u8 = 0;
