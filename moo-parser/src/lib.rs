pub mod ast;
pub mod error;
pub mod lexer;
pub mod parser;
pub mod printer;
pub mod token;

pub use error::{Expected, ParseError};
pub use lexer::{scan, Lexer};
pub use parser::{
    parse_expression, parse_if_statement, parse_program, Parser, ParserOptions,
    DEFAULT_MAX_DEPTH,
};
pub use token::{Token, TokenKind};
