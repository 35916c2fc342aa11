pub mod parse;
pub mod tokens;
