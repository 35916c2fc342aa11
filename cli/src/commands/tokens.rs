use anyhow::{Context, Result};
use moo_parser::Lexer;
use std::fs;

pub fn dump_tokens(path: &str) -> Result<()> {
    print!("{}", render_tokens(path)?);
    Ok(())
}

/// One line per token, `EndOfInput` included.
pub fn render_tokens(path: &str) -> Result<String> {
    let content = fs::read(path).with_context(|| format!("Failed to read {path}"))?;
    let mut out = String::new();
    for tok in Lexer::tokenize(&content) {
        let kind = format!("{:?}", tok.kind);
        let line = format!("{:5} {:<16} {}", tok.offset, kind, tok.lexeme);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    Ok(out)
}
