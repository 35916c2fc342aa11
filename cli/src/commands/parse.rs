use anyhow::{Context, Result};
use moo_parser::printer::{expr_to_source, to_source};
use moo_parser::{Parser, ParserOptions};
use std::fs;

/// How `moo parse` prints a successful parse.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Tag tree, one top-level statement per line.
    Tree,
    Json,
    /// Canonical source.
    Source,
}

pub fn parse_file(
    path: &str,
    expr: bool,
    format: OutputFormat,
    options: ParserOptions,
) -> Result<()> {
    let out = render_file(path, expr, format, options)?;
    print!("{out}");
    Ok(())
}

/// Parse `path` and render the result the way `parse_file` prints it.
pub fn render_file(
    path: &str,
    expr: bool,
    format: OutputFormat,
    options: ParserOptions,
) -> Result<String> {
    let content = fs::read(path).with_context(|| format!("Failed to read {path}"))?;
    let parser = Parser::with_options(&content, options);

    if expr {
        let expr = parser
            .parse_expression()
            .with_context(|| format!("Parse error in {path}"))?;
        return Ok(match format {
            OutputFormat::Tree => format!("{expr}\n"),
            OutputFormat::Json => to_json(&expr)?,
            OutputFormat::Source => format!("{}\n", expr_to_source(&expr)),
        });
    }

    let stmts = parser
        .parse_program()
        .with_context(|| format!("Parse error in {path}"))?;
    log::info!("{path}: {} top-level statements", stmts.len());
    Ok(match format {
        OutputFormat::Tree => stmts.iter().map(|s| format!("{s}\n")).collect(),
        OutputFormat::Json => to_json(&stmts)?,
        OutputFormat::Source => to_source(&stmts),
    })
}

fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value).context("Failed to serialize syntax tree")?;
    json.push('\n');
    Ok(json)
}
