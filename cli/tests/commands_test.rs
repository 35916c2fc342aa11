use std::io::Write;

use moo_cli::commands::parse::{render_file, OutputFormat};
use moo_cli::commands::tokens::render_tokens;
use moo_parser::ParserOptions;
use tempfile::NamedTempFile;

fn write_temp_source(content: &str) -> NamedTempFile {
    let mut f = NamedTempFile::with_suffix(".moo").unwrap();
    f.write_all(content.as_bytes()).unwrap();
    f.flush().unwrap();
    f
}

fn render(src: &NamedTempFile, expr: bool, format: OutputFormat) -> anyhow::Result<String> {
    render_file(
        src.path().to_str().unwrap(),
        expr,
        format,
        ParserOptions::default(),
    )
}

// ======================================================================
// parse
// ======================================================================

#[test]
fn parse_program_as_tree() {
    let src = write_temp_source("x = 1;\nreturn x;\n");
    let out = render(&src, false, OutputFormat::Tree).unwrap();
    assert_eq!(
        out,
        "Expr(Binary(Identifier(x), ASSIGN, Literal(1)))\nReturn(Identifier(x))\n"
    );
}

#[test]
fn parse_expression_as_tree() {
    let src = write_temp_source("foo[0..5][bar]\n");
    let out = render(&src, true, OutputFormat::Tree).unwrap();
    assert_eq!(
        out,
        "Index(Slice(Identifier(foo), Literal(0), Literal(5)), Identifier(bar))\n"
    );
}

#[test]
fn parse_program_as_source() {
    let src = write_temp_source("for i in [1..3] if(i)player:tell(i);endif endfor");
    let out = render(&src, false, OutputFormat::Source).unwrap();
    assert_eq!(
        out,
        "for i in [1..3]\n    if (i)\n        player:tell(i);\n    endif\nendfor\n"
    );
}

#[test]
fn parse_program_as_json() {
    let src = write_temp_source("return #5;");
    let out = render(&src, false, OutputFormat::Json).unwrap();
    let value: serde_json::Value = serde_json::from_str(&out).unwrap();
    let ret = &value[0]["Return"];
    assert_eq!(ret["offset"], 0);
    assert_eq!(ret["value"]["Literal"]["kind"], "ObjectRef");
    assert_eq!(ret["value"]["Literal"]["raw"], "#5");
}

#[test]
fn parse_error_carries_location() {
    let src = write_temp_source("foo = ");
    let err = render(&src, false, OutputFormat::Tree).unwrap_err();
    let msg = format!("{err:#}");
    assert!(msg.contains("Parse error in"), "got: {msg}");
    assert!(
        msg.contains("expected expression, found end of input"),
        "got: {msg}"
    );
}

#[test]
fn parse_respects_depth_limit() {
    let src = write_temp_source("((((x))))");
    let options = ParserOptions {
        max_depth: 2,
        ..ParserOptions::default()
    };
    let err = render_file(src.path().to_str().unwrap(), true, OutputFormat::Tree, options)
        .unwrap_err();
    assert!(format!("{err:#}").contains("nesting deeper than 2 levels"));
}

#[test]
fn parse_nonexistent_file_returns_error() {
    let result = render_file(
        "/tmp/nonexistent_moo_parser_test.moo",
        false,
        OutputFormat::Tree,
        ParserOptions::default(),
    );
    let err = result.unwrap_err();
    assert!(format!("{err}").contains("Failed to read"));
}

// ======================================================================
// tokens
// ======================================================================

#[test]
fn tokens_dump_one_line_each() {
    let src = write_temp_source("foo * 123.45");
    let out = render_tokens(src.path().to_str().unwrap()).unwrap();
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(
        lines,
        vec![
            "    0 Identifier       foo",
            "    4 Star             *",
            "    6 FloatLiteral     123.45",
            "   12 EndOfInput",
        ]
    );
}

#[test]
fn tokens_dump_keeps_illegal_bytes() {
    let src = write_temp_source("a $ b");
    let out = render_tokens(src.path().to_str().unwrap()).unwrap();
    assert!(out.contains("    2 Illegal          $"), "got: {out}");
}
