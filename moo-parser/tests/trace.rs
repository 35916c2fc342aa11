//! Trace mode logs every grammar rule through the `log` facade and must not
//! change what the parser returns.

use std::sync::Mutex;

use log::{Level, LevelFilter, Log, Metadata, Record};
use moo_parser::{parse_program, Parser, ParserOptions};

struct Capture {
    lines: Mutex<Vec<String>>,
}

impl Log for Capture {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Trace
    }

    fn log(&self, record: &Record) {
        if record.target() == "moo_parser::trace" {
            if let Ok(mut lines) = self.lines.lock() {
                lines.push(record.args().to_string());
            }
        }
    }

    fn flush(&self) {}
}

static CAPTURE: Capture = Capture {
    lines: Mutex::new(Vec::new()),
};

fn traced(options: ParserOptions) -> ParserOptions {
    ParserOptions {
        trace: true,
        ..options
    }
}

#[test]
fn test_trace_mode() {
    log::set_logger(&CAPTURE).unwrap();
    log::set_max_level(LevelFilter::Trace);

    let src = "if (a = 1) x:y(2); else return [1..3]; endif";

    // Quiet parse first: nothing is logged.
    let quiet = parse_program(src).unwrap();
    assert!(CAPTURE.lines.lock().unwrap().is_empty());

    let loud = Parser::with_options(src.as_bytes(), traced(ParserOptions::default()))
        .parse_program()
        .unwrap();
    assert_eq!(quiet, loud);

    let lines = CAPTURE.lines.lock().unwrap().clone();
    assert_eq!(lines.first().map(String::as_str), Some("    0: Program ("));
    assert_eq!(lines.last().map(String::as_str), Some("   44: )"));
    assert!(lines.iter().any(|l| l.contains(". VerbCall (")));

    let opens = lines.iter().filter(|l| l.ends_with(" (")).count();
    let closes = lines.iter().filter(|l| l.ends_with(')')).count();
    assert_eq!(opens, closes);

    // Errors are unchanged as well.
    let bad = "if a x; endfor";
    let quiet = parse_program(bad).unwrap_err();
    let loud = Parser::with_options(bad.as_bytes(), traced(ParserOptions::default()))
        .parse_program()
        .unwrap_err();
    assert_eq!(quiet, loud);
}
