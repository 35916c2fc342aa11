/// Minimal stderr backend for the `log` facade.
///
/// Rule-trace records from the parser are printed bare so the indentation
/// lines up; everything else gets a level and target prefix.
use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        if record.target() == "moo_parser::trace" {
            eprintln!("{}", record.args());
        } else {
            eprintln!("[{}] {}: {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Install the stderr logger. Later calls only adjust the level.
pub fn init(level: LevelFilter) {
    // set_logger fails when a logger is already installed; keep that one.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
