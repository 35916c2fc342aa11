use anyhow::Result;
use clap::Parser;
use log::LevelFilter;
use moo_parser::ParserOptions;

mod args;

use args::{Cli, Commands};
use moo_cli::commands::parse::OutputFormat;
use moo_cli::commands::{parse, tokens};
use moo_cli::logger;

fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Parse {
            path,
            expr,
            json,
            source,
            trace,
            max_depth,
        } => {
            logger::init(if *trace {
                LevelFilter::Trace
            } else {
                LevelFilter::Warn
            });
            let format = if *json {
                OutputFormat::Json
            } else if *source {
                OutputFormat::Source
            } else {
                OutputFormat::Tree
            };
            let options = ParserOptions {
                trace: *trace,
                max_depth: *max_depth,
            };
            parse::parse_file(path, *expr, format, options)
        }
        Commands::Tokens { path } => {
            logger::init(LevelFilter::Warn);
            tokens::dump_tokens(path)
        }
    }
}
