use clap::{Parser, Subcommand};
use moo_parser::DEFAULT_MAX_DEPTH;

#[derive(Parser)]
#[command(name = "moo")]
#[command(about = "MOO parser CLI", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Parse a source file and print the syntax tree
    Parse {
        /// Path to the source file
        path: String,
        /// Parse the file as a single expression instead of a program
        #[arg(long)]
        expr: bool,
        /// Print the tree as JSON
        #[arg(long, conflicts_with = "source")]
        json: bool,
        /// Print canonical source instead of the tree
        #[arg(long)]
        source: bool,
        /// Log every grammar rule to stderr
        #[arg(long)]
        trace: bool,
        /// Deepest allowed nesting before the parse is rejected
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
    /// Print one line per token: offset, kind, lexeme
    Tokens {
        /// Path to the source file
        path: String,
    },
}
