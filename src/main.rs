use std::{fs, io, path::PathBuf};

use clap::Parser;
use geoscript::{Limits, run_program};

/// geoscript is a small statically typed scripting language with shapes and
/// a canvas as its builtin object types.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the script to run.
    file: PathBuf,

    /// Maximum identifier length, in characters.
    #[arg(long)]
    max_identifier_length: Option<usize>,

    /// Maximum string and comment length, in characters.
    #[arg(long)]
    max_string_length: Option<usize>,

    /// Maximum integer literal value.
    #[arg(long)]
    max_int: Option<i64>,

    /// Maximum function-call nesting depth.
    #[arg(long)]
    max_recursion_depth: Option<usize>,
}

fn main() {
    let args = Args::parse();

    let source = fs::read_to_string(&args.file).unwrap_or_else(|_| {
        eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                  args.file.display());
        std::process::exit(1);
    });

    let mut limits = Limits::default();
    if let Some(value) = args.max_identifier_length {
        limits.max_identifier_length = value;
    }
    if let Some(value) = args.max_string_length {
        limits.max_string_length = value;
    }
    if let Some(value) = args.max_int {
        limits.max_int = value;
    }
    if let Some(value) = args.max_recursion_depth {
        limits.max_recursion_depth = value;
    }

    let report = run_program(&source, &limits, io::stdout());

    for error in &report.lexical_errors {
        eprintln!("{error}");
    }
    for error in &report.syntax_errors {
        eprintln!("{error}");
    }
    if let Some(error) = &report.runtime_error {
        eprintln!("{error}");
    }
}
