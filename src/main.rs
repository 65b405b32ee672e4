use std::{fs, io};

use clap::Parser;
use flowlang::run_program;

/// flowlang is an interpreter for the flow scripting language, a small
/// C-like language with built-in CSV import and SQL generation.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells flowlang to look at a file instead of a script.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    let script = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    if let Err(e) = run_program(&script, Box::new(io::stdout())) {
        eprintln!("{e}");
        std::process::exit(1);
    }
}
