//! Command-line driver: lexes a file, prints its tokens, parses them and
//! prints whatever is left over plus the document tree.
//!
//! Run it with: `cargo run -- path/to/file.json`

use clap::Parser as _;
use jsontree::{Parser, Tokenizer, DEFAULT_MAX_DEPTH, DEFAULT_MAX_LINE_LEN};
use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(clap::Parser, Debug)]
#[command(name = "jsontree", version, about = "Dump the tokens and syntax tree of a JSON file")]
struct Cli {
    /// The JSON file to read.
    input: Option<PathBuf>,

    /// Longest accepted input line in bytes, line terminator included.
    #[arg(long, default_value_t = DEFAULT_MAX_LINE_LEN)]
    max_line_len: usize,

    /// Deepest accepted nesting of arrays and objects.
    #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    match run(&cli) {
        Ok(code) => code,
        Err(e) => {
            log::error!("could not write output: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> io::Result<ExitCode> {
    let path = match &cli.input {
        Some(path) => path,
        None => {
            println!("Usage: {} input_json", env!("CARGO_PKG_NAME"));
            return Ok(ExitCode::SUCCESS);
        }
    };

    let file = match File::open(path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("Could not open file {}", path.display());
            log::debug!("open {}: {}", path.display(), e);
            return Ok(ExitCode::FAILURE);
        }
    };

    let stream = match Tokenizer::new(BufReader::new(file))
        .with_max_line_len(cli.max_line_len)
        .tokenize()
    {
        Ok(stream) => stream,
        Err(e) => {
            // No tokens, so no tree either.
            eprintln!("{}", e);
            return Ok(ExitCode::SUCCESS);
        }
    };

    let mut out = BufWriter::new(io::stdout().lock());
    write!(out, "{}", stream)?;

    let parser = Parser::new().with_max_depth(cli.max_depth);
    let start = stream.cursor();
    match parser.parse(start) {
        Some(parsed) => {
            if let Some(rest) = parsed.remainder() {
                write!(out, "{}", rest)?;
            }
            write!(out, "{}", parsed.node)?;
        }
        None => {
            // Nothing was consumed, so everything is left over.
            write!(out, "{}", start)?;
        }
    }
    out.flush()?;

    Ok(ExitCode::SUCCESS)
}
