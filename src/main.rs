//! todolex CLI
//!
//! Command-line interface for the todo-entry scanner.

use std::env;
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::process;

use tracing::debug;
use todo_lexer::lexer::reader::decode_utf8;
use todo_lexer::lexer::Utf8Reader;
use todo_lexer::{check, Diagnostic, Scanner, TodoLexError, TodoLexResult, VERSION};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Tokens,
    Check,
}

fn main() {
    init_tracing();

    let args: Vec<String> = env::args().collect();

    let mut mode = Mode::Tokens;
    let mut filename: Option<&String> = None;

    for arg in &args[1..] {
        match arg.as_str() {
            "--tokens" | "-t" => mode = Mode::Tokens,
            "--check" | "-c" => mode = Mode::Check,
            "--help" | "-h" => {
                print_help();
                return;
            }
            "--version" | "-V" => {
                println!("todolex {}", VERSION);
                return;
            }
            "-" => filename = None,
            _ if arg.starts_with('-') => {
                eprintln!("Unknown flag: {}", arg);
                print_usage();
                process::exit(2);
            }
            _ => filename = Some(arg),
        }
    }

    let path = filename.map(String::as_str);
    let mut source: Option<String> = None;
    let result = open_input(path).and_then(|input| match mode {
        Mode::Tokens => {
            show_tokens(Scanner::new(input));
            Ok(())
        }
        Mode::Check => {
            let text = source.insert(read_source(input, path)?);
            let tokens = check(text, path)?;
            debug!(tokens = tokens.len(), "no unrecognized characters");
            Ok(())
        }
    });

    if let Err(e) = result {
        let diagnostic = match &source {
            Some(text) => Diagnostic::with_source(&e, text),
            None => Diagnostic::new(&e),
        };
        eprint!("{}", diagnostic);
        process::exit(1);
    }
}

/// Install a subscriber only when `RUST_LOG` is set
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn print_usage() {
    eprintln!("Usage: todolex [OPTIONS] [FILE]");
    eprintln!("       todolex --help");
}

fn print_help() {
    println!("todolex v{} - scanner for todo entries", VERSION);
    println!();
    println!("USAGE:");
    println!("    todolex [OPTIONS] [FILE]");
    println!();
    println!("Reads standard input when FILE is missing or '-'.");
    println!();
    println!("OPTIONS:");
    println!("    -t, --tokens    Print the token table (default)");
    println!("    -c, --check     Report the first unrecognized character");
    println!("    -V, --version   Print version");
    println!("    -h, --help      Show this help message");
    println!();
    println!("ENVIRONMENT:");
    println!("    RUST_LOG        Log filter, e.g. RUST_LOG=todo_lexer=trace");
}

fn open_input(filename: Option<&str>) -> TodoLexResult<Box<dyn Read>> {
    match filename {
        Some(path) => {
            let file = File::open(path).map_err(|e| TodoLexError::io(path, e))?;
            debug!(path, "scanning file");
            Ok(Box::new(file))
        }
        None => Ok(Box::new(io::stdin())),
    }
}

/// Read the whole input, decoding it exactly as the scanner would
fn read_source(mut input: Box<dyn Read>, filename: Option<&str>) -> TodoLexResult<String> {
    let mut bytes = Vec::new();
    input
        .read_to_end(&mut bytes)
        .map_err(|e| TodoLexError::io(filename.unwrap_or("<stdin>"), e))?;
    Ok(decode_utf8(&bytes))
}

/// Stream the token table as the scanner produces it
fn show_tokens<R: Read>(mut scanner: Scanner<Utf8Reader<BufReader<R>>>) {
    println!("{}", "=".repeat(60));

    let mut count = 0;
    for (i, token) in scanner.tokens().enumerate() {
        println!("{:4}: {:14} | {:?}", i, token.token_type.name(), token.lexeme);
        count += 1;
    }

    println!("{}", "=".repeat(60));
    println!("Total tokens: {}", count);
}
