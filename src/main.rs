use std::{
    fs::read_to_string,
    io::{self, Read},
    path::PathBuf,
    process::ExitCode,
    time::Instant,
};

use clap::Parser;
use jlc::{
    display_error,
    errors::errors::Error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::type_checker::type_check,
};

#[derive(Parser)]
#[command(name = "jlc")]
#[command(version)]
#[command(about = "Javalette front end: parses and type checks one compilation unit", long_about = None)]
struct Cli {
    /// Source file, standard input when omitted
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the generic syntax tree
    #[arg(long)]
    emit_tree: bool,

    /// Print the typed AST
    #[arg(long)]
    emit_ast: bool,

    /// Print the time spent in each phase
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let (file_name, source) = match read_source(&cli) {
        Ok(input) => input,
        Err(error) => {
            eprintln!("Failed to read input: {}", error);
            return ExitCode::FAILURE;
        }
    };

    match run(&cli, &source) {
        Ok(()) => {
            eprintln!("OK");
            ExitCode::SUCCESS
        }
        Err(error) => {
            report(&error, &source, &file_name);
            ExitCode::FAILURE
        }
    }
}

fn read_source(cli: &Cli) -> io::Result<(String, String)> {
    match &cli.input {
        Some(path) => Ok((path.to_string_lossy().to_string(), read_to_string(path)?)),
        None => {
            let mut source = String::new();
            io::stdin().read_to_string(&mut source)?;
            Ok((String::from("<stdin>"), source))
        }
    }
}

fn run(cli: &Cli, source: &str) -> Result<(), Error> {
    let start = Instant::now();
    let tokens = tokenize(source)?;
    if cli.verbose {
        eprintln!("Tokenized in {:?}", start.elapsed());
    }

    let parse_start = Instant::now();
    let tree = parse(tokens)?;
    if cli.verbose {
        eprintln!("Parsed in {:?}", parse_start.elapsed());
    }
    if cli.emit_tree {
        println!("{}", tree.root);
    }

    let type_check_start = Instant::now();
    let program = type_check(&tree)?;
    if cli.verbose {
        eprintln!("Type checked in {:?}", type_check_start.elapsed());
        eprintln!("Total time: {:?}", start.elapsed());
    }
    if cli.emit_ast {
        println!("{:#?}", program);
    }

    Ok(())
}

fn report(error: &Error, source: &str, file_name: &str) {
    if error.is_syntax_error() {
        eprintln!("Parsing failed");
    } else {
        eprintln!("Compilation failed: {}", error);
    }
    eprint!("{}", display_error(error, source, file_name));
}
