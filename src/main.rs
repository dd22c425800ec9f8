use std::{fs::read_to_string, path::PathBuf, process, sync::Arc, time::Instant};

use clap::Parser;
use tinyts::{
    ast::types::Type,
    errors::errors::Error,
    format_error,
    lexer::lexer::tokenize,
    parser::parser::parse,
    type_checker::{
        environment::Environment,
        type_checker::{CheckerOptions, TypeChecker, Variant},
    },
};

#[derive(Parser)]
#[command(name = "tinyts")]
#[command(version = "0.1.0")]
#[command(about = "Type checker for a tiny TypeScript subset", long_about = None)]
struct Cli {
    /// Source file to check
    #[arg(value_name = "FILE")]
    file: PathBuf,

    /// Checker to run (arith, basic, obj, recfunc, rec or sub)
    #[arg(short, long, default_value = "sub")]
    variant: Variant,

    /// Do not require conditions to be booleans
    #[arg(long)]
    unchecked_conditions: bool,

    /// Let function parameters leak into the enclosing scope
    #[arg(long)]
    leaky_environments: bool,

    /// Print how long each phase took
    #[arg(long)]
    timings: bool,
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let file_name = cli
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| cli.file.to_string_lossy().into_owned());

    let source = match read_to_string(&cli.file) {
        Ok(source) => source,
        Err(error) => {
            eprintln!("Failed to read {}: {}", cli.file.display(), error);
            process::exit(1);
        }
    };

    let options = CheckerOptions {
        check_conditions: !cli.unchecked_conditions,
        copy_environments: !cli.leaky_environments,
    };

    match run(&cli, &source, &file_name, options) {
        Ok(ty) => println!("{}", ty),
        Err(error) => {
            eprintln!("{}", format_error(&error, &source, &cli.file.to_string_lossy()));
            process::exit(1);
        }
    }
}

fn run(cli: &Cli, source: &str, file_name: &str, options: CheckerOptions) -> Result<Type, Error> {
    let start = Instant::now();

    let tokens = tokenize(source, Some(String::from(file_name)))?;
    if cli.timings {
        println!("Tokenized in {:?}", start.elapsed());
    }

    let parse_start = Instant::now();
    let term = parse(tokens, Arc::new(String::from(file_name)))?;
    if cli.timings {
        println!("Parsed in {:?}", parse_start.elapsed());
    }

    let type_check_start = Instant::now();
    let ty = TypeChecker::new(cli.variant)
        .with_options(options)
        .check(&term, &Environment::new());
    if cli.timings {
        println!("Type checked in {:?}", type_check_start.elapsed());
    }

    ty
}
