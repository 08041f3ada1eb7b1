use clap::{Arg, ArgAction, Command};
use spi::{Mode, RunOptions};
use std::fs;
use std::path::Path;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let matches = Command::new("spi")
        .about("Interpreter for a small Pascal-like language of BEGIN ... END blocks")
        .version(env!("CARGO_PKG_VERSION"))
        .arg(
            Arg::new("file")
                .help("The program file to execute")
                .value_name("FILE")
                .index(1)
                .conflicts_with("expr"),
        )
        .arg(
            Arg::new("expr")
                .short('e')
                .long("expr")
                .help("Evaluate an arithmetic expression and print the result")
                .value_name("EXPR"),
        )
        .arg(
            Arg::new("interactive")
                .short('i')
                .long("interactive")
                .help("Start in interactive REPL mode")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("tokens")
                .long("tokens")
                .help("Print the token stream before running")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("ast")
                .long("ast")
                .help("Print the syntax tree before running")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Increase log verbosity (-v debug, -vv trace)")
                .action(ArgAction::Count),
        )
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let options = RunOptions {
        dump_tokens: matches.get_flag("tokens"),
        dump_ast: matches.get_flag("ast"),
    };

    let succeeded = if matches.get_flag("interactive") {
        spi::start_repl();
        true
    } else if let Some(expr) = matches.get_one::<String>("expr") {
        spi::run(expr, Some("<expr>"), Mode::Expression, options)
    } else if let Some(file_path) = matches.get_one::<String>("file") {
        run_file(file_path, options)
    } else {
        spi::start_repl();
        true
    };

    if succeeded {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run_file(path: &str, options: RunOptions) -> bool {
    let path = Path::new(path);

    if !path.exists() {
        eprintln!("Error: File '{}' not found", path.display());
        return false;
    }

    match fs::read_to_string(path) {
        Ok(source) => {
            let filename = path.display().to_string();
            spi::run(&source, Some(&filename), Mode::Program, options)
        }
        Err(e) => {
            eprintln!("Error reading file '{}': {}", path.display(), e);
            false
        }
    }
}
