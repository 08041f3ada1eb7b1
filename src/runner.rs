use crate::error::SpiError;
use crate::interpreter::Interpreter;
use crate::lexer::Lexer;
use crate::parser::Parser;
use tracing::debug;

/// What the source text is expected to contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Program,
    Expression,
}

/// Diagnostic dumps printed before the run.
#[derive(Debug, Clone, Copy, Default)]
pub struct RunOptions {
    pub dump_tokens: bool,
    pub dump_ast: bool,
}

/// Run `source` to completion and print its result.
///
/// Errors are reported against the source; returns whether the run succeeded.
pub fn run(source: &str, filename: Option<&str>, mode: Mode, options: RunOptions) -> bool {
    debug!(?mode, file = filename.unwrap_or("<inline>"), "run started");

    match execute(source, mode, options) {
        Ok(()) => true,
        Err(error) => {
            error.report(source, filename);
            false
        }
    }
}

fn execute(source: &str, mode: Mode, options: RunOptions) -> Result<(), SpiError> {
    if options.dump_tokens {
        for token in Lexer::new(source) {
            println!("{}", token?);
        }
    }

    if options.dump_ast {
        let mut parser = Parser::new(Lexer::new(source))?;
        match mode {
            Mode::Program => println!("{:#?}", parser.parse()?),
            Mode::Expression => println!("{:#?}", parser.parse_expression()?),
        }
    }

    let mut interpreter = Interpreter::from_source(source)?;
    match mode {
        Mode::Program => {
            let result = interpreter.interpret();
            print_scope(&interpreter);
            result
        }
        Mode::Expression => {
            println!("{}", interpreter.evaluate_expression()?);
            Ok(())
        }
    }
}

/// Print `name = value` lines sorted by name. Partial scopes are printed too.
fn print_scope(interpreter: &Interpreter) {
    for (name, value) in interpreter.scope().to_sorted() {
        println!("{} = {}", name, value);
    }
}
