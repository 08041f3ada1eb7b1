use crate::error::SpiError;
use crate::evaluator::Evaluator;
use crate::lexer::Lexer;
use crate::parser::Parser;
use crate::scope::GlobalScope;
use tracing::debug;

/// Drives one run: parse the parser's input, then evaluate it against a
/// scope owned by this interpreter.
pub struct Interpreter {
    parser: Parser,
    evaluator: Evaluator,
}

impl Interpreter {
    pub fn new(parser: Parser) -> Self {
        Self {
            parser,
            evaluator: Evaluator::new(),
        }
    }

    pub fn from_source(source: &str) -> Result<Self, SpiError> {
        Ok(Self::new(Parser::new(Lexer::new(source))?))
    }

    /// Run the input as a `BEGIN ... END.` program.
    ///
    /// Assignments made before a failure stay visible through [`Interpreter::scope`].
    pub fn interpret(&mut self) -> Result<(), SpiError> {
        let program = self.parser.parse()?;
        self.evaluator.evaluate_program(&program)?;
        debug!(variables = self.evaluator.scope().len(), "program finished");
        Ok(())
    }

    /// Run the input as a bare arithmetic expression.
    pub fn evaluate_expression(&mut self) -> Result<String, SpiError> {
        let expr = self.parser.parse_expression()?;
        let value = self.evaluator.evaluate_expression(&expr)?;
        Ok(value.to_string())
    }

    pub fn scope(&self) -> &GlobalScope {
        self.evaluator.scope()
    }

    pub fn into_scope(self) -> GlobalScope {
        self.evaluator.into_scope()
    }
}

/// Interpret a program and return its final scope.
pub fn interpret(source: &str) -> Result<GlobalScope, SpiError> {
    let mut interpreter = Interpreter::from_source(source)?;
    interpreter.interpret()?;
    Ok(interpreter.into_scope())
}

/// Evaluate an arithmetic expression to its decimal representation.
pub fn evaluate(source: &str) -> Result<String, SpiError> {
    Interpreter::from_source(source)?.evaluate_expression()
}
