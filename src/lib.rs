// SPI Interpreter Library
//
// Tokenizer, recursive-descent parser and tree-walking evaluator for a small
// Pascal-like language of BEGIN ... END blocks, assignments and integer
// arithmetic.

// Public modules
pub mod ast;
pub mod error;
pub mod evaluator;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod repl;
pub mod runner;
pub mod scope;

// Re-export commonly used items
pub use ast::{BinaryOp, Block, Expr, Program, Stmt, UnaryOp};
pub use error::{ErrorKind, Span, SpiError};
pub use evaluator::Evaluator;
pub use interpreter::{evaluate, interpret, Interpreter};
pub use lexer::{Lexer, Token, TokenKind, TokenType};
pub use parser::Parser;
pub use scope::GlobalScope;

// Re-export main functions
pub use repl::start as start_repl;
pub use runner::{run, Mode, RunOptions};
