use crate::ast::{BinaryOp, Block, Expr, Program, Stmt, UnaryOp};
use crate::error::{Span, SpiError};
use crate::lexer::{Lexer, Token, TokenKind, TokenType};
use tracing::debug;

/// Recursive-descent parser with one token of lookahead.
///
/// ```text
/// program            : compound_statement DOT
/// compound_statement : BEGIN statement_list END
/// statement_list     : statement (SEMI statement)*
/// statement          : compound_statement | assignment_statement | empty
/// assignment         : variable ASSIGN expr
/// expr               : term ((PLUS | MINUS) term)*
/// term               : factor ((MUL | DIV) factor)*
/// factor             : (PLUS | MINUS) factor | INTEGER | LPAREN expr RPAREN | variable
/// variable           : ID
/// ```
pub struct Parser {
    lexer: Lexer,
    current: Token,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Result<Self, SpiError> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse a complete program and require nothing to follow its `.`.
    pub fn parse(&mut self) -> Result<Program, SpiError> {
        let program = self.program()?;
        self.expect_end_of_input()?;
        debug!(
            statements = program.block.statements.len(),
            "parsed program"
        );
        Ok(program)
    }

    /// Parse a bare arithmetic expression spanning the whole input.
    pub fn parse_expression(&mut self) -> Result<Expr, SpiError> {
        let expr = self.expr()?;
        self.expect_end_of_input()?;
        debug!("parsed expression");
        Ok(expr)
    }

    /// Consume the lookahead if it is of the `expected` type.
    pub fn eat(&mut self, expected: TokenType) -> Result<Token, SpiError> {
        if self.check(expected) {
            self.advance()
        } else {
            Err(self.unexpected(expected, None))
        }
    }

    fn program(&mut self) -> Result<Program, SpiError> {
        let block = self.compound_statement()?;
        let dot = self.eat_with_help(
            TokenType::Dot,
            "A program ends with '.' after its outermost END.",
        )?;
        Ok(Program {
            span: block.span.to(&dot.span),
            block,
        })
    }

    fn compound_statement(&mut self) -> Result<Block, SpiError> {
        let begin = self.eat(TokenType::Begin)?;
        let statements = self.statement_list()?;
        let end = self.eat_with_help(
            TokenType::End,
            "Every BEGIN must be closed by a matching END.",
        )?;
        Ok(Block {
            statements,
            span: begin.span.to(&end.span),
        })
    }

    fn statement_list(&mut self) -> Result<Vec<Stmt>, SpiError> {
        let mut statements = vec![self.statement()?];

        while self.check(TokenType::Semicolon) {
            self.advance()?;
            statements.push(self.statement()?);
        }

        if self.check(TokenType::Identifier) {
            return Err(SpiError::parse_error_with_help(
                self.current.span.clone(),
                format!("Expected ';' before '{}'", self.current.lexeme()),
                "Statements inside BEGIN ... END are separated by ';'.".to_string(),
            ));
        }

        Ok(statements)
    }

    fn statement(&mut self) -> Result<Stmt, SpiError> {
        match self.current.token_type() {
            TokenType::Begin => Ok(Stmt::Compound(self.compound_statement()?)),
            TokenType::Identifier => self.assignment_statement(),
            _ => Ok(self.empty()),
        }
    }

    fn assignment_statement(&mut self) -> Result<Stmt, SpiError> {
        let (name, name_span) = self.variable()?;
        self.eat_with_help(
            TokenType::Assign,
            "Assignments are written 'name := expression'.",
        )?;
        let value = self.expr()?;
        let span = name_span.to(value.span());

        Ok(Stmt::Assign { name, value, span })
    }

    fn variable(&mut self) -> Result<(String, Span), SpiError> {
        match &self.current.kind {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                let token = self.advance()?;
                Ok((name, token.span))
            }
            _ => Err(self.unexpected(TokenType::Identifier, None)),
        }
    }

    fn empty(&self) -> Stmt {
        Stmt::NoOp {
            span: Span::new(self.current.span.start, self.current.span.start),
        }
    }

    fn expr(&mut self) -> Result<Expr, SpiError> {
        let mut node = self.term()?;

        loop {
            let operator = match self.current.token_type() {
                TokenType::Plus => BinaryOp::Add,
                TokenType::Minus => BinaryOp::Subtract,
                _ => break,
            };
            self.advance()?;
            let right = self.term()?;
            node = Self::binary(node, operator, right);
        }

        Ok(node)
    }

    fn term(&mut self) -> Result<Expr, SpiError> {
        let mut node = self.factor()?;

        loop {
            let operator = match self.current.token_type() {
                TokenType::Star => BinaryOp::Multiply,
                TokenType::Slash => BinaryOp::Divide,
                _ => break,
            };
            self.advance()?;
            let right = self.factor()?;
            node = Self::binary(node, operator, right);
        }

        Ok(node)
    }

    fn factor(&mut self) -> Result<Expr, SpiError> {
        let start = self.current.span.clone();

        match self.current.kind {
            TokenKind::Plus | TokenKind::Minus => {
                let operator = if self.check(TokenType::Plus) {
                    UnaryOp::Plus
                } else {
                    UnaryOp::Negate
                };
                self.advance()?;
                let operand = self.factor()?;
                let span = start.to(operand.span());

                Ok(Expr::Unary {
                    operator,
                    operand: Box::new(operand),
                    span,
                })
            }
            TokenKind::Integer(value) => {
                self.advance()?;
                Ok(Expr::Number { value, span: start })
            }
            TokenKind::LeftParen => {
                self.advance()?;
                let expr = self.expr()?;
                self.eat_with_help(
                    TokenType::RightParen,
                    "Every opening parenthesis '(' must have a matching closing parenthesis ')'.",
                )?;
                Ok(expr)
            }
            TokenKind::Identifier(_) => {
                let (name, span) = self.variable()?;
                Ok(Expr::Variable { name, span })
            }
            _ => {
                let help = match self.current.token_type() {
                    TokenType::RightParen => {
                        "Found ')' without matching '('. Check for unbalanced parentheses."
                    }
                    TokenType::Eof => "Reached end of input while expecting an expression.",
                    _ => "Expected an integer, variable, or parenthesized expression here.",
                };
                Err(SpiError::parse_error_with_help(
                    start,
                    format!("Expected expression, found {}", self.found()),
                    help.to_string(),
                ))
            }
        }
    }

    fn binary(left: Expr, operator: BinaryOp, right: Expr) -> Expr {
        let span = left.span().to(right.span());
        Expr::Binary {
            left: Box::new(left),
            operator,
            right: Box::new(right),
            span,
        }
    }

    fn expect_end_of_input(&self) -> Result<(), SpiError> {
        if self.check(TokenType::Eof) {
            Ok(())
        } else {
            Err(SpiError::parse_error_with_help(
                self.current.span.clone(),
                format!("Unexpected {} after end of input", self.found()),
                "Nothing may follow the end of the program.".to_string(),
            ))
        }
    }

    fn check(&self, token_type: TokenType) -> bool {
        self.current.is(token_type)
    }

    /// Move the lookahead forward, returning the token it held.
    fn advance(&mut self) -> Result<Token, SpiError> {
        let next = self.lexer.next_token()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn eat_with_help(&mut self, expected: TokenType, help: &str) -> Result<Token, SpiError> {
        if self.check(expected) {
            self.advance()
        } else {
            Err(self.unexpected(expected, Some(help)))
        }
    }

    fn unexpected(&self, expected: TokenType, help: Option<&str>) -> SpiError {
        let message = format!("Expected {}, found {}", expected.describe(), self.found());
        match help {
            Some(help) => {
                SpiError::parse_error_with_help(self.current.span.clone(), message, help.to_string())
            }
            None => SpiError::parse_error(self.current.span.clone(), message),
        }
    }

    fn found(&self) -> String {
        match self.current.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", self.current.lexeme()),
        }
    }
}
