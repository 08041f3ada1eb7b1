use crate::error::{Span, SpiError};
use std::collections::HashMap;
use std::fmt;
use tracing::trace;

/// Payload-free tag of a token, used wherever the parser only cares which
/// kind of token sits in the lookahead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenType {
    Integer,
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Semicolon,
    Assign,
    Dot,
    Begin,
    End,
    Identifier,
    Eof,
}

impl TokenType {
    pub fn name(&self) -> &'static str {
        match self {
            TokenType::Integer => "INTEGER",
            TokenType::Plus => "PLUS",
            TokenType::Minus => "MINUS",
            TokenType::Star => "MUL",
            TokenType::Slash => "DIV",
            TokenType::LeftParen => "LPAREN",
            TokenType::RightParen => "RPAREN",
            TokenType::Semicolon => "SEMI",
            TokenType::Assign => "ASSIGN",
            TokenType::Dot => "DOT",
            TokenType::Begin => "BEGIN",
            TokenType::End => "END",
            TokenType::Identifier => "ID",
            TokenType::Eof => "EOF",
        }
    }

    /// How the token type reads in a diagnostic.
    pub fn describe(&self) -> &'static str {
        match self {
            TokenType::Integer => "integer",
            TokenType::Plus => "'+'",
            TokenType::Minus => "'-'",
            TokenType::Star => "'*'",
            TokenType::Slash => "'/'",
            TokenType::LeftParen => "'('",
            TokenType::RightParen => "')'",
            TokenType::Semicolon => "';'",
            TokenType::Assign => "':='",
            TokenType::Dot => "'.'",
            TokenType::Begin => "'BEGIN'",
            TokenType::End => "'END'",
            TokenType::Identifier => "identifier",
            TokenType::Eof => "end of input",
        }
    }
}

/// A token's kind together with the payload that kind determines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    Integer(i64),
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    Semicolon,
    Assign,
    Dot,
    Begin,
    End,
    Identifier(String),
    Eof,
}

impl TokenKind {
    pub fn token_type(&self) -> TokenType {
        match self {
            TokenKind::Integer(_) => TokenType::Integer,
            TokenKind::Plus => TokenType::Plus,
            TokenKind::Minus => TokenType::Minus,
            TokenKind::Star => TokenType::Star,
            TokenKind::Slash => TokenType::Slash,
            TokenKind::LeftParen => TokenType::LeftParen,
            TokenKind::RightParen => TokenType::RightParen,
            TokenKind::Semicolon => TokenType::Semicolon,
            TokenKind::Assign => TokenType::Assign,
            TokenKind::Dot => TokenType::Dot,
            TokenKind::Begin => TokenType::Begin,
            TokenKind::End => TokenType::End,
            TokenKind::Identifier(_) => TokenType::Identifier,
            TokenKind::Eof => TokenType::Eof,
        }
    }

    /// The source text of the token. Empty for `Eof`.
    pub fn lexeme(&self) -> String {
        match self {
            TokenKind::Integer(value) => value.to_string(),
            TokenKind::Identifier(name) => name.clone(),
            TokenKind::Plus => "+".to_string(),
            TokenKind::Minus => "-".to_string(),
            TokenKind::Star => "*".to_string(),
            TokenKind::Slash => "/".to_string(),
            TokenKind::LeftParen => "(".to_string(),
            TokenKind::RightParen => ")".to_string(),
            TokenKind::Semicolon => ";".to_string(),
            TokenKind::Assign => ":=".to_string(),
            TokenKind::Dot => ".".to_string(),
            TokenKind::Begin => "BEGIN".to_string(),
            TokenKind::End => "END".to_string(),
            TokenKind::Eof => String::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn token_type(&self) -> TokenType {
        self.kind.token_type()
    }

    pub fn is(&self, token_type: TokenType) -> bool {
        self.token_type() == token_type
    }

    pub fn lexeme(&self) -> String {
        self.kind.lexeme()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Token({}, {})", self.token_type().name(), self.lexeme())
    }
}

/// On-demand tokenizer. Each call to [`Lexer::next_token`] scans exactly one
/// token past any leading whitespace.
pub struct Lexer {
    source: Vec<char>,
    start: usize,
    current: usize,
    finished: bool,
    keywords: HashMap<&'static str, TokenKind>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        let mut keywords = HashMap::new();
        keywords.insert("BEGIN", TokenKind::Begin);
        keywords.insert("END", TokenKind::End);

        Self {
            source: source.chars().collect(),
            start: 0,
            current: 0,
            finished: false,
            keywords,
        }
    }

    pub fn next_token(&mut self) -> Result<Token, SpiError> {
        self.skip_whitespace();
        self.start = self.current;

        let Some(c) = self.advance() else {
            return Ok(Token::new(TokenKind::Eof, Span::single(self.current)));
        };

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            ':' if self.match_char('=') => TokenKind::Assign,
            c if c.is_ascii_digit() => self.integer()?,
            c if c.is_ascii_alphabetic() => self.identifier(),
            _ => {
                let help = if c == ':' {
                    "Assignment is written ':=' with no space between ':' and '='.".to_string()
                } else {
                    "Only integers, identifiers, + - * / ( ) ; . := and BEGIN/END are valid."
                        .to_string()
                };
                return Err(SpiError::lex_error_with_help(
                    Span::single(self.start),
                    format!("Unexpected character: '{}'", c),
                    help,
                ));
            }
        };

        let token = Token::new(kind, Span::new(self.start, self.current));
        trace!(token = %token, "scanned token");
        Ok(token)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.current += 1;
        }
    }

    fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.current += 1;
        Some(c)
    }

    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.current += 1;
            true
        } else {
            false
        }
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.current).copied()
    }

    fn integer(&mut self) -> Result<TokenKind, SpiError> {
        while self.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.current += 1;
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        text.parse::<i64>().map(TokenKind::Integer).map_err(|_| {
            SpiError::lex_error(
                Span::new(self.start, self.current),
                format!("Integer literal too large: {}", text),
            )
        })
    }

    fn identifier(&mut self) -> TokenKind {
        while self.peek().is_some_and(|c| c.is_ascii_alphanumeric()) {
            self.current += 1;
        }

        let text: String = self.source[self.start..self.current].iter().collect();
        match self.keywords.get(text.as_str()) {
            Some(keyword) => keyword.clone(),
            None => TokenKind::Identifier(text),
        }
    }
}

/// Yields tokens up to and including `Eof`, or up to the first error.
impl Iterator for Lexer {
    type Item = Result<Token, SpiError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        let result = self.next_token();
        if !matches!(result, Ok(ref token) if !token.is(TokenType::Eof)) {
            self.finished = true;
        }
        Some(result)
    }
}
