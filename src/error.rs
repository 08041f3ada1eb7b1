use ariadne::{Color, Fmt, Label, Report, ReportKind, Source};
use std::fmt;
use thiserror::Error;

/// Character offsets into the source text, end exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn single(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos + 1,
        }
    }

    /// Smallest span covering both `self` and `other`.
    pub fn to(&self, other: &Span) -> Span {
        Span::new(self.start.min(other.start), self.end.max(other.end))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    LexicalError,
    ParseError,
    EvaluationError,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            ErrorKind::LexicalError => "Lexical Error",
            ErrorKind::ParseError => "Parse Error",
            ErrorKind::EvaluationError => "Evaluation Error",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Error)]
#[error("{kind}: {message}")]
pub struct SpiError {
    pub kind: ErrorKind,
    pub span: Span,
    pub message: String,
    pub help: Option<String>,
}

impl SpiError {
    pub fn new(kind: ErrorKind, span: Span, message: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: None,
        }
    }

    pub fn new_with_help(kind: ErrorKind, span: Span, message: String, help: String) -> Self {
        Self {
            kind,
            span,
            message,
            help: Some(help),
        }
    }

    pub fn lex_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::LexicalError, span, message)
    }

    pub fn lex_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::LexicalError, span, message, help)
    }

    pub fn parse_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::ParseError, span, message)
    }

    pub fn parse_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::ParseError, span, message, help)
    }

    pub fn eval_error(span: Span, message: String) -> Self {
        Self::new(ErrorKind::EvaluationError, span, message)
    }

    pub fn eval_error_with_help(span: Span, message: String, help: String) -> Self {
        Self::new_with_help(ErrorKind::EvaluationError, span, message, help)
    }

    pub fn is_lexical(&self) -> bool {
        self.kind == ErrorKind::LexicalError
    }

    pub fn is_parse(&self) -> bool {
        self.kind == ErrorKind::ParseError
    }

    pub fn is_evaluation(&self) -> bool {
        self.kind == ErrorKind::EvaluationError
    }

    /// Render the error against `source` on stderr.
    pub fn report(&self, source: &str, filename: Option<&str>) {
        let filename = filename.unwrap_or("<repl>");

        let color = match self.kind {
            ErrorKind::LexicalError => Color::Red,
            ErrorKind::ParseError => Color::Yellow,
            ErrorKind::EvaluationError => Color::Magenta,
        };

        let mut report_builder = Report::build(ReportKind::Error, filename, self.span.start)
            .with_message(format!("{}: {}", self.kind.fg(color), self.message))
            .with_label(
                Label::new((filename, self.span.start..self.span.end))
                    .with_message(&self.message)
                    .with_color(color),
            );

        if let Some(ref help_text) = self.help {
            report_builder =
                report_builder.with_note(format!("{}: {}", "help".fg(Color::Cyan), help_text));
        }

        if let Err(io_error) = report_builder
            .finish()
            .eprint((filename, Source::from(source)))
        {
            // Fall back to the plain message if the terminal rejects the report.
            eprintln!("{} ({})", self, io_error);
        }
    }
}
