//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and core parsing infrastructure,
//! including error types, token cursor helpers, and the main parse entry point.
//!
//! # Parser Architecture
//!
//! The Parser pulls tokens from a [`Lexer`] on demand and keeps exactly two of
//! them: `current` and `peek`. Parsing is split across files using
//! `impl Parser` blocks:
//! - This module: Parser struct, cursor helpers, error recording and recovery
//! - `statements`: statement dispatch, `let`, `return`, blocks
//! - `expressions`: Pratt expression engine with prefix/infix rule tables
//!
//! # Error Policy
//!
//! Individual parse functions return `Result<_, ParseError>` and bail out with
//! `?`. The statement loops catch those errors, record them, skip ahead to the
//! next statement boundary and keep going, so [`Parser::parse_program`] always
//! returns a [`Program`] and [`Parser::errors`] lists everything that went wrong.

use crate::parser::ast::*;
use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};
use std::fmt;

/// Deepest expression or block nesting accepted before parsing gives up
pub const MAX_NESTING_DEPTH: usize = 128;

/// What went wrong during parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// A specific token kind was required but another one was found
    UnexpectedToken {
        expected: TokenKind,
        found: TokenKind,
    },
    /// The token cannot start an expression
    NoPrefixParseFn(TokenKind),
    /// Integer literal text that does not fit in an `i64`
    InvalidInteger(String),
    /// A `{` body ran into the end of input
    UnterminatedBlock,
    /// Expressions or blocks nested past [`MAX_NESTING_DEPTH`]
    NestingTooDeep,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseErrorKind::UnexpectedToken { expected, found } => {
                write!(f, "expected {}, found {}", expected, found)
            }
            ParseErrorKind::NoPrefixParseFn(kind) => {
                write!(f, "no prefix parse function for {}", kind)
            }
            ParseErrorKind::InvalidInteger(text) => {
                write!(f, "could not parse \"{}\" as integer", text)
            }
            ParseErrorKind::UnterminatedBlock => {
                write!(f, "expected '}}' to close block, found end of input")
            }
            ParseErrorKind::NestingTooDeep => {
                write!(f, "nesting deeper than {} levels", MAX_NESTING_DEPTH)
            }
        }
    }
}

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub location: SourceLocation,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, location: SourceLocation) -> Self {
        Self { kind, location }
    }

    /// The message without the location prefix
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Parse error at line {}, column {}: {}",
            self.location.line, self.location.column, self.kind
        )
    }
}

impl std::error::Error for ParseError {}

/// Recursive descent parser with a Pratt expression engine
pub struct Parser {
    lexer: Lexer,
    pub(crate) current: Token,
    pub(crate) peek: Token,
    errors: Vec<ParseError>,
    depth: usize,
}

impl Parser {
    pub fn new(mut lexer: Lexer) -> Self {
        let current = lexer.next_token();
        let peek = lexer.next_token();
        Self {
            lexer,
            current,
            peek,
            errors: Vec::new(),
            depth: 0,
        }
    }

    pub fn from_source(source: &str) -> Self {
        Self::new(Lexer::new(source))
    }

    /// Parse the entire program. Always returns a tree; check
    /// [`Parser::errors`] before trusting it.
    pub fn parse_program(&mut self) -> Program {
        let mut program = Program::new();

        while !self.current_is(TokenKind::EndOfInput) {
            if let Some(stmt) = self.parse_statement_recovering() {
                program.statements.push(stmt);
            }
        }

        program
    }

    /// Errors recorded so far, in source order of discovery
    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    pub fn into_errors(self) -> Vec<ParseError> {
        self.errors
    }

    /// Parse one statement and step past it. On failure the error is
    /// recorded and the cursor is moved to the next statement boundary.
    pub(crate) fn parse_statement_recovering(&mut self) -> Option<Statement> {
        match self.parse_statement() {
            Ok(stmt) => {
                self.advance();
                Some(stmt)
            }
            Err(err) => {
                self.errors.push(err);
                self.synchronize();
                None
            }
        }
    }

    /// Skip at least one token, then stop after a `;` or in front of a
    /// `let`, `return`, `}` or the end of input.
    fn synchronize(&mut self) {
        self.advance();

        loop {
            match self.current.kind {
                TokenKind::Semicolon => {
                    self.advance();
                    return;
                }
                TokenKind::Let | TokenKind::Return | TokenKind::RBrace | TokenKind::EndOfInput => {
                    return;
                }
                _ => self.advance(),
            }
        }
    }

    // ===== Helper methods =====

    /// Run `parse` one nesting level deeper, failing once the limit is reached
    pub(crate) fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::new(
                ParseErrorKind::NestingTooDeep,
                self.current.location,
            ));
        }

        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Shift `peek` into `current` and pull a fresh `peek` from the lexer
    pub(crate) fn advance(&mut self) {
        let next = self.lexer.next_token();
        self.current = std::mem::replace(&mut self.peek, next);
    }

    pub(crate) fn current_is(&self, kind: TokenKind) -> bool {
        self.current.is(kind)
    }

    pub(crate) fn peek_is(&self, kind: TokenKind) -> bool {
        self.peek.is(kind)
    }

    /// Advance if `peek` has the expected kind, otherwise fail without moving
    pub(crate) fn expect_peek(&mut self, kind: TokenKind) -> Result<(), ParseError> {
        if self.peek_is(kind) {
            self.advance();
            Ok(())
        } else {
            Err(self.unexpected_peek(kind))
        }
    }

    /// Consume a trailing `;` if there is one
    pub(crate) fn skip_optional_semicolon(&mut self) {
        if self.peek_is(TokenKind::Semicolon) {
            self.advance();
        }
    }

    fn unexpected_peek(&self, expected: TokenKind) -> ParseError {
        ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected,
                found: self.peek.kind,
            },
            self.peek.location,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_let_statements() {
        let mut parser = Parser::from_source("let x=5\nlet y = 10\nlet foobar = 838383");
        let program = parser.parse_program();

        assert!(parser.errors().is_empty(), "errors: {:?}", parser.errors());
        assert_eq!(program.statements.len(), 3);

        let names: Vec<&str> = program
            .statements
            .iter()
            .map(|stmt| match stmt {
                Statement::Let(let_stmt) => let_stmt.name.value.as_str(),
                other => panic!("Expected let statement, got {:?}", other),
            })
            .collect();
        assert_eq!(names, vec!["x", "y", "foobar"]);
    }

    #[test]
    fn test_missing_assign_is_recorded() {
        let mut parser = Parser::from_source("let x 5;");
        let program = parser.parse_program();

        assert_eq!(parser.errors().len(), 1);
        assert_eq!(
            parser.errors()[0].kind,
            ParseErrorKind::UnexpectedToken {
                expected: TokenKind::Assign,
                found: TokenKind::Integer,
            }
        );
        assert_eq!(parser.errors()[0].location, SourceLocation::new(1, 7));
        assert!(program.statements.is_empty());
    }

    #[test]
    fn test_recovery_continues_after_error() {
        let mut parser = Parser::from_source("let = 1; let y = 2;");
        let program = parser.parse_program();

        assert_eq!(parser.errors().len(), 1);
        assert_eq!(program.to_string(), "let y=2");
    }

    #[test]
    fn test_error_display() {
        let err = ParseError::new(
            ParseErrorKind::UnexpectedToken {
                expected: TokenKind::Identifier,
                found: TokenKind::Assign,
            },
            SourceLocation::new(3, 5),
        );

        assert_eq!(err.message(), "expected identifier, found '='");
        assert_eq!(
            err.to_string(),
            "Parse error at line 3, column 5: expected identifier, found '='"
        );
    }

    #[test]
    fn test_nesting_limit() {
        let within = format!("{}a{}", "(".repeat(100), ")".repeat(100));
        let mut parser = Parser::from_source(&within);
        assert_eq!(parser.parse_program().to_string(), "a");
        assert!(parser.errors().is_empty());

        let beyond = format!(
            "{}a{};\nlet y = 1;",
            "(".repeat(MAX_NESTING_DEPTH),
            ")".repeat(MAX_NESTING_DEPTH)
        );
        let mut parser = Parser::from_source(&beyond);
        let program = parser.parse_program();

        assert_eq!(parser.errors().len(), 1);
        assert_eq!(parser.errors()[0].kind, ParseErrorKind::NestingTooDeep);
        assert_eq!(
            parser.errors()[0].location,
            SourceLocation::new(1, MAX_NESTING_DEPTH + 1)
        );
        assert_eq!(program.to_string(), "let y=1");
        assert_eq!(parser.depth, 0);
    }

    #[test]
    fn test_empty_source() {
        let mut parser = Parser::from_source("   \n\t");
        let program = parser.parse_program();

        assert!(program.statements.is_empty());
        assert!(parser.errors().is_empty());
    }
}
