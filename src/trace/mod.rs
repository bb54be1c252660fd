//! Token history for stepping through a lexed source file

use crate::parser::lexer::Lexer;
use crate::parser::token::{Token, TokenKind};
use rustc_hash::FxHashMap;
use std::fmt;

/// Reason a cursor move was refused
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceError {
    AtStart,
    AtEnd,
}

impl fmt::Display for TraceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraceError::AtStart => write!(f, "already at the first token"),
            TraceError::AtEnd => write!(f, "already at the end of input"),
        }
    }
}

impl std::error::Error for TraceError {}

/// Every token of a source file, in order, with a cursor over them.
///
/// The last entry is always the end-of-input token, so the trace is never
/// empty once built from source.
#[derive(Debug, Clone)]
pub struct TokenTrace {
    tokens: Vec<Token>,
    position: usize,
    counts: FxHashMap<TokenKind, usize>,
}

impl TokenTrace {
    pub fn new(source: &str) -> Self {
        let tokens = Lexer::new(source).tokenize();

        let mut counts = FxHashMap::default();
        for token in &tokens {
            *counts.entry(token.kind).or_insert(0) += 1;
        }

        TokenTrace {
            tokens,
            position: 0,
            counts,
        }
    }

    /// Get a token by index
    pub fn get(&self, index: usize) -> Option<&Token> {
        self.tokens.get(index)
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Get the number of tokens, end-of-input included
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.position)
    }

    pub fn step_forward(&mut self) -> Result<(), TraceError> {
        if self.position + 1 >= self.tokens.len() {
            return Err(TraceError::AtEnd);
        }
        self.position += 1;
        Ok(())
    }

    pub fn step_backward(&mut self) -> Result<(), TraceError> {
        if self.position == 0 {
            return Err(TraceError::AtStart);
        }
        self.position -= 1;
        Ok(())
    }

    pub fn rewind_to_start(&mut self) {
        self.position = 0;
    }

    pub fn jump_to_end(&mut self) {
        self.position = self.tokens.len().saturating_sub(1);
    }

    /// How many tokens of `kind` the source produced
    pub fn count(&self, kind: TokenKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    pub fn illegal_count(&self) -> usize {
        self.count(TokenKind::Illegal)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trace_ends_with_end_of_input() {
        let trace = TokenTrace::new("let x = 5;");

        assert_eq!(trace.len(), 6);
        assert!(trace.get(5).is_some_and(|t| t.is(TokenKind::EndOfInput)));
        assert_eq!(trace.count(TokenKind::Let), 1);
        assert_eq!(trace.count(TokenKind::Comma), 0);
    }

    #[test]
    fn test_stepping_is_bounded() {
        let mut trace = TokenTrace::new("a b");

        assert_eq!(trace.step_backward(), Err(TraceError::AtStart));
        assert_eq!(trace.step_forward(), Ok(()));
        assert_eq!(trace.step_forward(), Ok(()));
        assert!(trace.current().is_some_and(|t| t.is(TokenKind::EndOfInput)));
        assert_eq!(trace.step_forward(), Err(TraceError::AtEnd));
        assert_eq!(trace.position(), 2);
    }

    #[test]
    fn test_jump_and_rewind() {
        let mut trace = TokenTrace::new("fn(x) { x }");

        trace.jump_to_end();
        assert_eq!(trace.position(), trace.len() - 1);
        trace.rewind_to_start();
        assert_eq!(trace.position(), 0);
        assert!(trace.current().is_some_and(|t| t.is(TokenKind::Function)));
    }

    #[test]
    fn test_illegal_tally() {
        let trace = TokenTrace::new("a # b $");

        assert_eq!(trace.illegal_count(), 2);
        assert_eq!(trace.count(TokenKind::Identifier), 2);
    }

    #[test]
    fn test_empty_source_has_single_token() {
        let trace = TokenTrace::new("");

        assert_eq!(trace.len(), 1);
        assert!(!trace.is_empty());
    }
}
