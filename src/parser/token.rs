//! Token vocabulary shared by the lexer and the parser
//!
//! A [`Token`] pairs a [`TokenKind`] with the literal text it was scanned
//! from and the [`SourceLocation`] of its first character. Reserved words
//! are resolved through [`lookup_ident`].

use super::ast::SourceLocation;
use rustc_hash::FxHashMap;
use std::fmt;
use std::sync::OnceLock;

/// Every kind of token the lexer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Illegal,
    EndOfInput,

    // Identifiers and literals
    Identifier,
    Integer,

    // Operators
    Assign,      // =
    Plus,        // +
    Minus,       // -
    Bang,        // !
    Asterisk,    // *
    Slash,       // /
    LessThan,    // <
    GreaterThan, // >

    // Delimiters
    Comma,     // ,
    Semicolon, // ;
    LParen,    // (
    RParen,    // )
    LBrace,    // {
    RBrace,    // }

    // Keywords
    Function,
    Let,
    Return,
}

impl TokenKind {
    /// Returns true for the reserved words `fn`, `let` and `return`.
    pub fn is_keyword(self) -> bool {
        matches!(self, TokenKind::Function | TokenKind::Let | TokenKind::Return)
    }

    /// Returns true for arithmetic and comparison operators.
    pub fn is_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Assign
                | TokenKind::Plus
                | TokenKind::Minus
                | TokenKind::Bang
                | TokenKind::Asterisk
                | TokenKind::Slash
                | TokenKind::LessThan
                | TokenKind::GreaterThan
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Illegal => write!(f, "illegal token"),
            TokenKind::EndOfInput => write!(f, "end of input"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Integer => write!(f, "integer literal"),
            TokenKind::Assign => write!(f, "'='"),
            TokenKind::Plus => write!(f, "'+'"),
            TokenKind::Minus => write!(f, "'-'"),
            TokenKind::Bang => write!(f, "'!'"),
            TokenKind::Asterisk => write!(f, "'*'"),
            TokenKind::Slash => write!(f, "'/'"),
            TokenKind::LessThan => write!(f, "'<'"),
            TokenKind::GreaterThan => write!(f, "'>'"),
            TokenKind::Comma => write!(f, "','"),
            TokenKind::Semicolon => write!(f, "';'"),
            TokenKind::LParen => write!(f, "'('"),
            TokenKind::RParen => write!(f, "')'"),
            TokenKind::LBrace => write!(f, "'{{'"),
            TokenKind::RBrace => write!(f, "'}}'"),
            TokenKind::Function => write!(f, "'fn'"),
            TokenKind::Let => write!(f, "'let'"),
            TokenKind::Return => write!(f, "'return'"),
        }
    }
}

/// A single lexical unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub literal: String,
    pub location: SourceLocation,
}

impl Token {
    pub fn new(kind: TokenKind, literal: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            kind,
            literal: literal.into(),
            location,
        }
    }

    /// Returns true if this token has the given kind.
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    /// Number of source characters covered by the literal.
    pub fn width(&self) -> usize {
        self.literal.chars().count()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Identifier => write!(f, "identifier '{}'", self.literal),
            TokenKind::Integer => write!(f, "integer literal {}", self.literal),
            TokenKind::Illegal => write!(f, "illegal character '{}'", self.literal),
            kind => write!(f, "{}", kind),
        }
    }
}

fn keywords() -> &'static FxHashMap<&'static str, TokenKind> {
    static KEYWORDS: OnceLock<FxHashMap<&'static str, TokenKind>> = OnceLock::new();
    KEYWORDS.get_or_init(|| {
        let mut table = FxHashMap::default();
        table.insert("fn", TokenKind::Function);
        table.insert("let", TokenKind::Let);
        table.insert("return", TokenKind::Return);
        table
    })
}

/// Resolve scanned word text to a keyword kind, or [`TokenKind::Identifier`].
pub fn lookup_ident(ident: &str) -> TokenKind {
    keywords()
        .get(ident)
        .copied()
        .unwrap_or(TokenKind::Identifier)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_keywords() {
        assert_eq!(lookup_ident("fn"), TokenKind::Function);
        assert_eq!(lookup_ident("let"), TokenKind::Let);
        assert_eq!(lookup_ident("return"), TokenKind::Return);
    }

    #[test]
    fn test_lookup_is_exact_match() {
        assert_eq!(lookup_ident("Let"), TokenKind::Identifier);
        assert_eq!(lookup_ident("letter"), TokenKind::Identifier);
        assert_eq!(lookup_ident("fn_"), TokenKind::Identifier);
        assert_eq!(lookup_ident("returns"), TokenKind::Identifier);
    }

    #[test]
    fn test_kind_display_names_expectations() {
        assert_eq!(TokenKind::Identifier.to_string(), "identifier");
        assert_eq!(TokenKind::Assign.to_string(), "'='");
        assert_eq!(TokenKind::LBrace.to_string(), "'{'");
        assert_eq!(TokenKind::EndOfInput.to_string(), "end of input");
    }

    #[test]
    fn test_token_width_counts_chars() {
        let token = Token::new(TokenKind::Identifier, "foobar", SourceLocation::new(1, 1));
        assert_eq!(token.width(), 6);
        assert!(token.is(TokenKind::Identifier));
        assert_eq!(token.to_string(), "identifier 'foobar'");
    }
}
