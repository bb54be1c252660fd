//! Lexer (tokenizer) for Quokka source code
//!
//! Converts raw source text into [`Token`]s one at a time. The lexer never
//! fails: characters it does not recognize become [`TokenKind::Illegal`]
//! tokens and are left for the parser to report. Once the input is
//! exhausted every further call yields [`TokenKind::EndOfInput`].

use super::ast::SourceLocation;
use super::token::{lookup_ident, Token, TokenKind};

/// Pull-based lexer over an in-memory source string
pub struct Lexer {
    input: Vec<char>,
    position: usize,
    line: usize,
    column: usize,
}

impl Lexer {
    /// Create a new lexer for the given source string.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
            line: 1,
            column: 1,
        }
    }

    /// Tokenize the entire input, including the trailing end-of-input token
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();

        loop {
            let token = self.next_token();
            let done = token.is(TokenKind::EndOfInput);
            tokens.push(token);
            if done {
                break;
            }
        }

        tokens
    }

    /// Scan and return the next token
    pub fn next_token(&mut self) -> Token {
        self.skip_whitespace();

        let loc = self.current_location();
        let ch = match self.advance() {
            Some(ch) => ch,
            None => return Token::new(TokenKind::EndOfInput, "", loc),
        };

        match ch {
            '0'..='9' => self.integer_literal(ch, loc),

            c if is_identifier_start(c) => self.identifier_or_keyword(ch, loc),

            '=' => Token::new(TokenKind::Assign, "=", loc),
            '+' => Token::new(TokenKind::Plus, "+", loc),
            '-' => Token::new(TokenKind::Minus, "-", loc),
            '!' => Token::new(TokenKind::Bang, "!", loc),
            '*' => Token::new(TokenKind::Asterisk, "*", loc),
            '/' => Token::new(TokenKind::Slash, "/", loc),
            '<' => Token::new(TokenKind::LessThan, "<", loc),
            '>' => Token::new(TokenKind::GreaterThan, ">", loc),
            ',' => Token::new(TokenKind::Comma, ",", loc),
            ';' => Token::new(TokenKind::Semicolon, ";", loc),
            '(' => Token::new(TokenKind::LParen, "(", loc),
            ')' => Token::new(TokenKind::RParen, ")", loc),
            '{' => Token::new(TokenKind::LBrace, "{", loc),
            '}' => Token::new(TokenKind::RBrace, "}", loc),

            _ => Token::new(TokenKind::Illegal, ch.to_string(), loc),
        }
    }

    /// Scan a run of decimal digits. Range checking happens in the parser.
    fn integer_literal(&mut self, first_digit: char, loc: SourceLocation) -> Token {
        let mut digits = String::new();
        digits.push(first_digit);

        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                digits.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(TokenKind::Integer, digits, loc)
    }

    fn identifier_or_keyword(&mut self, first_char: char, loc: SourceLocation) -> Token {
        let mut ident = String::new();
        ident.push(first_char);

        while let Some(ch) = self.peek() {
            if is_identifier_continue(ch) {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::new(lookup_ident(&ident), ident, loc)
    }

    fn skip_whitespace(&mut self) {
        while let Some(' ' | '\t' | '\r' | '\n') = self.peek() {
            self.advance();
        }
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;

        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }

        Some(ch)
    }

    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.line, self.column)
    }
}

fn is_identifier_start(ch: char) -> bool {
    ch.is_ascii_alphabetic() || ch == '_'
}

fn is_identifier_continue(ch: char) -> bool {
    ch.is_ascii_alphanumeric() || ch == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::new(source).tokenize().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_single_character_tokens() {
        assert_eq!(
            kinds("=+(){},;"),
            vec![
                TokenKind::Assign,
                TokenKind::Plus,
                TokenKind::LParen,
                TokenKind::RParen,
                TokenKind::LBrace,
                TokenKind::RBrace,
                TokenKind::Comma,
                TokenKind::Semicolon,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_operators() {
        assert_eq!(
            kinds("!-/*5 < 10 > 5"),
            vec![
                TokenKind::Bang,
                TokenKind::Minus,
                TokenKind::Slash,
                TokenKind::Asterisk,
                TokenKind::Integer,
                TokenKind::LessThan,
                TokenKind::Integer,
                TokenKind::GreaterThan,
                TokenKind::Integer,
                TokenKind::EndOfInput,
            ]
        );
    }

    #[test]
    fn test_let_statement_tokens() {
        let tokens = Lexer::new("let five = 5;").tokenize();

        assert!(tokens[0].is(TokenKind::Let));
        assert_eq!(tokens[0].literal, "let");
        assert!(tokens[1].is(TokenKind::Identifier));
        assert_eq!(tokens[1].literal, "five");
        assert!(tokens[2].is(TokenKind::Assign));
        assert!(tokens[3].is(TokenKind::Integer));
        assert_eq!(tokens[3].literal, "5");
        assert!(tokens[4].is(TokenKind::Semicolon));
        assert!(tokens[5].is(TokenKind::EndOfInput));
        assert_eq!(tokens[5].literal, "");
    }

    #[test]
    fn test_identifiers_allow_digits_and_underscores() {
        let tokens = Lexer::new("_tmp x1 foo_bar2").tokenize();

        let literals: Vec<&str> = tokens.iter().map(|t| t.literal.as_str()).collect();
        assert_eq!(literals, vec!["_tmp", "x1", "foo_bar2", ""]);
        assert!(tokens[..3].iter().all(|t| t.is(TokenKind::Identifier)));
    }

    #[test]
    fn test_digits_then_letters_split() {
        let tokens = Lexer::new("123abc").tokenize();

        assert!(tokens[0].is(TokenKind::Integer));
        assert_eq!(tokens[0].literal, "123");
        assert!(tokens[1].is(TokenKind::Identifier));
        assert_eq!(tokens[1].literal, "abc");
    }

    #[test]
    fn test_illegal_character() {
        let tokens = Lexer::new("a @ b").tokenize();

        assert!(tokens[1].is(TokenKind::Illegal));
        assert_eq!(tokens[1].literal, "@");
        assert!(tokens[2].is(TokenKind::Identifier));
    }

    #[test]
    fn test_end_of_input_is_sticky() {
        let mut lexer = Lexer::new("x");

        assert!(lexer.next_token().is(TokenKind::Identifier));
        for _ in 0..3 {
            let token = lexer.next_token();
            assert!(token.is(TokenKind::EndOfInput));
            assert_eq!(token.literal, "");
        }
    }

    #[test]
    fn test_locations() {
        let tokens = Lexer::new("let x\n  = 5").tokenize();

        assert_eq!(tokens[0].location, SourceLocation::new(1, 1));
        assert_eq!(tokens[1].location, SourceLocation::new(1, 5));
        assert_eq!(tokens[2].location, SourceLocation::new(2, 3));
        assert_eq!(tokens[3].location, SourceLocation::new(2, 5));
    }
}
